//! Base-map vector data: land polygons and national borders.
//!
//! A coarse world outline ships with the crate so the tool runs without any
//! input file. Higher resolution data (for example Natural Earth) can be
//! supplied as GeoJSON `FeatureCollection`s. Coastlines are the rings of the
//! land polygons.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{CartoError, Result};

/// A longitude/latitude pair in degrees
pub type LonLat = (f64, f64);

/// Land polygons and border polylines, in plain longitude/latitude
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoFeatures {
    land: Vec<Vec<LonLat>>,
    borders: Vec<Vec<LonLat>>,
}

static BUILTIN: Lazy<Arc<GeoFeatures>> = Lazy::new(|| {
    Arc::new(GeoFeatures {
        land: BUILTIN_LAND.iter().map(|ring| ring.to_vec()).collect(),
        borders: BUILTIN_BORDERS.iter().map(|line| line.to_vec()).collect(),
    })
});

impl GeoFeatures {
    pub fn new(land: Vec<Vec<LonLat>>, borders: Vec<Vec<LonLat>>) -> Self {
        Self { land, borders }
    }

    /// The coarse outline compiled into the crate
    pub fn builtin() -> Arc<GeoFeatures> {
        Arc::clone(&BUILTIN)
    }

    /// Load features, replacing each built-in set with a GeoJSON file when one
    /// is given
    pub fn load(land: Option<&Path>, borders: Option<&Path>) -> Result<Arc<GeoFeatures>> {
        if land.is_none() && borders.is_none() {
            debug!("Using built-in base-map outline");
            return Ok(Self::builtin());
        }

        let builtin = Self::builtin();
        let land = match land {
            Some(path) => read_collection(path)?.polygons,
            None => builtin.land.clone(),
        };
        let borders = match borders {
            Some(path) => read_collection(path)?.lines,
            None => builtin.borders.clone(),
        };

        info!(
            land_rings = land.len(),
            border_lines = borders.len(),
            "Loaded base-map data"
        );

        Ok(Arc::new(GeoFeatures { land, borders }))
    }

    /// Land polygons as closed rings
    pub fn land(&self) -> &[Vec<LonLat>] {
        &self.land
    }

    /// Coastlines: the outlines of the land polygons
    pub fn coastlines(&self) -> &[Vec<LonLat>] {
        &self.land
    }

    /// National border polylines
    pub fn borders(&self) -> &[Vec<LonLat>] {
        &self.borders
    }

    /// Even-odd test of whether a point falls on land
    pub fn contains_land(&self, lon: f64, lat: f64) -> bool {
        self.land
            .iter()
            .filter(|ring| point_in_ring(lon, lat, ring))
            .count()
            % 2
            == 1
    }
}

/// Ray-casting point-in-polygon test
pub fn point_in_ring(x: f64, y: f64, ring: &[LonLat]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Geometries extracted from one GeoJSON document
#[derive(Debug, Default)]
struct Collection {
    polygons: Vec<Vec<LonLat>>,
    lines: Vec<Vec<LonLat>>,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: serde_json::Value,
}

fn read_collection(path: &Path) -> Result<Collection> {
    let content = std::fs::read_to_string(path)?;
    parse_collection(&content).map_err(|e| match e {
        CartoError::GeoData { message } => CartoError::GeoData {
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    })
}

fn parse_collection(content: &str) -> Result<Collection> {
    let collection: FeatureCollection = serde_json::from_str(content)?;
    if collection.kind != "FeatureCollection" {
        return Err(CartoError::GeoData {
            message: format!("Expected a FeatureCollection, found {}", collection.kind),
        });
    }

    let mut out = Collection::default();
    for geometry in collection.features.into_iter().filter_map(|f| f.geometry) {
        match geometry.kind.as_str() {
            "Polygon" => {
                let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(geometry.coordinates)?;
                let paths = rings.iter().map(|r| to_path(r)).collect::<Result<Vec<_>>>()?;
                out.polygons.extend(paths);
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<Vec<f64>>>> =
                    serde_json::from_value(geometry.coordinates)?;
                for rings in &polygons {
                    let paths = rings.iter().map(|r| to_path(r)).collect::<Result<Vec<_>>>()?;
                    out.polygons.extend(paths);
                }
            }
            "LineString" => {
                let line: Vec<Vec<f64>> = serde_json::from_value(geometry.coordinates)?;
                out.lines.push(to_path(&line)?);
            }
            "MultiLineString" => {
                let lines: Vec<Vec<Vec<f64>>> = serde_json::from_value(geometry.coordinates)?;
                out.lines.extend(lines.iter().map(|l| to_path(l)).collect::<Result<Vec<_>>>()?);
            }
            other => debug!(geometry = other, "Skipping unsupported geometry"),
        }
    }

    Ok(out)
}

fn to_path(positions: &[Vec<f64>]) -> Result<Vec<LonLat>> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Ok((*lon, *lat)),
            _ => Err(CartoError::GeoData {
                message: format!("Position needs at least 2 coordinates, got {:?}", position),
            }),
        })
        .collect()
}

const NORTH_AMERICA: &[LonLat] = &[
    (-166.0, 68.5), (-156.0, 71.3), (-141.0, 69.7), (-128.0, 70.2), (-117.0, 68.8),
    (-105.0, 68.0), (-95.0, 67.0), (-88.0, 68.5), (-82.0, 66.0), (-86.0, 62.0),
    (-94.0, 59.0), (-92.0, 57.0), (-82.0, 55.0), (-79.5, 51.5), (-78.0, 58.0),
    (-77.0, 62.0), (-70.0, 60.0), (-64.0, 60.0), (-61.0, 55.5), (-56.0, 52.0),
    (-59.0, 48.0), (-65.0, 49.0), (-66.0, 45.0), (-70.0, 43.5), (-70.0, 41.7),
    (-74.0, 40.5), (-76.0, 38.0), (-76.0, 35.0), (-81.0, 31.5), (-80.0, 27.0),
    (-80.5, 25.2), (-82.0, 26.5), (-83.0, 29.5), (-86.0, 30.3), (-89.0, 30.2),
    (-94.0, 29.5), (-97.0, 27.5), (-97.5, 22.0), (-96.0, 19.0), (-94.0, 18.2),
    (-91.0, 19.0), (-90.5, 21.0), (-87.0, 21.5), (-88.0, 16.0), (-84.0, 15.8),
    (-83.3, 11.0), (-81.5, 9.0), (-79.0, 9.5), (-77.5, 8.5), (-79.0, 7.3),
    (-80.5, 7.5), (-83.0, 8.5), (-86.0, 11.0), (-88.0, 13.2), (-92.0, 14.5),
    (-95.0, 16.0), (-97.0, 16.0), (-101.0, 17.5), (-105.0, 20.0), (-106.0, 23.0),
    (-109.0, 25.5), (-112.5, 29.5), (-114.5, 31.5), (-112.0, 28.0), (-110.0, 24.0),
    (-112.0, 25.0), (-114.0, 27.5), (-116.0, 30.5), (-117.0, 32.5), (-120.5, 34.5),
    (-122.5, 37.5), (-124.0, 40.5), (-124.5, 43.0), (-124.0, 46.0), (-124.7, 48.4),
    (-123.0, 49.0), (-127.0, 51.0), (-130.0, 54.5), (-133.0, 57.5), (-137.0, 58.8),
    (-141.0, 60.0), (-146.0, 61.0), (-151.0, 59.5), (-154.0, 57.5), (-158.0, 56.5),
    (-162.0, 55.0), (-164.0, 54.8), (-158.0, 58.0), (-162.0, 59.5), (-165.0, 61.0),
    (-165.0, 63.0), (-161.0, 64.5), (-166.0, 65.5),
];

const GREENLAND: &[LonLat] = &[
    (-73.0, 78.0), (-66.0, 81.0), (-50.0, 82.5), (-32.0, 83.5), (-20.0, 82.0),
    (-18.0, 77.0), (-20.0, 72.5), (-24.0, 69.5), (-32.0, 68.0), (-40.0, 65.0),
    (-43.0, 60.0), (-48.0, 61.0), (-51.0, 64.0), (-54.0, 67.5), (-55.0, 71.0),
    (-61.0, 76.0), (-68.0, 77.0),
];

const SOUTH_AMERICA: &[LonLat] = &[
    (-77.5, 8.5), (-75.0, 11.0), (-72.0, 12.0), (-68.0, 10.7), (-62.0, 10.7),
    (-60.0, 8.5), (-57.0, 6.0), (-52.0, 5.0), (-50.0, 1.5), (-48.0, -1.0),
    (-44.0, -2.5), (-39.0, -3.5), (-35.0, -5.5), (-35.0, -9.0), (-39.0, -13.5),
    (-39.0, -18.0), (-41.0, -22.0), (-45.0, -23.5), (-48.5, -26.0), (-48.5, -28.5),
    (-53.0, -33.5), (-57.0, -36.0), (-57.0, -38.5), (-62.0, -39.0), (-65.0, -41.0),
    (-63.0, -42.5), (-65.5, -45.0), (-67.5, -46.5), (-66.0, -48.0), (-69.0, -51.0),
    (-68.5, -52.5), (-70.0, -53.5), (-73.0, -53.0), (-75.0, -50.0), (-74.0, -46.0),
    (-73.5, -42.0), (-73.5, -37.0), (-71.5, -32.0), (-71.5, -28.0), (-70.5, -23.0),
    (-70.0, -18.5), (-73.0, -16.0), (-76.0, -14.0), (-78.0, -10.5), (-80.0, -7.5),
    (-81.0, -5.0), (-80.0, -1.0), (-80.0, 1.0), (-78.5, 2.5), (-77.5, 4.0),
    (-77.5, 7.0),
];

const EURASIA: &[LonLat] = &[
    (-9.5, 43.0), (-9.0, 38.7), (-8.8, 37.0), (-6.0, 36.2), (-2.0, 36.8),
    (0.0, 38.8), (0.5, 40.5), (3.2, 42.0), (3.0, 43.3), (6.0, 43.1),
    (8.5, 44.3), (10.5, 43.5), (12.5, 41.7), (15.6, 40.0), (16.0, 38.0),
    (16.5, 39.5), (18.5, 40.2), (16.0, 41.5), (13.5, 43.6), (12.3, 45.4),
    (13.7, 45.6), (15.0, 44.8), (17.5, 43.0), (19.5, 41.8), (19.3, 40.4),
    (21.0, 38.3), (22.7, 36.5), (23.2, 38.3), (22.6, 40.3), (24.0, 40.8),
    (26.2, 40.0), (26.5, 38.5), (27.3, 37.0), (28.5, 36.6), (30.5, 36.3),
    (32.5, 36.1), (34.5, 36.8), (36.0, 36.5), (35.8, 34.5), (35.0, 33.0),
    (34.3, 31.3), (34.9, 29.5), (36.7, 26.0), (39.0, 21.5), (41.0, 17.0),
    (43.3, 12.7), (45.0, 12.8), (48.5, 14.0), (52.0, 15.5), (55.0, 17.3),
    (57.0, 18.9), (59.8, 22.5), (58.0, 23.8), (56.4, 26.3), (54.5, 24.2),
    (51.6, 24.3), (51.0, 26.0), (48.5, 28.3), (48.0, 30.0), (50.0, 30.2),
    (51.5, 27.9), (54.0, 26.6), (57.0, 25.7), (61.5, 25.1), (66.5, 25.4),
    (67.5, 24.0), (70.0, 22.0), (72.8, 21.0), (73.0, 17.0), (74.5, 14.0),
    (76.3, 9.5), (77.5, 8.0), (79.8, 10.3), (80.2, 13.0), (80.3, 15.8),
    (82.3, 16.6), (85.0, 19.3), (87.0, 21.5), (89.0, 22.0), (91.5, 22.5),
    (92.5, 20.5), (94.5, 17.5), (94.3, 16.0), (97.5, 16.5), (98.5, 13.5),
    (98.6, 10.0), (98.3, 8.0), (100.3, 5.5), (101.3, 2.8), (103.5, 1.3),
    (104.2, 1.4), (103.4, 4.2), (102.2, 6.2), (100.5, 7.5), (100.0, 12.5),
    (100.9, 13.5), (102.5, 12.0), (105.0, 8.6), (106.8, 10.4), (109.2, 11.6),
    (109.3, 13.5), (108.3, 16.0), (106.5, 18.0), (105.7, 19.0), (106.7, 20.7),
    (108.5, 21.7), (110.5, 21.2), (113.5, 22.2), (116.5, 22.9), (119.5, 25.5),
    (121.0, 28.0), (122.0, 30.0), (121.0, 32.5), (119.5, 34.5), (120.5, 36.5),
    (122.5, 37.2), (119.0, 37.5), (118.0, 38.5), (117.8, 39.2), (121.0, 40.9),
    (121.5, 39.0), (124.3, 39.9), (126.0, 37.7), (126.5, 34.5), (129.3, 35.3),
    (129.5, 37.0), (128.5, 38.5), (129.7, 41.0), (131.0, 42.6), (135.5, 43.6),
    (138.2, 46.5), (140.5, 50.0), (141.4, 53.3), (137.3, 54.0), (135.2, 54.8),
    (138.0, 56.5), (142.5, 59.3), (148.0, 59.3), (152.0, 59.0), (155.0, 59.3),
    (156.0, 57.0), (156.5, 51.2), (158.5, 52.9), (162.0, 56.2), (163.3, 58.0),
    (163.0, 60.0), (166.0, 60.3), (170.5, 60.0), (177.0, 62.5), (180.0, 65.0),
    (180.0, 68.9), (176.0, 69.8), (170.0, 70.0), (160.0, 69.6), (152.0, 70.9),
    (143.0, 72.7), (140.0, 72.5), (130.0, 71.0), (128.0, 72.9), (122.0, 73.0),
    (113.0, 73.7), (110.0, 76.5), (104.0, 77.7), (98.0, 76.0), (90.0, 75.6),
    (87.0, 74.9), (80.5, 73.6), (80.5, 72.0), (72.5, 72.8), (69.0, 73.0),
    (68.5, 70.0), (66.5, 71.0), (60.0, 69.0), (55.0, 68.4), (47.0, 67.7),
    (44.0, 68.5), (40.0, 66.0), (35.0, 66.3), (41.0, 67.5), (33.0, 69.3),
    (29.0, 70.0), (24.0, 71.0), (18.0, 69.7), (14.0, 68.0), (12.0, 65.0),
    (8.5, 63.5), (5.0, 62.0), (5.0, 59.0), (7.0, 58.0), (8.5, 58.5),
    (10.5, 59.5), (11.0, 58.9), (12.0, 57.5), (12.6, 56.0), (10.5, 57.7),
    (8.0, 56.9), (8.2, 55.0), (9.0, 54.2), (8.0, 53.5), (5.0, 53.3),
    (4.0, 51.5), (1.6, 50.9), (1.2, 49.8), (-1.4, 48.7), (-4.6, 48.4),
    (-2.2, 47.2), (-1.2, 46.1), (-1.4, 44.0), (-1.7, 43.4), (-4.0, 43.4),
    (-8.0, 43.7),
];

const GREAT_BRITAIN: &[LonLat] = &[
    (-5.7, 50.0), (-3.0, 50.7), (1.4, 51.2), (1.7, 52.7), (0.2, 53.5),
    (-1.6, 55.6), (-2.0, 57.6), (-3.2, 58.6), (-5.0, 58.6), (-6.2, 56.8),
    (-5.0, 55.0), (-3.0, 54.0), (-3.0, 53.3), (-4.6, 53.0), (-4.2, 52.2),
    (-5.2, 51.7), (-3.0, 51.4),
];

const JAPAN: &[LonLat] = &[
    (130.0, 31.2), (131.5, 31.5), (132.0, 33.8), (135.0, 33.5), (136.8, 34.3),
    (139.0, 34.8), (140.8, 35.7), (141.0, 38.0), (142.0, 39.8), (141.5, 41.4),
    (143.2, 42.0), (145.5, 43.3), (145.0, 44.2), (141.8, 45.4), (140.0, 42.5),
    (139.9, 40.4), (138.5, 37.5), (136.8, 37.2), (135.5, 35.6), (131.0, 34.5),
];

const AFRICA: &[LonLat] = &[
    (-17.0, 21.0), (-17.0, 14.5), (-15.5, 11.0), (-13.0, 8.0), (-11.5, 6.8),
    (-7.5, 4.4), (-4.0, 5.2), (-1.0, 5.0), (2.0, 6.3), (4.5, 6.3),
    (6.0, 4.3), (8.5, 4.5), (9.7, 3.5), (9.5, 1.0), (9.2, -1.0),
    (11.5, -4.0), (12.3, -6.1), (13.5, -10.0), (12.0, -14.5), (11.8, -17.5),
    (14.5, -22.5), (15.2, -27.0), (16.5, -28.6), (18.3, -32.0), (18.5, -34.1),
    (20.0, -34.8), (22.5, -34.0), (25.6, -33.9), (28.0, -32.6), (30.5, -30.5),
    (32.5, -28.5), (32.6, -26.0), (35.4, -24.0), (35.5, -21.5), (34.8, -19.8),
    (37.0, -17.5), (40.5, -15.0), (40.5, -10.5), (39.3, -7.0), (39.2, -4.7),
    (41.0, -1.8), (43.5, 1.5), (46.5, 4.5), (49.2, 8.5), (51.2, 11.8),
    (48.0, 11.2), (44.5, 10.5), (43.2, 12.0), (41.5, 14.5), (39.5, 15.5),
    (38.5, 18.0), (37.3, 21.0), (36.0, 24.0), (34.5, 26.8), (33.5, 28.0),
    (32.5, 29.8), (32.3, 31.2), (29.0, 30.9), (25.0, 31.6), (20.0, 30.9),
    (19.5, 30.3), (18.0, 30.7), (15.5, 31.8), (11.5, 33.1), (10.3, 33.7),
    (11.1, 35.2), (10.2, 37.2), (8.0, 36.9), (3.0, 36.8), (-1.0, 35.6),
    (-2.0, 35.1), (-5.9, 35.8), (-6.5, 34.0), (-9.5, 32.5), (-9.8, 29.6),
    (-13.0, 27.7), (-14.5, 26.0), (-16.5, 22.5),
];

const MADAGASCAR: &[LonLat] = &[
    (49.3, -12.0), (50.5, -15.5), (49.5, -17.5), (47.0, -25.0), (45.0, -25.5),
    (43.5, -22.0), (44.0, -17.0), (46.5, -15.8), (48.0, -13.5),
];

const AUSTRALIA: &[LonLat] = &[
    (113.5, -22.0), (114.0, -26.5), (115.0, -30.0), (115.6, -33.5), (117.8, -35.0),
    (121.0, -33.8), (124.0, -33.0), (129.0, -31.6), (131.2, -31.5), (134.2, -32.8),
    (135.6, -34.8), (137.8, -32.7), (137.5, -35.5), (140.0, -37.8), (143.5, -38.8),
    (146.4, -39.1), (150.0, -37.5), (151.0, -34.0), (153.1, -30.5), (153.0, -25.3),
    (150.8, -22.5), (149.0, -20.5), (146.3, -18.9), (145.3, -15.0), (143.5, -14.0),
    (142.5, -10.7), (141.5, -13.0), (141.6, -16.7), (140.5, -17.6), (139.0, -17.3),
    (135.5, -15.0), (136.8, -12.2), (132.5, -11.5), (130.0, -13.0), (129.5, -14.9),
    (127.0, -14.0), (125.0, -15.0), (123.0, -16.5), (122.2, -18.0), (121.0, -19.5),
    (117.0, -20.6),
];

const ANTARCTICA: &[LonLat] = &[
    (-180.0, -90.0), (-180.0, -78.0), (-165.0, -78.0), (-150.0, -76.5), (-135.0, -74.5),
    (-120.0, -73.8), (-100.0, -73.0), (-80.0, -73.0), (-68.0, -71.0), (-62.0, -65.0),
    (-57.5, -63.3), (-60.0, -66.0), (-63.0, -69.0), (-61.0, -72.5), (-60.0, -75.0),
    (-50.0, -77.8), (-35.0, -78.0), (-25.0, -75.5), (-15.0, -72.5), (0.0, -70.0),
    (15.0, -70.0), (30.0, -69.5), (45.0, -67.5), (60.0, -67.0), (70.0, -68.0),
    (80.0, -67.0), (90.0, -66.5), (100.0, -66.0), (115.0, -66.5), (130.0, -66.2),
    (145.0, -67.0), (160.0, -70.0), (170.0, -72.0), (165.0, -77.5), (180.0, -78.0),
    (180.0, -90.0),
];

const BUILTIN_LAND: &[&[LonLat]] = &[
    NORTH_AMERICA,
    GREENLAND,
    SOUTH_AMERICA,
    EURASIA,
    GREAT_BRITAIN,
    JAPAN,
    AFRICA,
    MADAGASCAR,
    AUSTRALIA,
    ANTARCTICA,
];

const BUILTIN_BORDERS: &[&[LonLat]] = &[
    // Canada / United States
    &[
        (-123.0, 49.0), (-95.0, 49.0), (-89.5, 48.0), (-84.5, 46.5), (-82.5, 45.3),
        (-82.5, 42.0), (-79.0, 43.3), (-76.5, 44.2), (-74.7, 45.0), (-71.5, 45.0),
        (-69.2, 47.4), (-67.8, 47.1), (-67.2, 45.2),
    ],
    &[(-141.0, 60.3), (-141.0, 69.6)],
    // United States / Mexico
    &[
        (-117.1, 32.5), (-114.7, 32.7), (-111.0, 31.3), (-108.2, 31.3), (-106.5, 31.8),
        (-104.5, 29.6), (-103.0, 29.0), (-101.4, 29.8), (-99.5, 27.5), (-97.2, 25.9),
    ],
    // Brazil
    &[
        (-51.6, 4.2), (-60.0, 5.2), (-63.0, 3.9), (-67.5, 2.0), (-69.9, -4.2),
        (-73.0, -7.5), (-69.5, -11.0), (-65.0, -10.0), (-60.0, -13.5), (-58.0, -16.3),
        (-55.5, -22.3), (-54.6, -25.6), (-57.6, -30.2), (-53.4, -33.7),
    ],
    // Chile / Argentina
    &[
        (-68.4, -22.5), (-70.0, -28.0), (-70.0, -33.0), (-71.2, -39.0), (-71.8, -44.0),
        (-72.0, -49.0), (-69.0, -52.0),
    ],
    // France / Spain
    &[(-1.8, 43.4), (0.7, 42.8), (3.2, 42.4)],
    // France, Belgium, Germany, Switzerland, Italy
    &[
        (2.5, 51.1), (4.2, 49.9), (6.1, 49.5), (8.2, 49.0), (7.6, 47.6),
        (6.8, 47.3), (6.0, 46.2), (7.0, 45.8), (7.6, 43.8),
    ],
    // Germany / Poland, Czechia, Austria
    &[
        (14.3, 53.9), (14.6, 52.6), (14.9, 51.0), (12.1, 50.3), (13.8, 48.8),
        (13.0, 47.5), (10.2, 47.3), (7.6, 47.6),
    ],
    // Russia, western border
    &[
        (28.0, 69.5), (30.0, 67.7), (29.5, 65.0), (31.5, 62.8), (27.8, 57.8),
        (28.2, 56.2), (31.5, 52.5), (33.5, 52.3), (40.0, 49.6), (38.2, 47.1),
    ],
    // Russia / Kazakhstan, Mongolia, China
    &[
        (47.6, 50.4), (52.0, 51.5), (61.0, 50.8), (69.0, 55.3), (76.5, 54.0),
        (87.3, 49.1), (98.0, 52.0), (107.0, 50.2), (116.7, 49.8), (119.7, 50.0),
        (121.0, 53.3), (127.5, 49.6), (131.0, 47.7), (135.0, 48.3), (131.0, 44.9),
        (130.6, 42.5),
    ],
    // China / India, Nepal, Bhutan
    &[
        (74.5, 37.0), (78.0, 35.5), (79.0, 32.5), (81.0, 30.2), (88.0, 27.9),
        (92.0, 27.8), (97.3, 28.2),
    ],
    // India / Pakistan
    &[(74.5, 37.0), (74.0, 33.0), (74.5, 31.0), (71.0, 28.0), (69.5, 24.2), (68.2, 23.7)],
    // Egypt / Libya, Sudan
    &[(25.0, 31.6), (25.0, 22.0), (37.0, 22.0)],
    // Western Sahara and the Sahel
    &[
        (-8.7, 27.7), (-8.7, 25.9), (-12.0, 25.9), (-12.0, 23.4), (-17.0, 21.3),
    ],
    &[(-4.8, 25.0), (4.0, 19.1), (12.0, 23.5), (14.0, 22.6), (24.0, 19.5)],
    // Central Africa
    &[
        (12.2, -5.7), (16.0, -5.9), (21.0, -7.3), (24.0, -11.0), (29.5, -12.2),
        (30.5, -8.3), (29.0, -4.5), (29.6, -1.4),
    ],
    // South Africa
    &[(16.5, -28.6), (20.0, -24.8), (25.5, -25.6), (31.3, -22.4)],
];
