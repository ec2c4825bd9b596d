//! Map projections for displaying global data.
//!
//! Two projections are supported: the equirectangular `PlateCarree`, which
//! maps longitude and latitude linearly to x and y, and the pseudo-cylindrical
//! `Robinson`, a compromise between area and shape distortion.
//!
//! Every layer carries the projection its input coordinates are expressed in
//! (its source CRS). A panel reprojects those coordinates into its own
//! projection with [`MapProjection::transform_from`].

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{CartoError, Result};

/// Robinson table: fractional parallel length at 5 degree latitude steps
const ROBINSON_PLEN: [f64; 19] = [
    1.0000, 0.9986, 0.9954, 0.9900, 0.9822, 0.9730, 0.9600, 0.9427, 0.9216, 0.8962, 0.8679,
    0.8350, 0.7986, 0.7597, 0.7186, 0.6732, 0.6213, 0.5722, 0.5322,
];

/// Robinson table: fractional distance of the parallel from the equator
const ROBINSON_PDFE: [f64; 19] = [
    0.0000, 0.0620, 0.1240, 0.1860, 0.2480, 0.3100, 0.3720, 0.4340, 0.4958, 0.5571, 0.6176,
    0.6769, 0.7346, 0.7903, 0.8435, 0.8936, 0.9394, 0.9761, 1.0000,
];

const ROBINSON_X_SCALE: f64 = 0.8487;
const ROBINSON_Y_SCALE: f64 = 1.3523;

/// Tolerance when deciding whether a projected point lies on the globe
const EDGE_EPSILON: f64 = 1e-9;

/// Map projection types for displaying global data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapProjection {
    /// Equirectangular: x = longitude, y = latitude, in degrees
    PlateCarree,
    /// Robinson pseudo-cylindrical projection on the unit sphere
    Robinson,
}

impl MapProjection {
    /// Create a MapProjection from a string
    pub fn parse_projection(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "platecarree" | "plate_carree" | "equirectangular" => Ok(MapProjection::PlateCarree),
            "robinson" => Ok(MapProjection::Robinson),
            _ => Err(CartoError::Projection {
                message: format!("Unknown map projection: {}", s),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MapProjection::PlateCarree => "PlateCarree",
            MapProjection::Robinson => "Robinson",
        }
    }

    /// Half-width and half-height of the projected globe
    pub fn extent(&self) -> (f64, f64) {
        match self {
            MapProjection::PlateCarree => (180.0, 90.0),
            MapProjection::Robinson => (ROBINSON_X_SCALE * PI, ROBINSON_Y_SCALE),
        }
    }

    /// Width over height of the projected globe
    pub fn aspect_ratio(&self) -> f64 {
        let (half_width, half_height) = self.extent();
        half_width / half_height
    }

    /// Project a longitude/latitude pair (degrees) to map coordinates.
    ///
    /// Longitudes beyond the dateline wrap around; latitudes are clamped.
    pub fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lon = if lon.abs() > 180.0 {
            normalize_longitude(lon)
        } else {
            lon
        };
        let lat = lat.clamp(-90.0, 90.0);
        match self {
            MapProjection::PlateCarree => (lon, lat),
            MapProjection::Robinson => {
                let (plen, pdfe) = robinson_coefficients(lat.abs());
                let x = ROBINSON_X_SCALE * plen * lon.to_radians();
                let y = ROBINSON_Y_SCALE * pdfe * lat.signum();
                (x, y)
            }
        }
    }

    /// Map coordinates back to longitude/latitude.
    ///
    /// Returns `None` for points outside the projected globe.
    pub fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (half_width, half_height) = self.extent();
        if !x.is_finite() || !y.is_finite() || y.abs() > half_height + EDGE_EPSILON {
            return None;
        }

        match self {
            MapProjection::PlateCarree => {
                if x.abs() > half_width + EDGE_EPSILON {
                    return None;
                }
                Some((x.clamp(-180.0, 180.0), y.clamp(-90.0, 90.0)))
            }
            MapProjection::Robinson => {
                let abs_lat = robinson_latitude(y.abs() / ROBINSON_Y_SCALE);
                let (plen, _) = robinson_coefficients(abs_lat);
                let lon = (x / (ROBINSON_X_SCALE * plen)).to_degrees();
                if lon.abs() > 180.0 + EDGE_EPSILON {
                    return None;
                }
                let lat = if y < 0.0 { -abs_lat } else { abs_lat };
                Some((lon.clamp(-180.0, 180.0), lat))
            }
        }
    }

    /// Reproject a point given in `source` map coordinates into this projection
    pub fn transform_from(&self, source: MapProjection, x: f64, y: f64) -> Option<(f64, f64)> {
        if source == *self {
            return Some((x, y));
        }
        let (lon, lat) = source.inverse(x, y)?;
        Some(self.forward(lon, lat))
    }

    /// Project a longitude/latitude path, inserting intermediate vertices so
    /// that no step exceeds `max_step` degrees before projection.
    pub fn project_path(&self, path: &[(f64, f64)], max_step: f64) -> Vec<(f64, f64)> {
        let mut projected = Vec::with_capacity(path.len());
        let Some(&first) = path.first() else {
            return projected;
        };
        projected.push(self.forward(first.0, first.1));

        for pair in path.windows(2) {
            let (lon0, lat0) = pair[0];
            let (lon1, lat1) = pair[1];
            let span = (lon1 - lon0).abs().max((lat1 - lat0).abs());
            let steps = if max_step > 0.0 {
                (span / max_step).ceil().max(1.0) as usize
            } else {
                1
            };
            for k in 1..=steps {
                let t = k as f64 / steps as f64;
                projected.push(self.forward(lon0 + (lon1 - lon0) * t, lat0 + (lat1 - lat0) * t));
            }
        }

        projected
    }

    /// Outline of the projected globe, as a closed path in map coordinates
    pub fn boundary(&self) -> Vec<(f64, f64)> {
        let mut outline = Vec::new();
        // East edge south to north, then west edge north to south
        for k in 0..=180 {
            outline.push(self.forward(180.0, -90.0 + k as f64));
        }
        for k in 0..=180 {
            outline.push(self.forward(-180.0, 90.0 - k as f64));
        }
        outline.push(outline[0]);
        outline
    }
}

impl FromStr for MapProjection {
    type Err = CartoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MapProjection::parse_projection(s)
    }
}

impl fmt::Display for MapProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Interpolated (PLEN, PDFE) for an absolute latitude in degrees
fn robinson_coefficients(abs_lat: f64) -> (f64, f64) {
    let position = (abs_lat / 5.0).clamp(0.0, 18.0);
    let index = (position.floor() as usize).min(17);
    let t = position - index as f64;

    let plen = ROBINSON_PLEN[index] + t * (ROBINSON_PLEN[index + 1] - ROBINSON_PLEN[index]);
    let pdfe = ROBINSON_PDFE[index] + t * (ROBINSON_PDFE[index + 1] - ROBINSON_PDFE[index]);
    (plen, pdfe)
}

/// Absolute latitude for a normalized PDFE value in [0, 1]
fn robinson_latitude(pdfe: f64) -> f64 {
    let pdfe = pdfe.clamp(0.0, 1.0);
    let upper = ROBINSON_PDFE
        .iter()
        .position(|&v| v >= pdfe)
        .unwrap_or(ROBINSON_PDFE.len() - 1)
        .max(1);
    let lower = upper - 1;
    let t = (pdfe - ROBINSON_PDFE[lower]) / (ROBINSON_PDFE[upper] - ROBINSON_PDFE[lower]);
    5.0 * (lower as f64 + t)
}

/// Normalize a longitude value to the range [-180, 180)
pub fn normalize_longitude(lon: f64) -> f64 {
    let mut normalized = ((lon + 180.0) % 360.0 + 360.0) % 360.0 - 180.0;

    // Exactly 180 folds onto -180
    if normalized == 180.0 {
        normalized = -180.0;
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: (f64, f64), b: (f64, f64), eps: f64) {
        assert!(
            (a.0 - b.0).abs() < eps && (a.1 - b.1).abs() < eps,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_map_projection_from_str() {
        assert_eq!(
            MapProjection::from_str("PlateCarree").unwrap(),
            MapProjection::PlateCarree
        );
        assert_eq!(
            MapProjection::from_str("equirectangular").unwrap(),
            MapProjection::PlateCarree
        );
        assert_eq!(
            MapProjection::from_str("robinson").unwrap(),
            MapProjection::Robinson
        );
        assert!(matches!(
            MapProjection::from_str("mercator"),
            Err(CartoError::Projection { .. })
        ));
        assert_eq!(MapProjection::Robinson.to_string(), "Robinson");
    }

    #[test]
    fn test_plate_carree_is_identity() {
        let p = MapProjection::PlateCarree;
        assert_eq!(p.forward(-80.0, 10.0), (-80.0, 10.0));
        assert_eq!(p.inverse(100.0, 50.0), Some((100.0, 50.0)));
        assert_eq!(p.inverse(181.0, 0.0), None);
        assert_eq!(p.inverse(0.0, -91.0), None);
        assert_eq!(p.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_robinson_known_points() {
        let p = MapProjection::Robinson;
        assert_close(p.forward(0.0, 0.0), (0.0, 0.0), 1e-12);
        assert_close(p.forward(180.0, 0.0), (0.8487 * PI, 0.0), 1e-9);
        assert_close(p.forward(0.0, 90.0), (0.0, 1.3523), 1e-9);
        assert_close(p.forward(0.0, -90.0), (0.0, -1.3523), 1e-9);

        // Parallels shorten toward the poles
        let (x_equator, _) = p.forward(90.0, 0.0);
        let (x_sixty, _) = p.forward(90.0, 60.0);
        assert!(x_sixty < x_equator);

        // Table value at 45 degrees
        let (x, y) = p.forward(180.0, 45.0);
        assert!((x - 0.8487 * 0.8679 * PI).abs() < 1e-9);
        assert!((y - 1.3523 * 0.5571).abs() < 1e-9);
    }

    #[test]
    fn test_robinson_round_trip() {
        let p = MapProjection::Robinson;
        for &(lon, lat) in &[
            (-80.0, 10.0),
            (20.0, -20.0),
            (100.0, 50.0),
            (-100.0, 60.0),
            (179.0, -89.0),
            (0.0, 0.0),
        ] {
            let (x, y) = p.forward(lon, lat);
            let back = p.inverse(x, y).unwrap();
            assert_close(back, (lon, lat), 1e-6);
        }
    }

    #[test]
    fn test_robinson_inverse_outside_globe() {
        let p = MapProjection::Robinson;
        let (half_width, half_height) = p.extent();
        // Corners of the bounding box are off the globe
        assert_eq!(p.inverse(half_width * 0.99, half_height * 0.99), None);
        assert_eq!(p.inverse(0.0, half_height * 1.01), None);
        assert!(p.inverse(half_width * 0.99, 0.0).is_some());
    }

    #[test]
    fn test_transform_from_plate_carree() {
        let robinson = MapProjection::Robinson;
        let direct = robinson.forward(20.0, -20.0);
        let via = robinson
            .transform_from(MapProjection::PlateCarree, 20.0, -20.0)
            .unwrap();
        assert_close(direct, via, 1e-12);

        let same = MapProjection::PlateCarree
            .transform_from(MapProjection::PlateCarree, 12.0, 34.0)
            .unwrap();
        assert_eq!(same, (12.0, 34.0));
    }

    #[test]
    fn test_project_path_densifies() {
        let p = MapProjection::Robinson;
        let path = [(-180.0, 60.0), (180.0, 60.0)];
        let projected = p.project_path(&path, 1.0);
        assert_eq!(projected.len(), 361);
        // All points of a parallel share the same y
        let y0 = projected[0].1;
        assert!(projected.iter().all(|&(_, y)| (y - y0).abs() < 1e-12));

        assert!(p.project_path(&[], 1.0).is_empty());
    }

    #[test]
    fn test_boundary_is_closed() {
        let outline = MapProjection::Robinson.boundary();
        assert_eq!(outline.first(), outline.last());
        let (half_width, _) = MapProjection::Robinson.extent();
        let max_x = outline.iter().map(|p| p.0).fold(f64::MIN, f64::max);
        assert!((max_x - half_width).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(180.0), -180.0);
        assert_eq!(normalize_longitude(-180.0), -180.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(370.0), 10.0);
        assert_eq!(normalize_longitude(-370.0), -10.0);
        assert_eq!(MapProjection::PlateCarree.forward(190.0, 0.0), (-170.0, 0.0));
        assert_eq!(MapProjection::PlateCarree.forward(180.0, 0.0), (180.0, 0.0));
    }
}
