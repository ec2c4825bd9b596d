//! Test data generation utilities.
//!
//! This module provides low-resolution configurations and small GeoJSON
//! files for exercising the full pipeline quickly.

use cartocompare::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolution used by integration runs; keeps a full render well under a second
pub const TEST_DPI: u32 = 20;

/// A configuration writing into `dir` at test resolution.
///
/// # Arguments
///
/// * `dir` - Output directory
/// * `name` - File name of the PNG
/// * `seed` - Noise seed, `None` for an entropy-seeded run
pub fn low_res_config(dir: &Path, name: &str, seed: Option<u64>) -> Config {
    let mut config = Config::default();
    config.render.output = dir.join(name);
    config.render.dpi = TEST_DPI;
    config.data.seed = seed;
    config
}

/// Writes a GeoJSON FeatureCollection with one square island and one
/// unsupported point feature.
pub fn write_land_geojson(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join("land.geojson");
    let content = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "square"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-20, -20], [20, -20], [20, 20], [-20, 20], [-20, -20]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"name": "somewhere"},
                "geometry": {"type": "Point", "coordinates": [0, 0]}
            }
        ]
    }"#;
    fs::write(&path, content)?;
    Ok(path)
}

/// Writes a GeoJSON FeatureCollection with a single border line.
pub fn write_borders_geojson(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join("borders.geojson");
    let content = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [[[-60, 0], [60, 0]], [[0, -45], [0, 45]]]
                }
            }
        ]
    }"#;
    fs::write(&path, content)?;
    Ok(path)
}
