//! Configuration management for cartocompare.
//!
//! Running without any argument reproduces the reference figure. Every knob
//! can still be overridden through a layered configuration with the following
//! precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colormaps;
use crate::error::{CartoError, Result};
use crate::interpolation;

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "comparaison_projections.png";

/// Command-line arguments for cartocompare
#[derive(Parser, Debug, Default)]
#[command(name = "cartocompare")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path of the PNG file to write
    #[arg(short, long, env = "CARTOCOMPARE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output resolution in dots per inch
    #[arg(long, env = "CARTOCOMPARE_DPI")]
    pub dpi: Option<u32>,

    /// Seed for the noise term (unseeded when omitted)
    #[arg(long, env = "CARTOCOMPARE_SEED")]
    pub seed: Option<u64>,

    /// GeoJSON file with land polygons
    #[arg(long, env = "CARTOCOMPARE_LAND")]
    pub land: Option<PathBuf>,

    /// GeoJSON file with national border lines
    #[arg(long, env = "CARTOCOMPARE_BORDERS")]
    pub borders: Option<PathBuf>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "CARTOCOMPARE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CARTOCOMPARE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Figure rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Output PNG path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Output resolution
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Figure width in inches
    #[serde(default = "default_width_in")]
    pub width_in: f32,

    /// Figure height in inches
    #[serde(default = "default_height_in")]
    pub height_in: f32,

    /// Colormap used by both contour layers
    #[serde(default = "default_colormap")]
    pub colormap: String,

    /// Method used to sample the anomaly field per pixel
    #[serde(default = "default_interpolation")]
    pub interpolation: String,
}

/// Synthetic data configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Seed for the noise term; `None` draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Base-map data sources
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeoConfig {
    /// GeoJSON land polygons (built-in outline when unset)
    #[serde(default)]
    pub land: Option<PathBuf>,

    /// GeoJSON border lines (built-in set when unset)
    #[serde(default)]
    pub borders: Option<PathBuf>,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Rendering configuration
    #[serde(default)]
    pub render: RenderConfig,

    /// Data configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Base-map configuration
    #[serde(default)]
    pub geo: GeoConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build a configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(output) = args.output {
            config.render.output = output;
        }
        if let Some(dpi) = args.dpi {
            config.render.dpi = dpi;
        }
        if args.seed.is_some() {
            config.data.seed = args.seed;
        }
        if args.land.is_some() {
            config.geo.land = args.land;
        }
        if args.borders.is_some() {
            config.geo.borders = args.borders;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.render = other.render;
        if other.data.seed.is_some() {
            self.data.seed = other.data.seed;
        }
        if other.geo.land.is_some() {
            self.geo.land = other.geo.land;
        }
        if other.geo.borders.is_some() {
            self.geo.borders = other.geo.borders;
        }
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.render.output.as_os_str().is_empty() {
            return Err(CartoError::Config {
                message: "Output path cannot be empty".to_string(),
            });
        }

        if !(10..=1200).contains(&self.render.dpi) {
            return Err(CartoError::Config {
                message: format!(
                    "Invalid dpi: {}. Must be between 10 and 1200",
                    self.render.dpi
                ),
            });
        }

        if !(self.render.width_in > 0.0 && self.render.height_in > 0.0) {
            return Err(CartoError::Config {
                message: format!(
                    "Figure size must be positive, got {}x{} inches",
                    self.render.width_in, self.render.height_in
                ),
            });
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(CartoError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        colormaps::get_colormap(&self.render.colormap).map_err(|e| CartoError::Config {
            message: e.to_string(),
        })?;

        interpolation::get_interpolator(&self.render.interpolation).map_err(|e| {
            CartoError::Config {
                message: e.to_string(),
            }
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            data: DataConfig::default(),
            geo: GeoConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            dpi: default_dpi(),
            width_in: default_width_in(),
            height_in: default_height_in(),
            colormap: default_colormap(),
            interpolation: default_interpolation(),
        }
    }
}

// Default value functions for serde
fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_dpi() -> u32 {
    300
}

fn default_width_in() -> f32 {
    18.0
}

fn default_height_in() -> f32 {
    14.0
}

fn default_colormap() -> String {
    "rdylbu_r".to_string()
}

fn default_interpolation() -> String {
    "bilinear".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render.output, PathBuf::from("comparaison_projections.png"));
        assert_eq!(config.render.dpi, 300);
        assert_eq!(config.render.width_in, 18.0);
        assert_eq!(config.render.height_in, 14.0);
        assert_eq!(config.render.colormap, "rdylbu_r");
        assert_eq!(config.render.interpolation, "bilinear");
        assert_eq!(config.data.seed, None);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_arguments_keeps_defaults() {
        let args = Args::try_parse_from(["cartocompare"]).unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::try_parse_from([
            "cartocompare",
            "--output",
            "out.png",
            "--dpi",
            "72",
            "--seed",
            "42",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.render.output, PathBuf::from("out.png"));
        assert_eq!(config.render.dpi, 72);
        assert_eq!(config.data.seed, Some(42));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_json_file_then_cli_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"render": {{"dpi": 150, "colormap": "rdbu_r"}}, "data": {{"seed": 7}}}}"#
        )
        .unwrap();

        let args = Args {
            config: Some(file.path().to_path_buf()),
            dpi: Some(100),
            ..Default::default()
        };
        let config = Config::from_args(args).unwrap();

        // CLI wins over the file, file wins over defaults
        assert_eq!(config.render.dpi, 100);
        assert_eq!(config.render.colormap, "rdbu_r");
        assert_eq!(config.data.seed, Some(7));
        assert_eq!(config.render.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_config_merge() {
        let mut config1 = Config::default();
        let mut config2 = Config::default();

        config2.render.dpi = 96;
        config2.data.seed = Some(4);

        config1.merge(config2);

        assert_eq!(config1.render.dpi, 96);
        assert_eq!(config1.data.seed, Some(4));
    }

    #[test]
    fn test_config_validation() {
        // Test invalid dpi
        let mut config = Config::default();
        config.render.dpi = 5;
        assert!(config.validate().is_err());

        // Test invalid figure size
        let mut config = Config::default();
        config.render.height_in = 0.0;
        assert!(config.validate().is_err());

        // Test invalid log level
        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        // Test invalid colormap
        let mut config = Config::default();
        config.render.colormap = "jet".to_string();
        assert!(config.validate().is_err());

        // Test invalid interpolation method
        let mut config = Config::default();
        config.render.interpolation = "invalid".to_string();
        assert!(config.validate().is_err());

        // Test empty output
        let mut config = Config::default();
        config.render.output = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
