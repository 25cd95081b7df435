//! Run configuration.
//!
//! Defaults reproduce the GROW UK plot. A JSON file can override any subset
//! of fields; it is taken from `GROW_PLOT_CONFIG` when set, otherwise from
//! `growplot.json` in the working directory when that file exists.

use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::charts::{MapStyle, FIGURE_HEIGHT, FIGURE_WIDTH};
use crate::data::{BoundingBox, SwapDetection};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GROW_PLOT_CONFIG";
/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "growplot.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Where the active settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub input_path: PathBuf,
    pub map_image_path: PathBuf,
    pub output_path: PathBuf,
    pub delimiter: char,
    pub bounding_box: BoundingBox,
    pub swap_detection: SwapDetection,
    /// Output image size in pixels, `[width, height]`.
    pub figure_size: [u32; 2],
    /// Open the saved plot in the system image viewer.
    pub show: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("GrowLocations.csv"),
            map_image_path: PathBuf::from("map7.png"),
            output_path: PathBuf::from("finalPlot.png"),
            delimiter: ',',
            bounding_box: BoundingBox::UK,
            swap_detection: SwapDetection::LongitudeRange,
            figure_size: [FIGURE_WIDTH, FIGURE_HEIGHT],
            show: true,
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fixed map style at the configured figure size.
    pub fn map_style(&self) -> MapStyle {
        let [width, height] = self.figure_size;
        MapStyle {
            width,
            height,
            ..MapStyle::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Resolve settings from the environment and working directory.
    pub fn load() -> Result<(Self, ConfigSource), ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let path = match explicit {
            Some(path) => Some(path),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.is_file().then_some(local)
            }
        };

        match path {
            Some(path) => {
                debug!("Reading settings from {}", path.display());
                let settings = Self::from_file(&path)?;
                Ok((settings, ConfigSource::File(path)))
            }
            None => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }
}
