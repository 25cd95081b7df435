//! Bounding Box Module
//! Geographic extent used to select sensors and to frame the map.

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BoundsError {
    #[error("Bounding box values must be finite")]
    NotFinite,
    #[error("lon_min ({min}) must be less than lon_max ({max})")]
    Longitude { min: f64, max: f64 },
    #[error("lat_min ({min}) must be less than lat_max ({max})")]
    Latitude { min: f64, max: f64 },
}

/// Axis-aligned rectangle in longitude/latitude degrees.
///
/// Used both to select sensor records and as the geographic extent of the
/// rendered map. Construction enforces `lon_min < lon_max` and
/// `lat_min < lat_max`, so a value of this type is always a usable extent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct BoundingBox {
    lon_min: f64,
    lon_max: f64,
    lat_min: f64,
    lat_max: f64,
}

#[derive(Deserialize)]
struct RawBounds {
    lon_min: f64,
    lon_max: f64,
    lat_min: f64,
    lat_max: f64,
}

impl TryFrom<RawBounds> for BoundingBox {
    type Error = BoundsError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        BoundingBox::new(raw.lon_min, raw.lon_max, raw.lat_min, raw.lat_max)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::UK
    }
}

impl BoundingBox {
    /// Mainland UK and surrounding islands.
    pub const UK: BoundingBox = BoundingBox {
        lon_min: -10.592,
        lon_max: 1.6848,
        lat_min: 50.681,
        lat_max: 57.985,
    };

    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Result<Self, BoundsError> {
        if ![lon_min, lon_max, lat_min, lat_max].iter().all(|v| v.is_finite()) {
            return Err(BoundsError::NotFinite);
        }
        if lon_min >= lon_max {
            return Err(BoundsError::Longitude {
                min: lon_min,
                max: lon_max,
            });
        }
        if lat_min >= lat_max {
            return Err(BoundsError::Latitude {
                min: lat_min,
                max: lat_max,
            });
        }
        Ok(Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        })
    }

    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    pub fn lon_max(&self) -> f64 {
        self.lon_max
    }

    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.lon_min..=self.lon_max).contains(&lon) && (self.lat_min..=self.lat_max).contains(&lat)
    }
}
