//! Coordinate Repair Module
//! Detects a Latitude/Longitude column mix-up and exchanges the two columns.

use log::warn;
use polars::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use super::loader::coordinate_values;
use super::{LATITUDE, LONGITUDE};

/// Placeholder name used while the two coordinate columns trade places.
const SWAP_PLACEHOLDER: &str = "__grow_plot_swap__";

#[derive(Error, Debug)]
pub enum RepairError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// How a swapped pair of coordinate columns is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDetection {
    /// Swap when any Latitude lies outside [-180, 180].
    ///
    /// Misses swaps whose real longitudes fit inside that range, which covers
    /// most of the UK.
    #[default]
    LongitudeRange,
    /// Swap when any Latitude lies outside [-90, 90] while every Longitude
    /// lies inside it.
    JointRange,
}

/// Result of [`check_and_swap_columns`].
#[derive(Debug, Clone)]
pub struct Repaired {
    pub data: DataFrame,
    pub swapped: bool,
}

/// Minimum and maximum of a coordinate column, skipping missing and NaN values.
fn value_range(df: &DataFrame, column: &str) -> PolarsResult<Option<(f64, f64)>> {
    let range = coordinate_values(df, column)?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });
    Ok(range)
}

/// Minimum and maximum Latitude, or `None` when the column has no values.
pub fn latitude_range(df: &DataFrame) -> Result<Option<(f64, f64)>, RepairError> {
    Ok(value_range(df, LATITUDE)?)
}

/// Decide whether the coordinate columns look swapped.
pub fn needs_swap(df: &DataFrame, detection: SwapDetection) -> Result<bool, RepairError> {
    let Some((lat_lo, lat_hi)) = latitude_range(df)? else {
        return Ok(false);
    };

    let swapped = match detection {
        SwapDetection::LongitudeRange => lat_lo < -180.0 || lat_hi > 180.0,
        SwapDetection::JointRange => {
            let lat_invalid = lat_lo < -90.0 || lat_hi > 90.0;
            let lon_fits_latitude = value_range(df, LONGITUDE)?
                .map(|(lo, hi)| lo >= -90.0 && hi <= 90.0)
                .unwrap_or(true);
            lat_invalid && lon_fits_latitude
        }
    };
    Ok(swapped)
}

/// Exchange the Latitude and Longitude labels for the whole table.
///
/// Row values and column positions are untouched; only the two names trade
/// places.
pub fn swap_coordinate_columns(df: &DataFrame) -> Result<DataFrame, RepairError> {
    let mut swapped = df.clone();
    swapped.rename(LATITUDE, SWAP_PLACEHOLDER.into())?;
    swapped.rename(LONGITUDE, LATITUDE.into())?;
    swapped.rename(SWAP_PLACEHOLDER, LONGITUDE.into())?;
    Ok(swapped)
}

/// Detect swapped coordinate columns and fix them.
///
/// Returns the input unchanged when no swap is detected.
pub fn check_and_swap_columns(
    df: &DataFrame,
    detection: SwapDetection,
) -> Result<Repaired, RepairError> {
    if !needs_swap(df, detection)? {
        return Ok(Repaired {
            data: df.clone(),
            swapped: false,
        });
    }

    warn!("Latitude and Longitude columns appear to be swapped. Fixing...");
    Ok(Repaired {
        data: swap_coordinate_columns(df)?,
        swapped: true,
    })
}
