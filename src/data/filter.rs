//! Bounding-box filter over the sensor table.

use polars::prelude::*;
use thiserror::Error;

use super::{BoundingBox, LATITUDE, LONGITUDE};

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Row counts on either side of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    pub before: usize,
    pub after: usize,
}

impl FilterStats {
    pub fn new(before: &DataFrame, after: &DataFrame) -> Self {
        Self {
            before: before.height(),
            after: after.height(),
        }
    }

    pub fn dropped(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

/// Keep rows whose (Longitude, Latitude) lies inside `bbox`, edges included.
///
/// Rows with either coordinate missing are dropped. Relative order of the
/// surviving rows is preserved and every other column passes through.
pub fn filter_by_bounding_box(df: &DataFrame, bbox: &BoundingBox) -> Result<DataFrame, FilterError> {
    let in_range = col(LONGITUDE)
        .gt_eq(lit(bbox.lon_min()))
        .and(col(LONGITUDE).lt_eq(lit(bbox.lon_max())))
        .and(col(LATITUDE).gt_eq(lit(bbox.lat_min())))
        .and(col(LATITUDE).lt_eq(lit(bbox.lat_max())));

    let present = col(LATITUDE).is_not_null().and(col(LONGITUDE).is_not_null());

    let filtered = df.clone().lazy().filter(in_range.and(present)).collect()?;
    Ok(filtered)
}
