//! Data module - CSV loading, coordinate repair and bounding-box filtering
//!
//! ```text
//!  GrowLocations.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → DataFrame (Latitude/Longitude as Float64)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  repair  │  whole-column Latitude/Longitude swap when detected
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  keep rows inside the BoundingBox with both coordinates
//!   └──────────┘
//! ```

mod bounds;
mod filter;
mod loader;
mod repair;

pub use bounds::{BoundingBox, BoundsError};
pub use filter::{filter_by_bounding_box, FilterError, FilterStats};
pub use loader::{coordinate_values, load_csv, load_csv_with, LoadOptions, LoaderError};
pub use repair::{
    check_and_swap_columns, latitude_range, needs_swap, swap_coordinate_columns, RepairError,
    Repaired, SwapDetection,
};

/// Name of the latitude column, matched case-sensitively against the header.
pub const LATITUDE: &str = "Latitude";
/// Name of the longitude column, matched case-sensitively against the header.
pub const LONGITUDE: &str = "Longitude";
