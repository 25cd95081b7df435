//! GrowPlot run
//! Load → repair → filter → render, one pass per invocation.

use anyhow::{Context, Result};
use log::{info, warn};
use polars::prelude::DataFrame;
use std::path::PathBuf;

use crate::charts::{self, MapRenderer};
use crate::config::Settings;
use crate::data::{
    check_and_swap_columns, filter_by_bounding_box, load_csv_with, FilterStats, LoadOptions,
};

/// Sensor table after repair and filtering.
#[derive(Debug, Clone)]
pub struct CleanedData {
    pub data: DataFrame,
    pub stats: FilterStats,
    pub swapped: bool,
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub kept: usize,
    pub swapped: bool,
    pub output: PathBuf,
}

/// Load the input table, repair swapped coordinates and apply the bounding box.
pub fn clean(settings: &Settings) -> Result<CleanedData> {
    let options = LoadOptions::new(settings.delimiter)?;
    let loaded = load_csv_with(&settings.input_path, &options)
        .with_context(|| format!("loading {}", settings.input_path.display()))?;

    let repaired = check_and_swap_columns(&loaded, settings.swap_detection)
        .context("checking coordinate columns")?;

    let data = filter_by_bounding_box(&repaired.data, &settings.bounding_box)
        .context("filtering by bounding box")?;
    let stats = FilterStats::new(&repaired.data, &data);

    info!("Total points before filtering: {}", stats.before);
    info!("Total points after filtering: {}", stats.after);

    Ok(CleanedData {
        data,
        stats,
        swapped: repaired.swapped,
    })
}

/// Clean the data, render the map and optionally open it in a viewer.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let cleaned = clean(settings)?;

    MapRenderer::new(settings.map_style())
        .render_dataset(
            &cleaned.data,
            &settings.map_image_path,
            &settings.bounding_box,
            &settings.output_path,
        )
        .with_context(|| format!("rendering {}", settings.output_path.display()))?;

    if settings.show {
        // The saved file is the primary output; a missing viewer is not fatal
        if let Err(err) = charts::show(&settings.output_path) {
            warn!("{err}");
        }
    }

    Ok(RunSummary {
        total: cleaned.stats.before,
        kept: cleaned.stats.after,
        swapped: cleaned.swapped,
        output: settings.output_path.clone(),
    })
}
