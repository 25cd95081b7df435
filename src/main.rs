//! GrowPlot - GROW sensor location cleaner & static map plotter
//!
//! Reads `GrowLocations.csv`, keeps the sensors inside the UK bounding box and
//! writes `finalPlot.png` drawn over `map7.png`.

use anyhow::Result;
use env_logger::Env;
use log::debug;

use grow_plot::app;
use grow_plot::config::{ConfigSource, Settings};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let (settings, source) = Settings::load()?;
    match &source {
        ConfigSource::Defaults => debug!("Using built-in settings"),
        ConfigSource::File(path) => debug!("Using settings from {}", path.display()),
    }
    debug!("{settings:?}");

    app::run(&settings)?;
    Ok(())
}
