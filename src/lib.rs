//! GrowPlot - GROW sensor location cleaner & static map plotter
//!
//! Loads sensor locations from CSV, fixes swapped coordinate columns, keeps
//! the points inside a bounding box and draws them over a map image.

pub mod app;
pub mod charts;
pub mod config;
pub mod data;
