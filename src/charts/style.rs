//! Fixed look of the sensor map.

use plotters::style::colors::RED;
use plotters::style::{Color, RGBColor, ShapeStyle};

/// Figure size in pixels (10 x 12 inches at 100 dpi).
pub const FIGURE_WIDTH: u32 = 1000;
pub const FIGURE_HEIGHT: u32 = 1200;

pub const FONT_SIZE_TITLE: u32 = 28;
pub const FONT_SIZE_AXIS_LABEL: u32 = 20;
pub const FONT_SIZE_LEGEND: u32 = 18;

/// Visual settings for the scatter overlay and its frame.
#[derive(Debug, Clone)]
pub struct MapStyle {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub marker_color: RGBColor,
    /// Opacity of the markers, 0.0 to 1.0
    pub marker_alpha: f64,
    /// Marker radius in pixels
    pub marker_radius: u32,
    pub legend_label: String,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            width: FIGURE_WIDTH,
            height: FIGURE_HEIGHT,
            title: "GROW Sensor Locations in the UK (Cleaned)".to_string(),
            x_label: "Longitude".to_string(),
            y_label: "Latitude".to_string(),
            marker_color: RED,
            marker_alpha: 0.7,
            // 50 pt^2 marker area at 100 dpi
            marker_radius: 5,
            legend_label: "Valid Sensor Locations".to_string(),
        }
    }
}

impl MapStyle {
    /// Filled, translucent marker style.
    pub fn marker(&self) -> ShapeStyle {
        self.marker_color.mix(self.marker_alpha).filled()
    }
}
