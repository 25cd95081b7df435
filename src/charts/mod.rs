//! Charts module - Static map rendering

mod renderer;
mod style;

pub use renderer::{load_background, marker_points, show, stretch_to, MapRenderer, RenderError};
pub use style::{MapStyle, FIGURE_HEIGHT, FIGURE_WIDTH};
