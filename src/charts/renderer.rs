//! Static Map Renderer
//! Draws the cleaned sensor locations over a background map image.
//!
//! Layout:
//! 1. Title centered above the map
//! 2. Background raster stretched over the whole plotting area, so its edges
//!    line up with the bounding box (aspect ratio is not preserved)
//! 3. One translucent marker per sensor at (Longitude, Latitude)
//! 4. Legend in the upper right corner, axis descriptions on both axes

use image::imageops::{self, FilterType};
use image::RgbImage;
use log::{debug, info};
use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::IntoDrawingArea;
use plotters::element::{BitMapElement, Circle};
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::Color;
use polars::prelude::{DataFrame, PolarsError};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::style::{MapStyle, FONT_SIZE_AXIS_LABEL, FONT_SIZE_LEGEND, FONT_SIZE_TITLE};
use crate::data::{coordinate_values, BoundingBox, LATITUDE, LONGITUDE};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot load map image {}: {source}", path.display())]
    Background {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Background buffer does not fit a {width}x{height} plotting area")]
    Backdrop { width: u32, height: u32 },
    #[error("Drawing failed: {0}")]
    Plot(String),
    #[error("Cannot open image viewer for {}: {source}", path.display())]
    Display {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn plot_error<E: Display>(err: E) -> RenderError {
    RenderError::Plot(err.to_string())
}

/// Load the background map as an RGB bitmap.
pub fn load_background(path: &Path) -> Result<RgbImage, RenderError> {
    let image = image::open(path).map_err(|source| RenderError::Background {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Loaded map image {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image.to_rgb8())
}

/// Resize `image` to exactly `size`, stretching each axis independently.
pub fn stretch_to(image: &RgbImage, size: (u32, u32)) -> RgbImage {
    let (width, height) = (size.0.max(1), size.1.max(1));
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// (Longitude, Latitude) of every row with both coordinates present, in row order.
pub fn marker_points(df: &DataFrame) -> Result<Vec<(f64, f64)>, RenderError> {
    let lons = coordinate_values(df, LONGITUDE)?;
    let lats = coordinate_values(df, LATITUDE)?;
    Ok(lons
        .into_iter()
        .zip(lats)
        .filter_map(|(lon, lat)| Some((lon?, lat?)))
        .collect())
}

/// Open a saved image in the system's default viewer.
pub fn show(path: &Path) -> Result<(), RenderError> {
    open::that(path).map_err(|source| RenderError::Display {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders scatter maps with a fixed [`MapStyle`].
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    style: MapStyle,
}

impl MapRenderer {
    pub fn new(style: MapStyle) -> Self {
        Self { style }
    }

    /// Plot the rows of `df` over the map at `background_path` and save to `output`.
    pub fn render_dataset(
        &self,
        df: &DataFrame,
        background_path: &Path,
        bbox: &BoundingBox,
        output: &Path,
    ) -> Result<(), RenderError> {
        let background = load_background(background_path)?;
        let points = marker_points(df)?;
        self.render(&points, &background, bbox, output)
    }

    /// Draw `points` over `background` with `bbox` as the map extent and write
    /// the figure to `output`. The file format follows the extension.
    pub fn render(
        &self,
        points: &[(f64, f64)],
        background: &RgbImage,
        bbox: &BoundingBox,
        output: &Path,
    ) -> Result<(), RenderError> {
        let style = &self.style;
        debug!(
            "Map extent {:.3} x {:.3} degrees at {}x{} px",
            bbox.width(),
            bbox.height(),
            style.width,
            style.height
        );
        let root = BitMapBackend::new(output, (style.width, style.height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(style.title.as_str(), ("sans-serif", FONT_SIZE_TITLE))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(bbox.lon_min()..bbox.lon_max(), bbox.lat_min()..bbox.lat_max())
            .map_err(plot_error)?;

        // Backdrop first so the axes and markers land on top of it
        let (area_width, area_height) = chart.plotting_area().dim_in_pixel();
        let stretched = stretch_to(background, (area_width, area_height));
        let (width, height) = stretched.dimensions();
        let backdrop: BitMapElement<'_, (f64, f64)> = BitMapElement::with_owned_buffer(
            (bbox.lon_min(), bbox.lat_max()),
            (width, height),
            stretched.into_raw(),
        )
        .ok_or(RenderError::Backdrop { width, height })?;
        chart
            .draw_series(std::iter::once(backdrop))
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(style.x_label.as_str())
            .y_desc(style.y_label.as_str())
            .axis_desc_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
            .draw()
            .map_err(plot_error)?;

        let marker = style.marker();
        let radius = style.marker_radius;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(lon, lat)| Circle::new((lon, lat), radius, marker)),
            )
            .map_err(plot_error)?
            .label(style.legend_label.as_str())
            .legend(move |(x, y)| Circle::new((x, y), radius, marker));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
        info!("Saved {} markers to {}", points.len(), output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use polars::prelude::*;

    #[test]
    fn missing_background_is_an_image_error() {
        let err = load_background(Path::new("no/such/map7.png")).unwrap_err();
        assert!(matches!(err, RenderError::Background { .. }));
        assert!(err.to_string().contains("map7.png"));
    }

    #[test]
    fn unreadable_background_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(
            load_background(&path),
            Err(RenderError::Background { .. })
        ));
    }

    #[test]
    fn background_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        RgbImage::from_pixel(8, 4, Rgb([10, 120, 200]))
            .save(&path)
            .unwrap();

        let loaded = load_background(&path).unwrap();
        assert_eq!(loaded.dimensions(), (8, 4));
        assert_eq!(loaded.get_pixel(3, 2), &Rgb([10, 120, 200]));
    }

    #[test]
    fn stretch_ignores_aspect_ratio() {
        let image = RgbImage::from_pixel(40, 10, Rgb([0, 128, 0]));
        let stretched = stretch_to(&image, (25, 90));

        assert_eq!(stretched.dimensions(), (25, 90));
        assert_eq!(stretched.get_pixel(12, 45), &Rgb([0, 128, 0]));
    }

    #[test]
    fn marker_points_skip_rows_with_missing_coordinates() {
        let df = df!(
            "Sensor" => ["a", "b", "c"],
            LATITUDE => [Some(52.0), None, Some(53.5)],
            LONGITUDE => [Some(-1.0), Some(-2.0), Some(0.5)]
        )
        .unwrap();

        assert_eq!(marker_points(&df).unwrap(), vec![(-1.0, 52.0), (0.5, 53.5)]);
    }

    #[test]
    fn no_rows_means_no_markers() {
        let df = df!(
            LATITUDE => Vec::<Option<f64>>::new(),
            LONGITUDE => Vec::<Option<f64>>::new()
        )
        .unwrap();
        assert!(marker_points(&df).unwrap().is_empty());
    }
}
