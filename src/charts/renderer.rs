//! Static Chart Renderer
//! Draws chart descriptions to PNG or SVG files with plotters.
//!
//! Layout: caption on top, axis descriptions, optional grid, legend in the
//! upper right when there is more than one series.

use crate::charts::{Chart, ChartKind, SeriesColor};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Share of each index slot covered by a bar.
const BAR_WIDTH: f64 = 0.8;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to open chart: {0}")]
    Open(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

fn to_rgb(color: SeriesColor) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn drawing_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart to `path`; the extension selects PNG or SVG.
    pub fn render_to_file(chart: &Chart, path: &Path) -> Result<(), RenderError> {
        let size = chart.size;
        match ImageFormat::from_path(path)? {
            ImageFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                Self::draw(&root, chart)?;
                root.present().map_err(drawing_error)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                Self::draw(&root, chart)?;
                root.present().map_err(drawing_error)?;
            }
        }
        log::info!("Rendered '{}' to {}", chart.title, path.display());
        Ok(())
    }

    /// Render every chart into `dir`, one file per chart named after its title.
    pub fn render_all(
        charts: &[Chart],
        dir: &Path,
        format: ImageFormat,
    ) -> Result<Vec<PathBuf>, RenderError> {
        charts
            .iter()
            .enumerate()
            .map(|(i, chart)| {
                let name = format!(
                    "{:02}_{}.{}",
                    i + 1,
                    Self::file_stem(&chart.title),
                    format.extension()
                );
                let path = dir.join(name);
                Self::render_to_file(chart, &path)?;
                Ok(path)
            })
            .collect()
    }

    /// Render to the temp directory and open the image with the system viewer.
    pub fn show(chart: &Chart) -> Result<PathBuf, RenderError> {
        let path = std::env::temp_dir().join(format!("{}.png", Self::file_stem(&chart.title)));
        Self::render_to_file(chart, &path)?;
        open::that(&path)?;
        Ok(path)
    }

    /// Lowercase title with everything but letters and digits turned into `_`.
    pub fn file_stem(title: &str) -> String {
        let stem: String = title
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        let stem = stem.trim_matches('_');
        if stem.is_empty() {
            "chart".to_string()
        } else {
            stem.to_string()
        }
    }

    /// Axis ranges with some padding so points do not sit on the frame.
    /// Bar charts always include zero on the y axis.
    pub fn axis_ranges(chart: &Chart) -> (Range<f64>, Range<f64>) {
        let ((x_min, x_max), (mut y_min, mut y_max)) =
            chart.bounds().unwrap_or(((0.0, 1.0), (0.0, 1.0)));

        let (x_min, x_max) = match chart.kind {
            ChartKind::Bar => (x_min - BAR_WIDTH, x_max + BAR_WIDTH),
            ChartKind::Line => Self::pad(x_min, x_max, 0.02),
        };

        if chart.kind == ChartKind::Bar {
            y_min = y_min.min(0.0);
            y_max = y_max.max(0.0);
        }
        let (y_min, y_max) = Self::pad(y_min, y_max, 0.05);

        (x_min..x_max, y_min..y_max)
    }

    fn pad(min: f64, max: f64, share: f64) -> (f64, f64) {
        let span = max - min;
        if span == 0.0 {
            let half = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
            (min - half, max + half)
        } else {
            (min - span * share, max + span * share)
        }
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &Chart,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(drawing_error)?;

        let (x_range, y_range) = Self::axis_ranges(chart);
        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(drawing_error)?;

        let whole = |v: &f64| format!("{:.0}", v);
        let mut mesh = ctx.configure_mesh();
        mesh.x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&whole);
        if !chart.grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(drawing_error)?;

        for series in &chart.series {
            let color = to_rgb(series.color);
            match chart.kind {
                ChartKind::Line => {
                    ctx.draw_series(LineSeries::new(
                        series.points.iter().copied(),
                        color.stroke_width(2),
                    ))
                    .map_err(drawing_error)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });

                    if series.markers {
                        ctx.draw_series(
                            series
                                .points
                                .iter()
                                .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                        )
                        .map_err(drawing_error)?;
                    }
                }
                ChartKind::Bar => {
                    let half = BAR_WIDTH / 2.0;
                    ctx.draw_series(series.points.iter().map(|&(x, y)| {
                        Rectangle::new([(x - half, 0.0), (x + half, y)], color.filled())
                    }))
                    .map_err(drawing_error)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled())
                    });
                }
            }
        }

        if chart.series.len() > 1 {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(drawing_error)?;
        }

        Ok(())
    }
}
