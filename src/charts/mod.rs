//! Charts module - chart descriptions and rendering

mod model;
mod plotter;
mod renderer;

pub use model::{Chart, ChartKind, ChartSeries, SeriesColor};
pub use plotter::ChartPlotter;
pub use renderer::{ImageFormat, RenderError, StaticChartRenderer};
