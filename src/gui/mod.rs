//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;

pub use app::{run_analysis, AnalysisOutput, AnalysisRequest, FxInsightApp};
pub use chart_viewer::{ChartViewer, ComparisonView};
pub use control_panel::{ControlPanel, ControlPanelAction};
