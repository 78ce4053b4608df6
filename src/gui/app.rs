//! FX Insight Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{Chart, ImageFormat, StaticChartRenderer};
use crate::config::Settings;
use crate::data::{fill_na, read_data, DataLoader};
use crate::error::Result;
use crate::gui::chart_viewer::ComparisonView;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::{calculate_yearly_average, compare_currency, ComparisonSummary};
use egui::SidePanel;
use polars::prelude::DataFrame;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

/// What the user asked to compute.
#[derive(Debug, Clone)]
pub enum AnalysisRequest {
    YearlyAverage { date_col: String, value_col: String },
    Compare { col1: String, col2: String },
}

/// Charts and comparison labels produced by one analysis run.
pub struct AnalysisOutput {
    pub charts: Vec<Chart>,
    pub comparison: Option<ComparisonView>,
    pub status: String,
}

/// Calculation result from background thread
enum CalcResult {
    Progress(f32, String),
    Complete(AnalysisOutput),
    Error(String),
}

/// CSV loading result from background thread
enum LoadResult {
    Complete { df: DataFrame, path: PathBuf },
    Error(String),
}

/// Run one analysis on a table, optionally gap-filling it first.
pub fn run_analysis(
    df: &DataFrame,
    fill_missing: bool,
    request: &AnalysisRequest,
) -> Result<AnalysisOutput> {
    let filled;
    let df = if fill_missing {
        filled = fill_na(df)?;
        &filled
    } else {
        df
    };

    match request {
        AnalysisRequest::YearlyAverage {
            date_col,
            value_col,
        } => {
            let (yearly, chart) = calculate_yearly_average(df, date_col, value_col)?;
            Ok(AnalysisOutput {
                charts: vec![chart],
                comparison: None,
                status: format!("Complete! {} yearly averages of {}", yearly.height(), value_col),
            })
        }
        AnalysisRequest::Compare { col1, col2 } => {
            let (labels, rates, difference) = compare_currency(df, col1, col2)?;
            let summary = ComparisonSummary::from_labels(&labels, col1, col2);
            Ok(AnalysisOutput {
                charts: vec![rates, difference],
                status: format!("Complete! Compared {} rows", summary.total()),
                comparison: Some(ComparisonView {
                    col1: col1.clone(),
                    col2: col2.clone(),
                    labels,
                    summary,
                }),
            })
        }
    }
}

/// Main application window.
pub struct FxInsightApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    settings_path: PathBuf,

    // Async calculation
    calc_rx: Option<Receiver<CalcResult>>,
    is_calculating: bool,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl FxInsightApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings, settings_path: PathBuf) -> Self {
        let startup_csv = settings.csv_path.clone();
        let mut app = Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(settings),
            chart_viewer: ChartViewer::new(),
            settings_path,
            calc_rx: None,
            is_calculating: false,
            load_rx: None,
            is_loading: false,
        };

        if let Some(path) = startup_csv {
            app.start_loading(path);
        }
        app
    }

    fn save_settings(&self) {
        if let Err(e) = self.control_panel.settings.save(&self.settings_path) {
            log::warn!(
                "Could not save settings to {}: {}",
                self.settings_path.display(),
                e
            );
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Load a CSV file in a background thread
    fn start_loading(&mut self, path: PathBuf) {
        if self.is_loading {
            return;
        }

        self.chart_viewer.clear();
        self.control_panel.has_charts = false;
        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel.set_progress(0.0, "Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match read_data(&path) {
                Ok(df) => LoadResult::Complete { df, path },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { df, path }) => {
                self.loader.set_dataframe(df, path);
                let columns = self.loader.get_columns();
                let message = format!(
                    "Loaded {} rows, {} columns",
                    self.loader.get_row_count(),
                    columns.len()
                );
                self.control_panel
                    .update_columns(columns, self.loader.get_numeric_columns());
                self.control_panel.set_progress(0.0, &message);
                self.is_loading = false;
                self.save_settings();
            }
            Ok(LoadResult::Error(error)) => {
                log::error!("Failed to load CSV: {}", error);
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", error));
                self.is_loading = false;
            }
            Err(TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                log::error!("CSV loader thread exited without a result");
                self.control_panel
                    .set_progress(0.0, "Error: loading was interrupted");
                self.is_loading = false;
            }
        }
    }

    /// Start calculation in background thread
    fn start_calculation(&mut self, request: AnalysisRequest) {
        let Some(df) = self.loader.get_dataframe().cloned() else {
            self.control_panel.set_progress(0.0, "No data loaded");
            return;
        };
        let fill_missing = self.control_panel.settings.fill_missing;

        let (tx, rx) = channel();
        self.calc_rx = Some(rx);
        self.is_calculating = true;
        self.control_panel.set_progress(5.0, "Processing data...");
        self.save_settings();

        thread::spawn(move || {
            Self::run_calculation(tx, df, fill_missing, request);
        });
    }

    /// Run calculation (called from background thread)
    fn run_calculation(
        tx: Sender<CalcResult>,
        df: DataFrame,
        fill_missing: bool,
        request: AnalysisRequest,
    ) {
        let step = if fill_missing {
            "Filling missing values..."
        } else {
            "Calculating..."
        };
        let _ = tx.send(CalcResult::Progress(30.0, step.to_string()));

        let message = match run_analysis(&df, fill_missing, &request) {
            Ok(output) => CalcResult::Complete(output),
            Err(e) => CalcResult::Error(e.to_string()),
        };
        let _ = tx.send(message);
    }

    /// Check for calculation results
    fn check_calculation_results(&mut self) {
        let Some(rx) = self.calc_rx.take() else {
            return;
        };
        let mut should_keep_receiver = true;

        loop {
            let result = match rx.try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.is_calculating {
                        log::error!("Analysis thread exited without a result");
                        self.control_panel
                            .set_progress(0.0, "Error: analysis was interrupted");
                        self.is_calculating = false;
                    }
                    should_keep_receiver = false;
                    break;
                }
            };

            match result {
                CalcResult::Progress(progress, status) => {
                    self.control_panel.set_progress(progress, &status);
                }
                CalcResult::Complete(output) => {
                    self.chart_viewer.set_charts(output.charts, output.comparison);
                    self.control_panel.has_charts = true;
                    self.control_panel.set_progress(100.0, &output.status);
                    self.is_calculating = false;
                    should_keep_receiver = false;
                }
                CalcResult::Error(error) => {
                    log::error!("Analysis failed: {}", error);
                    self.control_panel
                        .set_progress(0.0, &format!("Error: {}", error));
                    self.is_calculating = false;
                    should_keep_receiver = false;
                }
            }
        }

        if should_keep_receiver {
            self.calc_rx = Some(rx);
        }
    }

    /// Render the current charts as PNG files into a chosen folder
    fn handle_export_charts(&mut self) {
        if self.chart_viewer.charts.is_empty() {
            self.control_panel.set_progress(0.0, "No charts to export");
            return;
        }

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        let charts: Vec<Chart> = match self.control_panel.settings.export_size {
            Some((width, height)) => self
                .chart_viewer
                .charts
                .iter()
                .cloned()
                .map(|c| c.with_size(width, height))
                .collect(),
            None => self.chart_viewer.charts.clone(),
        };

        match StaticChartRenderer::render_all(&charts, &dir, ImageFormat::Png) {
            Ok(paths) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Exported {} charts to {}", paths.len(), dir.display()),
                );
            }
            Err(e) => {
                log::error!("Chart export failed: {}", e);
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for FxInsightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.check_calculation_results();

        // Request repaint while loading or calculating
        if self.is_loading || self.is_calculating {
            ctx.request_repaint();
        }

        let busy = self.is_loading || self.is_calculating;

        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, busy);
                    let settings = &self.control_panel.settings;

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::YearlyAverage => {
                            let request = AnalysisRequest::YearlyAverage {
                                date_col: settings.date_col.clone(),
                                value_col: settings.value_col.clone(),
                            };
                            self.start_calculation(request);
                        }
                        ControlPanelAction::Compare => {
                            let request = AnalysisRequest::Compare {
                                col1: settings.compare_col1.clone(),
                                col2: settings.compare_col2.clone(),
                            };
                            self.start_calculation(request);
                        }
                        ControlPanelAction::ExportCharts => self.handle_export_charts(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn rates() -> DataFrame {
        df!(
            "Date" => ["2020-01-01", "2020-06-01", "2021-01-01", "2021-06-01"],
            "EUR" => [Some(1.0), None, Some(3.0), Some(5.0)],
            "GBP" => [Some(2.0), Some(2.0), Some(2.0), Some(2.0)]
        )
        .unwrap()
    }

    #[test]
    fn yearly_run_uses_filled_table_when_asked() {
        let request = AnalysisRequest::YearlyAverage {
            date_col: "Date".into(),
            value_col: "EUR".into(),
        };

        let filled = run_analysis(&rates(), true, &request).unwrap();
        assert_eq!(filled.charts[0].series[0].points, vec![(2020.0, 1.5), (2021.0, 4.0)]);

        let raw = run_analysis(&rates(), false, &request).unwrap();
        assert_eq!(raw.charts[0].series[0].points, vec![(2020.0, 1.0), (2021.0, 4.0)]);
        assert!(raw.comparison.is_none());
    }

    #[test]
    fn compare_run_carries_labels_and_both_charts() {
        let request = AnalysisRequest::Compare {
            col1: "EUR".into(),
            col2: "GBP".into(),
        };
        let output = run_analysis(&rates(), true, &request).unwrap();

        assert_eq!(output.charts.len(), 2);
        let comparison = output.comparison.unwrap();
        assert_eq!(comparison.labels.len(), 4);
        assert_eq!(comparison.summary.first_more_expensive, 1);
        assert_eq!(comparison.summary.second_more_expensive, 2);
        assert_eq!(comparison.summary.same, 1);
    }
}
