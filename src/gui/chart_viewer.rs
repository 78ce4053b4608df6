//! Chart Viewer Widget
//! Right side scrollable panel showing the charts of the last analysis.

use crate::charts::{Chart, ChartPlotter};
use crate::stats::{ComparisonSummary, SAME_LABEL};
use egui::{Color32, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const PLOT_HEIGHT: f32 = 320.0;

/// Labels of the last comparison run, kept alongside its charts.
#[derive(Clone)]
pub struct ComparisonView {
    pub col1: String,
    pub col2: String,
    pub labels: Vec<String>,
    pub summary: ComparisonSummary,
}

/// Scrollable display of chart cards, one per chart.
#[derive(Default)]
pub struct ChartViewer {
    pub charts: Vec<Chart>,
    pub comparison: Option<ComparisonView>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.charts.clear();
        self.comparison = None;
    }

    pub fn set_charts(&mut self, charts: Vec<Chart>, comparison: Option<ComparisonView>) {
        self.charts = charts;
        self.comparison = comparison;
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.charts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(comparison) = &self.comparison {
                    Self::draw_comparison(ui, comparison);
                    ui.add_space(CHART_SPACING);
                }

                for (i, chart) in self.charts.iter().enumerate() {
                    egui::Frame::none()
                        .rounding(8.0)
                        .stroke(egui::Stroke::new(1.5, Color32::from_rgb(100, 149, 237)))
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ChartPlotter::draw_chart(ui, i, chart, PLOT_HEIGHT);
                        });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_comparison(ui: &mut egui::Ui, comparison: &ComparisonView) {
        let summary = &comparison.summary;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!(
                        "{} vs {}: {} rows",
                        comparison.col1,
                        comparison.col2,
                        summary.total()
                    ))
                    .size(14.0)
                    .strong(),
                );
                egui::Grid::new("comparison_summary")
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(format!("{} is more expensive", comparison.col1));
                        ui.label(summary.first_more_expensive.to_string());
                        ui.end_row();
                        ui.label(format!("{} is more expensive", comparison.col2));
                        ui.label(summary.second_more_expensive.to_string());
                        ui.end_row();
                        ui.label(SAME_LABEL);
                        ui.label(summary.same.to_string());
                        ui.end_row();
                    });

                ui.collapsing("Per-row labels", |ui| {
                    ScrollArea::vertical()
                        .id_salt("comparison_labels")
                        .max_height(160.0)
                        .show_rows(ui, 18.0, comparison.labels.len(), |ui, rows| {
                            for row in rows {
                                ui.label(format!("{:>6}  {}", row, comparison.labels[row]));
                            }
                        });
                });
            });
    }
}
