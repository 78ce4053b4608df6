//! Chart Plotter Module
//! Draws chart descriptions interactively using egui_plot.

use crate::charts::{Chart, ChartKind, SeriesColor};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

/// Creates interactive charts in the viewer.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(color: SeriesColor) -> Color32 {
        Color32::from_rgb(color.0, color.1, color.2)
    }

    /// Draw a chart with its title, scaled to `height`.
    pub fn draw_chart(ui: &mut egui::Ui, id: usize, chart: &Chart, height: f32) {
        ui.label(RichText::new(&chart.title).size(16.0).strong());
        ui.add_space(4.0);

        let mut plot = Plot::new(format!("chart_{}", id))
            .height(height)
            .x_axis_label(chart.x_label.as_str())
            .y_axis_label(chart.y_label.as_str())
            .show_grid(chart.grid)
            .allow_scroll(false);
        if chart.series.len() > 1 {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            for series in &chart.series {
                let color = Self::color(series.color);
                match chart.kind {
                    ChartKind::Line => {
                        let points: PlotPoints =
                            series.points.iter().map(|&(x, y)| [x, y]).collect();
                        plot_ui.line(
                            Line::new(points)
                                .color(color)
                                .width(1.5)
                                .name(&series.name),
                        );

                        if series.markers {
                            let markers: PlotPoints =
                                series.points.iter().map(|&(x, y)| [x, y]).collect();
                            plot_ui.points(Points::new(markers).radius(3.5).color(color));
                        }
                    }
                    ChartKind::Bar => {
                        let bars = series
                            .points
                            .iter()
                            .map(|&(x, y)| Bar::new(x, y).width(0.8))
                            .collect();
                        plot_ui.bar_chart(BarChart::new(bars).color(color).name(&series.name));
                    }
                }
            }
        });
    }
}
