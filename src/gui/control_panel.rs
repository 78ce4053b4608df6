//! Control Panel Widget
//! Left side panel with data source, column selection and analysis actions.

use crate::config::Settings;
use egui::{Color32, ComboBox, RichText};

const LABEL_WIDTH: f32 = 110.0;
const COMBO_WIDTH: f32 = 150.0;

/// Left side control panel with file selection and analysis controls.
pub struct ControlPanel {
    pub settings: Settings,
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub progress: f32,
    pub status: String,
    pub has_charts: bool,
}

impl ControlPanel {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            columns: Vec::new(),
            numeric_columns: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
            has_charts: false,
        }
    }

    /// Update available columns after CSV load
    pub fn update_columns(&mut self, columns: Vec<String>, numeric_columns: Vec<String>) {
        self.settings.retain_columns(&columns);
        self.columns = columns;
        self.numeric_columns = numeric_columns;
    }

    fn yearly_ready(&self) -> bool {
        !self.settings.date_col.is_empty() && !self.settings.value_col.is_empty()
    }

    fn compare_ready(&self) -> bool {
        !self.settings.compare_col1.is_empty() && !self.settings.compare_col2.is_empty()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, busy: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💱 FX Insight")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(5.0);
        ui.checkbox(
            &mut self.settings.fill_missing,
            "Fill missing values before analysis",
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Yearly Average Section =====
        ui.label(RichText::new("📅 Yearly Average").size(14.0).strong());
        ui.add_space(8.0);

        column_combo(ui, "date_col", "Date Column:", &mut self.settings.date_col, &self.columns);
        ui.add_space(5.0);
        column_combo(
            ui,
            "value_col",
            "Value Column:",
            &mut self.settings.value_col,
            &self.numeric_columns,
        );
        ui.add_space(8.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!busy && self.yearly_ready(), |ui| {
                let button = egui::Button::new(RichText::new("▶ Yearly Average").size(15.0))
                    .min_size(egui::vec2(200.0, 32.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::YearlyAverage;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Comparison Section =====
        ui.label(RichText::new("⚖ Compare Currencies").size(14.0).strong());
        ui.add_space(8.0);

        column_combo(
            ui,
            "compare_col1",
            "First Column:",
            &mut self.settings.compare_col1,
            &self.numeric_columns,
        );
        ui.add_space(5.0);
        column_combo(
            ui,
            "compare_col2",
            "Second Column:",
            &mut self.settings.compare_col2,
            &self.numeric_columns,
        );
        ui.add_space(8.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!busy && self.compare_ready(), |ui| {
                let button = egui::Button::new(RichText::new("▶ Compare").size(15.0))
                    .min_size(egui::vec2(200.0, 32.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Compare;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(!busy && self.has_charts, |ui| {
                let export_button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export_button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.progress >= 100.0 {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

fn column_combo(ui: &mut egui::Ui, id: &str, label: &str, selected: &mut String, options: &[String]) {
    ui.horizontal(|ui| {
        ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(label));
        ComboBox::from_id_salt(id)
            .width(COMBO_WIDTH)
            .selected_text(selected.as_str())
            .show_ui(ui, |ui| {
                for col in options {
                    ui.selectable_value(&mut *selected, col.clone(), col);
                }
            });
    });
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    YearlyAverage,
    Compare,
    ExportCharts,
}
