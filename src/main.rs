//! FX Insight - exchange-rate table viewer
//!
//! Usage: `fx_insight [CSV_PATH]`. Without a path the last file from the
//! settings is reopened.

use anyhow::anyhow;
use eframe::egui;
use fx_insight::config::{Settings, SETTINGS_FILE};
use fx_insight::gui::FxInsightApp;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = PathBuf::from(SETTINGS_FILE);
    let mut settings = Settings::load(&settings_path).unwrap_or_else(|e| {
        log::warn!("Ignoring {}: {}", settings_path.display(), e);
        Settings::default()
    });
    if let Some(csv) = std::env::args_os().nth(1) {
        settings.csv_path = Some(PathBuf::from(csv));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("FX Insight"),
        ..Default::default()
    };

    eframe::run_native(
        "FX Insight",
        options,
        Box::new(move |cc| Ok(Box::new(FxInsightApp::new(cc, settings, settings_path)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
