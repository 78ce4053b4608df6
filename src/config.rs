//! User settings persisted between viewer sessions.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "fx_insight.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub csv_path: Option<PathBuf>,
    /// Run the gap-filler before every analysis.
    pub fill_missing: bool,
    pub date_col: String,
    pub value_col: String,
    pub compare_col1: String,
    pub compare_col2: String,
    /// Size of exported images; `None` keeps each chart's own size.
    pub export_size: Option<(u32, u32)>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            csv_path: None,
            fill_missing: true,
            date_col: String::new(),
            value_col: String::new(),
            compare_col1: String::new(),
            compare_col2: String::new(),
            export_size: None,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Forget column choices that the newly loaded table does not have.
    pub fn retain_columns(&mut self, columns: &[String]) {
        for selected in [
            &mut self.date_col,
            &mut self.value_col,
            &mut self.compare_col1,
            &mut self.compare_col2,
        ] {
            if !columns.contains(&*selected) {
                selected.clear();
            }
        }
    }
}
