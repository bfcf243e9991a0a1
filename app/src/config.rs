//! FILENAME: app/src/config.rs
// PURPOSE: Formatting, palette and export options, loadable from JSON.
// CONTEXT: Every field has a default, so a partial file only overrides what it names.

use crate::error::ConfigError;
use engine::{FormatRegistry, StylePalette};
use report_engine::ReportOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub formats: FormatRegistry,
    pub palette: StylePalette,
    pub options: ReportOptions,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
