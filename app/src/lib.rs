//! FILENAME: app/src/lib.rs
// PURPOSE: Reporting layer of the estimation back office.
// CONTEXT: Owns the session state machine, decodes backend payloads and exposes
// the grid, document and workbook commands over a shared `AppState`.

use std::path::Path;
use std::sync::Mutex;

pub mod logging;

pub mod api_types;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;

pub use api_types::{decode_category, decode_floor, decode_material, CategoryResponse, EstimationRef};
pub use commands::*;
pub use config::AppConfig;
pub use error::{ConfigError, ExportError, FetchFailure, SessionError};
pub use session::{fetch_reports, FetchTicket, FetchedReports, ReportSession, ReportSource, SessionState};

// ============================================================================
// STATE
// ============================================================================

pub struct AppState {
    pub session: Mutex<ReportSession>,
    pub config: Mutex<AppConfig>,
}

pub fn create_app_state() -> AppState {
    create_app_state_with(AppConfig::default())
}

pub fn create_app_state_with(config: AppConfig) -> AppState {
    log_info!("SYS", "Creating AppState");
    AppState {
        session: Mutex::new(ReportSession::new()),
        config: Mutex::new(config),
    }
}

/// Loads the config (defaults when no path is given) and opens the log file.
pub fn init(config_path: Option<&Path>, log_path: Option<&Path>) -> Result<AppState, ConfigError> {
    if let Some(path) = log_path {
        if let Err(e) = logging::init_log_file(path) {
            eprintln!("[LOG_INIT] {}", e);
        }
    }

    let config = match config_path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    log_info!(
        "SYS",
        "config loaded: currency {}, material details {}",
        config.formats.currency_symbol,
        config.options.include_material_details
    );
    Ok(create_app_state_with(config))
}
