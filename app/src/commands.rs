//! FILENAME: app/src/commands.rs
// PURPOSE: Command surface of the reporting screen.
// CONTEXT: Each command locks the shared state, does one thing, and returns
// plain serializable data. Export commands are gated on the readiness predicate
// and never try to render a report that is not ready.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use persistence::{build_workbook, save_xlsx, to_xlsx_bytes};
use report_engine::{
    project_document, Document, ExportReadiness, GridEdit, GridView, ReportInput, ReportOptions,
};

use crate::config::AppConfig;
use crate::error::{ExportError, FetchFailure, SessionError};
use crate::logging::{log_enter_info, log_exit_info, log_warn};
use crate::session::{FetchTicket, FetchedReports, ReportSession, ReportSource};
use crate::AppState;

/// A poisoned lock still holds a consistent session: every mutation replaces
/// whole values.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn ensure_ready(session: &ReportSession) -> Result<(), ExportError> {
    match session.export_readiness() {
        ExportReadiness::Ready => Ok(()),
        ExportReadiness::Disabled { reason } => {
            log_warn!("EXPORT", "export refused: {}", reason);
            Err(ExportError::NotReady(reason))
        }
    }
}

/// Options with the generation date filled in.
fn export_options(options: &ReportOptions) -> ReportOptions {
    let mut options = options.clone();
    if options.generated_on.trim().is_empty() {
        options.generated_on = chrono::Local::now().format("%d-%m-%Y").to_string();
    }
    options
}

// ============================================================================
// SELECTION & FETCH
// ============================================================================

pub fn select_project(state: &AppState, project_id: &str) {
    lock(&state.session).select_project(project_id);
}

pub fn select_estimation(state: &AppState, estimation_id: &str) -> Result<FetchTicket, SessionError> {
    lock(&state.session).select_estimation(estimation_id)
}

/// Returns whether the result was applied (false for a stale ticket).
pub fn complete_fetch(
    state: &AppState,
    ticket: &FetchTicket,
    result: Result<FetchedReports, FetchFailure>,
) -> bool {
    lock(&state.session).complete_fetch(ticket, result)
}

pub fn refresh_reports(state: &AppState, source: &dyn ReportSource) -> Result<bool, SessionError> {
    lock(&state.session).refresh(source)
}

pub fn get_export_readiness(state: &AppState) -> ExportReadiness {
    lock(&state.session).export_readiness()
}

pub fn set_include_material_details(state: &AppState, include: bool) {
    lock(&state.config).options.include_material_details = include;
}

// ============================================================================
// GRID
// ============================================================================

pub fn get_category_grid(state: &AppState) -> GridView {
    let config = lock(&state.config);
    lock(&state.session).category_grid(&config.formats, &config.palette)
}

pub fn get_floor_grid(state: &AppState) -> GridView {
    let config = lock(&state.config);
    lock(&state.session).floor_grid(&config.formats, &config.palette)
}

pub fn get_material_grid(state: &AppState) -> GridView {
    let config = lock(&state.config);
    lock(&state.session).material_grid(&config.formats, &config.palette)
}

pub fn update_category_cell(state: &AppState, edit: &GridEdit) -> Result<GridView, ExportError> {
    let config = lock(&state.config);
    Ok(lock(&state.session).edit_category(edit, &config.formats, &config.palette)?)
}

pub fn update_floor_cell(state: &AppState, edit: &GridEdit) -> Result<GridView, ExportError> {
    let config = lock(&state.config);
    Ok(lock(&state.session).edit_floor(edit, &config.formats, &config.palette)?)
}

// ============================================================================
// EXPORT
// ============================================================================

pub fn export_document(state: &AppState) -> Result<Document, ExportError> {
    log_enter_info!("EXPORT", "export_document");
    let config: AppConfig = lock(&state.config).clone();
    let session = lock(&state.session);
    ensure_ready(&session)?;

    let options = export_options(&config.options);
    let document = project_document(
        &ReportInput::new(session.reports(), &options),
        &config.formats,
        &config.palette,
    );
    log_exit_info!("EXPORT", "export_document", "{} pages", document.pages.len());
    Ok(document)
}

/// The document tree as JSON, for the PDF renderer.
pub fn export_document_json(state: &AppState) -> Result<String, ExportError> {
    let document = export_document(state)?;
    Ok(serde_json::to_string(&document)?)
}

fn workbook_for(state: &AppState) -> Result<persistence::Workbook, ExportError> {
    let config: AppConfig = lock(&state.config).clone();
    let session = lock(&state.session);
    ensure_ready(&session)?;

    let options = export_options(&config.options);
    Ok(build_workbook(
        &ReportInput::new(session.reports(), &options),
        &config.formats,
        &config.palette,
    ))
}

pub fn export_workbook(state: &AppState, path: &Path) -> Result<(), ExportError> {
    log_enter_info!("EXPORT", "export_workbook", "{}", path.display());
    let workbook = workbook_for(state)?;
    save_xlsx(&workbook, path)?;
    log_exit_info!("EXPORT", "export_workbook", "{} sheets", workbook.sheets.len());
    Ok(())
}

pub fn export_workbook_bytes(state: &AppState) -> Result<Vec<u8>, ExportError> {
    log_enter_info!("EXPORT", "export_workbook_bytes");
    let workbook = workbook_for(state)?;
    let bytes = to_xlsx_bytes(&workbook)?;
    log_exit_info!("EXPORT", "export_workbook_bytes", "{} bytes", bytes.len());
    Ok(bytes)
}
