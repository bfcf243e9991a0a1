//! FILENAME: app/src/session.rs
// PURPOSE: The reporting flow: project -> estimation -> fetch -> ready/error.
// CONTEXT: Fetches are ticketed. Every selection bumps a generation counter and
// a completion whose ticket is not from the current generation is dropped, so a
// slow response for an earlier estimation can never overwrite a newer one.

use engine::{CostLineItem, FormatRegistry, MaterialMatrix, ReportMetadata, StylePalette};
use report_engine::{
    apply_edit, category_report, export_readiness, floor_report, project_category_grid,
    project_floor_grid, project_material_grid, ExportReadiness, GridEdit, GridView, ReportSet,
};
use serde::{Deserialize, Serialize};

use crate::api_types::{decode_category, decode_floor, decode_material, EstimationRef};
use crate::error::{FetchFailure, SessionError};
use crate::logging::{log_debug, log_error, log_info, log_warn};

// ============================================================================
// BACKEND SEAM
// ============================================================================

/// The three report endpoints. Implementations return the raw response body.
pub trait ReportSource {
    fn category_wise(&self, estimation: &EstimationRef) -> Result<String, FetchFailure>;
    fn floor_wise(&self, estimation: &EstimationRef) -> Result<String, FetchFailure>;
    fn material_details(&self, estimation: &EstimationRef) -> Result<String, FetchFailure>;
}

/// Decoded responses for one estimation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchedReports {
    pub metadata: ReportMetadata,
    pub category: Vec<CostLineItem>,
    pub floor: Vec<CostLineItem>,
    pub materials: MaterialMatrix,
}

/// Fetches and decodes all three reports. The category and floor reports are
/// required; a failed material fetch leaves the material matrix empty.
pub fn fetch_reports(
    source: &dyn ReportSource,
    estimation: &EstimationRef,
) -> Result<FetchedReports, FetchFailure> {
    let category = decode_category(&source.category_wise(estimation)?)?;
    let floor = decode_floor(&source.floor_wise(estimation)?)?;

    let materials = match source
        .material_details(estimation)
        .and_then(|body| decode_material(&body))
    {
        Ok(matrix) => matrix,
        Err(e) => {
            log_warn!(
                "FETCH",
                "material details unavailable for {}: {}",
                estimation.estimation_id,
                e
            );
            MaterialMatrix::default()
        }
    };

    Ok(FetchedReports {
        metadata: category.metadata,
        category: category.items,
        floor,
        materials,
    })
}

// ============================================================================
// SESSION STATE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum SessionState {
    #[default]
    Idle,
    ProjectSelected,
    EstimationSelected,
    Fetching,
    Ready,
    Error(String),
}

/// Handed out when a fetch begins; must be presented to complete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub estimation: EstimationRef,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct ReportSession {
    state: SessionState,
    project_id: Option<String>,
    estimation_id: Option<String>,
    generation: u64,
    category_items: Vec<CostLineItem>,
    floor_items: Vec<CostLineItem>,
    materials: MaterialMatrix,
    reports: ReportSet,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn estimation_id(&self) -> Option<&str> {
        self.estimation_id.as_deref()
    }

    /// The aggregated reports of the current estimation.
    pub fn reports(&self) -> &ReportSet {
        &self.reports
    }

    pub fn category_items(&self) -> &[CostLineItem] {
        &self.category_items
    }

    pub fn floor_items(&self) -> &[CostLineItem] {
        &self.floor_items
    }

    fn set_state(&mut self, state: SessionState) {
        log_debug!("SESSION", "{:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn clear_reports(&mut self) {
        self.category_items.clear();
        self.floor_items.clear();
        self.materials = MaterialMatrix::default();
        self.reports = ReportSet::default();
    }

    /// Selecting a project drops the estimation and every aggregate. Any
    /// fetch still in flight becomes stale.
    pub fn select_project(&mut self, project_id: impl Into<String>) {
        let project_id = project_id.into();
        log_info!("SESSION", "select project {}", project_id);
        self.project_id = Some(project_id);
        self.estimation_id = None;
        self.generation += 1;
        self.clear_reports();
        self.set_state(SessionState::ProjectSelected);
    }

    /// Clears all aggregates synchronously and begins a fetch for the new
    /// estimation.
    pub fn select_estimation(
        &mut self,
        estimation_id: impl Into<String>,
    ) -> Result<FetchTicket, SessionError> {
        if self.project_id.is_none() {
            return Err(SessionError::NoProjectSelected);
        }
        let estimation_id = estimation_id.into();
        log_info!("SESSION", "select estimation {}", estimation_id);
        self.estimation_id = Some(estimation_id);
        self.clear_reports();
        self.set_state(SessionState::EstimationSelected);
        self.begin_fetch()
    }

    /// Starts a new fetch generation for the current estimation.
    pub fn begin_fetch(&mut self) -> Result<FetchTicket, SessionError> {
        let project_id = self
            .project_id
            .clone()
            .ok_or(SessionError::NoProjectSelected)?;
        let estimation_id = self
            .estimation_id
            .clone()
            .ok_or(SessionError::NoEstimationSelected)?;

        self.generation += 1;
        self.set_state(SessionState::Fetching);
        Ok(FetchTicket {
            generation: self.generation,
            estimation: EstimationRef {
                project_id,
                estimation_id,
            },
        })
    }

    /// Applies a finished fetch. Returns `false` when the ticket is stale and
    /// the result was dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<FetchedReports, FetchFailure>,
    ) -> bool {
        if ticket.generation != self.generation {
            log_debug!(
                "SESSION",
                "dropping stale fetch for {} (generation {}, current {})",
                ticket.estimation.estimation_id,
                ticket.generation,
                self.generation
            );
            return false;
        }

        match result {
            Ok(fetched) => {
                self.category_items = fetched.category;
                self.floor_items = fetched.floor;
                self.materials = fetched.materials;
                self.reports = ReportSet::build(
                    fetched.metadata,
                    &self.category_items,
                    &self.floor_items,
                    &self.materials,
                );
                log_info!(
                    "SESSION",
                    "estimation {} ready: {} category lines, {} floor lines, {} material lines",
                    ticket.estimation.estimation_id,
                    self.category_items.len(),
                    self.floor_items.len(),
                    self.materials.lines.len()
                );
                self.set_state(SessionState::Ready);
            }
            Err(failure) => {
                log_error!(
                    "FETCH",
                    "estimation {} failed: {}",
                    ticket.estimation.estimation_id,
                    failure
                );
                self.clear_reports();
                self.set_state(SessionState::Error(failure.to_string()));
            }
        }
        true
    }

    /// Refetches the current estimation through `source`.
    pub fn refresh(&mut self, source: &dyn ReportSource) -> Result<bool, SessionError> {
        let ticket = self.begin_fetch()?;
        let result = fetch_reports(source, &ticket.estimation);
        Ok(self.complete_fetch(&ticket, result))
    }

    pub fn export_readiness(&self) -> ExportReadiness {
        export_readiness(&self.reports.category, &self.reports.floor)
    }

    // ------------------------------------------------------------------------
    // Grid surface
    // ------------------------------------------------------------------------

    pub fn category_grid(&self, formats: &FormatRegistry, palette: &StylePalette) -> GridView {
        project_category_grid(&self.reports.category, formats, palette)
    }

    pub fn floor_grid(&self, formats: &FormatRegistry, palette: &StylePalette) -> GridView {
        project_floor_grid(&self.reports.floor, formats, palette)
    }

    pub fn material_grid(&self, formats: &FormatRegistry, palette: &StylePalette) -> GridView {
        project_material_grid(
            &self.reports.material,
            &self.reports.material_floors,
            formats,
            palette,
        )
    }

    /// Applies an edit made on the category grid and rebuilds that report.
    pub fn edit_category(
        &mut self,
        edit: &GridEdit,
        formats: &FormatRegistry,
        palette: &StylePalette,
    ) -> Result<GridView, report_engine::EditError> {
        let view = self.category_grid(formats, palette);
        self.category_items = apply_edit(&self.category_items, &view, edit)?;
        self.reports.category = category_report(&self.category_items);
        log_debug!("EDIT", "category row {} column {} updated", edit.row, edit.column);
        Ok(self.category_grid(formats, palette))
    }

    /// Applies an edit made on the floor grid and rebuilds that report.
    pub fn edit_floor(
        &mut self,
        edit: &GridEdit,
        formats: &FormatRegistry,
        palette: &StylePalette,
    ) -> Result<GridView, report_engine::EditError> {
        let view = self.floor_grid(formats, palette);
        self.floor_items = apply_edit(&self.floor_items, &view, edit)?;
        self.reports.floor = floor_report(&self.floor_items);
        log_debug!("EDIT", "floor row {} column {} updated", edit.row, edit.column);
        Ok(self.floor_grid(formats, palette))
    }
}
