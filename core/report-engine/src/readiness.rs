//! FILENAME: core/report-engine/src/readiness.rs
//! Export readiness - whether the export actions may be offered.

use serde::{Deserialize, Serialize};

use engine::{AggregatedRow, AggregatedRows, CostLineItem};

pub const REASON_NO_CATEGORY: &str = "Category-wise data is not loaded";
pub const REASON_NO_FLOOR: &str = "Floor-wise data is not loaded";
pub const REASON_NON_NUMERIC: &str = "Report contains no numeric cost data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ExportReadiness {
    Ready,
    /// `reason` is shown as the tooltip of the disabled action.
    Disabled { reason: String },
}

impl ExportReadiness {
    pub fn disabled(reason: impl Into<String>) -> Self {
        ExportReadiness::Disabled {
            reason: reason.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ExportReadiness::Ready)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ExportReadiness::Ready => None,
            ExportReadiness::Disabled { reason } => Some(reason),
        }
    }
}

/// Ready only when both cost reports are non-empty and each holds at least
/// one data row with numeric costs.
pub fn export_readiness(
    category: &[AggregatedRow<CostLineItem>],
    floor: &[AggregatedRow<CostLineItem>],
) -> ExportReadiness {
    if category.is_empty() {
        return ExportReadiness::disabled(REASON_NO_CATEGORY);
    }
    if floor.is_empty() {
        return ExportReadiness::disabled(REASON_NO_FLOOR);
    }
    if !category.has_numeric_data() || !floor.has_numeric_data() {
        return ExportReadiness::disabled(REASON_NON_NUMERIC);
    }
    ExportReadiness::Ready
}
