//! FILENAME: core/report-engine/src/lib.rs
//! Cost report subsystem.
//!
//! This crate turns flat cost lines into the canonical aggregated row sequence
//! and projects it onto the grid and document surfaces. It depends on `engine`
//! for the line types, row kinds, number formats and styles.
//!
//! Layers:
//! - `classify`: Contiguous-run grouping (WHICH rows belong together)
//! - `aggregate`: Header/data/subtotal/grand-total folding (HOW we sum)
//! - `percentile`: Share-of-total annotation
//! - `definition`: Report kinds, column sets and the per-estimation report set
//! - `layout`: Row/column to cell values, shared by every surface
//! - `view`, `document`: Renderable output (WHAT we display)
//! - `edit`, `readiness`: Grid edits and the export gate

pub mod aggregate;
pub mod classify;
pub mod definition;
pub mod document;
pub mod edit;
pub mod error;
pub mod layout;
pub mod percentile;
pub mod readiness;
pub mod view;

pub use aggregate::{aggregate, category_report, floor_report, material_report};
pub use classify::{by_category, by_floor, by_material_category, classify, GroupedRuns, Run};
pub use definition::*;
pub use document::*;
pub use edit::{apply_edit, parse_amount, GridEdit};
pub use error::EditError;
pub use layout::{header_cells, row_cells, row_label, ReportCell, GRAND_TOTAL_LABEL};
pub use percentile::{percent_of, with_percentiles, PercentileBasis};
pub use readiness::{
    export_readiness, ExportReadiness, REASON_NON_NUMERIC, REASON_NO_CATEGORY, REASON_NO_FLOOR,
};
pub use view::*;
