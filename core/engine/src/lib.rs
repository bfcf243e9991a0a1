//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the cost report model.
//! CONTEXT: Re-exports public types and modules for use by the report engine,
//! the workbook writer and the application layer.

pub mod cell;
pub mod cost;
pub mod metadata;
pub mod number_format;
pub mod row;
pub mod style;

// Re-export commonly used types at the crate root
pub use cell::{Cell, CellValue};
pub use cost::{CostLineItem, MaterialLine, MaterialMatrix};
pub use metadata::{CompanyDetails, ProjectDetails, ReportMetadata, AREA_LABEL};
pub use number_format::{DigitGrouping, FormatRegistry, NumberStyle};
pub use row::{
    AggregatedRow, AggregatedRows, CostTotals, MaterialTotals, ReportLine, RowKind, Totals,
};
pub use style::{
    BorderWeight, Borders, CellStyle, Color, FontStyle, NumberFormat, StylePalette,
    StyleRegistry, TextAlign,
};

/// Aggregated category-wise or floor-wise cost report.
pub type CostRows = Vec<AggregatedRow<CostLineItem>>;

/// Aggregated detailed-material report.
pub type MaterialRows = Vec<AggregatedRow<MaterialLine>>;
