//! FILENAME: core/report-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Row {0} is outside the grid")]
    RowOutOfRange(usize),

    #[error("Row {0} is a header or total row and cannot be edited")]
    ReadOnlyRow(usize),

    #[error("Column '{0}' cannot be edited")]
    ReadOnlyColumn(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
