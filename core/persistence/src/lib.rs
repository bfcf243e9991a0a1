//! FILENAME: core/persistence/src/lib.rs
//! Report Export Module
//!
//! Lays aggregated cost reports out as styled sheets and saves them in XLSX
//! format. The `Workbook`/`Sheet` model is plain data so the layout can be
//! checked without touching a file.

mod error;
mod workbook;
mod xlsx_writer;

pub use error::PersistenceError;
pub use workbook::{
    build_workbook, SHEET_CATEGORY, SHEET_FLOOR, SHEET_MATERIAL, SHEET_PROJECT_INFO,
};
pub use xlsx_writer::{save_xlsx, to_xlsx_bytes};

use engine::cell::{Cell, CellValue};
use engine::style::CellStyle;
use std::collections::HashMap;

// ============================================================================
// WORKBOOK
// ============================================================================

/// Represents a complete workbook that can be saved
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
    pub active_sheet: usize,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

// ============================================================================
// SHEET
// ============================================================================

/// A rectangular range written as one merged cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
    pub text: String,
    pub style_index: usize,
}

impl MergedRange {
    pub fn contains(&self, row: u32, col: u16) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }
}

/// Represents a single worksheet
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub cells: HashMap<(u32, u16), Cell>,
    pub merges: Vec<MergedRange>,
    /// Widths in characters.
    pub column_widths: HashMap<u16, f64>,
    /// Index 0 is the default style.
    pub styles: Vec<CellStyle>,
    pub landscape: bool,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
            merges: Vec::new(),
            column_widths: HashMap::new(),
            styles: vec![CellStyle::new()],
            landscape: false,
        }
    }

    pub fn set_cell(&mut self, row: u32, col: u16, cell: Cell) {
        self.cells.insert((row, col), cell);
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn value(&self, row: u32, col: u16) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cell(row, col).map(|c| &c.value).unwrap_or(&EMPTY)
    }

    pub fn style_of(&self, row: u32, col: u16) -> Option<&CellStyle> {
        let index = self
            .cell(row, col)
            .map(|c| c.style_index)
            .or_else(|| self.merge_at(row, col).map(|m| m.style_index))?;
        self.styles.get(index)
    }

    pub fn merge_at(&self, row: u32, col: u16) -> Option<&MergedRange> {
        self.merges.iter().find(|m| m.contains(row, col))
    }

    /// Number of rows in use.
    pub fn row_count(&self) -> u32 {
        let cells = self.cells.keys().map(|(r, _)| r + 1).max().unwrap_or(0);
        let merges = self.merges.iter().map(|m| m.last_row + 1).max().unwrap_or(0);
        cells.max(merges)
    }
}
