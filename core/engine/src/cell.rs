//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the value a single rendered cell carries on any output surface.
//! CONTEXT: Grid rows, document tables and workbook sheets all hold `CellValue`s.
//! A cell separates the raw value (what a spreadsheet stores) from its style
//! (an index into a `StyleRegistry`).

use serde::{Deserialize, Serialize};

/// Represents the raw data within a rendered cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// The atomic unit of a rendered sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cell {
    pub value: CellValue,
    pub style_index: usize,
}

impl Cell {
    pub fn new() -> Self {
        Cell {
            value: CellValue::Empty,
            style_index: 0,
        }
    }

    pub fn new_number(num: f64) -> Self {
        Cell {
            value: CellValue::Number(num),
            style_index: 0,
        }
    }

    pub fn new_text(text: impl Into<String>) -> Self {
        Cell {
            value: CellValue::Text(text.into()),
            style_index: 0,
        }
    }

    pub fn with_style(mut self, style_index: usize) -> Self {
        self.style_index = style_index;
        self
    }
}
