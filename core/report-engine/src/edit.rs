//! FILENAME: core/report-engine/src/edit.rs
//! Grid edits - routes a cell edit from the grid back to its input line.
//!
//! Edits never touch an aggregated sequence. `apply_edit` returns a new item
//! vector and the caller rebuilds the report from it.

use serde::{Deserialize, Serialize};

use engine::{CostLineItem, RowKind};

use crate::definition::ColumnKey;
use crate::error::EditError;
use crate::view::GridView;

/// A cell-level edit event emitted by the grid widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridEdit {
    /// Grid row index.
    pub row: usize,
    /// Column key, as in `GridColumn::key`.
    pub column: String,
    /// Text the user typed.
    pub value: String,
}

impl GridEdit {
    pub fn new(row: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        GridEdit {
            row,
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Parses typed text as a cost figure. Grouping commas, spaces and a leading
/// currency symbol are tolerated.
pub fn parse_amount(text: &str) -> Result<f64, EditError> {
    let cleaned: String = text
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let value: f64 = cleaned
        .parse()
        .map_err(|_| EditError::InvalidValue(text.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(EditError::InvalidValue(text.to_string()));
    }
    Ok(value)
}

fn column_key(id: &str) -> Option<ColumnKey> {
    [
        ColumnKey::Quantity,
        ColumnKey::MaterialCost,
        ColumnKey::LabourCost,
        ColumnKey::CostPerSft,
        ColumnKey::TotalCost,
    ]
    .into_iter()
    .find(|key| key.id() == id)
}

/// Applies `edit` to the line behind the edited grid row.
///
/// Editing material or labour cost recomputes the line's total cost as
/// material + labour.
pub fn apply_edit(
    items: &[CostLineItem],
    view: &GridView,
    edit: &GridEdit,
) -> Result<Vec<CostLineItem>, EditError> {
    let row = view
        .rows
        .get(edit.row)
        .ok_or(EditError::RowOutOfRange(edit.row))?;

    if row.kind != RowKind::Data {
        return Err(EditError::ReadOnlyRow(edit.row));
    }
    let source = row
        .source_index
        .filter(|index| *index < items.len())
        .ok_or(EditError::RowOutOfRange(edit.row))?;

    let editable = view
        .columns
        .iter()
        .any(|c| c.key == edit.column && c.editable);
    let key = column_key(&edit.column)
        .filter(|_| editable)
        .ok_or_else(|| EditError::ReadOnlyColumn(edit.column.clone()))?;

    let value = parse_amount(&edit.value)?;

    let mut updated = items.to_vec();
    let line = &mut updated[source];
    match key {
        ColumnKey::Quantity => line.total_quantity = Some(value),
        ColumnKey::CostPerSft => line.cost_per_sft = Some(value),
        ColumnKey::MaterialCost | ColumnKey::LabourCost => {
            if key == ColumnKey::MaterialCost {
                line.material_cost = Some(value);
            } else {
                line.labour_cost = Some(value);
            }
            let material = line.material_cost.unwrap_or(0.0);
            let labour = line.labour_cost.unwrap_or(0.0);
            line.total_cost = Some(material + labour);
        }
        _ => return Err(EditError::ReadOnlyColumn(edit.column.clone())),
    }

    Ok(updated)
}
