//! FILENAME: core/report-engine/src/layout.rs
//! Cell layout - the single place a row/column pair becomes a value.
//!
//! Every surface asks `row_cells` for the cells of an aggregated row and only
//! decides how to draw them. Values are rounded and formatted here through the
//! `FormatRegistry`, so the grid, the document and the workbook cannot show
//! different digits for the same row.

use serde::{Deserialize, Serialize};

use engine::{
    AggregatedRow, CellValue, CostLineItem, CostTotals, FormatRegistry, MaterialLine,
    MaterialTotals, NumberStyle, ReportLine,
};

use crate::definition::{ColumnKey, ColumnSpec, ReportKind};

pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

/// Field lookup on an input line.
pub trait LineFields {
    fn text_field(&self, key: ColumnKey) -> Option<&str>;
    fn number_field(&self, key: ColumnKey) -> Option<f64>;
}

/// Field lookup on summed totals.
pub trait TotalsFields {
    fn total_field(&self, key: ColumnKey) -> Option<f64>;
}

impl LineFields for CostLineItem {
    fn text_field(&self, key: ColumnKey) -> Option<&str> {
        match key {
            ColumnKey::Category => Some(&self.category),
            ColumnKey::Component => Some(&self.component_name),
            ColumnKey::Unit => Some(&self.unit),
            _ => None,
        }
    }

    fn number_field(&self, key: ColumnKey) -> Option<f64> {
        match key {
            ColumnKey::Quantity => self.total_quantity,
            ColumnKey::MaterialCost => self.material_cost,
            ColumnKey::LabourCost => self.labour_cost,
            ColumnKey::TotalCost => self.total_cost,
            ColumnKey::CostPerSft => self.cost_per_sft,
            _ => None,
        }
    }
}

impl LineFields for MaterialLine {
    fn text_field(&self, key: ColumnKey) -> Option<&str> {
        match key {
            ColumnKey::Category => Some(&self.category),
            ColumnKey::Item => Some(&self.item),
            ColumnKey::Unit => Some(&self.unit),
            _ => None,
        }
    }

    fn number_field(&self, key: ColumnKey) -> Option<f64> {
        match key {
            ColumnKey::FloorQuantity(i) => self.quantity_at(i),
            ColumnKey::MaterialTotal => self.total,
            ColumnKey::Rate => self.rate,
            ColumnKey::Amount => self.amount,
            _ => None,
        }
    }
}

impl TotalsFields for CostTotals {
    fn total_field(&self, key: ColumnKey) -> Option<f64> {
        match key {
            ColumnKey::MaterialCost => Some(self.material_cost),
            ColumnKey::LabourCost => Some(self.labour_cost),
            ColumnKey::TotalCost => Some(self.total_cost),
            ColumnKey::CostPerSft => Some(self.cost_per_sft),
            _ => None,
        }
    }
}

impl TotalsFields for MaterialTotals {
    fn total_field(&self, key: ColumnKey) -> Option<f64> {
        match key {
            ColumnKey::Amount => Some(self.amount),
            _ => None,
        }
    }
}

/// A laid-out cell: the (rounded) value plus its display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCell {
    pub value: CellValue,
    pub display: String,
    /// `Some` when the cell holds a number.
    pub number_style: Option<NumberStyle>,
}

impl ReportCell {
    pub fn empty() -> Self {
        ReportCell {
            value: CellValue::Empty,
            display: String::new(),
            number_style: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        ReportCell {
            value: CellValue::Text(text.clone()),
            display: text,
            number_style: None,
        }
    }

    pub fn number(value: f64, style: NumberStyle, formats: &FormatRegistry) -> Self {
        ReportCell {
            value: CellValue::Number(formats.round(value, style)),
            display: formats.display(value, style),
            number_style: Some(style),
        }
    }

    /// A number, or the registry's missing-value text when `value` is absent.
    fn optional_number(value: Option<f64>, style: NumberStyle, formats: &FormatRegistry) -> Self {
        match value {
            Some(v) => ReportCell::number(v, style, formats),
            None if formats.missing_value.is_empty() => ReportCell::empty(),
            None => ReportCell::text(formats.display_opt(None, style)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Label shown in the first column of a synthetic row.
pub fn row_label<L: ReportLine>(row: &AggregatedRow<L>) -> Option<String> {
    match row {
        AggregatedRow::GroupHeader { label } => Some(label.clone()),
        AggregatedRow::Subtotal { label, .. } => Some(format!("{} Total", label)),
        AggregatedRow::GrandTotal { .. } => Some(GRAND_TOTAL_LABEL.to_string()),
        AggregatedRow::Data { .. } => None,
    }
}

/// Title cells for a table's header row.
pub fn header_cells(columns: &[ColumnSpec]) -> Vec<ReportCell> {
    columns.iter().map(|c| ReportCell::text(c.title.clone())).collect()
}

/// Lays out one aggregated row against `columns`.
///
/// Header rows carry only their label. Subtotal and grand-total rows carry a
/// label plus the summed columns; every other cell is empty.
pub fn row_cells<L>(
    row: &AggregatedRow<L>,
    columns: &[ColumnSpec],
    kind: ReportKind,
    formats: &FormatRegistry,
) -> Vec<ReportCell>
where
    L: ReportLine + LineFields,
    L::Totals: TotalsFields,
{
    let mut cells = Vec::with_capacity(columns.len());

    for (index, column) in columns.iter().enumerate() {
        let cell = match row {
            AggregatedRow::GroupHeader { label } => {
                if index == 0 {
                    ReportCell::text(label.clone())
                } else {
                    ReportCell::empty()
                }
            }
            AggregatedRow::Data {
                line,
                totals,
                percentile,
                ..
            } => match (column.key, column.number_style) {
                (ColumnKey::Percentile, _) => {
                    ReportCell::number(*percentile, NumberStyle::Percent, formats)
                }
                (key, Some(style)) => match totals.total_field(key) {
                    Some(total) => ReportCell::number(total, style, formats),
                    None => ReportCell::optional_number(line.number_field(key), style, formats),
                },
                (key, None) => line
                    .text_field(key)
                    .map(ReportCell::text)
                    .unwrap_or_else(ReportCell::empty),
            },
            AggregatedRow::Subtotal {
                totals, percentile, ..
            }
            | AggregatedRow::GrandTotal { totals, percentile } => {
                if index == 0 {
                    ReportCell::text(row_label(row).unwrap_or_default())
                } else if column.key == ColumnKey::Percentile {
                    let style = if row.is_grand_total() {
                        kind.grand_total_percent_style()
                    } else {
                        NumberStyle::Percent
                    };
                    ReportCell::number(*percentile, style, formats)
                } else {
                    match (totals.total_field(column.key), column.number_style) {
                        (Some(total), Some(style)) => ReportCell::number(total, style, formats),
                        _ => ReportCell::empty(),
                    }
                }
            }
        };
        cells.push(cell);
    }

    cells
}
