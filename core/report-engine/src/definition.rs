//! FILENAME: core/report-engine/src/definition.rs
//! Report Definition - what each report table looks like.
//!
//! This module contains the types needed to DESCRIBE a report table: which
//! columns it has, which of them carry numbers, and how wide they are. Every
//! surface (grid, document, workbook) lays out the same column list, so a
//! column never shows up on one surface and not another.

use serde::{Deserialize, Serialize};

use engine::{
    CostLineItem, CostRows, MaterialMatrix, MaterialRows, NumberStyle, ReportMetadata,
};

use crate::aggregate::{category_report, floor_report, material_report};
use crate::percentile::PercentileBasis;

// ============================================================================
// REPORT KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    CategoryWise,
    FloorWise,
    DetailedMaterial,
}

impl ReportKind {
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::CategoryWise => "Category-wise Summary",
            ReportKind::FloorWise => "Floor-wise Cost Breakdown",
            ReportKind::DetailedMaterial => "Detailed Material Statement",
        }
    }

    /// Number style of the grand-total percentile cell.
    pub fn grand_total_percent_style(self) -> NumberStyle {
        match self.percentile_basis() {
            Some(PercentileBasis::GroupSubtotal) => NumberStyle::WholePercent,
            _ => NumberStyle::Percent,
        }
    }

    pub fn percentile_basis(self) -> Option<PercentileBasis> {
        match self {
            ReportKind::CategoryWise => Some(PercentileBasis::GrandTotal),
            ReportKind::FloorWise => Some(PercentileBasis::GroupSubtotal),
            ReportKind::DetailedMaterial => None,
        }
    }
}

// ============================================================================
// COLUMNS
// ============================================================================

/// Identifies which field a column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    Category,
    Component,
    Quantity,
    Unit,
    MaterialCost,
    LabourCost,
    TotalCost,
    CostPerSft,
    Percentile,
    Item,
    /// Quantity on the floor at this index of `MaterialMatrix::floors`.
    FloorQuantity(usize),
    MaterialTotal,
    Rate,
    Amount,
}

impl ColumnKey {
    /// Stable key the grid widget addresses cells by.
    pub fn id(self) -> String {
        match self {
            ColumnKey::Category => "category".into(),
            ColumnKey::Component => "componentName".into(),
            ColumnKey::Quantity => "totalQuantity".into(),
            ColumnKey::Unit => "unit".into(),
            ColumnKey::MaterialCost => "materialCost".into(),
            ColumnKey::LabourCost => "labourCost".into(),
            ColumnKey::TotalCost => "totalCost".into(),
            ColumnKey::CostPerSft => "costPerSft".into(),
            ColumnKey::Percentile => "percentileCost".into(),
            ColumnKey::Item => "item".into(),
            ColumnKey::FloorQuantity(i) => format!("floor{}", i),
            ColumnKey::MaterialTotal => "total".into(),
            ColumnKey::Rate => "rate".into(),
            ColumnKey::Amount => "amount".into(),
        }
    }

    /// Columns whose subtotal/grand-total cells carry a summed figure.
    pub fn is_summed(self) -> bool {
        matches!(
            self,
            ColumnKey::MaterialCost
                | ColumnKey::LabourCost
                | ColumnKey::TotalCost
                | ColumnKey::CostPerSft
                | ColumnKey::Percentile
                | ColumnKey::Amount
        )
    }
}

/// Describes one column of a report table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: ColumnKey,
    pub title: String,
    /// `Some` for numeric columns.
    pub number_style: Option<NumberStyle>,
    /// Width hint in characters.
    pub width: f64,
    /// Whether the grid lets users edit data cells in this column.
    pub editable: bool,
}

impl ColumnSpec {
    fn text(key: ColumnKey, title: &str, width: f64) -> Self {
        ColumnSpec {
            key,
            title: title.to_string(),
            number_style: None,
            width,
            editable: false,
        }
    }

    fn number(key: ColumnKey, title: &str, style: NumberStyle, width: f64) -> Self {
        ColumnSpec {
            key,
            title: title.to_string(),
            number_style: Some(style),
            width,
            editable: false,
        }
    }

    fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.number_style.is_some()
    }
}

pub fn category_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::text(ColumnKey::Category, "Category", 28.0),
        ColumnSpec::number(ColumnKey::MaterialCost, "Material Cost", NumberStyle::Amount, 16.0).editable(),
        ColumnSpec::number(ColumnKey::LabourCost, "Labour Cost", NumberStyle::Amount, 16.0).editable(),
        ColumnSpec::number(ColumnKey::TotalCost, "Total Cost", NumberStyle::Amount, 16.0),
        ColumnSpec::number(ColumnKey::CostPerSft, "Cost / Sft", NumberStyle::Amount, 12.0).editable(),
        ColumnSpec::number(ColumnKey::Percentile, "% of Total", NumberStyle::Percent, 10.0),
    ]
}

pub fn floor_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::text(ColumnKey::Component, "Component", 26.0),
        ColumnSpec::text(ColumnKey::Category, "Category", 16.0),
        ColumnSpec::number(ColumnKey::Quantity, "Quantity", NumberStyle::Quantity, 12.0).editable(),
        ColumnSpec::text(ColumnKey::Unit, "Unit", 8.0),
        ColumnSpec::number(ColumnKey::MaterialCost, "Material Cost", NumberStyle::Amount, 16.0).editable(),
        ColumnSpec::number(ColumnKey::LabourCost, "Labour Cost", NumberStyle::Amount, 16.0).editable(),
        ColumnSpec::number(ColumnKey::TotalCost, "Total Cost", NumberStyle::Amount, 16.0),
        ColumnSpec::number(ColumnKey::CostPerSft, "Cost / Sft", NumberStyle::Amount, 12.0).editable(),
        ColumnSpec::number(ColumnKey::Percentile, "% of Floor", NumberStyle::Percent, 10.0),
    ]
}

pub fn material_columns(floors: &[String]) -> Vec<ColumnSpec> {
    let mut columns = vec![ColumnSpec::text(ColumnKey::Item, "Item", 28.0)];
    columns.extend(floors.iter().enumerate().map(|(i, floor)| {
        ColumnSpec::number(ColumnKey::FloorQuantity(i), floor, NumberStyle::Quantity, 12.0)
    }));
    columns.extend([
        ColumnSpec::number(ColumnKey::MaterialTotal, "Total Qty", NumberStyle::Quantity, 12.0),
        ColumnSpec::text(ColumnKey::Unit, "Unit", 8.0),
        ColumnSpec::number(ColumnKey::Rate, "Rate", NumberStyle::Amount, 12.0),
        ColumnSpec::number(ColumnKey::Amount, "Amount", NumberStyle::Amount, 16.0),
    ]);
    columns
}

// ============================================================================
// REPORT SET
// ============================================================================

/// Options that change what gets exported.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportOptions {
    pub include_material_details: bool,
    /// Date printed on exports; left blank when not supplied.
    pub generated_on: String,
}

/// The aggregated datasets for one estimation. Built in full from fetched
/// rows and never patched in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportSet {
    pub metadata: ReportMetadata,
    pub category: CostRows,
    pub floor: CostRows,
    pub material: MaterialRows,
    /// Floor column order of the material matrix.
    pub material_floors: Vec<String>,
}

impl ReportSet {
    pub fn build(
        metadata: ReportMetadata,
        category_items: &[CostLineItem],
        floor_items: &[CostLineItem],
        materials: &MaterialMatrix,
    ) -> Self {
        ReportSet {
            metadata,
            category: category_report(category_items),
            floor: floor_report(floor_items),
            material: material_report(materials),
            material_floors: materials.floors.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.floor.is_empty() && self.material.is_empty()
    }
}

/// What the document and workbook projectors read.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub set: &'a ReportSet,
    pub options: &'a ReportOptions,
}

impl<'a> ReportInput<'a> {
    pub fn new(set: &'a ReportSet, options: &'a ReportOptions) -> Self {
        ReportInput { set, options }
    }
}
