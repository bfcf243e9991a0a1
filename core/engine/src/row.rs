//! FILENAME: core/engine/src/row.rs
//! PURPOSE: The aggregated row sequence shared by every output surface.
//! CONTEXT: An aggregated report is a flat `Vec<AggregatedRow<L>>` laid out as
//! `[GroupHeader, Data*, Subtotal]` per group followed by one `GrandTotal`.
//! The row type is generic over the input line so cost reports and the
//! material matrix follow the same row-kind discipline.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::cost::{CostLineItem, MaterialLine};

// ============================================================================
// TRAITS
// ============================================================================

/// Summable figures carried by subtotal and grand-total rows.
pub trait Totals: Clone + Debug + Default + PartialEq {
    /// Adds `other` into `self`.
    fn accumulate(&mut self, other: &Self);

    /// The figure percentiles are computed against.
    fn basis(&self) -> f64;
}

/// An input line that can be folded into an aggregated report.
pub trait ReportLine: Clone + Debug + PartialEq {
    type Totals: Totals;

    /// This line's contribution, with absent numbers taken as zero.
    fn totals(&self) -> Self::Totals;

    /// Whether the mandatory numeric fields arrived as numbers.
    fn is_numeric(&self) -> bool;
}

// ============================================================================
// TOTALS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTotals {
    pub material_cost: f64,
    pub labour_cost: f64,
    pub total_cost: f64,
    pub cost_per_sft: f64,
}

impl Totals for CostTotals {
    fn accumulate(&mut self, other: &Self) {
        self.material_cost += other.material_cost;
        self.labour_cost += other.labour_cost;
        self.total_cost += other.total_cost;
        self.cost_per_sft += other.cost_per_sft;
    }

    fn basis(&self) -> f64 {
        self.total_cost
    }
}

/// Material quantities mix units, so only the priced amount is summed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialTotals {
    pub amount: f64,
}

impl Totals for MaterialTotals {
    fn accumulate(&mut self, other: &Self) {
        self.amount += other.amount;
    }

    fn basis(&self) -> f64 {
        self.amount
    }
}

impl ReportLine for CostLineItem {
    type Totals = CostTotals;

    fn totals(&self) -> CostTotals {
        CostTotals {
            material_cost: self.material_cost.unwrap_or(0.0),
            labour_cost: self.labour_cost.unwrap_or(0.0),
            total_cost: self.total_cost.unwrap_or(0.0),
            cost_per_sft: self.cost_per_sft.unwrap_or(0.0),
        }
    }

    fn is_numeric(&self) -> bool {
        self.has_numeric_costs()
    }
}

impl ReportLine for MaterialLine {
    type Totals = MaterialTotals;

    fn totals(&self) -> MaterialTotals {
        MaterialTotals {
            amount: self.amount.unwrap_or(0.0),
        }
    }

    fn is_numeric(&self) -> bool {
        self.amount.is_some()
    }
}

// ============================================================================
// ROW KIND
// ============================================================================

/// The discriminator every projector switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowKind {
    GroupHeader,
    Data,
    Subtotal,
    GrandTotal,
}

impl RowKind {
    /// Header, subtotal and grand total rows are synthesized, not backend data.
    pub fn is_synthetic(self) -> bool {
        !matches!(self, RowKind::Data)
    }
}

// ============================================================================
// AGGREGATED ROW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(
    tag = "kind",
    rename_all = "camelCase",
    bound(serialize = "L: Serialize, L::Totals: Serialize")
)]
pub enum AggregatedRow<L: ReportLine> {
    GroupHeader {
        label: String,
    },
    Data {
        line: L,
        totals: L::Totals,
        percentile: f64,
        /// Position of `line` in the input the report was built from.
        source_index: usize,
    },
    Subtotal {
        label: String,
        totals: L::Totals,
        percentile: f64,
    },
    GrandTotal {
        totals: L::Totals,
        percentile: f64,
    },
}

impl<L: ReportLine> AggregatedRow<L> {
    pub fn kind(&self) -> RowKind {
        match self {
            AggregatedRow::GroupHeader { .. } => RowKind::GroupHeader,
            AggregatedRow::Data { .. } => RowKind::Data,
            AggregatedRow::Subtotal { .. } => RowKind::Subtotal,
            AggregatedRow::GrandTotal { .. } => RowKind::GrandTotal,
        }
    }

    pub fn is_group_header(&self) -> bool {
        self.kind() == RowKind::GroupHeader
    }

    pub fn is_data(&self) -> bool {
        self.kind() == RowKind::Data
    }

    pub fn is_subtotal(&self) -> bool {
        self.kind() == RowKind::Subtotal
    }

    pub fn is_grand_total(&self) -> bool {
        self.kind() == RowKind::GrandTotal
    }

    /// Group label of header and subtotal rows.
    pub fn label(&self) -> Option<&str> {
        match self {
            AggregatedRow::GroupHeader { label } | AggregatedRow::Subtotal { label, .. } => {
                Some(label)
            }
            _ => None,
        }
    }

    pub fn line(&self) -> Option<&L> {
        match self {
            AggregatedRow::Data { line, .. } => Some(line),
            _ => None,
        }
    }

    pub fn totals(&self) -> Option<&L::Totals> {
        match self {
            AggregatedRow::GroupHeader { .. } => None,
            AggregatedRow::Data { totals, .. }
            | AggregatedRow::Subtotal { totals, .. }
            | AggregatedRow::GrandTotal { totals, .. } => Some(totals),
        }
    }

    pub fn percentile(&self) -> Option<f64> {
        match self {
            AggregatedRow::GroupHeader { .. } => None,
            AggregatedRow::Data { percentile, .. }
            | AggregatedRow::Subtotal { percentile, .. }
            | AggregatedRow::GrandTotal { percentile, .. } => Some(*percentile),
        }
    }

    pub fn source_index(&self) -> Option<usize> {
        match self {
            AggregatedRow::Data { source_index, .. } => Some(*source_index),
            _ => None,
        }
    }
}

/// Convenience accessors over a whole aggregated sequence.
pub trait AggregatedRows<L: ReportLine> {
    fn grand_total(&self) -> Option<&L::Totals>;
    fn data_count(&self) -> usize;
    /// True when the sequence holds at least one data row with numeric costs.
    fn has_numeric_data(&self) -> bool;
    /// True when every data row's mandatory numbers arrived as numbers.
    fn all_numeric(&self) -> bool;
}

impl<L: ReportLine> AggregatedRows<L> for [AggregatedRow<L>] {
    fn grand_total(&self) -> Option<&L::Totals> {
        match self.last() {
            Some(AggregatedRow::GrandTotal { totals, .. }) => Some(totals),
            _ => None,
        }
    }

    fn data_count(&self) -> usize {
        self.iter().filter(|row| row.is_data()).count()
    }

    fn has_numeric_data(&self) -> bool {
        self.iter()
            .filter_map(AggregatedRow::line)
            .any(|line| line.is_numeric())
    }

    fn all_numeric(&self) -> bool {
        self.iter()
            .filter_map(AggregatedRow::line)
            .all(|line| line.is_numeric())
    }
}
