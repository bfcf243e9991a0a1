//! FILENAME: core/report-engine/src/aggregate.rs
//! Aggregator - folds grouped runs into the canonical report sequence.
//!
//! Algorithm:
//! 1. For each non-empty run emit a group header
//! 2. Emit every line as a data row, accumulating a running group total
//! 3. Close the run with a subtotal row carrying the group total
//! 4. After the last run emit one grand total from a single global accumulator
//!
//! Each line's totals are computed exactly once, so the pass is O(n) and the
//! output is never re-summed.

use engine::{AggregatedRow, CostLineItem, MaterialLine, MaterialMatrix, ReportLine, Totals};

use crate::classify::{by_category, by_floor, by_material_category, classify, GroupedRuns};
use crate::percentile::{with_percentiles, PercentileBasis};

/// Folds runs into `[GroupHeader, Data*, Subtotal]*` followed by a `GrandTotal`.
/// Empty input yields an empty sequence.
pub fn aggregate<L: ReportLine>(runs: &GroupedRuns<'_, L>) -> Vec<AggregatedRow<L>> {
    let line_count: usize = runs.iter().map(|run| run.len()).sum();
    if line_count == 0 {
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(line_count + runs.len() * 2 + 1);
    let mut grand_total = L::Totals::default();

    for run in runs.iter().filter(|run| !run.is_empty()) {
        rows.push(AggregatedRow::GroupHeader {
            label: run.label.clone(),
        });

        let mut group_total = L::Totals::default();
        for (source_index, line) in &run.lines {
            let totals = line.totals();
            group_total.accumulate(&totals);
            rows.push(AggregatedRow::Data {
                line: (*line).clone(),
                totals,
                percentile: 0.0,
                source_index: *source_index,
            });
        }

        grand_total.accumulate(&group_total);
        rows.push(AggregatedRow::Subtotal {
            label: run.label.clone(),
            totals: group_total,
            percentile: 0.0,
        });
    }

    rows.push(AggregatedRow::GrandTotal {
        totals: grand_total,
        percentile: 0.0,
    });

    rows
}

/// Category-wise summary: grouped by category, percentiles against the grand total.
pub fn category_report(items: &[CostLineItem]) -> Vec<AggregatedRow<CostLineItem>> {
    let rows = aggregate(&classify(items, by_category));
    with_percentiles(&rows, PercentileBasis::GrandTotal)
}

/// Floor-wise report: grouped by floor, percentiles against each floor's subtotal.
pub fn floor_report(items: &[CostLineItem]) -> Vec<AggregatedRow<CostLineItem>> {
    let rows = aggregate(&classify(items, by_floor));
    with_percentiles(&rows, PercentileBasis::GroupSubtotal)
}

/// Detailed-material report: grouped by material category. No percentiles.
pub fn material_report(matrix: &MaterialMatrix) -> Vec<AggregatedRow<MaterialLine>> {
    aggregate(&classify(&matrix.lines, by_material_category))
}
