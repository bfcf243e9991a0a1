//! FILENAME: core/report-engine/src/percentile.rs
//! Percentile computation - each row's share of its relevant total.
//!
//! Two bases exist and are never mixed:
//! - `GrandTotal`: data rows against the report's grand total (category-wise)
//! - `GroupSubtotal`: data rows against their own group's subtotal (floor-wise),
//!   with the grand-total row's own share rounded to a whole number
//!
//! A subtotal row's percentile is the sum of its data rows' percentiles.

use serde::{Deserialize, Serialize};

use engine::{AggregatedRow, AggregatedRows, ReportLine, Totals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PercentileBasis {
    GrandTotal,
    GroupSubtotal,
}

/// `100 * value / basis`, or 0 when the basis is zero or the result is not finite.
pub fn percent_of(value: f64, basis: f64) -> f64 {
    if basis == 0.0 {
        return 0.0;
    }
    let pct = 100.0 * value / basis;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// Returns a copy of `rows` with every percentile filled in.
pub fn with_percentiles<L: ReportLine>(
    rows: &[AggregatedRow<L>],
    basis: PercentileBasis,
) -> Vec<AggregatedRow<L>> {
    let grand_basis = rows.grand_total().map(|t| t.basis()).unwrap_or(0.0);

    // Subtotals follow their data rows, so collect each group's basis up front.
    let group_bases: Vec<f64> = rows
        .iter()
        .filter_map(|row| match row {
            AggregatedRow::Subtotal { totals, .. } => Some(totals.basis()),
            _ => None,
        })
        .collect();

    let mut group = 0usize;
    let mut group_share = 0.0;
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        let annotated = match row {
            AggregatedRow::GroupHeader { label } => {
                group_share = 0.0;
                AggregatedRow::GroupHeader { label: label.clone() }
            }
            AggregatedRow::Data {
                line,
                totals,
                source_index,
                ..
            } => {
                let denominator = match basis {
                    PercentileBasis::GrandTotal => grand_basis,
                    PercentileBasis::GroupSubtotal => {
                        group_bases.get(group).copied().unwrap_or(0.0)
                    }
                };
                let percentile = percent_of(totals.basis(), denominator);
                group_share += percentile;
                AggregatedRow::Data {
                    line: line.clone(),
                    totals: totals.clone(),
                    percentile,
                    source_index: *source_index,
                }
            }
            AggregatedRow::Subtotal { label, totals, .. } => {
                group += 1;
                AggregatedRow::Subtotal {
                    label: label.clone(),
                    totals: totals.clone(),
                    percentile: group_share,
                }
            }
            AggregatedRow::GrandTotal { totals, .. } => {
                let share = percent_of(totals.basis(), grand_basis);
                let percentile = match basis {
                    PercentileBasis::GrandTotal => share,
                    PercentileBasis::GroupSubtotal => share.round(),
                };
                AggregatedRow::GrandTotal {
                    totals: totals.clone(),
                    percentile,
                }
            }
        };
        out.push(annotated);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{category_report, floor_report};
    use engine::CostLineItem;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_category_percentiles_against_grand_total() {
        let items = vec![
            CostLineItem::new("Civil").with_total_cost(1000.0),
            CostLineItem::new("Civil").with_total_cost(500.0),
            CostLineItem::new("Electrical").with_total_cost(500.0),
        ];
        let rows = category_report(&items);

        let data: Vec<f64> = rows.iter().filter(|r| r.is_data()).filter_map(|r| r.percentile()).collect();
        assert_eq!(data, vec![50.0, 25.0, 25.0]);

        let subtotals: Vec<f64> = rows.iter().filter(|r| r.is_subtotal()).filter_map(|r| r.percentile()).collect();
        assert_eq!(subtotals, vec![75.0, 25.0]);
        assert_eq!(rows.last().unwrap().percentile(), Some(100.0));
    }

    #[test]
    fn test_floor_percentiles_against_floor_subtotal() {
        let items = vec![
            CostLineItem::new("Civil").on_floor("Ground").with_total_cost(300.0),
            CostLineItem::new("Electrical").on_floor("Ground").with_total_cost(100.0),
            CostLineItem::new("Civil").on_floor("First").with_total_cost(600.0),
        ];
        let rows = floor_report(&items);

        let data: Vec<f64> = rows.iter().filter(|r| r.is_data()).filter_map(|r| r.percentile()).collect();
        // Ground: 300/400, 100/400. First: 600/600. Not shares of the 1000 total.
        assert_eq!(data, vec![75.0, 25.0, 100.0]);
        let subtotals: Vec<f64> = rows.iter().filter(|r| r.is_subtotal()).filter_map(|r| r.percentile()).collect();
        assert_eq!(subtotals, vec![100.0, 100.0]);
    }

    #[test]
    fn test_floor_grand_total_percentile_is_whole() {
        let items = vec![
            CostLineItem::new("Civil").on_floor("Ground").with_total_cost(333.333),
            CostLineItem::new("Civil").on_floor("First").with_total_cost(0.001),
        ];
        let rows = floor_report(&items);
        let pct = rows.last().unwrap().percentile().unwrap();
        assert_eq!(pct.fract(), 0.0);
        assert_eq!(pct, 100.0);
    }

    #[test]
    fn test_zero_basis_yields_zero() {
        let items = vec![
            CostLineItem::new("Civil").with_total_cost(0.0),
            CostLineItem::new("Electrical"),
        ];
        let rows = category_report(&items);
        assert!(rows.iter().filter_map(|r| r.percentile()).all(|p| p == 0.0));

        let floors = floor_report(&items);
        assert!(floors.iter().filter_map(|r| r.percentile()).all(|p| p == 0.0));
    }

    #[test]
    fn test_percent_of_guards() {
        assert_eq!(percent_of(5.0, 0.0), 0.0);
        assert_eq!(percent_of(f64::MAX, f64::MIN_POSITIVE), 0.0);
        assert!(approx(percent_of(1.0, 3.0), 33.333333333333336));
    }

    #[test]
    fn test_input_rows_untouched() {
        let items = vec![CostLineItem::new("Civil").with_total_cost(10.0)];
        let raw = crate::aggregate::aggregate(&crate::classify::classify(&items, crate::classify::by_category));
        let annotated = with_percentiles(&raw, PercentileBasis::GrandTotal);
        assert_eq!(raw[1].percentile(), Some(0.0));
        assert_eq!(annotated[1].percentile(), Some(100.0));
    }
}
