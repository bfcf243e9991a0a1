//! FILENAME: tests/test_reports.rs
//! Integration tests for the aggregated reports and their grid projection.

mod common;

use common::{category_body, floor_body, scenario_a, Bodies, FakeSource, TestHarness};
use engine::{AggregatedRow, AggregatedRows, RowKind};
use estimator_lib::{get_category_grid, get_floor_grid, get_material_grid, update_floor_cell};
use report_engine::{EditError, GridEdit};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ============================================================================
// CATEGORY-WISE
// ============================================================================

#[test]
fn test_category_rows_follow_contiguous_runs() {
    let source = FakeSource::new().with("E-1", scenario_a());
    let harness = TestHarness::loaded(&source, "E-1");
    let session = harness.state.session.lock().unwrap();
    let rows = &session.reports().category;

    let kinds: Vec<RowKind> = rows.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            RowKind::GroupHeader,
            RowKind::Data,
            RowKind::Data,
            RowKind::Subtotal,
            RowKind::GroupHeader,
            RowKind::Data,
            RowKind::Subtotal,
            RowKind::GrandTotal,
        ]
    );

    let subtotals: Vec<f64> = rows
        .iter()
        .filter(|r| r.is_subtotal())
        .map(|r| r.totals().unwrap().total_cost)
        .collect();
    assert_eq!(subtotals, vec![1500.0, 500.0]);
    assert_eq!(rows.grand_total().unwrap().total_cost, 2000.0);

    let percentiles: Vec<f64> = rows
        .iter()
        .filter(|r| r.is_data())
        .filter_map(|r| r.percentile())
        .collect();
    assert!(approx(percentiles[0], 50.0));
    assert!(approx(percentiles[1], 25.0));
    assert!(approx(percentiles[2], 25.0));
}

#[test]
fn test_missing_material_cost_sums_as_zero() {
    let bodies = Bodies {
        category: r#"[
            {"category": "Civil", "labourCost": 400, "totalCost": 1000},
            {"category": "Civil", "materialCost": 300, "labourCost": 200, "totalCost": 500}
        ]"#
        .to_string(),
        floor: floor_body(&[("Ground", "Footings", "Civil", 100.0)]),
        material: None,
    };
    let source = FakeSource::new().with("E-1", bodies);
    let harness = TestHarness::loaded(&source, "E-1");
    let session = harness.state.session.lock().unwrap();

    let subtotal = session
        .reports()
        .category
        .iter()
        .find(|r| r.is_subtotal())
        .and_then(|r| r.totals())
        .copied()
        .unwrap();
    assert_eq!(subtotal.material_cost, 300.0);
    assert_eq!(subtotal.labour_cost, 600.0);
    assert!(subtotal.total_cost.is_finite());
}

#[test]
fn test_non_contiguous_labels_form_separate_groups() {
    let bodies = Bodies {
        category: category_body(&[
            ("Civil", 0.0, 0.0, 100.0),
            ("Plumbing", 0.0, 0.0, 100.0),
            ("Civil", 0.0, 0.0, 100.0),
        ]),
        floor: floor_body(&[("Ground", "Footings", "Civil", 100.0)]),
        material: None,
    };
    let source = FakeSource::new().with("E-1", bodies);
    let harness = TestHarness::loaded(&source, "E-1");
    let session = harness.state.session.lock().unwrap();

    let headers: Vec<&str> = session
        .reports()
        .category
        .iter()
        .filter(|r| r.is_group_header())
        .filter_map(|r| r.label())
        .collect();
    assert_eq!(headers, vec!["Civil", "Plumbing", "Civil"]);
}

// ============================================================================
// FLOOR-WISE
// ============================================================================

#[test]
fn test_floor_percentiles_are_shares_of_the_floor() {
    let source = FakeSource::new().with("E-1", scenario_a());
    let harness = TestHarness::loaded(&source, "E-1");
    let session = harness.state.session.lock().unwrap();
    let rows = &session.reports().floor;

    let data: Vec<f64> = rows
        .iter()
        .filter(|r| r.is_data())
        .filter_map(|r| r.percentile())
        .collect();
    assert!(approx(data[0], 75.0));
    assert!(approx(data[1], 25.0));
    assert!(approx(data[2], 100.0));

    match rows.last() {
        Some(AggregatedRow::GrandTotal { totals, percentile }) => {
            assert_eq!(totals.total_cost, 1000.0);
            let p = *percentile;
            assert!(p.is_finite());
            assert_eq!(p, p.round());
        }
        other => panic!("expected grand total, got {:?}", other),
    }
}

// ============================================================================
// GRID
// ============================================================================

#[test]
fn test_category_grid_projection() {
    let source = FakeSource::new().with("E-1", scenario_a());
    let harness = TestHarness::loaded(&source, "E-1");
    let grid = get_category_grid(&harness.state);

    assert_eq!(grid.rows.len(), 8);
    assert_eq!(grid.columns[0].key, "category");
    assert_eq!(grid.rows[0].cells[0].col_span, grid.columns.len() as u16);
    assert_eq!(grid.display_at(3, 0), Some("Civil Total"));
    assert_eq!(grid.display_at(3, 3), Some("1,500.00"));
    assert_eq!(grid.display_at(7, 0), Some("Grand Total"));
    assert_eq!(grid.display_at(7, 3), Some("2,000.00"));
    assert!(grid.rows[7].style.bold);
    assert!(grid.rows[1].editable);
    assert!(!grid.rows[3].editable);
}

#[test]
fn test_material_grid_has_a_column_per_floor() {
    let source = FakeSource::new().with("E-1", scenario_a());
    let harness = TestHarness::loaded(&source, "E-1");
    let grid = get_material_grid(&harness.state);

    let titles: Vec<&str> = grid.columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles[1..3], ["Ground", "First"]);
    assert_eq!(grid.rows.last().unwrap().kind, RowKind::GrandTotal);
}

#[test]
fn test_floor_edit_rebuilds_subtotals() {
    let source = FakeSource::new().with("E-1", scenario_a());
    let harness = TestHarness::loaded(&source, "E-1");

    // Row 1 is the Footings data row under the Ground header.
    let grid = update_floor_cell(&harness.state, &GridEdit::new(1, "materialCost", "500")).unwrap();
    assert_eq!(grid.display_at(3, 0), Some("Ground Total"));
    assert_eq!(grid.display_at(3, 6), Some("600.00"));

    let refreshed = get_floor_grid(&harness.state);
    assert_eq!(refreshed, grid);
}

#[test]
fn test_edit_rejects_synthetic_rows() {
    let source = FakeSource::new().with("E-1", scenario_a());
    let harness = TestHarness::loaded(&source, "E-1");

    let err = update_floor_cell(&harness.state, &GridEdit::new(3, "materialCost", "1"));
    assert!(matches!(
        err,
        Err(estimator_lib::ExportError::Edit(EditError::ReadOnlyRow(3)))
    ));
}
