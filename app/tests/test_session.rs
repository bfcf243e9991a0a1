//! FILENAME: tests/test_session.rs
//! Integration tests for the selection -> fetch -> ready flow.

mod common;

use common::{category_body, floor_body, scenario_a, Bodies, FakeSource, TestHarness};
use engine::AggregatedRows;
use estimator_lib::{
    complete_fetch, fetch_reports, get_export_readiness, refresh_reports, select_estimation,
    select_project, SessionError, SessionState,
};
use report_engine::{ExportReadiness, REASON_NO_CATEGORY};

fn estimate(total: f64) -> Bodies {
    Bodies {
        category: category_body(&[("Civil", 0.0, 0.0, total)]),
        floor: floor_body(&[("Ground", "Footings", "Civil", total)]),
        material: None,
    }
}

fn grand_total(harness: &TestHarness) -> Option<f64> {
    let session = harness.state.session.lock().unwrap();
    session.reports().category.grand_total().map(|t| t.total_cost)
}

#[test]
fn test_estimation_requires_a_project() {
    let harness = TestHarness::new();
    assert_eq!(
        select_estimation(&harness.state, "E-1").unwrap_err(),
        SessionError::NoProjectSelected
    );
    assert_eq!(
        refresh_reports(&harness.state, &FakeSource::new()).unwrap_err(),
        SessionError::NoProjectSelected
    );
}

#[test]
fn test_load_reaches_ready() {
    let source = FakeSource::new().with("E-1", scenario_a());
    let harness = TestHarness::new();
    assert!(harness.load(&source, "P-1", "E-1"));

    let session = harness.state.session.lock().unwrap();
    assert_eq!(session.state(), &SessionState::Ready);
    assert_eq!(session.reports().metadata.project.project_name, "Villa 7");
    assert_eq!(session.reports().material_floors, vec!["Ground", "First"]);
}

#[test]
fn test_later_selection_wins_when_responses_arrive_out_of_order() {
    let source = FakeSource::new()
        .with("X", estimate(100.0))
        .with("Y", estimate(900.0));
    let harness = TestHarness::new();
    select_project(&harness.state, "P-1");

    let x = select_estimation(&harness.state, "X").unwrap();
    let y = select_estimation(&harness.state, "Y").unwrap();
    // Selecting Y cleared X's state before either fetch settled.
    assert_eq!(grand_total(&harness), None);

    assert!(harness.finish(&source, &y));
    assert!(!harness.finish(&source, &x));

    assert_eq!(grand_total(&harness), Some(900.0));
    let session = harness.state.session.lock().unwrap();
    assert_eq!(session.estimation_id(), Some("Y"));
    assert_eq!(session.state(), &SessionState::Ready);
}

#[test]
fn test_project_change_invalidates_pending_fetch() {
    let source = FakeSource::new().with("E-1", scenario_a());
    let harness = TestHarness::new();
    let ticket = harness.select("P-1", "E-1");
    select_project(&harness.state, "P-2");

    let result = fetch_reports(&source, &ticket.estimation);
    assert!(!complete_fetch(&harness.state, &ticket, result));
    assert_eq!(grand_total(&harness), None);
    assert_eq!(
        harness.state.session.lock().unwrap().state(),
        &SessionState::ProjectSelected
    );
}

#[test]
fn test_failed_fetch_resets_to_empty() {
    let source = FakeSource::new().with("E-1", scenario_a());
    let harness = TestHarness::new();
    assert!(harness.load(&source, "P-1", "E-1"));
    assert_eq!(grand_total(&harness), Some(2000.0));

    // Unknown estimation: the fake backend answers 404.
    let ticket = select_estimation(&harness.state, "E-404").unwrap();
    assert!(harness.finish(&source, &ticket));

    assert_eq!(grand_total(&harness), None);
    assert!(matches!(
        harness.state.session.lock().unwrap().state(),
        SessionState::Error(_)
    ));
    assert_eq!(
        get_export_readiness(&harness.state),
        ExportReadiness::disabled(REASON_NO_CATEGORY)
    );
}

#[test]
fn test_malformed_category_payload_is_an_error() {
    let bodies = Bodies {
        category: "<html>Bad Gateway</html>".to_string(),
        ..estimate(10.0)
    };
    let source = FakeSource::new().with("E-1", bodies);
    let harness = TestHarness::new();
    assert!(harness.load(&source, "P-1", "E-1"));
    assert!(matches!(
        harness.state.session.lock().unwrap().state(),
        SessionState::Error(_)
    ));
}

#[test]
fn test_material_failure_is_not_fatal() {
    let source = FakeSource::new().with("E-1", estimate(50.0));
    let harness = TestHarness::new();
    assert!(harness.load(&source, "P-1", "E-1"));

    let session = harness.state.session.lock().unwrap();
    assert_eq!(session.state(), &SessionState::Ready);
    assert!(session.reports().material.is_empty());
    assert!(source.calls().contains(&"material:E-1".to_string()));
}

#[test]
fn test_refresh_refetches_current_estimation() {
    let source = FakeSource::new().with("E-1", scenario_a());
    let harness = TestHarness::new();
    assert!(harness.load(&source, "P-1", "E-1"));

    assert!(refresh_reports(&harness.state, &source).unwrap());
    let category_calls = source
        .calls()
        .iter()
        .filter(|c| c.as_str() == "category:E-1")
        .count();
    assert_eq!(category_calls, 2);
    assert_eq!(grand_total(&harness), Some(2000.0));
    assert!(get_export_readiness(&harness.state).is_ready());
}
