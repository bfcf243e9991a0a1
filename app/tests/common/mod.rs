//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for the reporting integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use estimator_lib::{
    create_app_state, fetch_reports, AppState, EstimationRef, FetchFailure, FetchTicket,
    ReportSource,
};

// ============================================================================
// FIXTURES
// ============================================================================

/// Canned response bodies for one estimation.
#[derive(Debug, Clone, Default)]
pub struct Bodies {
    pub category: String,
    pub floor: String,
    pub material: Option<String>,
}

/// Category payload with company and project details.
pub fn category_body(lines: &[(&str, f64, f64, f64)]) -> String {
    let data: Vec<String> = lines
        .iter()
        .map(|(category, material, labour, total)| {
            format!(
                r#"{{"category": "{}", "materialCost": {}, "labourCost": {}, "totalCost": {}, "costPerSft": 1}}"#,
                category, material, labour, total
            )
        })
        .collect();
    format!(
        r#"{{
            "data": [{}],
            "companyDetails": {{"name": "Acme Builders", "phone": "080-5550101"}},
            "projectDetails": {{"projectName": "Villa 7", "clientName": "R. Rao", "builtUpArea": 2400}}
        }}"#,
        data.join(",")
    )
}

pub fn floor_body(lines: &[(&str, &str, &str, f64)]) -> String {
    let data: Vec<String> = lines
        .iter()
        .map(|(floor, component, category, total)| {
            format!(
                r#"{{"floorName": "{}", "componentName": "{}", "category": "{}", "totalQuantity": 1, "unit": "nos", "materialCost": {}, "labourCost": 0, "totalCost": {}, "costPerSft": 0}}"#,
                floor, component, category, total, total
            )
        })
        .collect();
    format!("[{}]", data.join(","))
}

pub fn material_body() -> String {
    r#"{
        "floors": ["Ground", "First"],
        "data": [
            {"category": "Cement", "item": "OPC 53", "Ground": 10, "First": 5, "total": 15, "unit": "bag", "rate": 400, "amount": 6000},
            {"category": "Steel", "item": "TMT 12mm", "Ground": 100, "First": 50, "total": 150, "unit": "kg", "rate": 70, "amount": 10500}
        ]
    }"#
    .to_string()
}

/// The two-category estimate: Civil 1000 + 500, Electrical 500.
pub fn scenario_a() -> Bodies {
    Bodies {
        category: category_body(&[
            ("Civil", 600.0, 400.0, 1000.0),
            ("Civil", 300.0, 200.0, 500.0),
            ("Electrical", 250.0, 250.0, 500.0),
        ]),
        floor: floor_body(&[
            ("Ground", "Footings", "Civil", 300.0),
            ("Ground", "Wiring", "Electrical", 100.0),
            ("First", "Slab", "Civil", 600.0),
        ]),
        material: Some(material_body()),
    }
}

// ============================================================================
// FAKE BACKEND
// ============================================================================

/// In-memory `ReportSource` keyed by estimation id.
#[derive(Default)]
pub struct FakeSource {
    bodies: HashMap<String, Bodies>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, estimation_id: &str, bodies: Bodies) -> Self {
        self.bodies.insert(estimation_id.to_string(), bodies);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, estimation: &EstimationRef, endpoint: &str) -> Result<&Bodies, FetchFailure> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", endpoint, estimation.estimation_id));
        self.bodies
            .get(&estimation.estimation_id)
            .ok_or(FetchFailure::Status(404))
    }
}

impl ReportSource for FakeSource {
    fn category_wise(&self, estimation: &EstimationRef) -> Result<String, FetchFailure> {
        Ok(self.lookup(estimation, "category")?.category.clone())
    }

    fn floor_wise(&self, estimation: &EstimationRef) -> Result<String, FetchFailure> {
        Ok(self.lookup(estimation, "floor")?.floor.clone())
    }

    fn material_details(&self, estimation: &EstimationRef) -> Result<String, FetchFailure> {
        self.lookup(estimation, "material")?
            .material
            .clone()
            .ok_or_else(|| FetchFailure::Network("connection reset".to_string()))
    }
}

// ============================================================================
// HARNESS
// ============================================================================

pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    pub fn new() -> Self {
        TestHarness {
            state: create_app_state(),
        }
    }

    /// A harness whose session has fetched `estimation_id` from `source`.
    pub fn loaded(source: &FakeSource, estimation_id: &str) -> Self {
        let harness = Self::new();
        harness.load(source, "P-1", estimation_id);
        harness
    }

    /// Selects the project and estimation, then runs the fetch to completion.
    pub fn load(&self, source: &FakeSource, project_id: &str, estimation_id: &str) -> bool {
        let ticket = self.select(project_id, estimation_id);
        self.finish(source, &ticket)
    }

    pub fn select(&self, project_id: &str, estimation_id: &str) -> FetchTicket {
        estimator_lib::select_project(&self.state, project_id);
        estimator_lib::select_estimation(&self.state, estimation_id).unwrap()
    }

    pub fn finish(&self, source: &FakeSource, ticket: &FetchTicket) -> bool {
        let result = fetch_reports(source, &ticket.estimation);
        estimator_lib::complete_fetch(&self.state, ticket, result)
    }

    pub fn generated_on(&self, date: &str) {
        self.state.config.lock().unwrap().options.generated_on = date.to_string();
    }
}
