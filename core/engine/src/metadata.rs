//! FILENAME: core/engine/src/metadata.rs
//! PURPOSE: Company and project details printed alongside a report.

use serde::{Deserialize, Serialize};

use crate::cost::{lenient_number, lenient_string};

pub const AREA_LABEL: &str = "Built-up Area (sft)";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gst_number: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub project_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub client_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_string")]
    pub estimation_name: String,
    /// Built-up area in square feet.
    #[serde(deserialize_with = "lenient_number")]
    pub built_up_area: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub estimation_date: String,
}

/// Everything printed in the report header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub company: CompanyDetails,
    pub project: ProjectDetails,
}

impl ReportMetadata {
    /// Label/value pairs for the company block, skipping blank fields.
    pub fn company_fields(&self) -> Vec<(&'static str, String)> {
        let c = &self.company;
        non_blank(vec![
            ("Company", c.name.clone()),
            ("Address", c.address.clone()),
            ("Phone", c.phone.clone()),
            ("Email", c.email.clone()),
            ("GSTIN", c.gst_number.clone()),
        ])
    }

    /// Label/value pairs for the project block, skipping blank fields.
    /// The area is passed in pre-formatted so every surface shows the same digits.
    pub fn project_fields(&self, area_text: Option<String>) -> Vec<(&'static str, String)> {
        let p = &self.project;
        non_blank(vec![
            ("Project", p.project_name.clone()),
            ("Client", p.client_name.clone()),
            ("Location", p.location.clone()),
            ("Estimation", p.estimation_name.clone()),
            (AREA_LABEL, area_text.unwrap_or_default()),
            ("Estimation Date", p.estimation_date.clone()),
        ])
    }
}

fn non_blank(fields: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
    fields
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
}
