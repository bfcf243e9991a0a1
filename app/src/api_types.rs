//! FILENAME: app/src/api_types.rs
// PURPOSE: Backend payload shapes and their decoding.
// CONTEXT: All payloads use camelCase field names. Numeric fields are decoded
// leniently (see `engine::cost`); a payload that is not JSON at all, or has the
// wrong top-level shape, is a decode failure.

use engine::cost::{number_from_value, text_from_value};
use engine::{CompanyDetails, CostLineItem, MaterialLine, MaterialMatrix, ProjectDetails, ReportMetadata};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FetchFailure;

/// Identifies the estimation a fetch is for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationRef {
    pub project_id: String,
    pub estimation_id: String,
}

// ============================================================================
// CATEGORY-WISE
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CategoryEnvelope {
    data: Vec<CostLineItem>,
    company_details: Option<CompanyDetails>,
    project_details: Option<ProjectDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CategoryPayload {
    Bare(Vec<CostLineItem>),
    Envelope(CategoryEnvelope),
}

/// Decoded category-wise response: the cost lines plus report metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryResponse {
    pub items: Vec<CostLineItem>,
    pub metadata: ReportMetadata,
}

pub fn decode_category(body: &str) -> Result<CategoryResponse, FetchFailure> {
    let payload: CategoryPayload = serde_json::from_str(body)?;
    Ok(match payload {
        CategoryPayload::Bare(items) => CategoryResponse {
            items,
            metadata: ReportMetadata::default(),
        },
        CategoryPayload::Envelope(envelope) => CategoryResponse {
            items: envelope.data,
            metadata: ReportMetadata {
                company: envelope.company_details.unwrap_or_default(),
                project: envelope.project_details.unwrap_or_default(),
            },
        },
    })
}

// ============================================================================
// FLOOR-WISE
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FloorEnvelope {
    data: Vec<CostLineItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FloorPayload {
    Bare(Vec<CostLineItem>),
    Envelope(FloorEnvelope),
}

pub fn decode_floor(body: &str) -> Result<Vec<CostLineItem>, FetchFailure> {
    let payload: FloorPayload = serde_json::from_str(body)?;
    Ok(match payload {
        FloorPayload::Bare(items) => items,
        FloorPayload::Envelope(envelope) => envelope.data,
    })
}

// ============================================================================
// DETAILED MATERIAL
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MaterialEnvelope {
    data: Vec<Map<String, Value>>,
    floors: Vec<String>,
}

fn material_line(row: &Map<String, Value>, floors: &[String]) -> MaterialLine {
    let text = |key: &str| row.get(key).map(text_from_value).unwrap_or_default();
    let number = |key: &str| row.get(key).and_then(number_from_value);

    let quantities: Vec<Option<f64>> = floors.iter().map(|floor| number(floor.as_str())).collect();
    // Fall back to the row's own quantities when the backend omits the total.
    let total = number("total").or_else(|| {
        let present: Vec<f64> = quantities.iter().flatten().copied().collect();
        (!present.is_empty()).then(|| present.iter().sum())
    });

    MaterialLine {
        category: text("category"),
        item: text("item"),
        quantities,
        total,
        unit: text("unit"),
        rate: number("rate"),
        amount: number("amount"),
    }
}

/// Decodes the material matrix. Each row carries one key per floor name
/// listed in `floors`.
pub fn decode_material(body: &str) -> Result<MaterialMatrix, FetchFailure> {
    let envelope: MaterialEnvelope = serde_json::from_str(body)?;
    let lines = envelope
        .data
        .iter()
        .map(|row| material_line(row, &envelope.floors))
        .collect();
    Ok(MaterialMatrix {
        floors: envelope.floors,
        lines,
    })
}
