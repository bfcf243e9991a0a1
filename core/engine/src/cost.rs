//! FILENAME: core/engine/src/cost.rs
//! PURPOSE: Line types returned by the estimation backend.
//! CONTEXT: `CostLineItem` feeds the category-wise and floor-wise reports,
//! `MaterialLine` feeds the detailed-material matrix. Decoding is lenient:
//! numeric fields that are missing, null, non-numeric or non-finite are kept
//! as `None` so the aggregator can default them and the document surface can
//! still detect them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// LENIENT VALUE DECODING
// ============================================================================

/// Reads a JSON value as a finite number. Numeric strings are accepted.
pub fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Reads a JSON value as display text. Null becomes the empty string.
pub fn text_from_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(text_from_value).unwrap_or_default())
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

// ============================================================================
// COST LINE ITEM
// ============================================================================

/// A single per-component cost row, as supplied by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLineItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub floor_name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub component_name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,

    #[serde(default, deserialize_with = "lenient_number")]
    pub total_quantity: Option<f64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: String,

    #[serde(default, deserialize_with = "lenient_number")]
    pub material_cost: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub labour_cost: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub total_cost: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub cost_per_sft: Option<f64>,
}

impl CostLineItem {
    pub fn new(category: impl Into<String>) -> Self {
        CostLineItem {
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn on_floor(mut self, floor: impl Into<String>) -> Self {
        self.floor_name = floor.into();
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component_name = component.into();
        self
    }

    pub fn with_quantity(mut self, quantity: f64, unit: impl Into<String>) -> Self {
        self.total_quantity = finite(quantity);
        self.unit = unit.into();
        self
    }

    /// Sets material, labour and total cost in one go.
    pub fn with_costs(mut self, material: f64, labour: f64, total: f64) -> Self {
        self.material_cost = finite(material);
        self.labour_cost = finite(labour);
        self.total_cost = finite(total);
        self
    }

    pub fn with_total_cost(mut self, total: f64) -> Self {
        self.total_cost = finite(total);
        self
    }

    pub fn with_cost_per_sft(mut self, cost_per_sft: f64) -> Self {
        self.cost_per_sft = finite(cost_per_sft);
        self
    }

    /// True when material, labour and total cost were all supplied as numbers.
    pub fn has_numeric_costs(&self) -> bool {
        self.material_cost.is_some() && self.labour_cost.is_some() && self.total_cost.is_some()
    }
}

// ============================================================================
// MATERIAL LINE
// ============================================================================

/// One row of the material x floor quantity matrix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLine {
    pub category: String,
    pub item: String,
    /// Quantity per floor, aligned with `MaterialMatrix::floors`.
    pub quantities: Vec<Option<f64>>,
    pub total: Option<f64>,
    pub unit: String,
    pub rate: Option<f64>,
    pub amount: Option<f64>,
}

impl MaterialLine {
    pub fn new(category: impl Into<String>, item: impl Into<String>) -> Self {
        MaterialLine {
            category: category.into(),
            item: item.into(),
            ..Default::default()
        }
    }

    pub fn with_quantities(mut self, quantities: &[f64]) -> Self {
        self.quantities = quantities.iter().map(|q| finite(*q)).collect();
        self.total = finite(quantities.iter().sum());
        self
    }

    pub fn with_pricing(mut self, unit: impl Into<String>, rate: f64, amount: f64) -> Self {
        self.unit = unit.into();
        self.rate = finite(rate);
        self.amount = finite(amount);
        self
    }

    /// Quantity for the floor column at `index`, if any.
    pub fn quantity_at(&self, index: usize) -> Option<f64> {
        self.quantities.get(index).copied().flatten()
    }
}

/// The detailed-material dataset: floor column order plus its lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialMatrix {
    pub floors: Vec<String>,
    pub lines: Vec<MaterialLine>,
}

impl MaterialMatrix {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
