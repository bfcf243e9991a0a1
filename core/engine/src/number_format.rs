//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting shared by the grid, document and workbook surfaces.
//! CONTEXT: Every surface asks the same `FormatRegistry` for both the rounded
//! value and its display string, so identical values always render identical
//! digits. The registry is a plain value object passed explicitly to each
//! projector; there is no global formatting state.

use serde::{Deserialize, Serialize};

use crate::style::NumberFormat;

/// How the integer part of a number is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DigitGrouping {
    /// en-IN: last three digits, then pairs (12,34,567.89).
    #[default]
    Indian,
    /// Thousands (1,234,567.89).
    Western,
    None,
}

/// The kind of figure a column or cell carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberStyle {
    /// Costs and amounts: grouped, fixed decimals.
    Amount,
    /// Quantities and rates: grouped, fixed decimals.
    Quantity,
    /// Percentiles: fixed decimals, no grouping.
    Percent,
    /// The floor-wise grand-total percentile: a whole number.
    WholePercent,
}

/// Central formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatRegistry {
    pub currency_symbol: String,
    pub grouping: DigitGrouping,
    pub decimal_places: u8,
    /// Text rendered for a missing value in a data cell.
    pub missing_value: String,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        FormatRegistry {
            currency_symbol: "\u{20B9}".to_string(),
            grouping: DigitGrouping::Indian,
            decimal_places: 2,
            missing_value: String::new(),
        }
    }
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grouping(mut self, grouping: DigitGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    fn places(&self, style: NumberStyle) -> u8 {
        match style {
            NumberStyle::WholePercent => 0,
            _ => self.decimal_places,
        }
    }

    /// Rounds `value` to the precision `style` displays. Non-finite input becomes 0.
    pub fn round(&self, value: f64, style: NumberStyle) -> f64 {
        round_to(value, self.places(style))
    }

    /// Display string for `value`, using exactly the digits `round` produces.
    pub fn display(&self, value: f64, style: NumberStyle) -> String {
        let places = self.places(style);
        let fixed = format!("{:.prec$}", round_to(value, places), prec = places as usize);
        match style {
            NumberStyle::Amount | NumberStyle::Quantity => group_digits(&fixed, self.grouping),
            NumberStyle::Percent | NumberStyle::WholePercent => fixed,
        }
    }

    /// Display string for an optional value; `None` renders `missing_value`.
    pub fn display_opt(&self, value: Option<f64>, style: NumberStyle) -> String {
        match value {
            Some(v) => self.display(v, style),
            None => self.missing_value.clone(),
        }
    }

    /// Amount with the currency symbol in front ("₹12,34,567.00").
    pub fn currency(&self, value: f64) -> String {
        let digits = self.display(value.abs(), NumberStyle::Amount);
        if round_to(value, self.decimal_places) < 0.0 {
            format!("-{}{}", self.currency_symbol, digits)
        } else {
            format!("{}{}", self.currency_symbol, digits)
        }
    }

    /// Spreadsheet number format for `style`.
    pub fn number_format(&self, style: NumberStyle) -> NumberFormat {
        match style {
            NumberStyle::Amount | NumberStyle::Quantity | NumberStyle::Percent => {
                NumberFormat::Number {
                    decimal_places: self.decimal_places,
                    use_thousands_separator: true,
                }
            }
            NumberStyle::WholePercent => NumberFormat::Number {
                decimal_places: 0,
                use_thousands_separator: false,
            },
        }
    }
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u8) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    // Avoid rendering "-0.00".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Applies digit grouping to a plain fixed-point string like "-1234567.89".
pub fn group_digits(s: &str, grouping: DigitGrouping) -> String {
    match grouping {
        DigitGrouping::None => s.to_string(),
        DigitGrouping::Western => add_separators(s, |i, len| i > 0 && (len - i) % 3 == 0),
        DigitGrouping::Indian => add_separators(s, |i, len| {
            // Positions counted from the right: first break after 3, then every 2.
            let from_right = len - i;
            i > 0 && from_right >= 3 && (from_right == 3 || (from_right - 3) % 2 == 0)
        }),
    }
}

fn add_separators(s: &str, separator_before: impl Fn(usize, usize) -> bool) -> String {
    let mut parts = s.splitn(2, '.');
    let integer_part = parts.next().unwrap_or_default();
    let decimal_part = parts.next();

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if separator_before(i, len) {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}
