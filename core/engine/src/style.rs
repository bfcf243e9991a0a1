//! FILENAME: core/engine/src/style.rs
//! PURPOSE: Defines the style data structures, the style registry, and the
//! row-kind palette used by all report surfaces.
//! CONTEXT: Sheets use the Flyweight Pattern for style storage. Instead of
//! storing full style data on every cell, cells store a style_index (usize)
//! that points to a shared style object in the StyleRegistry. The
//! `StylePalette` decides which style a header, data, subtotal or grand-total
//! row gets, so the grid, document and workbook agree on presentation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::row::RowKind;

/// Text alignment options for cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TextAlign {
    #[default]
    General, // Auto: numbers right, text left
    Left,
    Center,
    Right,
}

/// Number format types for displaying numeric values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NumberFormat {
    #[default]
    General,
    #[serde(rename_all = "camelCase")]
    Number {
        decimal_places: u8,
        use_thousands_separator: bool,
    },
    Custom {
        format: String,
    },
}

impl NumberFormat {
    /// Spreadsheet format code ("#,##0.00", "0"). Empty for General.
    pub fn to_format_code(&self) -> String {
        match self {
            NumberFormat::General => String::new(),
            NumberFormat::Number {
                decimal_places,
                use_thousands_separator,
            } => {
                let decimal_part = if *decimal_places > 0 {
                    format!(".{}", "0".repeat(*decimal_places as usize))
                } else {
                    String::new()
                };
                if *use_thousands_separator {
                    format!("#,##0{}", decimal_part)
                } else {
                    format!("0{}", decimal_part)
                }
            }
            NumberFormat::Custom { format } => format.clone(),
        }
    }
}

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const fn from_rgb(rgb: u32) -> Self {
        Color::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const fn black() -> Self {
        Color::new(0, 0, 0)
    }

    pub const fn white() -> Self {
        Color::new(255, 255, 255)
    }

    pub fn to_rgb(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Convert to CSS hex string.
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

/// Border weight, shared by every edge of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub enum BorderWeight {
    #[default]
    None,
    Thin,
    Medium,
    Thick,
}

impl BorderWeight {
    /// Stroke width in points for document rendering.
    pub fn points(self) -> f32 {
        match self {
            BorderWeight::None => 0.0,
            BorderWeight::Thin => 0.5,
            BorderWeight::Medium => 1.0,
            BorderWeight::Thick => 2.0,
        }
    }
}

/// Border configuration for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Borders {
    pub weight: BorderWeight,
    pub color: Color,
}

impl Borders {
    pub const fn new(weight: BorderWeight, color: Color) -> Self {
        Borders { weight, color }
    }
}

/// Font style configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    pub family: String,
    pub size: u8, // Font size in points
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
}

impl Default for FontStyle {
    fn default() -> Self {
        FontStyle {
            family: "Calibri".to_string(),
            size: 10,
            bold: false,
            italic: false,
            color: Color::black(),
        }
    }
}

/// Complete cell style definition.
/// This is what gets stored in the StyleRegistry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellStyle {
    pub font: FontStyle,
    pub background: Color,
    pub text_align: TextAlign,
    pub number_format: NumberFormat,
    pub borders: Borders,
    pub wrap_text: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        CellStyle::new()
    }
}

impl CellStyle {
    /// Create a new default style.
    pub fn new() -> Self {
        CellStyle {
            font: FontStyle::default(),
            background: Color::white(),
            text_align: TextAlign::General,
            number_format: NumberFormat::General,
            borders: Borders::default(),
            wrap_text: false,
        }
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    pub fn with_font_size(mut self, size: u8) -> Self {
        self.font.size = size;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    pub fn with_borders(mut self, weight: BorderWeight, color: Color) -> Self {
        self.borders = Borders::new(weight, color);
        self
    }

    pub fn with_wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    pub fn is_shaded(&self) -> bool {
        self.background != Color::white()
    }
}

/// The StyleRegistry implements the Flyweight Pattern.
/// It stores unique styles and returns indices for cells to reference.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    /// Vector of unique styles. Index 0 is always the default style.
    styles: Vec<CellStyle>,
    /// Reverse lookup: style hash -> index for deduplication.
    style_to_index: HashMap<CellStyle, usize>,
}

impl StyleRegistry {
    /// Create a new registry with the default style at index 0.
    pub fn new() -> Self {
        let default_style = CellStyle::new();
        let mut style_to_index = HashMap::new();
        style_to_index.insert(default_style.clone(), 0);

        StyleRegistry {
            styles: vec![default_style],
            style_to_index,
        }
    }

    /// Get or create a style index for the given style.
    pub fn get_or_create(&mut self, style: CellStyle) -> usize {
        if let Some(&index) = self.style_to_index.get(&style) {
            return index;
        }

        let index = self.styles.len();
        self.style_to_index.insert(style.clone(), index);
        self.styles.push(style);
        index
    }

    /// Get a style by its index.
    /// Returns the default style (index 0) if index is out of bounds.
    pub fn get(&self, index: usize) -> &CellStyle {
        self.styles.get(index).unwrap_or(&self.styles[0])
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the registry only contains the default style.
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }


    pub fn all_styles(&self) -> &[CellStyle] {
        &self.styles
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        StyleRegistry::new()
    }
}

// ============================================================================
// ROW-KIND PALETTE
// ============================================================================

/// Styles for each row kind and the table chrome around them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePalette {
    pub title: CellStyle,
    pub label: CellStyle,
    pub column_header: CellStyle,
    pub group_header: CellStyle,
    pub data: CellStyle,
    pub subtotal: CellStyle,
    pub grand_total: CellStyle,
}

const GRID_LINE: Color = Color::from_rgb(0xBFBFBF);
const DARK_LINE: Color = Color::from_rgb(0x404040);

impl Default for StylePalette {
    fn default() -> Self {
        let data = CellStyle::new().with_borders(BorderWeight::Thin, GRID_LINE);
        StylePalette {
            title: CellStyle::new().with_bold(true).with_font_size(14),
            label: CellStyle::new().with_bold(true),
            column_header: data
                .clone()
                .with_bold(true)
                .with_background(Color::from_rgb(0xD9E1F2))
                .with_text_align(TextAlign::Center)
                .with_wrap_text(true),
            group_header: data
                .clone()
                .with_bold(true)
                .with_background(Color::from_rgb(0xDDEBF7)),
            subtotal: data
                .clone()
                .with_bold(true)
                .with_background(Color::from_rgb(0xF2F2F2)),
            grand_total: data
                .clone()
                .with_bold(true)
                .with_font_size(12)
                .with_background(Color::from_rgb(0xBFBFBF))
                .with_borders(BorderWeight::Medium, DARK_LINE),
            data,
        }
    }
}

impl StylePalette {
    pub fn for_row(&self, kind: RowKind) -> &CellStyle {
        match kind {
            RowKind::GroupHeader => &self.group_header,
            RowKind::Data => &self.data,
            RowKind::Subtotal => &self.subtotal,
            RowKind::GrandTotal => &self.grand_total,
        }
    }

    /// Row style specialised for a numeric cell.
    pub fn numeric(&self, kind: RowKind, format: NumberFormat) -> CellStyle {
        self.for_row(kind)
            .clone()
            .with_text_align(TextAlign::Right)
            .with_number_format(format)
    }
}
