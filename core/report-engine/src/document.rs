//! FILENAME: core/report-engine/src/document.rs
//! Document projector - paginates a report set into a declarative page tree.
//!
//! The tree is plain data (`Document -> Page -> Block`) and serializes to JSON
//! for whatever renderer draws the PDF. Page structure is fixed:
//! - Page 1 (portrait): report header, metadata and the category-wise table
//! - Page 2 (landscape): the floor-wise table
//! - Page 3 (portrait, optional): the detailed-material table
//!
//! A page whose dataset is empty or fails the numeric sanity check carries a
//! placeholder block instead of its table. The page itself is never dropped.

use serde::{Deserialize, Serialize};

use engine::{
    AggregatedRow, AggregatedRows, CellStyle, FormatRegistry, NumberStyle, ReportLine, RowKind,
    StylePalette, TextAlign,
};

use crate::definition::{
    category_columns, floor_columns, material_columns, ColumnSpec, ReportInput, ReportKind,
};
use crate::layout::{header_cells, row_cells, LineFields, TotalsFields};

pub const NO_DATA: &str = "No Data Available";
pub const INVALID_DATA: &str = "Invalid Data";
pub const DOCUMENT_TITLE: &str = "Cost Estimate Report";

// ============================================================================
// DOCUMENT TREE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Visual style of a box (cell, row or heading) in renderer terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStyle {
    pub bold: bool,
    pub font_size: u8,
    /// CSS color.
    pub background: String,
    /// Border width in points; 0 for none.
    pub border_width: f32,
    pub border_color: String,
    pub align: TextAlign,
}

impl From<&CellStyle> for BoxStyle {
    fn from(style: &CellStyle) -> Self {
        BoxStyle {
            bold: style.font.bold,
            font_size: style.font.size,
            background: style.background.to_css(),
            border_width: style.borders.weight.points(),
            border_color: style.borders.color.to_css(),
            align: style.text_align,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub title: String,
    /// Relative width.
    pub width: f64,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub text: String,
    pub align: TextAlign,
    pub col_span: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub kind: RowKind,
    pub style: BoxStyle,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub header_style: BoxStyle,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Heading { text: String, style: BoxStyle },
    KeyValues { entries: Vec<KeyValue> },
    Table(Table),
    Placeholder { text: String },
    Spacer { height: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub orientation: Orientation,
    pub blocks: Vec<Block>,
}

impl Page {
    /// Text of the page's placeholder block, if it has one.
    pub fn placeholder(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            Block::Placeholder { text } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn table(&self) -> Option<&Table> {
        self.blocks.iter().find_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

// ============================================================================
// PROJECTION
// ============================================================================

fn heading(text: impl Into<String>, style: &CellStyle) -> Block {
    Block::Heading {
        text: text.into(),
        style: BoxStyle::from(style),
    }
}

fn key_values(pairs: Vec<(&'static str, String)>) -> Block {
    Block::KeyValues {
        entries: pairs
            .into_iter()
            .map(|(key, value)| KeyValue {
                key: key.to_string(),
                value,
            })
            .collect(),
    }
}

/// The table for `rows`, or the placeholder to show instead.
fn table_or_placeholder<L>(
    rows: &[AggregatedRow<L>],
    columns: &[ColumnSpec],
    report: ReportKind,
    formats: &FormatRegistry,
    palette: &StylePalette,
) -> Block
where
    L: ReportLine + LineFields,
    L::Totals: TotalsFields,
{
    if rows.is_empty() {
        return Block::Placeholder {
            text: NO_DATA.to_string(),
        };
    }
    if !rows.all_numeric() {
        return Block::Placeholder {
            text: INVALID_DATA.to_string(),
        };
    }

    let width = columns.len() as u16;
    let table_columns = header_cells(columns)
        .into_iter()
        .zip(columns)
        .map(|(cell, spec)| TableColumn {
            title: cell.display,
            width: spec.width,
            align: if spec.is_numeric() {
                TextAlign::Right
            } else {
                TextAlign::Left
            },
        })
        .collect();

    let table_rows = rows
        .iter()
        .map(|row| {
            let kind = row.kind();
            let cells = row_cells(row, columns, report, formats);
            let cells = if kind == RowKind::GroupHeader {
                cells
                    .into_iter()
                    .take(1)
                    .map(|cell| TableCell {
                        text: cell.display,
                        align: TextAlign::Left,
                        col_span: width,
                    })
                    .collect()
            } else {
                cells
                    .into_iter()
                    .map(|cell| TableCell {
                        align: if cell.number_style.is_some() {
                            TextAlign::Right
                        } else {
                            TextAlign::Left
                        },
                        text: cell.display,
                        col_span: 1,
                    })
                    .collect()
            };
            TableRow {
                kind,
                style: BoxStyle::from(palette.for_row(kind)),
                cells,
            }
        })
        .collect();

    Block::Table(Table {
        columns: table_columns,
        header_style: BoxStyle::from(&palette.column_header),
        rows: table_rows,
    })
}

/// Paginates the report set. Never fails: missing or malformed datasets turn
/// into placeholder pages.
pub fn project_document(
    input: &ReportInput<'_>,
    formats: &FormatRegistry,
    palette: &StylePalette,
) -> Document {
    let set = input.set;
    let metadata = &set.metadata;
    let mut pages = Vec::with_capacity(3);

    // Page 1: header, metadata, category summary.
    let mut first = vec![heading(DOCUMENT_TITLE, &palette.title)];
    let company = metadata.company_fields();
    if !company.is_empty() {
        first.push(key_values(company));
    }
    let area = metadata
        .project
        .built_up_area
        .map(|a| formats.display(a, NumberStyle::Quantity));
    let mut project = metadata.project_fields(area);
    if !input.options.generated_on.is_empty() {
        project.push(("Generated On", input.options.generated_on.clone()));
    }
    if !project.is_empty() {
        first.push(key_values(project));
    }
    first.push(Block::Spacer { height: 12.0 });
    first.push(heading(ReportKind::CategoryWise.title(), &palette.label));
    let category = table_or_placeholder(
        &set.category,
        &category_columns(),
        ReportKind::CategoryWise,
        formats,
        palette,
    );
    let category_ok = matches!(category, Block::Table(_));
    first.push(category);
    if category_ok {
        if let Some(total) = set.category.grand_total() {
            first.push(key_values(vec![(
                "Total Project Cost",
                formats.currency(total.total_cost),
            )]));
        }
    }
    pages.push(Page {
        orientation: Orientation::Portrait,
        blocks: first,
    });

    // Page 2: floor-wise breakdown.
    pages.push(Page {
        orientation: Orientation::Landscape,
        blocks: vec![
            heading(ReportKind::FloorWise.title(), &palette.title),
            table_or_placeholder(
                &set.floor,
                &floor_columns(),
                ReportKind::FloorWise,
                formats,
                palette,
            ),
        ],
    });

    // Page 3: material statement, on request.
    if input.options.include_material_details {
        pages.push(Page {
            orientation: Orientation::Portrait,
            blocks: vec![
                heading(ReportKind::DetailedMaterial.title(), &palette.title),
                table_or_placeholder(
                    &set.material,
                    &material_columns(&set.material_floors),
                    ReportKind::DetailedMaterial,
                    formats,
                    palette,
                ),
            ],
        });
    }

    let title = if metadata.project.project_name.trim().is_empty() {
        DOCUMENT_TITLE.to_string()
    } else {
        format!("{} - {}", DOCUMENT_TITLE, metadata.project.project_name)
    };

    Document { title, pages }
}
