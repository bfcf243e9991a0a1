//! FILENAME: core/report-engine/src/view.rs
//! Grid View - Renderable output for the editable grid widget.
//!
//! This module maps an aggregated report onto the row array + column
//! descriptors the grid consumes. It includes metadata for:
//! - Row kind (header, data, subtotal, grand total)
//! - Cell spans (group headers span the full width)
//! - Visual formatting hints (bold, background, font size, alignment)
//! - The source line each data row came from, for routing edits

use serde::{Deserialize, Serialize};

use engine::{
    AggregatedRow, CellValue, CostLineItem, FormatRegistry, MaterialLine, ReportLine, RowKind,
    StylePalette, TextAlign,
};

use crate::definition::{category_columns, floor_columns, material_columns, ColumnSpec, ReportKind};
use crate::layout::{row_cells, LineFields, ReportCell, TotalsFields};

// ============================================================================
// COLUMN DESCRIPTORS
// ============================================================================

/// Describes a column of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridColumn {
    /// Field key the widget addresses cells by.
    pub key: String,
    pub title: String,
    pub numeric: bool,
    pub editable: bool,
    /// Width hint in characters.
    pub width: f64,
}

impl From<&ColumnSpec> for GridColumn {
    fn from(spec: &ColumnSpec) -> Self {
        GridColumn {
            key: spec.key.id(),
            title: spec.title.clone(),
            numeric: spec.is_numeric(),
            editable: spec.editable,
            width: spec.width,
        }
    }
}

// ============================================================================
// ROWS AND CELLS
// ============================================================================

/// Visual hints for a whole row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowStyle {
    pub bold: bool,
    /// CSS color, e.g. "#f2f2f2".
    pub background: String,
    pub font_size: u8,
}

/// A single cell in the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub value: CellValue,
    /// Pre-formatted display string.
    pub display: String,
    pub align: TextAlign,
    /// Number of columns this cell covers; 0 for cells hidden under a span.
    pub col_span: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub kind: RowKind,
    pub cells: Vec<GridCell>,
    pub style: RowStyle,
    /// Index of the input line for data rows.
    pub source_index: Option<usize>,
    pub editable: bool,
}

/// The complete grid model for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
    pub report: ReportKind,
    pub columns: Vec<GridColumn>,
    pub rows: Vec<GridRow>,
}

impl GridView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The display string at (row, column), if present.
    pub fn display_at(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .map(|c| c.display.as_str())
    }
}

fn cell_align(cell: &ReportCell) -> TextAlign {
    if cell.number_style.is_some() {
        TextAlign::Right
    } else {
        TextAlign::Left
    }
}

/// Projects an aggregated sequence onto grid rows.
pub fn project_grid<L>(
    rows: &[AggregatedRow<L>],
    columns: &[ColumnSpec],
    report: ReportKind,
    formats: &FormatRegistry,
    palette: &StylePalette,
) -> GridView
where
    L: ReportLine + LineFields,
    L::Totals: TotalsFields,
{
    let width = columns.len() as u16;
    let mut grid_rows = Vec::with_capacity(rows.len());

    for row in rows {
        let kind = row.kind();
        let style = palette.for_row(kind);

        let cells = row_cells(row, columns, report, formats)
            .into_iter()
            .enumerate()
            .map(|(index, cell)| {
                let col_span = match (kind, index) {
                    (RowKind::GroupHeader, 0) => width,
                    (RowKind::GroupHeader, _) => 0,
                    _ => 1,
                };
                GridCell {
                    align: cell_align(&cell),
                    value: cell.value,
                    display: cell.display,
                    col_span,
                }
            })
            .collect();

        grid_rows.push(GridRow {
            kind,
            cells,
            style: RowStyle {
                bold: style.font.bold,
                background: style.background.to_css(),
                font_size: style.font.size,
            },
            source_index: row.source_index(),
            editable: kind == RowKind::Data,
        });
    }

    GridView {
        report,
        columns: columns.iter().map(GridColumn::from).collect(),
        rows: grid_rows,
    }
}

pub fn project_category_grid(
    rows: &[AggregatedRow<CostLineItem>],
    formats: &FormatRegistry,
    palette: &StylePalette,
) -> GridView {
    project_grid(rows, &category_columns(), ReportKind::CategoryWise, formats, palette)
}

pub fn project_floor_grid(
    rows: &[AggregatedRow<CostLineItem>],
    formats: &FormatRegistry,
    palette: &StylePalette,
) -> GridView {
    project_grid(rows, &floor_columns(), ReportKind::FloorWise, formats, palette)
}

pub fn project_material_grid(
    rows: &[AggregatedRow<MaterialLine>],
    floors: &[String],
    formats: &FormatRegistry,
    palette: &StylePalette,
) -> GridView {
    project_grid(rows, &material_columns(floors), ReportKind::DetailedMaterial, formats, palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{category_report, floor_report};

    fn category_grid() -> GridView {
        let rows = category_report(&[
            CostLineItem::new("Civil").with_costs(600.0, 400.0, 1000.0),
            CostLineItem::new("Civil").with_costs(300.0, 200.0, 500.0),
            CostLineItem::new("Electrical").with_costs(250.0, 250.0, 500.0),
        ]);
        project_category_grid(&rows, &FormatRegistry::default(), &StylePalette::default())
    }

    #[test]
    fn test_grid_shape() {
        let grid = category_grid();
        assert_eq!(grid.columns.len(), 6);
        assert_eq!(grid.columns[1].key, "materialCost");
        assert!(grid.columns[1].numeric);
        assert_eq!(grid.rows.len(), 8);
        assert!(grid.rows.iter().all(|r| r.cells.len() == 6));
    }

    #[test]
    fn test_header_spans_all_columns() {
        let grid = category_grid();
        let header = &grid.rows[0];
        assert_eq!(header.kind, RowKind::GroupHeader);
        assert_eq!(header.cells[0].col_span, 6);
        assert_eq!(header.cells[0].display, "Civil");
        assert!(header.cells[1..].iter().all(|c| c.col_span == 0 && c.display.is_empty()));
        assert!(header.style.bold);
        assert!(!header.editable);
    }

    #[test]
    fn test_total_rows_styling() {
        let grid = category_grid();
        let subtotal = &grid.rows[3];
        assert_eq!(subtotal.kind, RowKind::Subtotal);
        assert!(subtotal.style.bold);
        assert_eq!(subtotal.cells[3].display, "1,500.00");
        assert_eq!(subtotal.cells[3].align, TextAlign::Right);

        let grand = grid.rows.last().unwrap();
        assert_eq!(grand.kind, RowKind::GrandTotal);
        assert!(grand.style.font_size > subtotal.style.font_size);
        assert_ne!(grand.style.background, subtotal.style.background);
        assert_eq!(grand.cells[3].display, "2,000.00");
    }

    #[test]
    fn test_data_rows_route_to_source() {
        let grid = category_grid();
        let sources: Vec<Option<usize>> = grid.rows.iter().map(|r| r.source_index).collect();
        assert_eq!(sources, vec![None, Some(0), Some(1), None, None, Some(2), None, None]);
        assert!(grid.rows[1].editable);
        assert_eq!(grid.display_at(1, 5), Some("50.00"));
    }

    #[test]
    fn test_floor_grid_grand_total_percent_is_whole() {
        let rows = floor_report(&[
            CostLineItem::new("Civil").on_floor("Ground").with_costs(1.0, 1.0, 2.0),
            CostLineItem::new("Civil").on_floor("First").with_costs(1.0, 0.0, 1.0),
        ]);
        let grid = project_floor_grid(&rows, &FormatRegistry::default(), &StylePalette::default());
        let last = grid.rows.last().unwrap();
        assert_eq!(last.cells.last().unwrap().display, "100");
    }

    #[test]
    fn test_empty_report_gives_empty_grid() {
        let grid = project_category_grid(&[], &FormatRegistry::default(), &StylePalette::default());
        assert!(grid.is_empty());
        assert_eq!(grid.columns.len(), 6);
    }

    #[test]
    fn test_grid_serializes_for_widget() {
        let grid = category_grid();
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["rows"][0]["kind"], "GroupHeader");
        assert_eq!(json["rows"][1]["sourceIndex"], 0);
        assert_eq!(json["columns"][0]["key"], "category");
    }
}
