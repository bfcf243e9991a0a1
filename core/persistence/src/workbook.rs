//! FILENAME: core/persistence/src/workbook.rs
//! Workbook projector: aggregated report set -> styled sheets.
//!
//! Cell values come from `report_engine::row_cells`, so a number in the sheet
//! is the same rounded figure the grid and the document show. Styles come from
//! the shared `StylePalette` and are deduplicated per sheet.

use engine::cell::Cell;
use engine::style::{CellStyle, StylePalette, StyleRegistry, TextAlign};
use engine::{
    AggregatedRow, CellValue, FormatRegistry, NumberStyle, ReportLine, RowKind, AREA_LABEL,
};
use report_engine::layout::{header_cells, row_cells, LineFields, ReportCell, TotalsFields};
use report_engine::{
    category_columns, floor_columns, material_columns, ColumnSpec, ReportInput, ReportKind,
    DOCUMENT_TITLE, NO_DATA,
};

use crate::{MergedRange, Sheet, Workbook};

pub const SHEET_PROJECT_INFO: &str = "Project Info";
pub const SHEET_CATEGORY: &str = "Category Summary";
pub const SHEET_FLOOR: &str = "Floor-wise";
pub const SHEET_MATERIAL: &str = "Material Details";

/// Writes one sheet top to bottom.
struct SheetBuilder<'a> {
    sheet: Sheet,
    styles: StyleRegistry,
    row: u32,
    formats: &'a FormatRegistry,
    palette: &'a StylePalette,
}

impl<'a> SheetBuilder<'a> {
    fn new(name: &str, formats: &'a FormatRegistry, palette: &'a StylePalette) -> Self {
        SheetBuilder {
            sheet: Sheet::new(name),
            styles: StyleRegistry::new(),
            row: 0,
            formats,
            palette,
        }
    }

    fn style(&mut self, style: &CellStyle) -> usize {
        self.styles.get_or_create(style.clone())
    }

    fn put(&mut self, col: u16, value: CellValue, style: &CellStyle) {
        let index = self.style(style);
        let cell = Cell {
            value,
            style_index: index,
        };
        self.sheet.set_cell(self.row, col, cell);
    }

    fn merged(&mut self, text: &str, last_col: u16, style: &CellStyle) {
        let style_index = self.style(style);
        self.sheet.merges.push(MergedRange {
            first_row: self.row,
            first_col: 0,
            last_row: self.row,
            last_col,
            text: text.to_string(),
            style_index,
        });
    }

    fn next_row(&mut self) {
        self.row += 1;
    }

    fn title(&mut self, text: &str, last_col: u16) {
        let style = self.palette.title.clone();
        if last_col == 0 {
            self.put(0, CellValue::text(text), &style);
        } else {
            self.merged(text, last_col, &style);
        }
        self.next_row();
        self.next_row();
    }

    fn label_value(&mut self, label: &str, value: CellValue, style: Option<NumberStyle>) {
        let label_style = self.palette.label.clone();
        self.put(0, CellValue::text(label), &label_style);
        let value_style = match style {
            Some(number) => CellStyle::new()
                .with_text_align(TextAlign::Left)
                .with_number_format(self.formats.number_format(number)),
            None => CellStyle::new(),
        };
        self.put(1, value, &value_style);
        self.next_row();
    }

    fn table<L>(&mut self, rows: &[AggregatedRow<L>], columns: &[ColumnSpec], report: ReportKind)
    where
        L: ReportLine + LineFields,
        L::Totals: TotalsFields,
    {
        let last_col = columns.len().saturating_sub(1) as u16;

        for (col, spec) in columns.iter().enumerate() {
            self.sheet.column_widths.insert(col as u16, spec.width);
        }

        let header_style = self.palette.column_header.clone();
        for (col, cell) in header_cells(columns).into_iter().enumerate() {
            self.put(col as u16, cell.value, &header_style);
        }
        self.next_row();

        if rows.is_empty() {
            let style = self.palette.data.clone();
            self.merged(NO_DATA, last_col, &style);
            self.next_row();
            return;
        }

        for row in rows {
            let kind = row.kind();
            let cells = row_cells(row, columns, report, self.formats);
            if kind == RowKind::GroupHeader {
                let label = cells
                    .first()
                    .map(|c| c.display.clone())
                    .unwrap_or_default();
                let style = self.palette.for_row(kind).clone();
                self.merged(&label, last_col, &style);
            } else {
                for (col, cell) in cells.into_iter().enumerate() {
                    self.report_cell(col as u16, cell, kind);
                }
            }
            self.next_row();
        }
    }

    fn report_cell(&mut self, col: u16, cell: ReportCell, kind: RowKind) {
        let style = match cell.number_style {
            Some(number) => self
                .palette
                .numeric(kind, self.formats.number_format(number)),
            None => self.palette.for_row(kind).clone(),
        };
        self.put(col, cell.value, &style);
    }

    fn finish(mut self) -> Sheet {
        self.sheet.styles = self.styles.all_styles().to_vec();
        self.sheet
    }
}

fn project_info_sheet(
    input: &ReportInput<'_>,
    formats: &FormatRegistry,
    palette: &StylePalette,
) -> Sheet {
    let mut builder = SheetBuilder::new(SHEET_PROJECT_INFO, formats, palette);
    builder.sheet.column_widths.insert(0, 24.0);
    builder.sheet.column_widths.insert(1, 48.0);
    builder.title(DOCUMENT_TITLE, 1);

    let metadata = &input.set.metadata;
    for (label, value) in metadata.company_fields() {
        builder.label_value(label, CellValue::Text(value), None);
    }
    if !metadata.company_fields().is_empty() {
        builder.next_row();
    }

    // Same list and order as the document header; the area stays numeric.
    let area = metadata.project.built_up_area;
    let area_text = area.map(|a| formats.display(a, NumberStyle::Quantity));
    for (label, value) in metadata.project_fields(area_text) {
        match area {
            Some(a) if label == AREA_LABEL => builder.label_value(
                label,
                CellValue::Number(formats.round(a, NumberStyle::Quantity)),
                Some(NumberStyle::Quantity),
            ),
            _ => builder.label_value(label, CellValue::Text(value), None),
        }
    }
    if !input.options.generated_on.is_empty() {
        builder.label_value(
            "Generated On",
            CellValue::Text(input.options.generated_on.clone()),
            None,
        );
    }

    if let Some(AggregatedRow::GrandTotal { totals, .. }) = input.set.category.last() {
        let total = formats.round(totals.total_cost, NumberStyle::Amount);
        builder.label_value(
            "Total Project Cost",
            CellValue::Number(total),
            Some(NumberStyle::Amount),
        );
    }

    builder.finish()
}

fn table_sheet<L>(
    name: &str,
    rows: &[AggregatedRow<L>],
    columns: &[ColumnSpec],
    report: ReportKind,
    formats: &FormatRegistry,
    palette: &StylePalette,
) -> Sheet
where
    L: ReportLine + LineFields,
    L::Totals: TotalsFields,
{
    let mut builder = SheetBuilder::new(name, formats, palette);
    builder.title(report.title(), columns.len().saturating_sub(1) as u16);
    builder.table(rows, columns, report);
    builder.finish()
}

/// Builds the export workbook: project info, category summary, floor-wise
/// breakdown and, when requested, the material statement.
pub fn build_workbook(
    input: &ReportInput<'_>,
    formats: &FormatRegistry,
    palette: &StylePalette,
) -> Workbook {
    let set = input.set;
    let mut sheets = vec![
        project_info_sheet(input, formats, palette),
        table_sheet(
            SHEET_CATEGORY,
            &set.category,
            &category_columns(),
            ReportKind::CategoryWise,
            formats,
            palette,
        ),
    ];

    let mut floor = table_sheet(
        SHEET_FLOOR,
        &set.floor,
        &floor_columns(),
        ReportKind::FloorWise,
        formats,
        palette,
    );
    floor.landscape = true;
    sheets.push(floor);

    if input.options.include_material_details {
        sheets.push(table_sheet(
            SHEET_MATERIAL,
            &set.material,
            &material_columns(&set.material_floors),
            ReportKind::DetailedMaterial,
            formats,
            palette,
        ));
    }

    Workbook {
        sheets,
        active_sheet: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{BorderWeight, CostLineItem, MaterialLine, MaterialMatrix, ReportMetadata};
    use report_engine::{ReportOptions, ReportSet};

    fn set() -> ReportSet {
        let items = vec![
            CostLineItem::new("Civil").on_floor("Ground").with_costs(600.0, 400.0, 1000.0),
            CostLineItem::new("Civil").on_floor("Ground").with_costs(300.0, 200.0, 500.0),
            CostLineItem::new("Electrical").on_floor("First").with_costs(250.0, 250.0, 500.0),
        ];
        let mut metadata = ReportMetadata::default();
        metadata.project.project_name = "Villa 7".into();
        metadata.project.built_up_area = Some(2400.0);
        let materials = MaterialMatrix {
            floors: vec!["Ground".into(), "First".into()],
            lines: vec![MaterialLine::new("Cement", "OPC 53")
                .with_quantities(&[10.0, 5.0])
                .with_pricing("bag", 400.0, 6000.0)],
        };
        ReportSet::build(metadata, &items, &items, &materials)
    }

    fn workbook(options: &ReportOptions) -> Workbook {
        let set = set();
        build_workbook(
            &ReportInput::new(&set, options),
            &FormatRegistry::default(),
            &StylePalette::default(),
        )
    }

    #[test]
    fn test_sheet_names() {
        let wb = workbook(&ReportOptions::default());
        assert_eq!(wb.sheet_names(), vec![SHEET_PROJECT_INFO, SHEET_CATEGORY, SHEET_FLOOR]);

        let options = ReportOptions {
            include_material_details: true,
            ..Default::default()
        };
        let wb = workbook(&options);
        assert_eq!(wb.sheets.len(), 4);
        assert_eq!(wb.sheets[3].name, SHEET_MATERIAL);
        assert!(wb.sheet(SHEET_FLOOR).unwrap().landscape);
    }

    #[test]
    fn test_category_sheet_layout() {
        let wb = workbook(&ReportOptions::default());
        let sheet = wb.sheet(SHEET_CATEGORY).unwrap();

        // Row 0 title, row 1 blank, row 2 column headers, row 3 first group header.
        assert_eq!(sheet.merge_at(0, 5).map(|m| m.text.as_str()), Some("Category-wise Summary"));
        assert_eq!(sheet.value(2, 0), &CellValue::text("Category"));
        let header = sheet.merge_at(3, 0).unwrap();
        assert_eq!(header.text, "Civil");
        assert_eq!((header.first_col, header.last_col), (0, 5));

        // Civil subtotal
        assert_eq!(sheet.value(6, 0), &CellValue::text("Civil Total"));
        assert_eq!(sheet.value(6, 3), &CellValue::Number(1500.0));
        assert!(sheet.value(6, 4).as_number().is_some());

        // Grand total at the bottom
        let last = sheet.row_count() - 1;
        assert_eq!(sheet.value(last, 0), &CellValue::text("Grand Total"));
        assert_eq!(sheet.value(last, 3), &CellValue::Number(2000.0));
        assert_eq!(sheet.value(last, 5), &CellValue::Number(100.0));
    }

    #[test]
    fn test_row_kind_styles() {
        let wb = workbook(&ReportOptions::default());
        let sheet = wb.sheet(SHEET_FLOOR).unwrap();
        let last = sheet.row_count() - 1;

        let header = sheet.style_of(3, 0).unwrap();
        assert!(header.font.bold && header.is_shaded());

        let grand = sheet.style_of(last, 6).unwrap();
        assert!(grand.font.bold);
        assert_eq!(grand.borders.weight, BorderWeight::Medium);
        assert_eq!(grand.number_format.to_format_code(), "#,##0.00");
        assert_eq!(grand.text_align, TextAlign::Right);

        let grand_pct = sheet.style_of(last, 8).unwrap();
        assert_eq!(grand_pct.number_format.to_format_code(), "0");

        let data = sheet.style_of(4, 6).unwrap();
        assert!(!data.font.bold);
        assert_eq!(data.borders.weight, BorderWeight::Thin);
    }

    #[test]
    fn test_project_info_sheet() {
        let wb = workbook(&ReportOptions {
            generated_on: "16-10-2026".into(),
            ..Default::default()
        });
        let sheet = wb.sheet(SHEET_PROJECT_INFO).unwrap();
        assert_eq!(sheet.merge_at(0, 1).map(|m| m.text.as_str()), Some(DOCUMENT_TITLE));
        assert_eq!(sheet.value(2, 0), &CellValue::text("Project"));
        assert_eq!(sheet.value(2, 1), &CellValue::text("Villa 7"));
        assert_eq!(sheet.value(3, 1), &CellValue::Number(2400.0));
        assert_eq!(sheet.value(4, 1), &CellValue::text("16-10-2026"));
        assert_eq!(sheet.value(5, 0), &CellValue::text("Total Project Cost"));
        assert_eq!(sheet.value(5, 1), &CellValue::Number(2000.0));
    }

    #[test]
    fn test_material_sheet_columns() {
        let wb = workbook(&ReportOptions {
            include_material_details: true,
            ..Default::default()
        });
        let sheet = wb.sheet(SHEET_MATERIAL).unwrap();
        assert_eq!(sheet.value(2, 1), &CellValue::text("Ground"));
        assert_eq!(sheet.value(2, 2), &CellValue::text("First"));
        // Row 4: the OPC 53 line.
        assert_eq!(sheet.value(4, 3), &CellValue::Number(15.0));
        assert_eq!(sheet.value(4, 6), &CellValue::Number(6000.0));
    }

    #[test]
    fn test_empty_dataset_writes_placeholder() {
        let set = ReportSet::default();
        let options = ReportOptions::default();
        let wb = build_workbook(
            &ReportInput::new(&set, &options),
            &FormatRegistry::default(),
            &StylePalette::default(),
        );
        let sheet = wb.sheet(SHEET_CATEGORY).unwrap();
        assert_eq!(sheet.merge_at(3, 0).map(|m| m.text.as_str()), Some(NO_DATA));
    }

    #[test]
    fn test_project_fields_follow_document_order() {
        let mut set = set();
        set.metadata.project.client_name = "R. Rao".into();
        set.metadata.project.estimation_date = "01-10-2026".into();
        let options = ReportOptions::default();
        let wb = build_workbook(
            &ReportInput::new(&set, &options),
            &FormatRegistry::default(),
            &StylePalette::default(),
        );
        let sheet = wb.sheet(SHEET_PROJECT_INFO).unwrap();

        let labels: Vec<&str> = (2..6)
            .filter_map(|row| sheet.value(row, 0).as_text())
            .collect();
        let expected: Vec<&str> = set
            .metadata
            .project_fields(Some("2,400.00".into()))
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, expected);
        assert_eq!(sheet.value(4, 0), &CellValue::text(AREA_LABEL));
        assert_eq!(sheet.value(4, 1), &CellValue::Number(2400.0));
        assert_eq!(sheet.value(5, 1), &CellValue::text("01-10-2026"));
    }
}
