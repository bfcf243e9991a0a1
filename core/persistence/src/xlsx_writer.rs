//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::{PersistenceError, Sheet, Workbook};
use engine::cell::CellValue;
use engine::style::{BorderWeight, CellStyle, Color, TextAlign};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

pub fn save_xlsx(workbook: &Workbook, path: &Path) -> Result<(), PersistenceError> {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    if !is_xlsx {
        return Err(PersistenceError::InvalidFormat(format!(
            "expected an .xlsx path, got {}",
            path.display()
        )));
    }

    let mut xlsx = build_xlsx(workbook)?;
    xlsx.save(path)?;
    Ok(())
}

/// Renders the workbook to an in-memory XLSX file.
pub fn to_xlsx_bytes(workbook: &Workbook) -> Result<Vec<u8>, PersistenceError> {
    let mut xlsx = build_xlsx(workbook)?;
    Ok(xlsx.save_to_buffer()?)
}

fn build_xlsx(workbook: &Workbook) -> Result<XlsxWorkbook, PersistenceError> {
    if workbook.sheets.is_empty() {
        return Err(PersistenceError::InvalidFormat(
            "workbook has no sheets".to_string(),
        ));
    }

    let mut xlsx = XlsxWorkbook::new();
    for (index, sheet) in workbook.sheets.iter().enumerate() {
        let worksheet = xlsx.add_worksheet();
        write_sheet(worksheet, sheet)?;
        if index == workbook.active_sheet {
            worksheet.set_active(true);
        }
    }
    Ok(xlsx)
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> Result<(), PersistenceError> {
    worksheet.set_name(&sheet.name)?;
    if sheet.landscape {
        worksheet.set_landscape();
    }

    // Widths are already in characters
    for (col, width) in &sheet.column_widths {
        worksheet.set_column_width(*col, *width)?;
    }

    for ((row, col), cell) in &sheet.cells {
        let format = sheet
            .styles
            .get(cell.style_index)
            .filter(|_| cell.style_index > 0)
            .map(convert_style_to_format);

        match (&cell.value, format) {
            (CellValue::Empty, Some(fmt)) => {
                worksheet.write_blank(*row, *col, &fmt)?;
            }
            (CellValue::Empty, None) => {}
            (CellValue::Number(n), Some(fmt)) => {
                worksheet.write_number_with_format(*row, *col, *n, &fmt)?;
            }
            (CellValue::Number(n), None) => {
                worksheet.write_number(*row, *col, *n)?;
            }
            (CellValue::Text(s), Some(fmt)) => {
                worksheet.write_string_with_format(*row, *col, s, &fmt)?;
            }
            (CellValue::Text(s), None) => {
                worksheet.write_string(*row, *col, s)?;
            }
        }
    }

    for merge in &sheet.merges {
        let style = sheet
            .styles
            .get(merge.style_index)
            .cloned()
            .unwrap_or_default();
        let format = convert_style_to_format(&style);
        if merge.first_row == merge.last_row && merge.first_col == merge.last_col {
            worksheet.write_string_with_format(merge.first_row, merge.first_col, &merge.text, &format)?;
        } else {
            worksheet.merge_range(
                merge.first_row,
                merge.first_col,
                merge.last_row,
                merge.last_col,
                &merge.text,
                &format,
            )?;
        }
    }

    Ok(())
}

fn convert_style_to_format(style: &CellStyle) -> Format {
    let mut format = Format::new();

    // Font settings
    if style.font.bold {
        format = format.set_bold();
    }
    if style.font.italic {
        format = format.set_italic();
    }

    format = format.set_font_size(style.font.size as f64);
    format = format.set_font_name(&style.font.family);

    // Colors
    if style.font.color != Color::black() {
        format = format.set_font_color(color_to_xlsx(&style.font.color));
    }
    if style.is_shaded() {
        format = format.set_background_color(color_to_xlsx(&style.background));
    }

    // Horizontal alignment
    format = format.set_align(match style.text_align {
        TextAlign::Left => FormatAlign::Left,
        TextAlign::Center => FormatAlign::Center,
        TextAlign::Right => FormatAlign::Right,
        TextAlign::General => FormatAlign::General,
    });
    format = format.set_align(FormatAlign::VerticalCenter);

    // Borders
    if let Some(border) = convert_border(style.borders.weight) {
        format = format
            .set_border(border)
            .set_border_color(color_to_xlsx(&style.borders.color));
    }

    // Word wrap
    if style.wrap_text {
        format = format.set_text_wrap();
    }

    // Number format
    let num_format = style.number_format.to_format_code();
    if !num_format.is_empty() {
        format = format.set_num_format(&num_format);
    }

    format
}

fn convert_border(weight: BorderWeight) -> Option<FormatBorder> {
    match weight {
        BorderWeight::None => None,
        BorderWeight::Thin => Some(FormatBorder::Thin),
        BorderWeight::Medium => Some(FormatBorder::Medium),
        BorderWeight::Thick => Some(FormatBorder::Thick),
    }
}

fn color_to_xlsx(color: &Color) -> rust_xlsxwriter::Color {
    rust_xlsxwriter::Color::RGB(color.to_rgb())
}
