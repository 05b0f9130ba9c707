//! Rendering a [`Sheet`] as an XLSX workbook.

use rust_xlsxwriter::{Format, Workbook};

use super::error::ExportError;
use super::sheet::{CellValue, Sheet};

/// Writes `sheet` as a single-worksheet workbook and returns the file bytes.
pub fn write_xlsx(sheet: &Sheet) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.name)?;

    for (col, width) in (0u16..).zip(&sheet.column_widths) {
        worksheet.set_column_width(col, *width)?;
    }
    for (col, header) in (0u16..).zip(&sheet.headers) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }
    for (row_index, row) in (1u32..).zip(&sheet.rows) {
        for (col, cell) in (0u16..).zip(row) {
            match cell {
                CellValue::Text(text) if text.is_empty() => {}
                CellValue::Text(text) => {
                    worksheet.write_string(row_index, col, text)?;
                }
                CellValue::Integer(value) => {
                    worksheet.write_number(row_index, col, f64::from(*value))?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
