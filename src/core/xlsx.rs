//! Single-sheet workbook encoding for the price report.

use crate::utils::error::Result;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet, XlsxError};

pub const SHEET_NAME: &str = "Sheet1";
/// Package part holding the worksheet cells.
pub const SHEET_PATH: &str = "xl/worksheets/sheet1.xml";

fn write_row<S: AsRef<str>>(
    sheet: &mut Worksheet,
    row: usize,
    cells: &[S],
    format: Option<&Format>,
) -> Result<()> {
    let row = u32::try_from(row).map_err(|_| XlsxError::RowColumnLimitError)?;
    for (col, cell) in cells.iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
        match format {
            Some(format) => sheet.write_string_with_format(row, col, cell.as_ref(), format)?,
            None => sheet.write_string(row, col, cell.as_ref())?,
        };
    }
    Ok(())
}

/// Builds a workbook with a bold `header` row followed by `rows`, all cells
/// written as text. The document creation date is pinned so the output
/// depends only on the inputs.
pub fn render_workbook<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    write_row(sheet, 0, header, Some(&bold))?;
    for (index, row) in rows.iter().enumerate() {
        write_row(sheet, index + 1, row, None)?;
    }

    Ok(workbook.save_to_buffer()?)
}
