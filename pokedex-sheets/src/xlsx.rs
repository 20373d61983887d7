use std::path::Path;

use pokedex_core::{Cell, Sheet};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::{SheetError, SheetWriter, validate_sheets};

/// Excel's hard limit on worksheet names.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Writes all sheets into a single `.xlsx` workbook.
pub struct XlsxWriter;

impl XlsxWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetWriter for XlsxWriter {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    fn write(&self, sheets: &[Sheet], path: &Path) -> Result<(), SheetError> {
        validate_sheets(sheets)?;
        if let Some(sheet) = sheets
            .iter()
            .find(|s| s.name.chars().count() > MAX_SHEET_NAME_LEN)
        {
            return Err(SheetError::invalid_sheet(format!(
                "sheet name '{}' exceeds {MAX_SHEET_NAME_LEN} characters",
                sheet.name
            )));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;

            for (col, header) in sheet.headers.iter().enumerate() {
                worksheet.write_string_with_format(0, col_index(col)?, header, &header_format)?;
            }
            for (i, row) in sheet.rows.iter().enumerate() {
                let row_idx = row_index(i + 1)?;
                for (col, cell) in row.iter().enumerate() {
                    write_cell(worksheet, row_idx, col_index(col)?, cell)?;
                }
            }

            worksheet.set_freeze_panes(1, 0)?;
            worksheet.autofit();
            log::debug!("Wrote worksheet '{}' ({} rows)", sheet.name, sheet.len());
        }

        workbook.save(path)?;
        Ok(())
    }
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), SheetError> {
    match cell {
        Cell::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Cell::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Cell::Empty => {}
    }
    Ok(())
}

fn row_index(i: usize) -> Result<u32, SheetError> {
    u32::try_from(i).map_err(|_| SheetError::invalid_sheet(format!("row {i} out of range")))
}

fn col_index(i: usize) -> Result<u16, SheetError> {
    u16::try_from(i).map_err(|_| SheetError::invalid_sheet(format!("column {i} out of range")))
}

#[cfg(test)]
#[path = "tests/xlsx_tests.rs"]
mod tests;
