use std::fs;
use std::path::Path;

use pokedex_core::Sheet;

use crate::{SheetError, SheetWriter, validate_sheets};

/// Writes each sheet as `<name>.csv` inside an output directory.
pub struct CsvDirWriter;

impl CsvDirWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvDirWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetWriter for CsvDirWriter {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn write(&self, sheets: &[Sheet], path: &Path) -> Result<(), SheetError> {
        validate_sheets(sheets)?;
        if let Some(sheet) = sheets
            .iter()
            .find(|s| s.name.contains(['/', '\\']) || s.name.starts_with('.'))
        {
            return Err(SheetError::invalid_sheet(format!(
                "sheet name '{}' is not a valid file name",
                sheet.name
            )));
        }

        fs::create_dir_all(path)?;

        for sheet in sheets {
            let file = path.join(format!("{}.csv", sheet.name));
            let mut writer = csv::Writer::from_path(&file)?;
            writer.write_record(&sheet.headers)?;
            for row in &sheet.rows {
                writer.write_record(row.iter().map(|cell| cell.to_string()))?;
            }
            writer.flush()?;
            log::debug!("Wrote {} ({} rows)", file.display(), sheet.len());
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/csv_dir_tests.rs"]
mod tests;
