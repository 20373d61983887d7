pub mod csv_dir;
pub mod error;
pub mod xlsx;

pub use csv_dir::CsvDirWriter;
pub use error::SheetError;
pub use xlsx::XlsxWriter;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use pokedex_core::Sheet;

/// Trait for output formats that persist a set of named sheets.
pub trait SheetWriter {
    fn name(&self) -> &'static str;

    /// Write all sheets to `path`. What `path` denotes (a file or a
    /// directory) depends on the format.
    fn write(&self, sheets: &[Sheet], path: &Path) -> Result<(), SheetError>;
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SheetFormat {
    /// A single workbook with one worksheet per table
    #[default]
    Xlsx,
    /// A directory with one CSV file per table
    Csv,
}

impl SheetFormat {
    pub fn short_name(self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Csv => "csv",
        }
    }

    /// Writer implementation for this format.
    pub fn writer(self) -> Box<dyn SheetWriter> {
        match self {
            SheetFormat::Xlsx => Box::new(XlsxWriter::new()),
            SheetFormat::Csv => Box::new(CsvDirWriter::new()),
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetFormatParseError(pub String);

impl fmt::Display for SheetFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown output format '{}' (expected xlsx or csv)", self.0)
    }
}

impl std::error::Error for SheetFormatParseError {}

impl FromStr for SheetFormat {
    type Err = SheetFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "xlsx" | "excel" => Ok(SheetFormat::Xlsx),
            "csv" => Ok(SheetFormat::Csv),
            _ => Err(SheetFormatParseError(s.to_string())),
        }
    }
}

/// Reject sheet sets no format could represent faithfully: empty or
/// duplicate names, and rows whose width differs from the header.
pub fn validate_sheets(sheets: &[Sheet]) -> Result<(), SheetError> {
    let mut names = HashSet::new();
    for sheet in sheets {
        if sheet.name.is_empty() {
            return Err(SheetError::invalid_sheet("sheet name is empty"));
        }
        if !names.insert(sheet.name.as_str()) {
            return Err(SheetError::invalid_sheet(format!(
                "duplicate sheet name '{}'",
                sheet.name
            )));
        }
        if let Some((i, row)) = sheet
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != sheet.headers.len())
        {
            return Err(SheetError::invalid_sheet(format!(
                "sheet '{}' row {} has {} cells, expected {}",
                sheet.name,
                i + 1,
                row.len(),
                sheet.headers.len()
            )));
        }
    }
    Ok(())
}
