/// Errors that can occur while writing exported sheets.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX writing error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid sheet: {0}")]
    InvalidSheet(String),
}

impl SheetError {
    pub fn invalid_sheet(msg: impl Into<String>) -> Self {
        Self::InvalidSheet(msg.into())
    }
}
