//! Domain error types for rollcall
//!
//! Spreadsheet I/O is the only fallible subsystem that surfaces errors to the
//! user; everything else (audio, logging, shutdown persistence) is
//! best-effort and swallows its failures.

use thiserror::Error;

/// Errors raised while reading or writing roster and results workbooks
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Failed to open workbook: {0}")]
    Workbook(String),

    #[error("Workbook has no sheets")]
    NoSheet,

    #[error("Roster contains no names")]
    EmptyRoster,

    #[error("Nothing picked yet")]
    NothingPicked,

    #[error("Failed to write workbook: {0}")]
    Write(String),
}

impl From<rust_xlsxwriter::XlsxError> for SpreadsheetError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        SpreadsheetError::Write(err.to_string())
    }
}

/// Result type alias for SpreadsheetError
pub type SpreadsheetResult<T> = std::result::Result<T, SpreadsheetError>;
