// ==========================================
// Power Export Diff - importer error types
// ==========================================
// Fatal errors only. Row- and section-level problems
// are findings (domain::types::Finding), recovered
// locally with skip-and-log; they never surface here.
// ==========================================

use crate::mapping::MappingValidationError;
use thiserror::Error;

/// Importer error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== file errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .csv/.xlsx/.xls)")]
    UnsupportedFormat(String),

    #[error("file unreadable after {attempts} attempts: {path}: {message}")]
    FileAccess {
        path: String,
        attempts: u32,
        message: String,
    },

    #[error("file read failed: {0}")]
    FileRead(String),

    #[error("workbook parse failed: {0}")]
    WorkbookParse(String),

    #[error("CSV parse failed: {0}")]
    CsvParse(String),

    // ===== mapping errors =====
    #[error(transparent)]
    MappingValidation(#[from] MappingValidationError),

    // ===== catalog errors =====
    // A mapping naming a type the catalog does not know is a
    // configuration error, never a runtime fallback.
    #[error("unknown record type: {0}")]
    UnknownRecordType(String),

    // ===== merge errors =====
    #[error("merge aborted: composite key collision for {record_type} [{key}]")]
    CollisionAbort { record_type: String, key: String },

    #[error("merge aborted: sources disagree on {record_type} [{key}]: {message}")]
    EquipmentDisagreementAbort {
        record_type: String,
        key: String,
        message: String,
    },

    // ===== catch-all =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileRead(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParse(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::WorkbookParse(err.to_string())
    }
}

/// Result type alias
pub type ImportResult<T> = Result<T, ImportError>;
