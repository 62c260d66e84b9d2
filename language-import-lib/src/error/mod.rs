use thiserror::Error;

use crate::types::{ParseResult, Severity};
use crate::utils::bytes_to_mib;

/// File-level and structural failures. Any of these aborts the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("File is required")]
    MissingFile,
    #[error(
        "File size ({:.2}MB) exceeds maximum allowed size ({:.2}MB)",
        mib(.actual_bytes),
        mib(.max_bytes)
    )]
    FileTooLarge { actual_bytes: u64, max_bytes: u64 },
    #[error("Invalid file type: '{name}'. Only .csv files are accepted")]
    InvalidFileType { name: String },
    #[error("CSV file is empty")]
    EmptyFile,
    #[error("Delimiter must be a single character, got '{0}'")]
    InvalidDelimiter(String),
    #[error("CSV contains duplicate column headers: {}", .headers.join(", "))]
    DuplicateHeaders { headers: Vec<String> },
    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
    #[error("Failed to read file: {0}")]
    ReadFailure(String),
    #[error("Invalid row: {0}")]
    RowShape(String),
}

fn mib(bytes: &u64) -> f64 {
    bytes_to_mib(*bytes)
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Failed to parse CSV file: {0}")]
    Parse(#[from] CsvError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Processing error: {0}")]
    Processing(String),
}

impl ProcessorError {
    /// The structured failure kind, when the error came out of the parse itself.
    pub fn kind(&self) -> Option<&CsvError> {
        match self {
            ProcessorError::Parse(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Summary of a finished parse, used to decide whether an import may proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Success,
    SuccessWithWarnings(usize),
    Failure { errors: usize, warnings: usize },
}

impl ProcessingOutcome {
    pub fn from_result(result: &ParseResult) -> Self {
        let errors = result
            .errors
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .count();
        let warnings = result.errors.len() - errors;

        if errors == 0 && warnings == 0 {
            ProcessingOutcome::Success
        } else if errors > 0 {
            ProcessingOutcome::Failure { errors, warnings }
        } else {
            ProcessingOutcome::SuccessWithWarnings(warnings)
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ProcessingOutcome::Failure { .. })
    }
}
