//! Language CSV Import Library
//!
//! This library parses bulk-import CSV files of language records for city
//! language maps, annotating each row with errors and warnings, and produces
//! the matching blank import template.

mod config;
mod error;
mod mapping;
mod processor;
mod report;
mod template;
mod tokenizer;
mod types;
mod utils;
mod validation;

pub use config::{ParseConfig, DEFAULT_DELIMITER, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_ROWS};
pub use error::{CsvError, ProcessingOutcome, ProcessorError};
pub use mapping::{is_taxonomy_column, map_row, ColumnClassifier};
pub use processor::{parse_language_csv, CsvSource, LocalFile, Processor, UploadedFile};
pub use report::{error_report_string, write_error_report, REPORT_HEADERS};
pub use template::{generate_csv_template, TEMPLATE_FILE_NAME, TEMPLATE_MIME_TYPE};
pub use tokenizer::{parse_csv_content, parse_csv_line, parse_delimiter, CsvTable};
pub use types::schema;
pub use types::{
    MappingFailure, ParseResult, ParsedLanguageRow, RowOutcome, Severity, ValidationError,
};
pub use validation::validate_row;
