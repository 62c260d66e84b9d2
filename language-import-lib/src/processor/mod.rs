use crate::config::ParseConfig;
use crate::error::{CsvError, ProcessorError};
use crate::mapping::{map_row, ColumnClassifier};
use crate::tokenizer::parse_csv_content;
use crate::types::{MappingFailure, ParseResult, RowOutcome, ValidationError};
use crate::validation::validate_row;

mod source;

pub use source::{CsvSource, LocalFile, UploadedFile};

const CSV_EXTENSION: &str = ".csv";

/// Drives one import file through tokenizing, mapping and validation.
///
/// File-level problems abort with an error; row-level problems are collected
/// into the returned [`ParseResult`].
pub struct Processor {
    config: ParseConfig,
    classifier: ColumnClassifier,
}

impl Processor {
    pub fn new(config: ParseConfig) -> Self {
        let classifier = config.column_classifier();
        Self { config, classifier }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub async fn process<S: CsvSource>(
        &self,
        file: Option<&S>,
    ) -> Result<ParseResult, ProcessorError> {
        self.config.validate()?;

        let file = file.ok_or(CsvError::MissingFile)?;
        tracing::info!("Processing import file: {} ({} bytes)", file.name(), file.size());

        self.check_file(file)?;

        let content = file.read_text().await?;
        Ok(self.process_content(&content)?)
    }

    fn check_file<S: CsvSource>(&self, file: &S) -> Result<(), CsvError> {
        if file.size() > self.config.max_file_size {
            return Err(CsvError::FileTooLarge {
                actual_bytes: file.size(),
                max_bytes: self.config.max_file_size,
            });
        }

        if !file.name().ends_with(CSV_EXTENSION) {
            return Err(CsvError::InvalidFileType {
                name: file.name().to_string(),
            });
        }

        Ok(())
    }

    /// Parse already-read file content.
    pub fn process_content(&self, content: &str) -> Result<ParseResult, CsvError> {
        let table = parse_csv_content(content, self.config.delimiter)?;

        let missing: Vec<String> = self
            .config
            .normalized_required_columns()
            .into_iter()
            .filter(|column| !table.headers.contains(column))
            .collect();
        if !missing.is_empty() {
            tracing::error!("Import file is missing required columns: {:?}", missing);
            return Err(CsvError::MissingColumns { columns: missing });
        }

        let mut data_rows = table.rows;
        if data_rows.len() > self.config.max_rows {
            tracing::warn!(
                "Import file has {} data rows; only the first {} will be processed",
                data_rows.len(),
                self.config.max_rows
            );
            data_rows.truncate(self.config.max_rows);
        }

        let result = self.collect_rows(table.headers, &data_rows);
        tracing::info!(
            "Parsed {} rows: {} valid, {} issues",
            result.total_rows,
            result.valid_rows,
            result.errors.len()
        );

        Ok(result)
    }

    fn collect_rows(&self, headers: Vec<String>, data_rows: &[Vec<String>]) -> ParseResult {
        let mut rows = Vec::with_capacity(data_rows.len());
        let mut errors = Vec::new();
        let mut valid_rows = 0;

        for (index, raw) in data_rows.iter().enumerate() {
            let (outcome, issues) = self.process_row(raw, &headers, index + 2);
            let has_errors = issues.iter().any(ValidationError::is_error);
            if matches!(outcome, RowOutcome::Parsed(_)) && !has_errors {
                valid_rows += 1;
            }
            errors.extend(issues);
            rows.push(outcome);
        }

        ParseResult {
            total_rows: rows.len(),
            valid_rows,
            rows,
            errors,
            headers,
        }
    }

    /// Map and validate one data line. A line that cannot be mapped yields a
    /// `Failed` outcome and a single `"row"` error.
    fn process_row(
        &self,
        raw: &[String],
        headers: &[String],
        row_number: usize,
    ) -> (RowOutcome, Vec<ValidationError>) {
        match map_row(raw, headers, row_number, &self.classifier) {
            Ok(row) => {
                let issues = validate_row(&row);
                (RowOutcome::Parsed(row), issues)
            }
            Err(e) => {
                tracing::debug!("Row {} could not be mapped: {}", row_number, e);
                let message = e.to_string();
                (
                    RowOutcome::Failed(MappingFailure {
                        row_number,
                        message: message.clone(),
                    }),
                    vec![ValidationError::error(row_number, "row", message)],
                )
            }
        }
    }
}

/// Parse an uploaded language CSV with the given limits.
pub async fn parse_language_csv<S: CsvSource>(
    file: Option<&S>,
    config: &ParseConfig,
) -> Result<ParseResult, ProcessorError> {
    Processor::new(config.clone()).process(file).await
}
