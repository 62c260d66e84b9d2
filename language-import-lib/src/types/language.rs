use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// One data line of an import file after mapping, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLanguageRow {
    /// Position among the non-empty lines of the file; the header is 1.
    #[serde(rename = "rowNumber")]
    pub row_number: usize,
    pub name: String,
    pub endonym: Option<String>,
    pub iso_639_3_code: Option<String>,
    pub language_family: Option<String>,
    pub country_of_origin: Option<String>,
    pub taxonomies: BTreeMap<String, String>,
    pub custom_fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single issue found on a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    #[serde(rename = "rowNumber")]
    pub row_number: usize,
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationError {
    pub fn error(row_number: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row_number,
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(
        row_number: usize,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_number,
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A data line that could not be turned into a [`ParsedLanguageRow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingFailure {
    #[serde(rename = "rowNumber")]
    pub row_number: usize,
    pub message: String,
}

/// What happened to one processed data line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RowOutcome {
    Parsed(ParsedLanguageRow),
    Failed(MappingFailure),
}

impl RowOutcome {
    pub fn row_number(&self) -> usize {
        match self {
            RowOutcome::Parsed(row) => row.row_number,
            RowOutcome::Failed(failure) => failure.row_number,
        }
    }

    pub fn as_parsed(&self) -> Option<&ParsedLanguageRow> {
        match self {
            RowOutcome::Parsed(row) => Some(row),
            RowOutcome::Failed(_) => None,
        }
    }
}

/// Everything a single parse produced.
///
/// `rows` holds one outcome per processed data line, in file order, so a line
/// that failed to map still occupies its slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub rows: Vec<RowOutcome>,
    pub errors: Vec<ValidationError>,
    #[serde(rename = "totalRows")]
    pub total_rows: usize,
    #[serde(rename = "validRows")]
    pub valid_rows: usize,
    pub headers: Vec<String>,
}

impl ParseResult {
    pub fn parsed_rows(&self) -> impl Iterator<Item = &ParsedLanguageRow> {
        self.rows.iter().filter_map(RowOutcome::as_parsed)
    }

    pub fn failed_rows(&self) -> impl Iterator<Item = &MappingFailure> {
        self.rows.iter().filter_map(|outcome| match outcome {
            RowOutcome::Failed(failure) => Some(failure),
            RowOutcome::Parsed(_) => None,
        })
    }

    pub fn issues_for_row(&self, row_number: usize) -> impl Iterator<Item = &ValidationError> {
        self.errors
            .iter()
            .filter(move |issue| issue.row_number == row_number)
    }

    pub fn row_has_errors(&self, row_number: usize) -> bool {
        self.issues_for_row(row_number).any(ValidationError::is_error)
    }

    /// Row numbers carrying at least one error-severity issue.
    pub fn error_rows(&self) -> HashSet<usize> {
        self.errors
            .iter()
            .filter(|issue| issue.is_error())
            .map(|issue| issue.row_number)
            .collect()
    }

    /// Issues grouped by row number, each group in reporting order.
    pub fn issues_by_row(&self) -> HashMap<usize, Vec<&ValidationError>> {
        let mut grouped: HashMap<usize, Vec<&ValidationError>> = HashMap::new();
        for issue in &self.errors {
            grouped.entry(issue.row_number).or_default().push(issue);
        }
        grouped
    }

    /// Parsed rows with no error-severity issue. Warning-only rows are included.
    pub fn valid(&self) -> impl Iterator<Item = &ParsedLanguageRow> {
        let error_rows = self.error_rows();
        self.parsed_rows()
            .filter(move |row| !error_rows.contains(&row.row_number))
    }
}
