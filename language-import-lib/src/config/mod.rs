use crate::error::ProcessorError;
use crate::mapping::ColumnClassifier;
use crate::tokenizer::parse_delimiter;
use crate::utils::{normalize_header, BYTES_PER_MIB};
use json_comments::StripComments;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * BYTES_PER_MIB;
pub const DEFAULT_MAX_ROWS: usize = 10_000;
pub const DEFAULT_DELIMITER: char = ',';

/// Limits and column rules for a single parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseConfig {
    #[serde(rename = "maxFileSize")]
    pub max_file_size: u64,
    #[serde(rename = "maxRows")]
    pub max_rows: usize,
    #[serde(deserialize_with = "deserialize_delimiter")]
    pub delimiter: char,
    #[serde(rename = "requiredColumns")]
    pub required_columns: Vec<String>,
    /// Explicit taxonomy columns. When absent, non-standard columns are
    /// bucketed by the header heuristic.
    #[serde(rename = "taxonomyColumns", skip_serializing_if = "Option::is_none")]
    pub taxonomy_columns: Option<Vec<String>>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_rows: DEFAULT_MAX_ROWS,
            delimiter: DEFAULT_DELIMITER,
            required_columns: vec!["name".to_string()],
            taxonomy_columns: None,
        }
    }
}

impl FromStr for ParseConfig {
    type Err = ProcessorError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_reader(StripComments::new(
            content.as_bytes(),
        ))?)
    }
}

fn deserialize_delimiter<'de, D>(deserializer: D) -> Result<char, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_delimiter(&value).map_err(serde::de::Error::custom)
}

impl ParseConfig {
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Result<Self, ProcessorError> {
        let path = path.into();
        tracing::info!("Loading parse config from {:?}", path);
        let file = std::fs::File::open(&path)?;
        let config: ParseConfig = serde_json::from_reader(StripComments::new(file))?;
        tracing::info!("Successfully loaded parse config: {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProcessorError> {
        tracing::debug!("Validating parse config: {:?}", self);

        if self.max_file_size == 0 {
            return Err(ProcessorError::InvalidConfig(
                "maxFileSize must be greater than 0".into(),
            ));
        }

        if self.max_rows == 0 {
            return Err(ProcessorError::InvalidConfig(
                "maxRows must be greater than 0".into(),
            ));
        }

        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ProcessorError::InvalidConfig(format!(
                "{:?} cannot be used as a delimiter",
                self.delimiter
            )));
        }

        if self
            .required_columns
            .iter()
            .any(|column| column.trim().is_empty())
        {
            return Err(ProcessorError::InvalidConfig(
                "requiredColumns must not contain empty names".into(),
            ));
        }

        Ok(())
    }

    /// Required columns in the same normalized form as parsed headers.
    pub fn normalized_required_columns(&self) -> Vec<String> {
        self.required_columns
            .iter()
            .map(|column| normalize_header(column))
            .collect()
    }

    pub fn column_classifier(&self) -> ColumnClassifier {
        match &self.taxonomy_columns {
            Some(columns) => ColumnClassifier::allowlist(columns),
            None => ColumnClassifier::Heuristic,
        }
    }
}
