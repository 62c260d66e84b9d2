//! Maps tokenized rows onto [`ParsedLanguageRow`] records.

use std::collections::{BTreeMap, HashMap};

use crate::error::CsvError;
use crate::types::schema::{
    is_standard_column, StandardField, COUNTRY_OF_ORIGIN, ENDONYM, ISO_639_3_CODE,
    LANGUAGE_FAMILY, NAME,
};
use crate::types::ParsedLanguageRow;
use crate::utils::{non_empty, normalize_header};

const TAXONOMY_HEADER_MAX_CHARS: usize = 20;

/// Decides whether a non-standard column holds taxonomy values or a custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnClassifier {
    /// Columns containing `_` or shorter than 20 characters are taxonomies.
    #[default]
    Heuristic,
    /// Only the listed columns (normalized) are taxonomies.
    Allowlist(Vec<String>),
}

impl ColumnClassifier {
    pub fn allowlist<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ColumnClassifier::Allowlist(
            columns
                .into_iter()
                .map(|column| normalize_header(column.as_ref()))
                .collect(),
        )
    }

    pub fn is_taxonomy_column(&self, header: &str) -> bool {
        match self {
            ColumnClassifier::Heuristic => is_taxonomy_column(header),
            ColumnClassifier::Allowlist(columns) => columns.iter().any(|c| c == header),
        }
    }
}

/// Default bucketing rule for non-standard columns.
pub fn is_taxonomy_column(header: &str) -> bool {
    header.contains('_') || header.chars().count() < TAXONOMY_HEADER_MAX_CHARS
}

/// Build a record from one tokenized row.
///
/// Cells missing at the end of a short row read as empty; cells past the
/// last header are ignored.
pub fn map_row(
    row: &[String],
    headers: &[String],
    row_number: usize,
    classifier: &ColumnClassifier,
) -> Result<ParsedLanguageRow, CsvError> {
    if headers.is_empty() {
        return Err(CsvError::RowShape(
            "header list must not be empty".to_string(),
        ));
    }
    if row_number == 0 {
        return Err(CsvError::RowShape(
            "row number must be positive".to_string(),
        ));
    }

    let cells: HashMap<&str, &str> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let value = row.get(i).map(|cell| cell.trim()).unwrap_or("");
            (header.as_str(), value)
        })
        .collect();

    let lookup = |field: &StandardField| -> Option<String> {
        cells
            .get(field.column)
            .and_then(|value| non_empty(value))
            .or_else(|| {
                field
                    .alias
                    .and_then(|alias| cells.get(alias))
                    .and_then(|value| non_empty(value))
            })
    };

    let mut taxonomies = BTreeMap::new();
    let mut custom_fields = BTreeMap::new();
    for header in headers {
        if header.is_empty() || is_standard_column(header) {
            continue;
        }
        let Some(value) = cells.get(header.as_str()).and_then(|v| non_empty(v)) else {
            continue;
        };
        if classifier.is_taxonomy_column(header) {
            taxonomies.insert(header.clone(), value);
        } else {
            custom_fields.insert(header.clone(), value);
        }
    }

    Ok(ParsedLanguageRow {
        row_number,
        name: lookup(&NAME).unwrap_or_default(),
        endonym: lookup(&ENDONYM),
        iso_639_3_code: lookup(&ISO_639_3_CODE),
        language_family: lookup(&LANGUAGE_FAMILY),
        country_of_origin: lookup(&COUNTRY_OF_ORIGIN),
        taxonomies,
        custom_fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_maps_standard_fields() {
        let headers = strings(&[
            "name",
            "endonym",
            "iso_639_3_code",
            "language_family",
            "country_of_origin",
        ]);
        let row = strings(&[" Spanish ", "Español", "spa", "Indo-European", "Spain"]);
        let mapped = map_row(&row, &headers, 2, &ColumnClassifier::Heuristic).unwrap();

        assert_eq!(mapped.row_number, 2);
        assert_eq!(mapped.name, "Spanish");
        assert_eq!(mapped.endonym.as_deref(), Some("Español"));
        assert_eq!(mapped.iso_639_3_code.as_deref(), Some("spa"));
        assert_eq!(mapped.language_family.as_deref(), Some("Indo-European"));
        assert_eq!(mapped.country_of_origin.as_deref(), Some("Spain"));
        assert!(mapped.taxonomies.is_empty());
        assert!(mapped.custom_fields.is_empty());
    }

    #[test]
    fn test_aliases() {
        let headers = strings(&["name", "iso_code", "family", "country"]);
        let row = strings(&["Dutch", "nld", "Indo-European", "Netherlands"]);
        let mapped = map_row(&row, &headers, 3, &ColumnClassifier::Heuristic).unwrap();

        assert_eq!(mapped.iso_639_3_code.as_deref(), Some("nld"));
        assert_eq!(mapped.language_family.as_deref(), Some("Indo-European"));
        assert_eq!(mapped.country_of_origin.as_deref(), Some("Netherlands"));
    }

    #[test]
    fn test_canonical_column_wins_over_alias() {
        let headers = strings(&["name", "iso_639_3_code", "iso_code"]);
        let row = strings(&["French", "fra", "fre"]);
        let mapped = map_row(&row, &headers, 2, &ColumnClassifier::Heuristic).unwrap();
        assert_eq!(mapped.iso_639_3_code.as_deref(), Some("fra"));

        let row = strings(&["French", "", "fre"]);
        let mapped = map_row(&row, &headers, 2, &ColumnClassifier::Heuristic).unwrap();
        assert_eq!(mapped.iso_639_3_code.as_deref(), Some("fre"));
    }

    #[test]
    fn test_short_row_yields_absent_fields() {
        let headers = strings(&["name", "endonym", "iso_639_3_code"]);
        let row = strings(&["Spanish"]);
        let mapped = map_row(&row, &headers, 2, &ColumnClassifier::Heuristic).unwrap();

        assert_eq!(mapped.name, "Spanish");
        assert_eq!(mapped.endonym, None);
        assert_eq!(mapped.iso_639_3_code, None);
    }

    #[test]
    fn test_empty_optional_values_are_absent() {
        let headers = strings(&["name", "endonym"]);
        let row = strings(&["Spanish", "   "]);
        let mapped = map_row(&row, &headers, 2, &ColumnClassifier::Heuristic).unwrap();
        assert_eq!(mapped.endonym, None);
    }

    #[test]
    fn test_heuristic_bucketing() {
        let headers = strings(&[
            "name",
            "status",
            "script_type_of_the_writing_system",
            "notes about the community",
            "empty",
        ]);
        let row = strings(&[
            "Spanish",
            " stable ",
            "Latin",
            "Large diaspora",
            "",
        ]);
        let mapped = map_row(&row, &headers, 2, &ColumnClassifier::Heuristic).unwrap();

        assert_eq!(mapped.taxonomies.get("status").map(String::as_str), Some("stable"));
        assert_eq!(
            mapped
                .taxonomies
                .get("script_type_of_the_writing_system")
                .map(String::as_str),
            Some("Latin")
        );
        assert_eq!(
            mapped
                .custom_fields
                .get("notes about the community")
                .map(String::as_str),
            Some("Large diaspora")
        );
        assert!(!mapped.taxonomies.contains_key("empty"));
    }

    #[test]
    fn test_heuristic_boundary() {
        assert!(is_taxonomy_column("nineteen characters"));
        assert!(!is_taxonomy_column("twenty characters..."));
        assert!(is_taxonomy_column("twenty_characters..."));
    }

    #[test]
    fn test_allowlist_classifier() {
        let classifier = ColumnClassifier::allowlist(["Status"]);
        let headers = strings(&["name", "status", "size"]);
        let row = strings(&["Spanish", "stable", "large"]);
        let mapped = map_row(&row, &headers, 2, &classifier).unwrap();

        assert_eq!(mapped.taxonomies.len(), 1);
        assert!(mapped.taxonomies.contains_key("status"));
        assert!(mapped.custom_fields.contains_key("size"));
    }

    #[test]
    fn test_row_shape_contract() {
        let row = strings(&["Spanish"]);
        assert!(matches!(
            map_row(&row, &[], 2, &ColumnClassifier::Heuristic),
            Err(CsvError::RowShape(_))
        ));
        assert!(matches!(
            map_row(&row, &strings(&["name"]), 0, &ColumnClassifier::Heuristic),
            Err(CsvError::RowShape(_))
        ));
    }
}
