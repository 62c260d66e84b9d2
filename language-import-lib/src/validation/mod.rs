use crate::types::schema::MAX_NAME_LENGTH;
use crate::types::{ParsedLanguageRow, ValidationError};
use crate::utils::is_iso_639_3;

/// Check one mapped row. Rules run in a fixed order and each adds at most one issue.
pub fn validate_row(row: &ParsedLanguageRow) -> Vec<ValidationError> {
    let mut issues = Vec::new();
    let name = row.name.trim();

    if name.is_empty() {
        issues.push(ValidationError::error(
            row.row_number,
            "name",
            "Name is required",
        ));
    } else if row.name.chars().count() > MAX_NAME_LENGTH {
        issues.push(ValidationError::error(
            row.row_number,
            "name",
            format!("Name must be {} characters or less", MAX_NAME_LENGTH),
        ));
    }

    if let Some(code) = &row.iso_639_3_code {
        if !is_iso_639_3(code) {
            issues.push(ValidationError::warning(
                row.row_number,
                "iso_639_3_code",
                format!(
                    "ISO 639-3 code '{}' should be exactly 3 letters",
                    code
                ),
            ));
        }
    }

    if row.endonym.is_none() {
        issues.push(ValidationError::warning(
            row.row_number,
            "endonym",
            "Endonym is recommended but not provided",
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use std::collections::BTreeMap;

    fn row(name: &str, endonym: Option<&str>, iso: Option<&str>) -> ParsedLanguageRow {
        ParsedLanguageRow {
            row_number: 2,
            name: name.to_string(),
            endonym: endonym.map(str::to_string),
            iso_639_3_code: iso.map(str::to_string),
            language_family: None,
            country_of_origin: None,
            taxonomies: BTreeMap::new(),
            custom_fields: BTreeMap::new(),
        }
    }

    #[test]
    fn test_complete_row_has_no_issues() {
        assert!(validate_row(&row("Spanish", Some("Español"), Some("spa"))).is_empty());
    }

    #[test]
    fn test_missing_name_is_error() {
        let issues = validate_row(&row("  ", Some("Español"), None));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "name");
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("required"));
    }

    #[test]
    fn test_name_length_boundary() {
        let exact = "a".repeat(200);
        assert!(validate_row(&row(&exact, Some("x"), None)).is_empty());

        let over = "a".repeat(201);
        let issues = validate_row(&row(&over, Some("x"), None));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "name");
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("200"));
    }

    #[test]
    fn test_name_length_counts_characters() {
        let accented = "é".repeat(200);
        assert!(validate_row(&row(&accented, Some("x"), None)).is_empty());
    }

    #[test]
    fn test_iso_code_warnings() {
        for bad in ["es", "fran", "e5a"] {
            let issues = validate_row(&row("Spanish", Some("Español"), Some(bad)));
            assert_eq!(issues.len(), 1, "{bad}");
            assert_eq!(issues[0].field, "iso_639_3_code");
            assert_eq!(issues[0].severity, Severity::Warning);
        }
        for good in ["spa", "SPA"] {
            assert!(validate_row(&row("Spanish", Some("Español"), Some(good))).is_empty());
        }
    }

    #[test]
    fn test_issue_order() {
        let issues = validate_row(&row("", None, Some("es")));
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "iso_639_3_code", "endonym"]);
        assert_eq!(issues[2].severity, Severity::Warning);
    }
}
