//! Line and field tokenizer for import files.
//!
//! Records are line based: a quoted field cannot span lines. Within a line,
//! quoting follows RFC 4180 (`""` inside quotes is a literal quote and the
//! delimiter is literal inside quotes).

use crate::error::CsvError;
use crate::utils::{normalize_header, strip_bom};

/// Headers plus raw (untrimmed) data fields, one entry per non-empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Accept a delimiter given as text; it must be exactly one character.
pub fn parse_delimiter(value: &str) -> Result<char, CsvError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) => Ok(delimiter),
        _ => Err(CsvError::InvalidDelimiter(value.to_string())),
    }
}

/// Split file content into normalized headers and tokenized data rows.
pub fn parse_csv_content(content: &str, delimiter: char) -> Result<CsvTable, CsvError> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut lines = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(CsvError::EmptyFile)?;
    let headers = normalize_headers(parse_csv_line(header_line, delimiter))?;

    let rows: Vec<Vec<String>> = lines.map(|line| parse_csv_line(line, delimiter)).collect();
    tracing::debug!(
        "Tokenized {} columns and {} data rows",
        headers.len(),
        rows.len()
    );

    Ok(CsvTable { headers, rows })
}

/// Split one line into fields.
pub fn parse_csv_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                chars.next();
                current.push('"');
            } else {
                in_quotes = !in_quotes;
            }
        } else if c == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);

    fields
}

fn normalize_headers(raw: Vec<String>) -> Result<Vec<String>, CsvError> {
    let headers: Vec<String> = raw
        .iter()
        .enumerate()
        .map(|(i, header)| {
            if i == 0 {
                normalize_header(strip_bom(header))
            } else {
                normalize_header(header)
            }
        })
        .collect();

    let mut duplicates: Vec<String> = Vec::new();
    for (i, header) in headers.iter().enumerate() {
        if headers[..i].contains(header) && !duplicates.contains(header) {
            duplicates.push(header.clone());
        }
    }

    if !duplicates.is_empty() {
        return Err(CsvError::DuplicateHeaders {
            headers: duplicates,
        });
    }

    Ok(headers)
}
