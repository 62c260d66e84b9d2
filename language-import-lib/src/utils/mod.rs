use once_cell::sync::Lazy;
use regex::Regex;

pub const BYTES_PER_MIB: u64 = 1024 * 1024;

pub const BOM: char = '\u{FEFF}';

static ISO_639_3_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]{3}$").expect("ISO 639-3 pattern is valid"));

/// Convert a byte count to mebibytes
pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MIB as f64
}

/// Remove a single leading byte order mark, if present
pub fn strip_bom(value: &str) -> &str {
    value.strip_prefix(BOM).unwrap_or(value)
}

/// Normalize a column header for lookup: trimmed and lowercased
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Check a value against the ISO 639-3 shape (three ASCII letters, any case)
pub fn is_iso_639_3(code: &str) -> bool {
    ISO_639_3_PATTERN.is_match(code)
}

/// Treat empty (after trim) values as absent
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
