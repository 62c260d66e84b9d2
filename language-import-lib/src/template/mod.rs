use crate::types::schema::STANDARD_FIELDS;

/// MIME type to serve the template download with.
pub const TEMPLATE_MIME_TYPE: &str = "text/csv";

pub const TEMPLATE_FILE_NAME: &str = "languages_template.csv";

/// Build a blank import file: the header line plus one example row.
///
/// Taxonomy columns follow the standard columns and are left empty in the
/// example row. Values are written unquoted.
pub fn generate_csv_template<S: AsRef<str>>(taxonomy_type_names: &[S]) -> String {
    let headers: Vec<&str> = STANDARD_FIELDS
        .iter()
        .map(|field| field.column)
        .chain(taxonomy_type_names.iter().map(AsRef::as_ref))
        .collect();

    let example: Vec<&str> = STANDARD_FIELDS
        .iter()
        .map(|field| field.sample)
        .chain(taxonomy_type_names.iter().map(|_| ""))
        .collect();

    [headers.join(","), example.join(",")].join("\n")
}
