pub enum ConfigTemplate {
    Minimal,
    Full,
}

pub const MINIMAL_CONFIG: &str = r#"{
  // Maximum number of data rows to import; extra rows are ignored
  "maxRows": 10000,
  // Columns that must be present in the header row
  "requiredColumns": ["name"]
}
"#;

pub const FULL_CONFIG: &str = r#"{
  // Largest accepted upload, in bytes (5 MiB)
  "maxFileSize": 5242880,

  // Maximum number of data rows to import; extra rows are ignored
  "maxRows": 10000,

  // Field separator; must be a single character
  "delimiter": ",",

  // Columns that must be present in the header row (case-insensitive)
  "requiredColumns": ["name"]

  // By default a column is a taxonomy when its name contains "_" or is
  // shorter than 20 characters; everything else is a custom field.
  // To list the taxonomy columns explicitly instead, add a comma above and
  // uncomment:
  // "taxonomyColumns": ["status", "size", "script_type"]
}
"#;

impl ConfigTemplate {
    pub fn content(&self) -> &'static str {
        match self {
            ConfigTemplate::Minimal => MINIMAL_CONFIG,
            ConfigTemplate::Full => FULL_CONFIG,
        }
    }
}
