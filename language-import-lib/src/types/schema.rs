//! Column layout shared by the row mapper and the template generator.

/// A recognized column of the import file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardField {
    pub column: &'static str,
    pub alias: Option<&'static str>,
    /// Value written into the downloadable template's example row.
    pub sample: &'static str,
}

impl StandardField {
    pub fn matches(&self, header: &str) -> bool {
        self.column == header || self.alias == Some(header)
    }
}

pub const NAME: StandardField = StandardField {
    column: "name",
    alias: None,
    sample: "Spanish",
};

pub const ENDONYM: StandardField = StandardField {
    column: "endonym",
    alias: None,
    sample: "Español",
};

pub const ISO_639_3_CODE: StandardField = StandardField {
    column: "iso_639_3_code",
    alias: Some("iso_code"),
    sample: "spa",
};

pub const LANGUAGE_FAMILY: StandardField = StandardField {
    column: "language_family",
    alias: Some("family"),
    sample: "Indo-European",
};

pub const COUNTRY_OF_ORIGIN: StandardField = StandardField {
    column: "country_of_origin",
    alias: Some("country"),
    sample: "Spain",
};

/// Template column order.
pub const STANDARD_FIELDS: [StandardField; 5] = [
    NAME,
    ENDONYM,
    ISO_639_3_CODE,
    LANGUAGE_FAMILY,
    COUNTRY_OF_ORIGIN,
];

pub const MAX_NAME_LENGTH: usize = 200;

/// True for canonical column names and their aliases.
pub fn is_standard_column(header: &str) -> bool {
    STANDARD_FIELDS.iter().any(|field| field.matches(header))
}
