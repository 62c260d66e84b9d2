mod language;
pub mod schema;

pub use language::{
    MappingFailure, ParseResult, ParsedLanguageRow, RowOutcome, Severity, ValidationError,
};
