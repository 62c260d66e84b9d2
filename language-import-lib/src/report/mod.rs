use csv::{Terminator, WriterBuilder};
use std::io::Write;

use crate::error::ProcessorError;
use crate::types::ParseResult;

pub const REPORT_HEADERS: [&str; 4] = ["row_number", "field", "severity", "message"];

/// Write every row-level issue as CSV, one line per issue, in processing order.
pub fn write_error_report<W: Write>(result: &ParseResult, writer: W) -> Result<(), ProcessorError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(REPORT_HEADERS)?;
    for issue in &result.errors {
        writer.write_record([
            issue.row_number.to_string().as_str(),
            issue.field.as_str(),
            issue.severity.as_str(),
            issue.message.as_str(),
        ])?;
    }

    writer.flush()?;
    tracing::debug!("Wrote {} issues to error report", result.errors.len());
    Ok(())
}

/// Render the issue report into a string.
pub fn error_report_string(result: &ParseResult) -> Result<String, ProcessorError> {
    let mut buffer = Vec::new();
    write_error_report(result, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ProcessorError::Processing(format!("Error report is not valid UTF-8: {}", e)))
}
