//! JSON rendering for extraction results.
//!
//! Pretty output uses two-space indentation and writes non-ASCII characters
//! as-is. Field order is fixed by the model, so equal results always render
//! to identical bytes.

use std::io::Write;

use crate::error::Result;
use crate::model::DocumentResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Render a result to a JSON string.
pub fn to_json(result: &DocumentResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result)?,
        JsonFormat::Compact => serde_json::to_string(result)?,
    };
    Ok(json)
}

/// Render a result as JSON into a writer.
pub fn to_json_writer<W: Write>(writer: W, result: &DocumentResult, format: JsonFormat) -> Result<()> {
    match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(writer, result)?,
        JsonFormat::Compact => serde_json::to_writer(writer, result)?,
    }
    Ok(())
}
