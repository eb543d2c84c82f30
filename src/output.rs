//! Rendering of transcription results for terminal and machine output.

use crate::error::{PhonoscribeError, Result};
use crate::g2p::UnitTable;
use crate::router::TranscriptionResult;
use serde::Serialize;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// IPA only, one result per line.
    #[default]
    Text,
    /// One JSON object per result per line.
    Json,
}

/// Render one result in the given format (no trailing newline).
pub fn render_result(result: &TranscriptionResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(result.ipa.clone()),
        OutputFormat::Json => to_json_line(result),
    }
}

/// Error entry for a failed request, so JSON output stays one line per input.
#[derive(Debug, Serialize)]
struct ErrorLine<'a> {
    error: String,
    text: &'a str,
}

/// Render a failed request in the given format (no trailing newline).
pub fn render_error(text: &str, error: &PhonoscribeError, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("error: {}", error)),
        OutputFormat::Json => to_json_line(&ErrorLine {
            error: error.to_string(),
            text,
        }),
    }
}

fn to_json_line<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| PhonoscribeError::Other(e.to_string()))
}

/// One line per unit, longest units first: `tion    ʃən`.
pub fn format_unit_table(table: &UnitTable) -> String {
    let width = table.max_unit_length().max(4);
    let mut out = String::new();
    for (unit, ipa) in table.sorted_entries() {
        out.push_str(&format!("{:<width$}  {}\n", unit, ipa, width = width));
    }
    out
}

/// Note for results that needed the grapheme fallback on the dictionary path.
pub fn fallback_note(result: &TranscriptionResult) -> Option<String> {
    if result.fallback_words.is_empty() {
        return None;
    }
    Some(format!(
        "not in dictionary: {}",
        result.fallback_words.join(", ")
    ))
}
