//! JSON parsing diagnostics for the upstream course feed.
//!
//! The feed is large and occasionally malformed; a bare serde error with a
//! line number is useless against a multi-megabyte single-line body. This
//! wraps deserialization with the serde path and a snippet of the offending
//! region.

use anyhow::Result;

/// Parse JSON, attaching the serde path and a body snippet on failure.
pub fn parse_json_with_context<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    match serde_path_to_error::deserialize(deserializer) {
        Ok(value) => Ok(value),
        Err(err) => {
            let inner = err.inner();
            let (line, column) = (inner.line(), inner.column());
            let path = err.path().to_string();
            let snippet = snippet_around(body, line, column);

            let location = if path.is_empty() || path == "." {
                format!("line {line} col {column}")
            } else {
                format!("at path '{path}' (line {line} col {column})")
            };

            Err(anyhow::anyhow!("{inner} {location}\n{snippet}"))
        }
    }
}

/// A ~40-char window of the offending line with a caret under the error column.
fn snippet_around(body: &str, line: usize, column: usize) -> String {
    let target = body.lines().nth(line.saturating_sub(1)).unwrap_or("");
    if target.is_empty() {
        return "(empty line)".to_string();
    }

    let error_idx = column.saturating_sub(1).min(target.len());
    let start = error_idx.saturating_sub(20);
    let end = (error_idx + 20).min(target.len());

    // Clamp to char boundaries so slicing can't panic on multibyte bodies.
    let start = (0..=start).rev().find(|i| target.is_char_boundary(*i)).unwrap_or(0);
    let end = (end..=target.len())
        .find(|i| target.is_char_boundary(*i))
        .unwrap_or(target.len());

    let caret = " ".repeat(error_idx - start) + "^";
    format!("...{}...\n   {caret}", &target[start..end])
}
