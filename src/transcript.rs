//! Conversation log export as JSON lines.
//!
//! One object per entry, in log order:
//! `{"id":1,"origin":"assistant","text":"..."}`.

use std::path::Path;

use crate::session::ChatEntry;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("failed to serialize log entry {id}: {source}")]
    Serialize { id: u64, source: serde_json::Error },
    #[error("failed to write transcript to {path}: {source}")]
    Write { path: String, source: std::io::Error },
}

/// Encode the log as newline-terminated JSON objects.
///
/// # Errors
///
/// Returns [`TranscriptError::Serialize`] if an entry cannot be encoded.
pub fn to_json_lines(log: &[ChatEntry]) -> Result<String, TranscriptError> {
    let mut out = String::new();
    for entry in log {
        let line = serde_json::to_string(entry).map_err(|source| TranscriptError::Serialize { id: entry.id, source })?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Write the log to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
pub fn write_json_lines(log: &[ChatEntry], path: &Path) -> Result<(), TranscriptError> {
    let body = to_json_lines(log)?;
    std::fs::write(path, body).map_err(|source| TranscriptError::Write { path: path.display().to_string(), source })
}

#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;
