//! Module defining the errors which are exposed to the users of the crate

use crate::output::Ingested;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading from the underlying resource failed. Ends the run.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Record text that is not exactly one JSON record. Recovered locally: logged, counted,
    /// skipped.
    #[error("invalid record on line {line}: {source} (text: {excerpt})")]
    RecordParse {
        line: usize,
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A run that was cut short by a transport failure.
///
/// Holds whatever the session produced before the failure, with finalized stats.
#[derive(Debug, thiserror::Error)]
#[error("ingestion interrupted after {} events: {error}", .partial.events.len())]
pub struct Interrupted {
    #[source]
    pub error: Error,
    pub partial: Ingested,
}

pub(crate) fn record_parse_error(
    line: usize,
    text: &str,
    excerpt_len: usize,
    source: serde_json::Error,
) -> Error {
    Error::RecordParse {
        line,
        excerpt: excerpt(text, excerpt_len),
        source,
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
