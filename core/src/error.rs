//! Error types for the request/response layer.
//!
//! # Design
//! Two classes of failure exist. `InputError` describes malformed client
//! input (query string, cookie header, content length). It is never returned
//! as an `Err`: the request records it as a note and falls back to a safe
//! default. `Error` describes a bug in handler code (an unsupported status,
//! a JSON value that cannot be serialized) and is returned to the caller.

use thiserror::Error;

/// A programming error raised while building or serializing a response.
#[derive(Debug, Error)]
pub enum Error {
    /// The response status has no entry in the status-line table.
    #[error("unsupported status code {0}")]
    UnsupportedStatus(u16),

    /// The value handed to a JSON response could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed client input, recovered locally and recorded on the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unable to parse GET parameters from query string {query:?}: {reason}")]
    Query { query: String, reason: String },

    #[error("unable to parse cookie header {header:?}: {reason}")]
    Cookie { header: String, reason: String },

    #[error("unable to parse Content-Length {0:?}")]
    ContentLength(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_status_names_the_code() {
        assert_eq!(Error::UnsupportedStatus(418).to_string(), "unsupported status code 418");
    }

    #[test]
    fn content_length_note_quotes_the_raw_value() {
        let note = InputError::ContentLength("twelve".to_string());
        assert_eq!(note.to_string(), r#"unable to parse Content-Length "twelve""#);
    }
}
