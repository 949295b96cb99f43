//! Extraction error types.

use thiserror::Error;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors raised before the response is committed.
///
/// Once headers are sent, failures travel through the body stream instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to launch {executable}: {source}")]
    Spawn {
        executable: String,
        source: std::io::Error,
    },

    #[error("extraction process has no stdout pipe")]
    MissingStdout,
}
