//! Error types for the GOlr annotation client.

use thiserror::Error;

/// Result type alias using golr-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for GOlr retrieval and conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The server base address could not be turned into a request URL.
    #[error("Could not build GOlr request: {0}")]
    Build(String),

    /// Connection failed, unexpected HTTP status, or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The body was not a parsable or valid GOlr envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// An annotation extension payload could not be parsed.
    #[error("Annotation extension parse error: {0}")]
    ExtensionParse(String),

    /// The fetch was cancelled or its deadline passed.
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether a failed attempt with this error may be retried.
    ///
    /// Only transport failures are retried; a malformed-but-200 response
    /// will not improve on a second request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}
