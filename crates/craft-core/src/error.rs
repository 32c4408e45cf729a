//! Error types for promptcraft

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the enhancement client, the orchestrator,
/// storage and the message channel
#[derive(Error, Debug)]
pub enum Error {
    #[error("Groq API key is required. Please set your API key with `craft key set <KEY>`.")]
    MissingCredential,

    #[error("Invalid Groq API key. Please check your API key.")]
    InvalidCredential,

    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    #[error("Invalid request. The prompt might be too long or contain unsupported content.")]
    MalformedRequest,

    #[error("API request failed: {status} {reason}")]
    Upstream { status: u16, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Empty response received from Groq API")]
    EmptyResponse,

    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures the user fixes by configuring a different key
    pub fn is_credential_error(&self) -> bool {
        matches!(self, Error::MissingCredential | Error::InvalidCredential)
    }

    /// True when the upstream API asked us to slow down
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
