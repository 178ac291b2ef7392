use thiserror::Error;

/// Message used when a failed response carries no usable fault detail.
pub const UNKNOWN_ERROR: &str = "Unknown error";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The signer could not produce an authorization value (e.g. the OS RNG failed).
    /// Never retried.
    #[error("signing failed: {0}")]
    Signing(String),

    /// DNS, TLS handshake, socket or timeout failure.
    #[error("connection failure: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("QuickBooks API error ({status}): {detail}")]
    Http { status: u16, detail: String },

    /// The server rejected the version token sent with a mutation.
    /// Re-fetch and retry.
    #[error("stale version token ({status}): {detail}")]
    Conflict { status: u16, detail: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} {id} is not mutable: {reason}")]
    InvalidState {
        entity: &'static str,
        id: String,
        reason: String,
    },

    #[error("malformed response ({status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A request header name or value the HTTP layer cannot carry.
    #[error("invalid request header: {0}")]
    InvalidHeader(String),

    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether a higher layer may reasonably repeat the whole operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Connection(_) | Error::Conflict { .. })
    }

    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. }
            | Error::Conflict { status, .. }
            | Error::MalformedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}
