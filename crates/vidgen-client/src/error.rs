//! Video client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The vendor API rejected the call; status and structured detail
    /// are forwarded unchanged.
    #[error("Video API returned {status}: {message}")]
    Api {
        status: u16,
        message: String,
        detail: serde_json::Value,
    },

    #[error("Empty response from video API")]
    EmptyResponse,

    #[error("Unrecognized download payload: {0}")]
    UnsupportedResponse(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Media(#[from] vidgen_media::MediaError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Upstream HTTP status, when the error carries one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
