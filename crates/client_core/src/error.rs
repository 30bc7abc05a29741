use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("catalog request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("catalog responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("malformed product listing: {0}")]
    Decode(#[source] reqwest::Error),
}

impl CatalogError {
    /// Human-readable reason, suitable for showing verbatim to the user.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidUrl { url, reason } => format!("invalid catalog url '{url}': {reason}"),
            Self::Transport(err) if err.is_timeout() => "request timed out".to_string(),
            Self::Transport(err) if err.is_connect() => "failed to connect to catalog".to_string(),
            Self::Transport(err) => err.to_string(),
            Self::Status { message, .. } => message.clone(),
            Self::Decode(err) => format!("malformed product listing: {err}"),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value)
        } else {
            Self::Transport(value)
        }
    }
}
