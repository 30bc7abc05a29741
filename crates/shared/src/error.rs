use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    RateLimited,
    Unavailable,
    Internal,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Error body a catalog server may send with a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    #[serde(default)]
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_body_with_unknown_or_missing_code() {
        let unknown: ApiError =
            serde_json::from_str(r#"{"code":"teapot","message":"short and stout"}"#)
                .expect("unknown code");
        assert_eq!(unknown.code, ErrorCode::Unknown);

        let missing: ApiError =
            serde_json::from_str(r#"{"message":"network down"}"#).expect("missing code");
        assert_eq!(missing, ApiError::new(ErrorCode::Unknown, "network down"));
    }
}
