use serde::Deserialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("request body could not be encoded: {0}")]
    Encode(String),
}

/// Either the auth endpoints' `{error}` body or the exception handler's
/// `{timestamp, status, error, message, path}` body, where `error` is only
/// the HTTP reason phrase.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    path: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        let handler_shape = self.status.is_some() || self.path.is_some();
        let ordered = if handler_shape {
            [self.message, self.error]
        } else {
            [self.error, self.message]
        };
        ordered
            .into_iter()
            .flatten()
            .map(|m| m.trim().to_string())
            .find(|m| !m.is_empty())
    }
}

impl ApiError {
    /// Build a status error, pulling the backend's human-readable text out of the body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message);
        Self::Status { status, message }
    }

    /// Message supplied by the backend, if any.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend text when present, else `fallback`.
    #[must_use]
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.backend_message().unwrap_or(fallback)
    }
}
