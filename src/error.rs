//! Errors raised while relaying homework statuses.

use thiserror::Error;

/// Recoverable failures of a single polling cycle.
///
/// Every variant is caught by the relay loop, logged, and retried after the
/// regular pause.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Unexpected API response: http_code = {status}; reason = {reason}; content = {body}")]
    Api {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Failed to reach the API endpoint: {0}")]
    Connection(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("Missing key \"{0}\" in homework record")]
    MissingField(&'static str),

    #[error("API returned unknown status {status} for {homework_name}")]
    UnknownStatus {
        status: String,
        homework_name: String,
    },

    #[error("Failed to send Telegram message: {0}")]
    Notify(String),
}

impl RelayError {
    /// Short label of the error kind, used as a structured log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Api { .. } => "api",
            Self::Connection(_) => "connection",
            Self::MalformedResponse(_) => "malformed_response",
            Self::MissingField(_) => "missing_field",
            Self::UnknownStatus { .. } => "unknown_status",
            Self::Notify(_) => "notify",
        }
    }
}
