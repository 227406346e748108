//! Error types for the trip API layer.
//!
//! Four failure classes reach callers: transport faults, rejected
//! credentials, per-field validation payloads, and everything else. No retry
//! happens at this layer; a 401 or a timeout surfaces upward unchanged.

use haulage_core::FieldErrors;
use thiserror::Error;

/// Errors from trip API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network-level failure: connect, DNS, timeout, or a broken body
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Credentials rejected (HTTP 401)
    #[error("authentication rejected")]
    Unauthorized,

    /// Request rejected with per-field validation messages
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// Success response that carried no access token
    #[error("login response carried no access token")]
    MissingToken,

    /// Any other non-success response
    #[error("unexpected response: HTTP {status}")]
    Unexpected {
        /// Status code received
        status: u16,
        /// Response body, kept for log context
        body: String,
    },

    /// Endpoint URL could not be constructed from the base URL
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl ApiError {
    /// Returns true if this error is transient and the same request may
    /// succeed on a user-triggered retry.
    ///
    /// Only transport faults qualify. Rejected credentials and validation
    /// failures will fail identically until the input changes.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// User-facing classification of a failed login attempt.
///
/// Login UIs distinguish rejected credentials from everything else, and show
/// validation payloads next to the offending fields. Unlike [`ApiError`] this
/// is `Clone`, so view state machines can carry it in events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    /// Credentials rejected (HTTP 401).
    InvalidCredentials,
    /// Request rejected with per-field messages.
    Fields(FieldErrors),
    /// Transport fault, missing token, or server error.
    Other,
}

impl From<&ApiError> for LoginFailure {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Unauthorized => Self::InvalidCredentials,
            ApiError::Validation(fields) => Self::Fields(fields.clone()),
            ApiError::Transport(_)
            | ApiError::MissingToken
            | ApiError::Unexpected { .. }
            | ApiError::Endpoint(_) => Self::Other,
        }
    }
}
