//! Error types for the CardDesk client.
//!
//! One enum covers everything a call can surface: transport and middleware
//! failures, non-success API statuses (with the authentication failure as a
//! distinguished variant), configuration problems, and session storage I/O.
//! Nothing is swallowed and nothing is retried; every failure reaches the
//! caller.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid client configuration (base URL, environment variables).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The server answered 401. The stored session has already been cleared
    /// and the session-invalidated hook has already fired by the time this
    /// reaches the caller.
    #[error("authentication failed (HTTP 401) on {path}")]
    Unauthorized { path: String },

    /// Any other non-success status, with the server's message when the
    /// error body carried one.
    #[error("CardDesk API error on {path} ({status}): {message}")]
    Api {
        status: StatusCode,
        path: String,
        message: String,
    },

    /// HTTP transport error (connect, timeout, response body).
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure inside the middleware stack.
    #[error("HTTP middleware error: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON (de)serialization outside the HTTP path: request body
    /// construction and the session file format.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage I/O error.
    #[error("session storage error: {0}")]
    SessionStorage(#[from] std::io::Error),
}

impl Error {
    /// True for the distinguished authentication-failure error.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The HTTP status behind this error, when it carries one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }
}
