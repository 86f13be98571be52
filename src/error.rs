//! Errors raised while talking to the recommendation backend

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single backend call.
///
/// Application-level errors reported inside a 2xx body are not errors at
/// this layer; they are part of the decoded response.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, timeout, or body decoding failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("backend returned {status}")]
    Status {
        status: StatusCode,
        /// `error` field of the body, when the backend sent one
        message: Option<String>,
    },
}

impl ApiError {
    pub fn status(status: StatusCode, message: Option<String>) -> Self {
        Self::Status { status, message }
    }

    /// Message the backend attached to a failed response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Transport(_) => None,
        }
    }
}
