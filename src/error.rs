//! Error type shared by the filter step and its remote clients.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StepError {
    /// The remote service answered with a JSON-RPC error object.
    #[error("{method} failed with code {code}: {message}")]
    Remote {
        method: String,
        code: i64,
        message: String,
        /// Server-side traceback, when the service sends one.
        trace: Option<String>,
    },

    /// The HTTP request itself could not be completed.
    #[error("transport error calling {method}: {source}")]
    Transport {
        method: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered, but not with the shape this step relies on.
    #[error("malformed response from {method}: {reason}")]
    MalformedResponse { method: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StepError {
    pub(crate) fn malformed(method: &str, reason: impl Into<String>) -> Self {
        StepError::MalformedResponse {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StepError>;
