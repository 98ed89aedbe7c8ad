use reqwest::StatusCode;
use thiserror::Error;

/// Failure while calling the completion API or reading its answer.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}
