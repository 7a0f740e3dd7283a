//! Model provider errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LLMError>;

#[derive(Error, Debug)]
pub enum LLMError {
    /// Non-success status from the model service
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The service rejected the request body (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not pulled into the local runtime
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Connection refused, timeout, TLS failure and the like
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
}
