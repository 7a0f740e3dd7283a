//! Agent and tool errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of agents and the tools they call
#[derive(Error, Debug)]
pub enum Error {
    /// Agent could not be assembled
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Agent processing failed (model call, malformed response)
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// Tool parameters did not match the tool's schema
    #[error("Invalid parameters for tool '{tool}': {reason}")]
    InvalidToolInput { tool: String, reason: String },
}

impl Error {
    /// Build an [`Error::InvalidToolInput`] from a tool name and any displayable cause
    pub fn invalid_input(tool: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidToolInput {
            tool: tool.into(),
            reason: reason.to_string(),
        }
    }
}
