//! Errors of the research crate

use thiserror::Error;

/// Stock research specific errors
#[derive(Debug, Error)]
pub enum ResearchError {
    /// A tool argument outside its accepted values
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Rate limit exceeded for API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinance(String),

    /// Alpha Vantage API error
    #[error("Alpha Vantage error: {0}")]
    AlphaVantage(String),

    /// A data source needs a key that is not configured
    #[error("{0} is not set; this data source requires an API key")]
    MissingApiKey(&'static str),

    /// Socket or file I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Prompt rendering error
    #[error(transparent)]
    Prompt(#[from] agent_prompt::PromptError),

    /// Model provider error
    #[error(transparent)]
    Llm(#[from] agent_llm::LLMError),

    /// Agent assembly or run failed
    #[error(transparent)]
    Agent(#[from] agent_core::Error),
}

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

impl From<agent_utils::ConfigError> for ResearchError {
    fn from(err: agent_utils::ConfigError) -> Self {
        ResearchError::Config(err.to_string())
    }
}

impl From<ResearchError> for agent_core::Error {
    fn from(err: ResearchError) -> Self {
        match err {
            ResearchError::Agent(inner) => inner,
            other => agent_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}
