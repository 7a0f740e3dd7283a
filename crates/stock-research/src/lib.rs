//! Stock research agent
//!
//! An LLM agent served by Ollama answers free-text research queries by calling
//! market-data tools and writing a report. The crate provides:
//!
//! - Data clients for Yahoo Finance daily bars and Alpha Vantage fundamentals
//! - Data tools: price snapshot, financial statements, technical indicators,
//!   news, DCF valuation, insider activity and options flow
//! - Analyst persona prompts and specialist sub-agents
//! - Agent assembly (research, enhanced and specialized) on `agent-runtime`
//! - An invocation wrapper that always answers with text
//! - A single-page web UI
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_research::{ResearchConfig, ResearchService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ResearchConfig::from_env()?;
//!     let service = ResearchService::from_config(&config)?;
//!
//!     let report = service.run_stock_research("Analyze Apple (AAPL)").await;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod indicators;
pub mod invoke;
pub mod profiles;
pub mod prompts;
pub mod subagents;
pub mod tools;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

pub use agents::{Focus, ResearchAgent};
pub use config::{OllamaSettings, ResearchConfig, UiSettings};
pub use error::{ResearchError, Result};
pub use invoke::{ResearchService, extract_answer};
pub use profiles::ModelProfile;
pub use subagents::{SubAgentSpec, create_custom_subagent};
pub use tools::{DataSources, StockPriceTool};
