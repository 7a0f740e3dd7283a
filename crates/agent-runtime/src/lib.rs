//! Agent runtime for executing tool-calling agents
//!
//! This crate provides the loop that drives a model through tool calls
//! ([`AgentExecutor`]) and the agent wrappers built on top of it.

pub mod agents;
pub mod executor;

// Re-export key types
pub use agents::{SimpleAgent, SimpleConfig, ToolAgent};
pub use executor::{
    AgentExecutor, AgentExecutorBuilder, AgentRun, ExecutorConfig, ITERATION_LIMIT_MESSAGE,
    RunOutcome,
};
