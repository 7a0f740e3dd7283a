//! Concrete agent implementations
//!
//! - SimpleAgent: single model turn without tools
//! - ToolAgent: Agent with LLM loop and tool execution capabilities

pub mod simple;
pub mod tool;

pub use simple::{SimpleAgent, SimpleConfig};
pub use tool::ToolAgent;
