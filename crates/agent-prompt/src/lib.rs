//! Prompt templates for the research agents
//!
//! Personas and the human turn are [`JinjaTemplate`]s kept in a
//! [`PromptRegistry`]; prompts whose shape depends on data (which specialists
//! an agent has) are put together with [`PromptBuilder`].
//!
//! ```
//! use agent_prompt::{JinjaTemplate, PromptTemplate};
//! use serde_json::json;
//!
//! let template = JinjaTemplate::new("tools", "Available tools: {{ tools | join(', ') }}").unwrap();
//! let prompt = template.render(&json!({ "tools": ["get_stock_price", "get_company_news"] })).unwrap();
//! assert_eq!(prompt, "Available tools: get_stock_price, get_company_news");
//! ```

mod builder;
mod error;
mod jinja;
mod registry;
mod template;

pub use builder::PromptBuilder;
pub use error::{PromptError, Result};
pub use jinja::JinjaTemplate;
pub use registry::PromptRegistry;
pub use template::PromptTemplate;
