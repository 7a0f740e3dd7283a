//! Tools the research agents can call
//!
//! The [`Tool`] trait, an ordered [`ToolRegistry`], and helpers for reading
//! arguments and shaping error payloads.

pub mod params;
pub mod registry;
pub mod tool;

pub use params::{error_payload, optional_number, optional_str, required_str};
pub use registry::ToolRegistry;
pub use tool::Tool;
