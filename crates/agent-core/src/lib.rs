//! Core abstractions shared by the research agent crates
//!
//! This crate defines the [`Agent`] trait implemented by every invocable agent
//! and the error type the runtime and tools report through.

pub mod agent;
pub mod error;

pub use agent::Agent;
pub use error::{Error, Result};
