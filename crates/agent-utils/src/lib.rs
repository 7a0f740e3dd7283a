//! Shared utilities for the stock research agent
//!
//! Logging setup and typed access to environment-variable configuration,
//! used by both the research binary and the setup verifier.

pub mod config;
pub mod logging;

pub use config::{ConfigError, EnvReader, env_var, load_dotenv};
pub use logging::init_tracing;
