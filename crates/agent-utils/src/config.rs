//! Environment-variable configuration helpers
//!
//! Process configuration is read from the environment, optionally seeded from a
//! `.env` file in the working directory. Values go through an [`EnvReader`]
//! over a lookup function, so the same parsing runs against the real process
//! environment ([`env_var`]) or a fixed map. Missing variables fall back to the
//! caller's default; present but malformed values are reported as
//! [`ConfigError`] rather than silently replaced.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Load variables from a `.env` file if one exists
///
/// Variables already present in the environment win over the file.
/// Returns the path that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(_) => None,
    }
}

/// Lookup over the process environment
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Typed reads over a variable lookup
///
/// ```
/// use agent_utils::EnvReader;
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("UI_PORT", "8080")]);
/// let reader = EnvReader::new(|key: &str| vars.get(key).map(|v| v.to_string()));
///
/// assert_eq!(reader.parse::<u16>("UI_PORT", 7860).unwrap(), 8080);
/// assert_eq!(reader.string("UI_HOST", "127.0.0.1"), "127.0.0.1");
/// ```
pub struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Read a variable, treating unset and blank values as absent
    pub fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Read a string variable with a default
    pub fn string(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Read and parse a variable with a default
    pub fn parse<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.optional(key) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
                value,
            }),
        }
    }

    /// Read a boolean flag
    ///
    /// Accepts `true/false`, `1/0`, `yes/no`, `on/off` in any case.
    pub fn flag(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.optional(key) {
            None => Ok(default),
            Some(value) => parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
                reason: "expected true/false".to_string(),
            }),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
