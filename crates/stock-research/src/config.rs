//! Process configuration for the research agent
//!
//! Everything comes from environment variables (optionally seeded from `.env`):
//!
//! | variable | default |
//! |---|---|
//! | `OLLAMA_MODEL` | `gpt-oss` |
//! | `OLLAMA_TEMPERATURE` | `0` |
//! | `OLLAMA_HOST` | `http://localhost:11434` |
//! | `UI_HOST` | `127.0.0.1` |
//! | `UI_PORT` | `7860` |
//! | `UI_SHARE` | `false` |
//! | `ALPHA_VANTAGE_API_KEY` | unset |

use crate::error::{ResearchError, Result};
use agent_utils::{EnvReader, env_var};
use url::Url;

/// Default model name
pub const DEFAULT_MODEL: &str = "gpt-oss";
/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
/// Model request timeout in seconds
pub const MODEL_TIMEOUT_SECS: u64 = 60;

/// Connection and sampling settings for the Ollama model
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaSettings {
    pub model: String,
    pub temperature: f32,
    pub host: String,
    pub timeout_secs: u64,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            host: DEFAULT_OLLAMA_HOST.to_string(),
            timeout_secs: MODEL_TIMEOUT_SECS,
        }
    }
}

impl OllamaSettings {
    /// Read `OLLAMA_MODEL`, `OLLAMA_TEMPERATURE` and `OLLAMA_HOST`
    pub fn from_env() -> Result<Self> {
        Self::read(&EnvReader::new(env_var))
    }

    fn read<F: Fn(&str) -> Option<String>>(vars: &EnvReader<F>) -> Result<Self> {
        let host = vars.string("OLLAMA_HOST", DEFAULT_OLLAMA_HOST);
        validate_host(&host)?;

        Ok(Self {
            model: vars.string("OLLAMA_MODEL", DEFAULT_MODEL),
            temperature: vars.parse("OLLAMA_TEMPERATURE", 0.0_f32)?,
            host: host.trim_end_matches('/').to_string(),
            timeout_secs: MODEL_TIMEOUT_SECS,
        })
    }
}

/// Bind settings for the web UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiSettings {
    pub host: String,
    pub port: u16,
    /// Public sharing: listen on all interfaces
    pub share: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7860,
            share: false,
        }
    }
}

impl UiSettings {
    /// Read `UI_HOST`, `UI_PORT` and `UI_SHARE`
    fn read<F: Fn(&str) -> Option<String>>(vars: &EnvReader<F>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: vars.string("UI_HOST", &defaults.host),
            port: vars.parse("UI_PORT", defaults.port)?,
            share: vars.flag("UI_SHARE", defaults.share)?,
        })
    }

    /// Address the server should listen on
    pub fn bind_address(&self) -> String {
        let host = if self.share { "0.0.0.0" } else { &self.host };
        format!("{host}:{}", self.port)
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResearchConfig {
    pub ollama: OllamaSettings,
    pub ui: UiSettings,
    /// Enables fundamentals, news, insider and options data
    pub alpha_vantage_key: Option<String>,
}

impl ResearchConfig {
    /// Build the configuration from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_var)
    }

    /// Build the configuration from any variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let vars = EnvReader::new(lookup);
        Ok(Self {
            ollama: OllamaSettings::read(&vars)?,
            ui: UiSettings::read(&vars)?,
            alpha_vantage_key: vars.optional("ALPHA_VANTAGE_API_KEY"),
        })
    }
}

fn validate_host(host: &str) -> Result<()> {
    let url = Url::parse(host)
        .map_err(|e| ResearchError::Config(format!("OLLAMA_HOST '{host}' is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ResearchError::Config(format!(
            "OLLAMA_HOST must use http or https, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ResearchConfig::default();
        assert_eq!(config.ollama.model, "gpt-oss");
        assert_eq!(config.ollama.temperature, 0.0);
        assert_eq!(config.ollama.host, "http://localhost:11434");
        assert_eq!(config.ollama.timeout_secs, 60);
        assert_eq!(config.ui.bind_address(), "127.0.0.1:7860");
        assert!(config.alpha_vantage_key.is_none());
    }

    #[test]
    fn test_share_binds_all_interfaces() {
        let ui = UiSettings {
            share: true,
            ..UiSettings::default()
        };
        assert_eq!(ui.bind_address(), "0.0.0.0:7860");
    }

    #[test]
    fn test_validate_host() {
        assert!(validate_host("http://localhost:11434").is_ok());
        assert!(validate_host("https://ollama.internal").is_ok());
        assert!(validate_host("localhost:11434").is_err());
        assert!(validate_host("not a url").is_err());
    }

    fn lookup(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key: &str| vars.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn test_from_lookup() {
        let config = ResearchConfig::from_lookup(lookup(&[
            ("OLLAMA_MODEL", "mistral"),
            ("OLLAMA_TEMPERATURE", "0.3"),
            ("OLLAMA_HOST", "http://gpu-box:11434/"),
            ("UI_PORT", "8080"),
            ("UI_SHARE", "true"),
            ("ALPHA_VANTAGE_API_KEY", "demo"),
        ]))
        .unwrap();
        assert_eq!(config.ollama.model, "mistral");
        assert!((config.ollama.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.ollama.host, "http://gpu-box:11434");
        assert_eq!(config.ui.port, 8080);
        assert!(config.ui.share);
        assert_eq!(config.alpha_vantage_key.as_deref(), Some("demo"));
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let config = ResearchConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ResearchConfig::default());
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(matches!(
            ResearchConfig::from_lookup(lookup(&[("UI_PORT", "not-a-port")])),
            Err(ResearchError::Config(msg)) if msg.contains("UI_PORT")
        ));
        assert!(matches!(
            ResearchConfig::from_lookup(lookup(&[("OLLAMA_HOST", "ftp://gpu-box")])),
            Err(ResearchError::Config(msg)) if msg.contains("http or https")
        ));
    }
}
