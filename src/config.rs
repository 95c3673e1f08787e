//! Server configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::llm::LlmConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_SECRETS_PATH: &str = ".streamlit/secrets.toml";
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub secrets_path: PathBuf,
    pub cookie_secure: bool,
    pub session_idle: Duration,
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Build server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `LORE_SECRETS_PATH`: default `.streamlit/secrets.toml`
    /// - `COOKIE_SECURE`: default false
    /// - `SESSION_IDLE_SECS`: default 3600
    /// - plus the LLM variables read by `LlmConfig::from_lookup`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.clone() })?,
            None => DEFAULT_PORT,
        };
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let secrets_path = lookup("LORE_SECRETS_PATH").map_or_else(|| PathBuf::from(DEFAULT_SECRETS_PATH), PathBuf::from);
        let cookie_secure = lookup("COOKIE_SECURE").as_deref().and_then(parse_bool).unwrap_or(false);
        let session_idle = Duration::from_secs(
            lookup("SESSION_IDLE_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_SESSION_IDLE_SECS),
        );

        Ok(Self { bind_addr, port, secrets_path, cookie_secure, session_idle, llm: LlmConfig::from_lookup(lookup) })
    }

    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Parse common boolean spellings; `None` for anything else.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
