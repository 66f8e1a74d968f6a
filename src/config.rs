// src/config.rs
use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
// Host of the character service. The chat and turn paths the adapter calls on it
// are a JSON-over-HTTP placeholder for the real streaming protocol; point
// CHARACTER_API_URL at a compatible gateway.
pub const DEFAULT_API_URL: &str = "https://neo.character.ai";
pub const DEFAULT_ACCOUNT_URL: &str = "https://plus.character.ai";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub character_token: Option<String>,
    pub character_id: Option<String>,
    pub voice_id: Option<String>,
    pub api_url: String,
    pub account_url: String,
    pub upstream_timeout: Duration,
    /// Whether upstream failure detail is returned to callers or only logged.
    pub expose_upstream_errors: bool,
}

/// Everything needed to open the upstream session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub character_id: String,
    pub voice_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: PathBuf::from("static"),
            character_token: None,
            character_id: None,
            voice_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            account_url: DEFAULT_ACCOUNT_URL.to_string(),
            upstream_timeout: Duration::from_secs(60),
            expose_upstream_errors: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: non_blank("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: non_blank("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            character_token: non_blank("CHARACTER_TOKEN"),
            character_id: non_blank("CHARACTER_ID"),
            voice_id: non_blank("VOICE_ID"),
            api_url: non_blank("CHARACTER_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            account_url: non_blank("CHARACTER_ACCOUNT_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.account_url),
            upstream_timeout: non_blank("UPSTREAM_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
            expose_upstream_errors: non_blank("EXPOSE_UPSTREAM_ERRORS")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(defaults.expose_upstream_errors),
        }
    }

    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        Ok(Credentials {
            token: self
                .character_token
                .clone()
                .ok_or(ConfigError::Missing("CHARACTER_TOKEN"))?,
            character_id: self
                .character_id
                .clone()
                .ok_or(ConfigError::Missing("CHARACTER_ID"))?,
            voice_id: self.voice_id.clone().ok_or(ConfigError::Missing("VOICE_ID"))?,
        })
    }
}
