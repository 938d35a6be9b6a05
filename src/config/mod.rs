//! Configuration handling for the application.
//!
//! Everything is read from environment variables once at startup, with
//! development defaults for anything absent. The reasoning-engine settings are
//! split out into [`EngineConfig`] so the engine client receives them
//! explicitly at construction instead of reading process state itself.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Environment variable names. Public so tests and binaries can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_ENGINE_TIMEOUT_SECS: &str = "ENGINE_TIMEOUT_SECS";
pub const ENV_ENGINE_TEMPERATURE: &str = "ENGINE_TEMPERATURE";
pub const ENV_ENGINE_MAX_TOKENS: &str = "ENGINE_MAX_TOKENS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_RATE_LIMIT_MAX_REQUESTS: &str = "RATE_LIMIT_MAX_REQUESTS";
pub const ENV_RATE_LIMIT_WINDOW_SECS: &str = "RATE_LIMIT_WINDOW_SECS";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 120;
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_MAX_TOKENS: u32 = 4000;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 10;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: i64 = 60;
const MAX_RATE_LIMIT_WINDOW_SECS: i64 = 86_400;

/// Settings handed to the reasoning-engine client.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl EngineConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_ENGINE_TIMEOUT_SECS),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    bind_addr: String,
    engine: EngineConfig,
    fetch_timeout: Duration,
    rate_limit_max_requests: u32,
    rate_limit_window_secs: i64,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let temperature = parse_var(ENV_ENGINE_TEMPERATURE, DEFAULT_TEMPERATURE)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                field: ENV_ENGINE_TEMPERATURE,
                reason: format!("{temperature} is outside 0.0..=2.0"),
            });
        }

        let rate_limit_max_requests =
            parse_var(ENV_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RATE_LIMIT_MAX_REQUESTS)?;
        if rate_limit_max_requests == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_RATE_LIMIT_MAX_REQUESTS,
                reason: "must allow at least one request".to_string(),
            });
        }

        let rate_limit_window_secs =
            parse_var(ENV_RATE_LIMIT_WINDOW_SECS, DEFAULT_RATE_LIMIT_WINDOW_SECS)?;
        if !(1..=MAX_RATE_LIMIT_WINDOW_SECS).contains(&rate_limit_window_secs) {
            return Err(ConfigError::InvalidValue {
                field: ENV_RATE_LIMIT_WINDOW_SECS,
                reason: format!(
                    "{rate_limit_window_secs} is outside 1..={MAX_RATE_LIMIT_WINDOW_SECS}"
                ),
            });
        }

        let engine = EngineConfig {
            api_key: env::var(ENV_OPENAI_API_KEY)
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: env::var(ENV_OPENAI_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: env::var(ENV_OPENAI_BASE_URL)
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(parse_var(
                ENV_ENGINE_TIMEOUT_SECS,
                DEFAULT_ENGINE_TIMEOUT_SECS,
            )?),
            temperature,
            max_tokens: parse_var(ENV_ENGINE_MAX_TOKENS, DEFAULT_MAX_TOKENS)?,
        };

        Ok(Self {
            bind_addr,
            engine,
            fetch_timeout: Duration::from_secs(parse_var(
                ENV_FETCH_TIMEOUT_SECS,
                DEFAULT_FETCH_TIMEOUT_SECS,
            )?),
            rate_limit_max_requests,
            rate_limit_window_secs,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EngineConfig {
        &mut self.engine
    }

    /// Upper bound for a single page fetch.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn rate_limit_max_requests(&self) -> u32 {
        self.rate_limit_max_requests
    }

    pub fn rate_limit_window_secs(&self) -> i64 {
        self.rate_limit_window_secs
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            engine: EngineConfig::default(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            rate_limit_max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
        }
    }
}

fn parse_var<T>(field: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(field) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
