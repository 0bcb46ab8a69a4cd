//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development defaults,
//! so the server starts with no configuration at all. `Config::from_env`
//! only fails when a variable is present but cannot be parsed.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable names. Keeping them public lets tests and scripts
/// refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "FETCH_CONNECT_TIMEOUT_SECS";
pub const ENV_TIMEOUT_SECS: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_MAX_BODY_BYTES: &str = "FETCH_MAX_BODY_BYTES";
pub const ENV_USER_AGENT: &str = "FETCH_USER_AGENT";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_BODY_BYTES: u64 = 5 * 1024 * 1024; // 5MB
const DEFAULT_USER_AGENT: &str = concat!("metagrab/", env!("CARGO_PKG_VERSION"));

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    fetch: FetchConfig,
}

/// Settings for outbound page fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    connect_timeout: Duration,
    timeout: Duration,
    max_body_bytes: u64,
    user_agent: String,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(bind_addr: impl Into<String>, fetch: FetchConfig) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            fetch,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let fetch = FetchConfig {
            connect_timeout: Duration::from_secs(parse_env(
                ENV_CONNECT_TIMEOUT_SECS,
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
            timeout: Duration::from_secs(parse_env(ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?),
            max_body_bytes: parse_env(ENV_MAX_BODY_BYTES, DEFAULT_MAX_BODY_BYTES)?,
            user_agent: env::var(ENV_USER_AGENT).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        };

        if fetch.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_MAX_BODY_BYTES,
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self { bind_addr, fetch })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    pub fn fetch(&self) -> &FetchConfig {
        &self.fetch
    }
}

impl Default for Config {
    /// Development defaults (mirrors `from_env` with no env overrides).
    fn default() -> Self {
        Self::new(DEFAULT_BIND_ADDR, FetchConfig::default())
    }
}

impl FetchConfig {
    pub fn new(
        connect_timeout: Duration,
        timeout: Duration,
        max_body_bytes: u64,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            connect_timeout,
            timeout,
            max_body_bytes,
            user_agent: user_agent.into(),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
    /// Bytes of a response body handed to the extractor at most.
    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes
    }
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_MAX_BODY_BYTES,
            DEFAULT_USER_AGENT,
        )
    }
}

fn parse_env<T>(field: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(field) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
