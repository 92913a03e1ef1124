//! Server configuration.
//!
//! Settings come from an optional TOML file, then environment variables
//! override individual fields:
//!
//! - `FLIGHT_DASH_CONFIG`: explicit config file path
//! - `HOST`, `PORT`: bind address
//! - `AVIATIONSTACK_BASE_URL`, `AVIATIONSTACK_ACCESS_KEY`: upstream API
//! - `SOURCE_TIMEOUT_SECS`: upstream request timeout
//! - `CACHE_MAX_AGE_SECS`: refetch the dataset once it is older than this

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::RefreshPolicy;
use crate::models::MAX_FLIGHTS_PER_FETCH;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// HTTP bind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream flight API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_flights")]
    pub max_flights: usize,
}

/// Dataset cache settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Unset keeps the first dataset for the lifetime of the process.
    #[serde(default)]
    pub max_age_secs: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_base_url() -> String {
    "http://api.aviationstack.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_flights() -> usize {
    MAX_FLIGHTS_PER_FETCH
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_key: String::new(),
            timeout_secs: default_timeout_secs(),
            max_flights: default_max_flights(),
        }
    }
}

impl CacheSettings {
    pub fn refresh_policy(&self) -> RefreshPolicy {
        match self.max_age_secs {
            Some(secs) => RefreshPolicy::MaxAge(Duration::from_secs(secs)),
            None => RefreshPolicy::Never,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(content)?;
        config.source.max_flights = config.source.max_flights.min(MAX_FLIGHTS_PER_FETCH);
        Ok(config)
    }

    /// Search `flight-dash.toml` in the usual places, falling back to defaults.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("flight-dash.toml"),
            PathBuf::from("backend/flight-dash.toml"),
            PathBuf::from("../flight-dash.toml"),
        ];

        match search_paths.iter().find(|p| p.exists()) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `FLIGHT_DASH_CONFIG` or the default location, then apply
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("FLIGHT_DASH_CONFIG") {
            Ok(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Self::from_default_location()?,
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_value("PORT", &port)?;
        }
        if let Some(url) = lookup("AVIATIONSTACK_BASE_URL") {
            self.source.base_url = url;
        }
        if let Some(key) = lookup("AVIATIONSTACK_ACCESS_KEY") {
            self.source.access_key = key;
        }
        if let Some(timeout) = lookup("SOURCE_TIMEOUT_SECS") {
            self.source.timeout_secs = parse_value("SOURCE_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(max_age) = lookup("CACHE_MAX_AGE_SECS") {
            self.cache.max_age_secs = Some(parse_value("CACHE_MAX_AGE_SECS", &max_age)?);
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
