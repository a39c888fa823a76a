//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the path in `SNAPSHOT_CONFIG`) into strongly
//! typed structs. Every field has a default, so a partial file or no file
//! at all still yields a runnable configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::types::{Coordinate, Theme};

/// Env var naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "SNAPSHOT_CONFIG";

/// Config file used when `SNAPSHOT_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub location: LocationConfig,
    pub weather: WeatherConfig,
    /// Overrides the built-in palette when present.
    pub theme: Option<Theme>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: "static".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LocationConfig {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: "The Ohio State University".to_string(),
            lat: 40.0076,
            lon: -83.0300,
        }
    }
}

impl LocationConfig {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL of the NWS-compatible API, without trailing slash.
    pub base_url: String,
    /// Sent on every upstream request; the NWS rejects anonymous traffic.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Extra attempts per hop for transient failures.
    pub max_retries: u32,
    pub base_backoff_ms: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weather.gov".to_string(),
            user_agent: "snapshot-server/0.1 (snapshot-server@example.com)".to_string(),
            timeout_secs: 10,
            max_retries: 2,
            base_backoff_ms: 250,
        }
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse and validate a TOML document.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `SNAPSHOT_CONFIG` if set, else from `config.toml`.
    pub fn load_or_default() -> Result<Self> {
        Self::load_from(std::env::var(CONFIG_PATH_ENV).ok().as_deref())
    }

    /// An explicit path must exist. Only a missing default `config.toml`
    /// falls back to built-in defaults.
    pub fn load_from(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if !Path::new(DEFAULT_CONFIG_PATH).exists() {
            warn!(path = DEFAULT_CONFIG_PATH, "Config file not found, using built-in defaults");
            return Ok(Self::default());
        }
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// Reject values that would only fail later at request time.
    pub fn validate(&self) -> Result<()> {
        if !self.location.coordinate().is_valid() {
            anyhow::bail!(
                "Invalid location coordinate: {},{}",
                self.location.lat,
                self.location.lon
            );
        }
        if self.weather.timeout_secs == 0 {
            anyhow::bail!("weather.timeout_secs must be greater than zero");
        }
        if self.weather.user_agent.trim().is_empty() {
            anyhow::bail!("weather.user_agent must not be empty");
        }
        if self.weather.base_url.trim().is_empty() {
            anyhow::bail!("weather.base_url must not be empty");
        }
        if let Some(theme) = &self.theme {
            if !crate::theme::is_valid(theme) {
                anyhow::bail!("theme colours must be #rgb or #rrggbb hex strings");
            }
        }
        Ok(())
    }

    /// The palette to serve: the configured override, else the built-in one.
    pub fn theme(&self) -> Theme {
        self.theme.clone().unwrap_or_else(crate::theme::palette)
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
