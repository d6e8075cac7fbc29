// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_SESSION_FILE: &str = ".rideshare-session.json";

/// Where read operations get their data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Everything goes to the REST backend.
    Live,
    /// Reads are served from the bundled demo fixtures; writes still hit the backend.
    Fixtures,
}

impl std::str::FromStr for DataSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(DataSource::Live),
            "fixtures" | "demo" => Ok(DataSource::Fixtures),
            _ => Err(()),
        }
    }
}

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// REST base URL, without a trailing slash (e.g. `http://localhost:8000/api`)
    pub api_base_url: String,
    /// Source for read operations
    pub data_source: DataSource,
    /// Key-value file holding the persisted auth token
    pub session_file: PathBuf,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            data_source: DataSource::Live,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let data_source = match env::var("RIDESHARE_DATA_SOURCE") {
            Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "RIDESHARE_DATA_SOURCE",
                value,
            })?,
            Err(_) => DataSource::Live,
        };

        Ok(Self {
            api_base_url: normalize_base_url(
                &env::var("RIDESHARE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            )?,
            data_source,
            session_file: env::var("RIDESHARE_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE)),
        })
    }

    /// Config pointing at a specific backend (used by tests and tools).
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            var: "RIDESHARE_API_URL",
            value: raw.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_parse() {
        assert_eq!("live".parse::<DataSource>(), Ok(DataSource::Live));
        assert_eq!("Fixtures".parse::<DataSource>(), Ok(DataSource::Fixtures));
        assert_eq!("demo".parse::<DataSource>(), Ok(DataSource::Fixtures));
        assert!("offline-ish".parse::<DataSource>().is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = Config::with_base_url("http://127.0.0.1:9000/api/").unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_base_url_requires_scheme() {
        assert!(Config::with_base_url("localhost:8000/api").is_err());
    }
}
