//! Runtime configuration, read from environment variables.

use std::time::Duration;

use crate::effects::DEFAULT_LATENCY;
use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Owner attached to todos created from the view.
pub const DEFAULT_OWNER_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Service root; endpoints are resolved under `{base_url}/todos`.
    pub base_url: String,
    /// Simulated latency before each request.
    pub latency: Duration,
    pub owner_id: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            latency: DEFAULT_LATENCY,
            owner_id: DEFAULT_OWNER_ID,
        }
    }
}

impl Config {
    /// Reads `TODO_API_URL`, `TODO_LATENCY_MS` and `TODO_OWNER_ID`, falling
    /// back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let base_url = lookup("TODO_API_URL").unwrap_or(defaults.base_url);
        let latency = match lookup("TODO_LATENCY_MS") {
            Some(raw) => Duration::from_millis(parse_number("TODO_LATENCY_MS", raw)?),
            None => defaults.latency,
        };
        let owner_id = match lookup("TODO_OWNER_ID") {
            Some(raw) => parse_number("TODO_OWNER_ID", raw)?,
            None => defaults.owner_id,
        };
        Ok(Self {
            base_url,
            latency,
            owner_id,
        })
    }
}

fn parse_number(var: &'static str, raw: String) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw })
}
