//! Dashboard configuration, sourced from the environment at startup.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Default provider base URL (OpenWeatherMap v2.5).
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Default response cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 5;

/// Default cache size above which the session-end hook clears the cache.
pub const DEFAULT_CACHE_CLEAR_THRESHOLD: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Weather provider base URL.
    pub base_url: String,

    /// Weather provider API key. Required.
    pub api_key: String,

    /// Response cache time-to-live, in seconds.
    pub cache_ttl_secs: u64,

    /// If the cache holds more entries than this when the session ends,
    /// it is cleared. Policy knob, not a hard bound.
    pub cache_clear_threshold: usize,
}

impl DashboardConfig {
    /// Build a config from `SKYCAST_*` environment variables.
    ///
    /// # Errors
    ///
    /// A missing API key is fatal here, before any request is attempted.
    /// Unparseable numeric overrides are rejected rather than silently
    /// falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("SKYCAST_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url =
            std::env::var("SKYCAST_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let cache_ttl_secs = parse_var("SKYCAST_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;
        let cache_clear_threshold =
            parse_var("SKYCAST_CACHE_CLEAR_THRESHOLD", DEFAULT_CACHE_CLEAR_THRESHOLD)?;

        Ok(Self { base_url, api_key, cache_ttl_secs, cache_clear_threshold })
    }

    /// Config with defaults for everything but the API key. Used by tests
    /// and embedding callers that supply their own key source.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_clear_threshold: DEFAULT_CACHE_CLEAR_THRESHOLD,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var: var.to_string(), value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn with_api_key_uses_defaults() {
        let cfg = DashboardConfig::with_api_key("k");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(5));
        assert_eq!(cfg.cache_clear_threshold, 10);
    }

    #[test]
    fn config_round_trips_through_serde() {
        let cfg = DashboardConfig::with_api_key("k");
        let json = serde_json::to_string(&cfg).unwrap();
        let back: DashboardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.api_key, "k");
        assert_eq!(back.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
    }
}
