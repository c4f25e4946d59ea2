//! OpenWeatherMap client with response caching.

use serde_json::Value;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::cache::ResponseCache;
use crate::error::WeatherError;
use crate::types::{
    daily_forecast, ApiCurrentResponse, ApiForecastResponse, ForecastDay, WeatherSnapshot,
};

/// Client for the current-conditions and 5-day forecast endpoints.
///
/// Owns its response cache; construct one instance per dashboard session
/// and inject it into the orchestrator.
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    cache: ResponseCache,
}

impl WeatherClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Fails fast on a blank API key or an unparseable base URL; neither is
    /// recoverable per-request.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, WeatherError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(WeatherError::MissingApiKey);
        }
        Url::parse(base_url)?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            cache: ResponseCache::default(),
        })
    }

    /// Replace the default 5-second cache TTL.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = ResponseCache::new(ttl);
        self
    }

    /// Fetch current conditions and the 5-day forecast as one unit.
    ///
    /// Both requests run concurrently and both must succeed; the first
    /// failure wins and no partial result is returned.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_weather_and_forecast(
        &self,
        city: &str,
    ) -> Result<(WeatherSnapshot, Vec<ForecastDay>), WeatherError> {
        let (weather, forecast) =
            tokio::try_join!(self.fetch_current(city), self.fetch_forecast(city))?;
        Ok((weather, forecast))
    }

    /// Fetch and normalize current conditions for a city.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let url = self.endpoint_url("weather", city)?;
        let raw = self.request_json(url).await?;
        let parsed: ApiCurrentResponse = serde_json::from_value(raw)
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;
        Ok(WeatherSnapshot::from_api(parsed))
    }

    /// Fetch the raw forecast samples and aggregate them into daily entries.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastDay>, WeatherError> {
        let url = self.endpoint_url("forecast", city)?;
        let raw = self.request_json(url).await?;
        let parsed: ApiForecastResponse = serde_json::from_value(raw)
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;
        Ok(daily_forecast(parsed.list))
    }

    /// Number of cached responses, fresh or stale.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached responses.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Resolve the full request URL for an endpoint. The URL string doubles
    /// as the cache key, so the city goes in exactly as requested.
    fn endpoint_url(&self, endpoint: &str, city: &str) -> Result<Url, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }
        let url = Url::parse_with_params(
            &format!("{}/{}", self.base_url, endpoint),
            &[("q", city), ("appid", self.api_key.as_str())],
        )?;
        Ok(url)
    }

    /// Perform one GET with cache consult, status mapping, and store-back.
    async fn request_json(&self, url: Url) -> Result<Value, WeatherError> {
        let cache_key = url.as_str().to_string();
        if let Some(hit) = self.cache.get(&cache_key) {
            tracing::debug!(path = url.path(), "serving cached response");
            return Ok(hit);
        }

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path = url.path(), status = status.as_u16(), "request failed");
            return Err(WeatherError::from_status(status.as_u16()));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;
        self.cache.insert(&cache_key, value.clone());
        Ok(value)
    }
}
