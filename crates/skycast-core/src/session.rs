//! Session orchestrator: binds the state machine to the weather client.
//!
//! Actions from the presentation layer dispatch synchronously, so the UI
//! sees the new target city and the loading flag before any network I/O.
//! Fetch completions dispatch follow-up actions; completions carry a
//! generation token and superseded results are discarded, so the displayed
//! state always matches the last-requested city even when fetches overlap.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use skycast_weather::{WeatherClient, WeatherError};

use crate::config::DashboardConfig;
use crate::state::{reduce, Action, DashboardState};

/// One dashboard session: the single application state plus the injected
/// weather client that serves its fetches.
pub struct WeatherSession {
    state: Mutex<DashboardState>,
    client: WeatherClient,
    fetch_generation: AtomicU64,
    cache_clear_threshold: usize,
}

impl WeatherSession {
    pub fn new(client: WeatherClient, cache_clear_threshold: usize) -> Self {
        Self {
            state: Mutex::new(DashboardState::default()),
            client,
            fetch_generation: AtomicU64::new(0),
            cache_clear_threshold,
        }
    }

    /// Build the client from config and wrap it in a fresh session.
    ///
    /// # Errors
    ///
    /// Fails when the config's API key is blank or its base URL does not
    /// parse; both are fatal before any request.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, WeatherError> {
        let client = WeatherClient::new(&config.base_url, &config.api_key)?
            .with_cache_ttl(config.cache_ttl());
        Ok(Self::new(client, config.cache_clear_threshold))
    }

    /// Snapshot of the current state for the presentation layer.
    pub fn state(&self) -> DashboardState {
        self.state.lock().clone()
    }

    /// Switch to a new city and fetch it. The city and loading flag are
    /// visible in the state before this future first suspends.
    pub async fn change_city(&self, city: &str) {
        self.dispatch(Action::ChangeCity(city.to_string()));
        self.run_fetch(city.to_string()).await;
    }

    /// Re-fetch the currently selected city.
    pub async fn refetch(&self) {
        let city = self.state.lock().selected_city.clone();
        tracing::debug!(%city, "refetching");
        self.dispatch(Action::SetLoading(true));
        self.run_fetch(city).await;
    }

    /// Flip the display unit. Never triggers a fetch; stored data stays
    /// in Celsius.
    pub fn toggle_unit(&self) {
        self.dispatch(Action::ToggleUnit);
    }

    pub fn clear_error(&self) {
        self.dispatch(Action::ClearError);
    }

    /// Session-end lifecycle hook: clear the response cache if it grew
    /// past the configured threshold.
    pub fn end(&self) {
        let size = self.client.cache_size();
        if size > self.cache_clear_threshold {
            tracing::info!(size, threshold = self.cache_clear_threshold, "clearing response cache");
            self.client.clear_cache();
        }
    }

    /// Entry count of the client's response cache.
    pub fn cache_size(&self) -> usize {
        self.client.cache_size()
    }

    fn dispatch(&self, action: Action) {
        let mut state = self.state.lock();
        let next = reduce(std::mem::take(&mut *state), action);
        *state = next;
    }

    async fn run_fetch(&self, city: String) {
        let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.client.fetch_weather_and_forecast(&city).await;

        // A newer fetch opened while this one was in flight; its completion
        // owns the state now.
        if self.fetch_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(%city, generation, "discarding superseded fetch result");
            return;
        }

        match result {
            Ok((weather, forecast)) => {
                self.dispatch(Action::FetchSucceeded { weather, forecast });
            }
            Err(err) => {
                tracing::warn!(%city, error = %err, "fetch failed");
                self.dispatch(Action::FetchFailed(err.user_message()));
            }
        }
    }
}
