//! Application state and the reducer that transitions it.
//!
//! The reducer is a plain function over (state, action); network effects
//! live in the session orchestrator, which dispatches follow-up actions
//! when fetches complete.

use chrono::{DateTime, Utc};
use skycast_weather::{convert, ForecastDay, TemperatureUnit, WeatherSnapshot};

/// City shown before the user picks one.
pub const DEFAULT_CITY: &str = "London";

/// The single source of truth the presentation layer reads from.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Absent until the first successful fetch.
    pub current_weather: Option<WeatherSnapshot>,
    pub forecast: Vec<ForecastDay>,
    pub selected_city: String,
    pub unit: TemperatureUnit,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_fetch: Option<DateTime<Utc>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            current_weather: None,
            forecast: Vec::new(),
            selected_city: DEFAULT_CITY.to_string(),
            unit: TemperatureUnit::default(),
            is_loading: false,
            error: None,
            last_fetch: None,
        }
    }
}

impl DashboardState {
    /// Current temperature converted to the selected display unit.
    /// Conversion is display-time only; stored data stays in Celsius.
    pub fn display_temperature(&self) -> Option<f64> {
        self.current_weather
            .as_ref()
            .map(|w| convert(w.temperature_c, TemperatureUnit::Celsius, self.unit))
    }
}

/// State machine actions.
#[derive(Debug, Clone)]
pub enum Action {
    /// User picked a new city; a fetch for it is about to start.
    ChangeCity(String),
    /// Combined fetch resolved with both payloads.
    FetchSucceeded { weather: WeatherSnapshot, forecast: Vec<ForecastDay> },
    /// Combined fetch failed with a user-facing message.
    FetchFailed(String),
    ToggleUnit,
    ClearError,
    /// Opens a fetch that keeps the current city (refetch path).
    SetLoading(bool),
}

/// Apply one action to the state.
pub fn reduce(mut state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::ChangeCity(city) => {
            state.selected_city = city;
            state.is_loading = true;
            state.error = None;
        }
        Action::FetchSucceeded { weather, forecast } => {
            state.current_weather = Some(weather);
            state.forecast = forecast;
            state.is_loading = false;
            state.error = None;
            state.last_fetch = Some(Utc::now());
        }
        Action::FetchFailed(message) => {
            // Stale-but-visible data is preserved, not wiped.
            state.error = Some(message);
            state.is_loading = false;
        }
        Action::ToggleUnit => {
            state.unit = state.unit.toggle();
        }
        Action::ClearError => {
            state.error = None;
        }
        Action::SetLoading(loading) => {
            state.is_loading = loading;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::TimeZone;

    fn snapshot(city: &str, temperature_c: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            city: city.to_string(),
            temperature_c,
            description: "clear sky".to_string(),
            humidity: 55,
            wind_speed: 3.0,
            pressure: 1015.0,
            visibility: 10_000,
            icon: "01d".to_string(),
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).single().unwrap(),
        }
    }

    #[test]
    fn default_state_matches_initial_session() {
        let state = DashboardState::default();
        assert_eq!(state.selected_city, "London");
        assert_eq!(state.unit, TemperatureUnit::Celsius);
        assert!(state.current_weather.is_none());
        assert!(state.forecast.is_empty());
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(state.last_fetch.is_none());
    }

    #[test]
    fn change_city_sets_target_and_loading_and_clears_error() {
        let state = reduce(
            DashboardState { error: Some("old".to_string()), ..Default::default() },
            Action::ChangeCity("Paris".to_string()),
        );
        assert_eq!(state.selected_city, "Paris");
        assert!(state.is_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn fetch_succeeded_replaces_data_and_clears_error() {
        let start = DashboardState {
            is_loading: true,
            error: Some("stale error".to_string()),
            ..Default::default()
        };
        let state = reduce(
            start,
            Action::FetchSucceeded { weather: snapshot("London", 20.0), forecast: Vec::new() },
        );
        assert_eq!(state.current_weather.unwrap().temperature_c, 20.0);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(state.last_fetch.is_some());
    }

    #[test]
    fn fetch_failed_preserves_previous_data() {
        let start = DashboardState {
            current_weather: Some(snapshot("London", 20.0)),
            is_loading: true,
            ..Default::default()
        };
        let forecast_before = start.forecast.clone();

        let state = reduce(start, Action::FetchFailed("City not found".to_string()));
        assert_eq!(state.error.as_deref(), Some("City not found"));
        assert!(!state.is_loading);
        assert_eq!(state.current_weather.unwrap().city, "London");
        assert_eq!(state.forecast, forecast_before);
    }

    #[test]
    fn toggle_unit_flips_without_touching_anything_else() {
        let start = DashboardState {
            current_weather: Some(snapshot("London", 20.0)),
            ..Default::default()
        };
        let reference = start.clone();

        let flipped = reduce(start, Action::ToggleUnit);
        assert_eq!(flipped.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(flipped.current_weather, reference.current_weather);
        assert_eq!(flipped.selected_city, reference.selected_city);
        assert_eq!(flipped.is_loading, reference.is_loading);
        assert_eq!(flipped.error, reference.error);
        assert_eq!(flipped.last_fetch, reference.last_fetch);

        let back = reduce(flipped, Action::ToggleUnit);
        assert_eq!(back.unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn clear_error_only_clears_error() {
        let start = DashboardState {
            error: Some("boom".to_string()),
            is_loading: true,
            ..Default::default()
        };
        let state = reduce(start, Action::ClearError);
        assert!(state.error.is_none());
        assert!(state.is_loading);
    }

    #[test]
    fn set_loading_opens_a_refetch() {
        let state = reduce(DashboardState::default(), Action::SetLoading(true));
        assert!(state.is_loading);
        assert_eq!(state.selected_city, "London");
    }

    #[test]
    fn display_temperature_converts_to_selected_unit() {
        let celsius = DashboardState {
            current_weather: Some(snapshot("London", 20.0)),
            ..Default::default()
        };
        assert_eq!(celsius.display_temperature(), Some(20.0));

        let fahrenheit = reduce(celsius, Action::ToggleUnit);
        let shown = fahrenheit.display_temperature().unwrap();
        assert_eq!(shown.round(), 68.0);
    }

    #[test]
    fn display_temperature_is_none_before_first_fetch() {
        assert_eq!(DashboardState::default().display_temperature(), None);
    }
}
