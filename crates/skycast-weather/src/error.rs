//! Weather-specific error types.

use thiserror::Error;

/// Fallback shown when a failure carries no usable message.
pub const FALLBACK_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

#[derive(Error, Debug)]
pub enum WeatherError {
    /// Blank or whitespace-only city; rejected before any network call.
    #[error("City name cannot be empty")]
    EmptyCity,

    /// API key missing at client construction. Fatal, not per-request.
    #[error("Weather API key is not configured")]
    MissingApiKey,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// HTTP 401.
    #[error("Invalid API key")]
    Unauthorized,

    /// HTTP 404.
    #[error("City not found")]
    CityNotFound,

    /// HTTP 429.
    #[error("Rate limited")]
    RateLimited,

    /// HTTP 500.
    #[error("Weather service unavailable")]
    ServiceUnavailable,

    /// Any other non-success status.
    #[error("API error: status {0}")]
    ApiError(u16),

    #[error("Unexpected response shape: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WeatherError {
    /// User-facing message for UI display. These strings are fixed; the
    /// presentation layer shows them verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCity => "City name cannot be empty".to_string(),
            Self::MissingApiKey => {
                "Weather API key is not configured. Please set SKYCAST_API_KEY.".to_string()
            }
            Self::InvalidBaseUrl(_) => {
                "Weather service is misconfigured. Please check the base URL.".to_string()
            }
            Self::Unauthorized => {
                "Invalid API key. Please check your OpenWeatherMap API key configuration."
                    .to_string()
            }
            Self::CityNotFound => {
                "City not found. Please check the city name and try again.".to_string()
            }
            Self::RateLimited => {
                "API rate limit exceeded. Please try again in a few minutes.".to_string()
            }
            Self::ServiceUnavailable => {
                "Weather service is temporarily unavailable. Please try again later.".to_string()
            }
            Self::ApiError(status) => {
                format!("Weather service error ({status}). Please try again.")
            }
            Self::InvalidResponse(_) => FALLBACK_MESSAGE.to_string(),
            Self::Network(_) => "Network error occurred while fetching weather data".to_string(),
        }
    }

    /// Map a non-success HTTP status to its error variant.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::CityNotFound,
            429 => Self::RateLimited,
            500 => Self::ServiceUnavailable,
            other => Self::ApiError(other),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(WeatherError::from_status(401), WeatherError::Unauthorized));
        assert!(matches!(WeatherError::from_status(404), WeatherError::CityNotFound));
        assert!(matches!(WeatherError::from_status(429), WeatherError::RateLimited));
        assert!(matches!(WeatherError::from_status(500), WeatherError::ServiceUnavailable));
        assert!(matches!(WeatherError::from_status(418), WeatherError::ApiError(418)));
    }

    #[test]
    fn user_messages_match_the_fixed_table() {
        assert_eq!(
            WeatherError::Unauthorized.user_message(),
            "Invalid API key. Please check your OpenWeatherMap API key configuration."
        );
        assert_eq!(
            WeatherError::CityNotFound.user_message(),
            "City not found. Please check the city name and try again."
        );
        assert_eq!(
            WeatherError::RateLimited.user_message(),
            "API rate limit exceeded. Please try again in a few minutes."
        );
        assert_eq!(
            WeatherError::ServiceUnavailable.user_message(),
            "Weather service is temporarily unavailable. Please try again later."
        );
        assert_eq!(
            WeatherError::ApiError(503).user_message(),
            "Weather service error (503). Please try again."
        );
    }

    #[test]
    fn opaque_failures_use_the_fallback_text() {
        let err = WeatherError::InvalidResponse("truncated body".to_string());
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }
}
