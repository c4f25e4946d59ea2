//! Weather client for Skycast.
//!
//! Fetches current conditions and the 5-day forecast from OpenWeatherMap,
//! normalizes provider payloads into the domain model, and caches raw
//! responses with a short TTL to collapse duplicate requests.

pub mod cache;
pub mod client;
pub mod error;
pub mod types;
pub mod units;

pub use cache::ResponseCache;
pub use client::WeatherClient;
pub use error::WeatherError;
pub use types::{ForecastDay, TemperatureRange, WeatherSnapshot};
pub use units::{convert, TemperatureUnit};
