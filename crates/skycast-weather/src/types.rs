//! Domain model and provider payload normalization.
//!
//! Raw OpenWeatherMap payloads (Kelvin temperatures, epoch-second
//! timestamps) are deserialized into `Api*` types and normalized into the
//! Celsius-canonical domain model consumed by the dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kelvin offset used when normalizing provider temperatures.
const KELVIN_OFFSET: f64 = 273.15;

/// Defaults applied when the provider omits the weather condition array.
const DEFAULT_DESCRIPTION: &str = "Unknown";
const DEFAULT_ICON: &str = "01d";

/// Maximum number of forecast days kept after grouping.
pub const FORECAST_DAYS: usize = 5;

/// Current conditions for one city. Temperature is stored in Celsius;
/// unit conversion happens at display time only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature_c: f64,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub pressure: f64,
    /// Visibility distance in meters.
    pub visibility: u32,
    /// Opaque icon code keying into the presentation icon set.
    pub icon: String,
    pub timestamp: DateTime<Utc>,
}

/// Min/max/avg aggregate for one forecast day, in Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// One aggregated day of forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temperature: TemperatureRange,
    pub description: String,
    pub icon: String,
    /// Rounded mean humidity across the day's samples.
    pub humidity: u8,
}

// --- Raw provider payloads -------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCurrentResponse {
    pub name: String,
    pub main: ApiMain,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
    pub wind: ApiWind,
    #[serde(default)]
    pub visibility: u32,
    /// Capture time, epoch seconds.
    pub dt: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMain {
    /// Temperature in Kelvin.
    pub temp: f64,
    pub humidity: u8,
    #[serde(default)]
    pub pressure: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiForecastResponse {
    pub list: Vec<ApiForecastSample>,
}

/// One 3-hourly forecast sample.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiForecastSample {
    pub dt: i64,
    pub main: ApiMain,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
}

// --- Normalization ---------------------------------------------------------

fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// UTC calendar date for an epoch-second timestamp. Invalid timestamps
/// collapse to the epoch date rather than failing the whole forecast.
fn date_of(epoch_secs: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(epoch_secs, 0)
        .unwrap_or_default()
        .date_naive()
}

fn condition_or_default(conditions: &[ApiCondition]) -> (String, String) {
    match conditions.first() {
        Some(c) => (c.description.clone(), c.icon.clone()),
        None => (DEFAULT_DESCRIPTION.to_string(), DEFAULT_ICON.to_string()),
    }
}

impl WeatherSnapshot {
    /// Normalize a raw current-conditions payload.
    pub fn from_api(raw: ApiCurrentResponse) -> Self {
        let (description, icon) = condition_or_default(&raw.weather);
        Self {
            city: raw.name,
            temperature_c: kelvin_to_celsius(raw.main.temp),
            description,
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
            pressure: raw.main.pressure,
            visibility: raw.visibility,
            icon,
            timestamp: DateTime::<Utc>::from_timestamp(raw.dt, 0).unwrap_or_default(),
        }
    }
}

/// Aggregate 3-hourly forecast samples into daily entries.
///
/// Samples are grouped by UTC calendar date in first-encountered order and
/// only the first [`FORECAST_DAYS`] groups are kept. Each day carries the
/// min/max/avg of its samples' temperatures, the first sample's
/// description/icon, and the rounded mean humidity.
pub fn daily_forecast(samples: Vec<ApiForecastSample>) -> Vec<ForecastDay> {
    let mut groups: Vec<(NaiveDate, Vec<ApiForecastSample>)> = Vec::new();

    for sample in samples {
        let date = date_of(sample.dt);
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, bucket)) => bucket.push(sample),
            None => groups.push((date, vec![sample])),
        }
    }

    groups
        .into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, bucket)| {
            let temps: Vec<f64> = bucket.iter().map(|s| kelvin_to_celsius(s.main.temp)).collect();
            let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
            let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let avg = temps.iter().sum::<f64>() / temps.len() as f64;
            let humidity_sum: u32 = bucket.iter().map(|s| u32::from(s.main.humidity)).sum();
            let humidity = (humidity_sum as f64 / bucket.len() as f64).round() as u8;
            let (description, icon) = condition_or_default(&bucket[0].weather);

            ForecastDay {
                date,
                temperature: TemperatureRange { min, max, avg },
                description,
                icon,
                humidity,
            }
        })
        .collect()
}
