//! Configuration errors for the dashboard core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The API key is absent. Fatal at startup; no request is attempted.
    #[error("SKYCAST_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}
