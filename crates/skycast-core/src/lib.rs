//! Fetch orchestration core for the Skycast dashboard.
//!
//! Owns the single application state, the reducer that transitions it, and
//! the session orchestrator that drives the weather client.

pub mod config;
pub mod debounce;
pub mod error;
pub mod session;
pub mod state;

pub use config::DashboardConfig;
pub use error::ConfigError;
pub use session::WeatherSession;
pub use state::{reduce, Action, DashboardState};

use anyhow::Result;

/// Initialize logging for the application.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Skycast core initialized");
    Ok(())
}
