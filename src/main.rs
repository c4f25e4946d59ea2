use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    skycast_core::init()?;

    let config = skycast_core::DashboardConfig::from_env()?;
    let session = skycast_core::WeatherSession::from_config(&config)?;

    tracing::info!("Skycast dashboard started");

    // Mount-triggered fetch for the default city.
    session.refetch().await;

    let state = session.state();
    if let Some(error) = &state.error {
        println!("Error: {error}");
    }

    if let Some(weather) = &state.current_weather {
        let shown = state.display_temperature().unwrap_or(weather.temperature_c);
        println!("{}: {:.1}{} - {}", weather.city, shown, state.unit.symbol(), weather.description);
        println!(
            "  humidity {}%  wind {} m/s  pressure {} hPa  visibility {} m",
            weather.humidity, weather.wind_speed, weather.pressure, weather.visibility
        );

        session.toggle_unit();
        let toggled = session.state();
        if let Some(shown) = toggled.display_temperature() {
            println!("  ({:.0}{})", shown, toggled.unit.symbol());
        }
    }

    for day in &state.forecast {
        println!(
            "{}  {:>5.1}C / {:>5.1}C  {}",
            day.date, day.temperature.min, day.temperature.max, day.description
        );
    }

    session.end();
    Ok(())
}
