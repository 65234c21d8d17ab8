// AQI report binary
//
// Purpose: rate a current reading plus a model forecast read from a JSON file
// Usage: cargo run --features cli --bin aqi_report -- input.json [user_group]
//
// Input:
// {
//   "current": {"pm25": 42.0, "pm10": 80.0, "no2": 25.0},
//   "forecast": [{"offset_hours": 1, "reading": {"pm25": 45.0}}, ...]
// }

use aqi_engine::advisory::{alerts_for, recommendations, UserGroup};
use aqi_engine::{EngineConfig, ForecastPoint, PointOutcome, PollutantReading, RawReading};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Deserialize)]
struct ReportInput {
    current: RawReading,
    #[serde(default)]
    forecast: Vec<ForecastPoint>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aqi_engine=info,aqi_report=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let input_path = args
        .next()
        .context("Usage: aqi_report <input.json> [general|sensitive|elderly|children]")?;
    let group: UserGroup = args.next().unwrap_or_default().parse().unwrap_or_default();

    let config = EngineConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  breakpoints: {:?}", config.breakpoints_path);
    tracing::info!("  parallel_min_points: {}", config.parallel_min_points);

    let calculator = config.build_calculator()?;

    let contents = fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read input file: {}", input_path))?;
    let input: ReportInput =
        serde_json::from_str(&contents).with_context(|| "Failed to parse input JSON")?;

    tracing::info!("Rating current reading and {} forecast points", input.forecast.len());
    let report = calculator.build_forecast_report(&input.current, &input.forecast, config.parallel_min_points);

    let breakdown = match PollutantReading::try_from(&input.current)
        .and_then(|reading| calculator.breakdown(&reading))
    {
        Ok(entries) => serde_json::to_value(entries)?,
        Err(error) => json!({ "error": error }),
    };

    let now = Utc::now();
    let advisory = match &report.current {
        PointOutcome::Rated { aqi, .. } => json!({
            "alerts": alerts_for(*aqi, now),
            "recommendations": recommendations(*aqi, group),
        }),
        PointOutcome::Failed { .. } => serde_json::Value::Null,
    };

    let output = json!({
        "standard": calculator.table().standard(),
        "generated_at": now,
        "report": report,
        "pollutant_breakdown": breakdown,
        "advisory": advisory,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
