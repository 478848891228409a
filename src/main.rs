mod cli;
mod config;
mod db;
mod engine;
mod error;
mod fleet;
mod models;
mod weather;

use clap::Parser;
use cli::{Cli, Commands, ValveState};
use config::Config;
use db::Database;
use engine::DecisionEngine;
use error::{AquaOpsError, Result};
use models::{DecisionReport, Sensor, SensorCategory, SensorStatus};
use tracing_subscriber::EnvFilter;
use weather::{SeasonalWeather, WeatherProvider};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // No subcommand runs the engine once
    let command = cli.command.unwrap_or(Commands::Decide { json: false });

    if matches!(command, Commands::Init) {
        Config::setup_interactive()?;
        return Ok(());
    }

    // Config only supplies defaults; a missing file is not fatal outside init
    let config = if Config::exists(cli.config.as_ref()) {
        Config::load(cli.config.clone())?
    } else {
        Config::default()
    };

    let db = Database::open(&Config::db_path(cli.data_dir.as_ref())?)?;

    match command {
        Commands::Init => unreachable!("handled above"),
        Commands::Check => check(&config, &db),
        Commands::Seed => seed(&db),
        Commands::Sensors => sensors(&db),
        Commands::Ingest {
            sensor_id,
            category,
            location,
            value,
            latitude,
            longitude,
        } => ingest(&db, &sensor_id, &category, location, value, latitude, longitude),
        Commands::Decide { json } => decide(&db, json),
        Commands::Monitor { interval } => {
            let secs = interval.unwrap_or(config.engine.monitor_interval_secs);
            monitor(&db, secs).await
        }
        Commands::History { hours } => {
            history(&db, hours.unwrap_or(config.engine.history_window_hours))
        }
        Commands::SensorHistory { sensor_id, hours } => sensor_history(&db, &sensor_id, hours),
        Commands::SetValve { sensor_id, state } => set_valve(&db, &sensor_id, state),
        Commands::Outlook { days } => outlook(days),
    }
}

fn check(config: &Config, db: &Database) -> Result<()> {
    println!("Network: {}", config.network.name);
    if let Some(region) = &config.network.region {
        println!("Region:  {}", region);
    }
    println!("Store:   {}", db.path().display());

    let sensors = db.list_sensors()?;
    let active = sensors
        .iter()
        .filter(|s| s.status == SensorStatus::Active)
        .count();
    println!("Sensors: {} registered, {} active", sensors.len(), active);

    let snapshot = db.current_snapshot()?;
    for category in snapshot.categories.keys() {
        println!(
            "  {:<14} avg {:>7.1} {:<6} ({} sensors)",
            category.as_str(),
            snapshot.average(*category),
            category.unit(),
            snapshot.samples(*category)
        );
    }

    let rules = engine::RulesEngine::new();
    let rule_ids: Vec<&str> = rules.list_rules().iter().map(|(id, _)| *id).collect();
    println!("Rules:   {}", rule_ids.join(", "));

    let weather = SeasonalWeather::new().current_context();
    println!(
        "Weather: {} season, rain probability {:.0}%, {:.1}°C, {:.0}% humidity",
        weather.season,
        weather.rain_probability * 100.0,
        weather.temperature_c,
        weather.humidity_percent
    );

    Ok(())
}

fn seed(db: &Database) -> Result<()> {
    let fleet = fleet::default_fleet();
    for sensor in &fleet {
        db.upsert_sensor(sensor)?;
        db.append_sensor_history(&sensor.sensor_id, sensor.value)?;
    }
    println!("Registered {} sensors", fleet.len());
    Ok(())
}

fn sensors(db: &Database) -> Result<()> {
    let sensors = db.list_sensors()?;
    if sensors.is_empty() {
        println!("No sensors registered. Run `aquaops seed` or `aquaops ingest`.");
        return Ok(());
    }

    for s in sensors {
        println!(
            "{:<14} {:<14} {:<24} {:>8.1} {:<6} {}",
            s.sensor_id,
            s.category.as_str(),
            s.location,
            s.value,
            s.category.unit(),
            s.status.as_str()
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn ingest(
    db: &Database,
    sensor_id: &str,
    category: &str,
    location: Option<String>,
    value: f64,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<()> {
    let category = SensorCategory::from_str(category)
        .ok_or_else(|| AquaOpsError::InvalidData(format!("Unknown category '{}'", category)))?;

    let (min, max) = category.valid_range();
    if !(min..=max).contains(&value) {
        return Err(AquaOpsError::InvalidData(format!(
            "Value {} out of range {}-{} for {}",
            value, min, max, category
        )));
    }

    let existing = db.get_sensor(sensor_id)?;
    let location = match (location, &existing) {
        (Some(l), _) => l,
        (None, Some(sensor)) => sensor.location.clone(),
        (None, None) => {
            return Err(AquaOpsError::InvalidData(format!(
                "Sensor '{}' is not registered; --location is required for new sensors",
                sensor_id
            )))
        }
    };

    db.upsert_sensor(&Sensor {
        id: None,
        sensor_id: sensor_id.to_string(),
        category,
        location,
        latitude: latitude.or(existing.as_ref().and_then(|s| s.latitude)),
        longitude: longitude.or(existing.as_ref().and_then(|s| s.longitude)),
        value,
        status: SensorStatus::Active,
        updated_at: chrono::Utc::now(),
    })?;
    db.append_sensor_history(sensor_id, value)?;

    println!("Recorded {} = {} {}", sensor_id, value, category.unit());
    Ok(())
}

fn decide(db: &Database, json: bool) -> Result<()> {
    let engine = DecisionEngine::new(db.clone(), Box::new(SeasonalWeather::new()));
    let outcome = engine.decide_with_fallback();

    if json {
        println!("{}", serde_json::to_string_pretty(outcome.report())?);
    } else {
        print_report(outcome.report(), outcome.is_degraded());
    }
    Ok(())
}

fn print_report(report: &DecisionReport, degraded: bool) {
    println!(
        "Decision report - {}{}",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        if degraded { " (degraded)" } else { "" }
    );

    let health = &report.health_analysis;
    println!("Health:  {}/100 ({})", health.health_score, health.status);
    for issue in &health.issues {
        println!("  ! {}", issue);
    }

    let weather = &report.weather_context;
    println!(
        "Weather: {} season, rain probability {:.0}%, {:.1}°C, {:.0}% humidity",
        weather.season,
        weather.rain_probability * 100.0,
        weather.temperature_c,
        weather.humidity_percent
    );

    println!("Decisions:");
    for rec in &report.decisions {
        println!(
            "  [{:<8}] {} ({:.0}% confidence)",
            rec.priority.as_str(),
            rec.message,
            rec.confidence * 100.0
        );
        println!("             action: {}", rec.action);
    }

    if !report.predictions.is_empty() {
        println!("Predictions:");
        for p in &report.predictions {
            println!(
                "  {}: {:.1} -> {:.1} ({}, {:.0}% confidence)",
                p.metric,
                p.current,
                p.predicted_next,
                p.trend,
                p.confidence * 100.0
            );
        }
    }

    let plan = &report.routing_plan;
    println!("Routing plan ({:.1} L available):", plan.total());
    println!(
        "  storage tanks {:.1} | recharge wells {:.1} | lakes {:.1} | overflow {:.1}",
        plan.storage_tanks, plan.recharge_wells, plan.lakes, plan.overflow_systems
    );
}

async fn monitor(db: &Database, interval_secs: u64) -> Result<()> {
    let engine = DecisionEngine::new(db.clone(), Box::new(SeasonalWeather::new()));
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));

    println!("Monitoring every {}s (Ctrl-C to stop)", interval_secs.max(1));
    loop {
        ticker.tick().await;

        let outcome = engine.decide_with_fallback();
        let report = outcome.report();
        let top = report
            .decisions
            .iter()
            .map(|r| r.priority)
            .max()
            .unwrap_or(models::Priority::Low);
        println!(
            "{} health {:>3}/100 ({}) | {} decision(s), top priority {}{}",
            report.timestamp.format("%H:%M:%S"),
            report.health_analysis.health_score,
            report.health_analysis.status,
            report.decisions.len(),
            top,
            if outcome.is_degraded() { " [degraded]" } else { "" }
        );
    }
}

fn history(db: &Database, hours: u32) -> Result<()> {
    let records = db.decision_history(hours)?;
    if records.is_empty() {
        println!("No decisions recorded in the last {} hours.", hours);
        return Ok(());
    }

    for record in records {
        println!(
            "{} {:<20} {:<26} {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.decision_type,
            record.action,
            record.parameters
        );
    }
    Ok(())
}

fn sensor_history(db: &Database, sensor_id: &str, hours: u32) -> Result<()> {
    let readings = db.sensor_history(sensor_id, hours)?;
    if readings.is_empty() {
        println!(
            "No readings for '{}' in the last {} hours.",
            sensor_id, hours
        );
        return Ok(());
    }

    for reading in readings {
        println!(
            "{} {:>10.2}",
            reading.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            reading.value
        );
    }
    Ok(())
}

fn set_valve(db: &Database, sensor_id: &str, state: ValveState) -> Result<()> {
    let sensor = db
        .get_sensor(sensor_id)?
        .ok_or_else(|| AquaOpsError::NotFound(format!("No sensor registered as '{}'", sensor_id)))?;

    if sensor.category != SensorCategory::Valve {
        return Err(AquaOpsError::InvalidData(format!(
            "Sensor '{}' is a {} sensor, not a valve",
            sensor_id, sensor.category
        )));
    }

    db.set_sensor_value(sensor_id, state.value())?;
    db.insert_decision(
        models::DecisionKind::ValveControl.as_str(),
        &serde_json::json!({ "valve_id": sensor_id, "state": state.as_str() }),
        state.as_str(),
    )?;

    println!("Valve {} is now {}", sensor_id, state.as_str());
    Ok(())
}

fn outlook(days: u32) -> Result<()> {
    for day in SeasonalWeather::new().rainfall_outlook(days) {
        println!(
            "{}  {:>5.1} mm  ({}% probability)",
            day.date, day.expected_mm, day.probability_percent
        );
    }
    Ok(())
}
