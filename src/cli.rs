use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aquaops", version, about = "Urban water network decision engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config, open the store, and show a status summary
    Check,
    /// Register the built-in starter fleet
    Seed,
    /// List registered sensors
    Sensors,
    /// Record one validated sensor reading
    Ingest {
        /// External sensor identifier
        #[arg(long)]
        sensor_id: String,
        /// Sensor category (rainfall, water_level, flow_rate, storage,
        /// flow_velocity, valve)
        #[arg(long)]
        category: String,
        /// Station name; required when registering a new sensor
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        value: f64,
        #[arg(long)]
        latitude: Option<f64>,
        #[arg(long)]
        longitude: Option<f64>,
    },
    /// Run the decision engine once (default when no command is given)
    Decide {
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the decision engine on an interval
    Monitor {
        /// Seconds between invocations (defaults to the configured cadence)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Show the decision audit trail
    History {
        /// Trailing window in hours (defaults to the configured window)
        #[arg(long)]
        hours: Option<u32>,
    },
    /// Show archived readings for one sensor
    SensorHistory {
        sensor_id: String,
        /// Trailing window in hours
        #[arg(long, default_value_t = 24)]
        hours: u32,
    },
    /// Open or close a valve sensor (symbolic: recorded, not actuated)
    SetValve {
        sensor_id: String,
        #[arg(long, value_enum)]
        state: ValveState,
    },
    /// Show the synthetic rainfall outlook
    Outlook {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValveState {
    Open,
    Closed,
}

impl ValveState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValveState::Open => "open",
            ValveState::Closed => "closed",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            ValveState::Open => 1.0,
            ValveState::Closed => 0.0,
        }
    }
}
