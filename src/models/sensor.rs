use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorCategory {
    Rainfall,
    WaterLevel,
    FlowRate,
    Storage,
    FlowVelocity,
    Valve,
}

impl SensorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorCategory::Rainfall => "rainfall",
            SensorCategory::WaterLevel => "water_level",
            SensorCategory::FlowRate => "flow_rate",
            SensorCategory::Storage => "storage",
            SensorCategory::FlowVelocity => "flow_velocity",
            SensorCategory::Valve => "valve",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "rainfall" => Some(SensorCategory::Rainfall),
            "water_level" => Some(SensorCategory::WaterLevel),
            "flow_rate" => Some(SensorCategory::FlowRate),
            "storage" => Some(SensorCategory::Storage),
            "flow_velocity" => Some(SensorCategory::FlowVelocity),
            "valve" => Some(SensorCategory::Valve),
            _ => None,
        }
    }

    /// Accepted value range for ingest, per category.
    pub fn valid_range(&self) -> (f64, f64) {
        match self {
            SensorCategory::Rainfall => (0.0, 100.0),
            SensorCategory::WaterLevel => (0.0, 100.0),
            SensorCategory::FlowRate => (0.0, 500.0),
            SensorCategory::Storage => (0.0, 100.0),
            SensorCategory::FlowVelocity => (0.0, 5.0),
            SensorCategory::Valve => (0.0, 1.0),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SensorCategory::Rainfall => "mm",
            SensorCategory::WaterLevel => "%",
            SensorCategory::FlowRate => "L/min",
            SensorCategory::Storage => "%",
            SensorCategory::FlowVelocity => "m/s",
            SensorCategory::Valve => "",
        }
    }
}

impl std::fmt::Display for SensorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Active,
    Inactive,
}

impl SensorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorStatus::Active => "active",
            SensorStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SensorStatus::Active),
            "inactive" => Some(SensorStatus::Inactive),
            _ => None,
        }
    }
}

/// One registered station in the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub id: Option<i64>,
    pub sensor_id: String,
    pub category: SensorCategory,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub value: f64,
    pub status: SensorStatus,
    pub updated_at: DateTime<Utc>,
}

/// One archived reading for a single sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor_id: String,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Average value and sample count for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub average: f64,
    pub samples: u64,
}

/// Point-in-time aggregate over all active sensors, grouped by category.
///
/// Built fresh per engine invocation and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub categories: BTreeMap<SensorCategory, CategoryAggregate>,
}

impl SensorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: SensorCategory, average: f64, samples: u64) {
        self.categories
            .insert(category, CategoryAggregate { average, samples });
    }

    /// Average for a category, or 0.0 when the category has no active
    /// sensors. The zero default is deliberate leniency: the engine must
    /// stay total over sparse fleets rather than erroring on missing data.
    pub fn average(&self, category: SensorCategory) -> f64 {
        self.categories
            .get(&category)
            .map(|a| a.average)
            .unwrap_or(0.0)
    }

    pub fn samples(&self, category: SensorCategory) -> u64 {
        self.categories
            .get(&category)
            .map(|a| a.samples)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
