use crate::models::{Sensor, SensorCategory, SensorStatus};
use chrono::Utc;

/// Built-in starter fleet so a fresh install produces sensible aggregates
/// before any real hardware reports in. Positions are site-specific and
/// left unset here.
pub fn default_fleet() -> Vec<Sensor> {
    let stations: &[(&str, SensorCategory, &str, f64)] = &[
        ("rain_001", SensorCategory::Rainfall, "North Basin Gauge", 0.0),
        ("rain_002", SensorCategory::Rainfall, "East Ridge Gauge", 0.0),
        ("water_001", SensorCategory::WaterLevel, "Central Lake", 45.0),
        ("water_002", SensorCategory::WaterLevel, "South Lake", 82.0),
        ("flow_001", SensorCategory::FlowRate, "Main Canal Meter", 120.0),
        ("flow_002", SensorCategory::FlowRate, "Outfall Meter", 95.0),
        ("vel_001", SensorCategory::FlowVelocity, "Main Canal Probe", 0.8),
        ("storage_001", SensorCategory::Storage, "North Tank Farm", 78.0),
        ("storage_002", SensorCategory::Storage, "West Tank Farm", 65.0),
        ("valve_001", SensorCategory::Valve, "Intake Pump Station", 1.0),
        ("valve_002", SensorCategory::Valve, "Overflow Gate", 0.0),
    ];

    stations
        .iter()
        .map(|(id, category, location, value)| Sensor {
            id: None,
            sensor_id: (*id).to_string(),
            category: *category,
            location: (*location).to_string(),
            latitude: None,
            longitude: None,
            value: *value,
            status: SensorStatus::Active,
            updated_at: Utc::now(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fleet_covers_every_analyzed_category() {
        let fleet = default_fleet();
        for category in [
            SensorCategory::Rainfall,
            SensorCategory::WaterLevel,
            SensorCategory::FlowRate,
            SensorCategory::Storage,
            SensorCategory::Valve,
        ] {
            assert!(fleet.iter().any(|s| s.category == category));
        }
    }

    #[test]
    fn fleet_values_pass_ingest_validation() {
        for sensor in default_fleet() {
            let (min, max) = sensor.category.valid_range();
            assert!(sensor.value >= min && sensor.value <= max);
        }
    }

    #[test]
    fn fleet_ids_are_unique() {
        let fleet = default_fleet();
        let mut ids: Vec<_> = fleet.iter().map(|s| s.sensor_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), fleet.len());
    }
}
