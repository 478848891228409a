pub mod engine;
pub mod flow_optimization;
pub mod lake_diversion;
pub mod overflow_pump;
pub mod preventive_drainage;
pub mod recharge_wells;

pub use engine::RulesEngine;

use crate::models::{Recommendation, SensorSnapshot, WeatherContext};

#[cfg(test)]
pub(crate) mod testutil {
    use crate::models::{Season, SensorCategory, SensorSnapshot, WeatherContext};

    pub fn snapshot(entries: &[(SensorCategory, f64)]) -> SensorSnapshot {
        let mut s = SensorSnapshot::new();
        for (category, average) in entries {
            s.insert(*category, *average, 1);
        }
        s
    }

    pub fn fixture_weather(rain_probability: f64) -> WeatherContext {
        WeatherContext {
            rain_probability,
            season: Season::Summer,
            temperature_c: 28.0,
            humidity_percent: 60.0,
        }
    }
}

/// Trait for control rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a recommendation if conditions are met
    fn evaluate(
        &self,
        snapshot: &SensorSnapshot,
        weather: &WeatherContext,
    ) -> Option<Recommendation>;
}
