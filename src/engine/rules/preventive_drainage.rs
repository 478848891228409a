use super::Rule;
use crate::models::{
    ControlAction, DecisionKind, Priority, Recommendation, SensorCategory, SensorSnapshot,
    WeatherContext,
};

/// Preventive drainage rule - the only weather-driven rule: frees up
/// capacity ahead of likely rain when storage is already past half.
///
/// Conditions:
/// - rain probability > 0.7 AND storage > 60%
pub struct PreventiveDrainageRule;

impl Rule for PreventiveDrainageRule {
    fn id(&self) -> &'static str {
        "preventive_drainage"
    }

    fn name(&self) -> &'static str {
        "Preventive Drainage"
    }

    fn evaluate(
        &self,
        snapshot: &SensorSnapshot,
        weather: &WeatherContext,
    ) -> Option<Recommendation> {
        let storage = snapshot.average(SensorCategory::Storage);

        if weather.rain_probability > 0.7 && storage > 60.0 {
            return Some(Recommendation::new(
                DecisionKind::PreventiveDrainage,
                Priority::Medium,
                format!(
                    "High rain probability ({:.0}%). Preparing drainage systems.",
                    weather.rain_probability * 100.0
                ),
                ControlAction::PrepareDrainage,
                0.70,
            ));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rules::testutil::{fixture_weather, snapshot};

    #[test]
    fn fires_on_likely_rain_with_loaded_storage() {
        let s = snapshot(&[(SensorCategory::Storage, 65.0)]);
        let rec = PreventiveDrainageRule
            .evaluate(&s, &fixture_weather(0.8))
            .unwrap();
        assert_eq!(rec.priority, Priority::Medium);
        assert!(rec.message.contains("80%"));
    }

    #[test]
    fn holds_when_rain_is_unlikely() {
        let s = snapshot(&[(SensorCategory::Storage, 65.0)]);
        assert!(PreventiveDrainageRule
            .evaluate(&s, &fixture_weather(0.7))
            .is_none());
    }

    #[test]
    fn holds_when_storage_is_light() {
        let s = snapshot(&[(SensorCategory::Storage, 60.0)]);
        assert!(PreventiveDrainageRule
            .evaluate(&s, &fixture_weather(0.9))
            .is_none());
    }
}
