use super::Rule;
use crate::models::{
    ControlAction, DecisionKind, Priority, Recommendation, SensorCategory, SensorSnapshot,
    WeatherContext,
};

/// Overflow management rule - last line of defense when either water level
/// or storage crosses its critical threshold.
///
/// Conditions:
/// - water level > 85% OR storage > 95%
pub struct OverflowPumpRule;

impl Rule for OverflowPumpRule {
    fn id(&self) -> &'static str {
        "overflow_pump"
    }

    fn name(&self) -> &'static str {
        "Overflow Management"
    }

    fn evaluate(
        &self,
        snapshot: &SensorSnapshot,
        _weather: &WeatherContext,
    ) -> Option<Recommendation> {
        let water_level = snapshot.average(SensorCategory::WaterLevel);
        let storage = snapshot.average(SensorCategory::Storage);

        if water_level > 85.0 || storage > 95.0 {
            return Some(Recommendation::new(
                DecisionKind::OverflowPump,
                Priority::Critical,
                format!(
                    "Critical levels detected (Water: {:.1}%, Storage: {:.1}%). \
                     Activating overflow pumps.",
                    water_level, storage
                ),
                ControlAction::ActivateOverflowPumps,
                0.95,
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
    fn fires_on_critical_water_level_alone() {
        let s = snapshot(&[
            (SensorCategory::WaterLevel, 86.0),
            (SensorCategory::Storage, 50.0),
        ]);
        let rec = OverflowPumpRule.evaluate(&s, &fixture_weather(0.1)).unwrap();
        assert_eq!(rec.priority, Priority::Critical);
        assert!(rec.message.contains("86.0%"));
        assert!(rec.message.contains("50.0%"));
    }

    #[test]
    fn fires_on_critical_storage_alone() {
        let s = snapshot(&[
            (SensorCategory::WaterLevel, 40.0),
            (SensorCategory::Storage, 96.0),
        ]);
        assert!(OverflowPumpRule.evaluate(&s, &fixture_weather(0.1)).is_some());
    }

    #[test]
    fn holds_at_exact_thresholds() {
        let s = snapshot(&[
            (SensorCategory::WaterLevel, 85.0),
            (SensorCategory::Storage, 95.0),
        ]);
        assert!(OverflowPumpRule.evaluate(&s, &fixture_weather(0.1)).is_none());
    }
}
