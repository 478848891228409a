use super::Rule;
use crate::models::{
    ControlAction, DecisionKind, Priority, Recommendation, SensorCategory, SensorSnapshot,
    WeatherContext,
};

/// Flow optimization rule - rebalances drainage before sustained high flow
/// stresses the pipe network.
///
/// Conditions:
/// - flow rate > 180 L/min
pub struct FlowOptimizationRule;

impl Rule for FlowOptimizationRule {
    fn id(&self) -> &'static str {
        "flow_optimization"
    }

    fn name(&self) -> &'static str {
        "Flow Optimization"
    }

    fn evaluate(
        &self,
        snapshot: &SensorSnapshot,
        _weather: &WeatherContext,
    ) -> Option<Recommendation> {
        let flow_rate = snapshot.average(SensorCategory::FlowRate);

        if flow_rate > 180.0 {
            return Some(Recommendation::new(
                DecisionKind::FlowOptimization,
                Priority::Medium,
                format!(
                    "High flow rate of {:.1} L/min detected. Optimizing drainage \
                     to prevent system stress.",
                    flow_rate
                ),
                ControlAction::OptimizeFlow,
                0.75,
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
    fn fires_above_threshold() {
        let s = snapshot(&[(SensorCategory::FlowRate, 195.5)]);
        let rec = FlowOptimizationRule
            .evaluate(&s, &fixture_weather(0.1))
            .unwrap();
        assert_eq!(rec.priority, Priority::Medium);
        assert!(rec.message.contains("195.5 L/min"));
    }

    #[test]
    fn holds_at_threshold() {
        let s = snapshot(&[(SensorCategory::FlowRate, 180.0)]);
        assert!(FlowOptimizationRule
            .evaluate(&s, &fixture_weather(0.1))
            .is_none());
    }
}
