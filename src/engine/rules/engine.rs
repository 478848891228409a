use super::{
    flow_optimization::FlowOptimizationRule, lake_diversion::LakeDiversionRule,
    overflow_pump::OverflowPumpRule, preventive_drainage::PreventiveDrainageRule,
    recharge_wells::RechargeWellsRule, Rule,
};
use crate::models::{
    ControlAction, DecisionKind, Priority, Recommendation, SensorSnapshot, WeatherContext,
};

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        // Evaluation order is part of the contract: recommendations come
        // out in this order, and all matching rules fire.
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(RechargeWellsRule),
            Box::new(LakeDiversionRule),
            Box::new(OverflowPumpRule),
            Box::new(FlowOptimizationRule),
            Box::new(PreventiveDrainageRule),
        ];

        Self { rules }
    }

    /// Evaluate every rule against the snapshot and weather context. Never
    /// returns an empty set: when nothing fires, the normal-operation
    /// recommendation stands in.
    pub fn evaluate(
        &self,
        snapshot: &SensorSnapshot,
        weather: &WeatherContext,
    ) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(snapshot, weather))
            .collect();

        if recommendations.is_empty() {
            recommendations.push(Recommendation::new(
                DecisionKind::NormalOperation,
                Priority::Low,
                "All systems operating within normal parameters. Continue monitoring.",
                ControlAction::Monitor,
                0.95,
            ));
        }

        recommendations
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}
