use super::Rule;
use crate::models::{
    ControlAction, DecisionKind, Priority, Recommendation, SensorCategory, SensorSnapshot,
    WeatherContext,
};

/// Rainwater harvesting rule - routes rainfall into recharge wells while
/// storage still has headroom.
///
/// Conditions:
/// - rainfall > 5mm AND storage < 80%
pub struct RechargeWellsRule;

impl Rule for RechargeWellsRule {
    fn id(&self) -> &'static str {
        "recharge_wells"
    }

    fn name(&self) -> &'static str {
        "Rainwater Harvesting"
    }

    fn evaluate(
        &self,
        snapshot: &SensorSnapshot,
        _weather: &WeatherContext,
    ) -> Option<Recommendation> {
        let rainfall = snapshot.average(SensorCategory::Rainfall);
        let storage = snapshot.average(SensorCategory::Storage);

        if rainfall > 5.0 && storage < 80.0 {
            return Some(Recommendation::new(
                DecisionKind::RechargeWells,
                Priority::High,
                format!(
                    "Rainfall of {:.1}mm detected. Directing water to recharge wells \
                     to maximize groundwater recharge.",
                    rainfall
                ),
                ControlAction::ActivateRechargeWells,
                0.85,
            ));
        }

        None
    }
}
