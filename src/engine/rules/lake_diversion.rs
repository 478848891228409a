use super::Rule;
use crate::models::{
    ControlAction, DecisionKind, Priority, Recommendation, SensorCategory, SensorSnapshot,
    WeatherContext,
};

/// Lake diversion rule - sheds excess storage into lakes while downstream
/// water levels can still absorb it.
///
/// Conditions:
/// - storage > 90% AND water level < 70%
pub struct LakeDiversionRule;

impl Rule for LakeDiversionRule {
    fn id(&self) -> &'static str {
        "lake_diversion"
    }

    fn name(&self) -> &'static str {
        "Lake Diversion"
    }

    fn evaluate(
        &self,
        snapshot: &SensorSnapshot,
        _weather: &WeatherContext,
    ) -> Option<Recommendation> {
        let storage = snapshot.average(SensorCategory::Storage);
        let water_level = snapshot.average(SensorCategory::WaterLevel);

        if storage > 90.0 && water_level < 70.0 {
            return Some(Recommendation::new(
                DecisionKind::LakeDiversion,
                Priority::Urgent,
                format!(
                    "Storage at {:.1}% capacity. Diverting excess water to lakes.",
                    storage
                ),
                ControlAction::DivertToLakes,
                0.90,
            ));
        }

        None
    }
}
