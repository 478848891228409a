use crate::models::{RoutingPlan, SensorCategory, SensorSnapshot};

// Placeholder depth-to-volume conversion; flagged for calibration, not a
// physical model.
const LITERS_PER_MM: f64 = 10.0;

/// Split the available volume (rainfall depth converted to liters) across
/// the four destinations using storage-tier weights. Weights per tier sum
/// to 1.0, so the plan never allocates more than is available.
pub fn allocate(snapshot: &SensorSnapshot) -> RoutingPlan {
    let available = snapshot.average(SensorCategory::Rainfall) * LITERS_PER_MM;
    let storage = snapshot.average(SensorCategory::Storage);

    if storage < 60.0 {
        RoutingPlan {
            storage_tanks: available * 0.6,
            recharge_wells: available * 0.4,
            ..RoutingPlan::default()
        }
    } else if storage < 80.0 {
        RoutingPlan {
            storage_tanks: available * 0.3,
            recharge_wells: available * 0.4,
            lakes: available * 0.3,
            ..RoutingPlan::default()
        }
    } else {
        RoutingPlan {
            recharge_wells: available * 0.3,
            lakes: available * 0.4,
            overflow_systems: available * 0.3,
            ..RoutingPlan::default()
        }
    }
}
