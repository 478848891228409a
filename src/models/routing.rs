use serde::{Deserialize, Serialize};

/// Proportional allocation of the available water volume across the four
/// routing destinations, in liters. Every field is always populated; a
/// destination that receives nothing carries 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingPlan {
    pub recharge_wells: f64,
    pub lakes: f64,
    pub storage_tanks: f64,
    pub overflow_systems: f64,
}

impl RoutingPlan {
    pub fn total(&self) -> f64 {
        self.recharge_wells + self.lakes + self.storage_tanks + self.overflow_systems
    }
}
