use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
            Priority::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tag identifying which control decision a recommendation represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    RechargeWells,
    LakeDiversion,
    OverflowPump,
    FlowOptimization,
    PreventiveDrainage,
    NormalOperation,
    ValveControl,
}

impl DecisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::RechargeWells => "recharge_wells",
            DecisionKind::LakeDiversion => "lake_diversion",
            DecisionKind::OverflowPump => "overflow_pump",
            DecisionKind::FlowOptimization => "flow_optimization",
            DecisionKind::PreventiveDrainage => "preventive_drainage",
            DecisionKind::NormalOperation => "normal_operation",
            DecisionKind::ValveControl => "valve_control",
        }
    }

}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Symbolic action identifier emitted with a recommendation. Downstream
/// systems map these to actuators; the engine itself only logs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    ActivateRechargeWells,
    DivertToLakes,
    ActivateOverflowPumps,
    OptimizeFlow,
    PrepareDrainage,
    Monitor,
}

impl ControlAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::ActivateRechargeWells => "activate_recharge_wells",
            ControlAction::DivertToLakes => "divert_to_lakes",
            ControlAction::ActivateOverflowPumps => "activate_overflow_pumps",
            ControlAction::OptimizeFlow => "optimize_flow",
            ControlAction::PrepareDrainage => "prepare_drainage",
            ControlAction::Monitor => "monitor",
        }
    }
}

impl std::fmt::Display for ControlAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One prioritized control suggestion. Priorities are informational labels;
/// a recommendation is never suppressed once its condition holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: DecisionKind,
    pub priority: Priority,
    pub message: String,
    pub action: ControlAction,
    /// 0.0-1.0
    pub confidence: f64,
}

impl Recommendation {
    pub fn new(
        kind: DecisionKind,
        priority: Priority,
        message: impl Into<String>,
        action: ControlAction,
        confidence: f64,
    ) -> Self {
        Self {
            kind,
            priority,
            message: message.into(),
            action,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Urgent);
        assert!(Priority::Urgent < Priority::Critical);
    }

    #[test]
    fn decision_kind_serializes_as_its_tag() {
        for kind in [
            DecisionKind::RechargeWells,
            DecisionKind::LakeDiversion,
            DecisionKind::OverflowPump,
            DecisionKind::FlowOptimization,
            DecisionKind::PreventiveDrainage,
            DecisionKind::NormalOperation,
            DecisionKind::ValveControl,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }
}
