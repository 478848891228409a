use super::health::HealthAssessment;
use super::prediction::Prediction;
use super::recommendation::{Priority, Recommendation};
use super::routing::RoutingPlan;
use super::weather::WeatherContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context payload stored with every recommendation the engine records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionParameters {
    pub priority: Priority,
    pub confidence: f64,
    pub health_score: u8,
}

/// One immutable audit row. Written once per recommendation, read back only
/// by history queries. `parameters` stays loosely typed on the read path
/// because the audit log is heterogeneous (engine rows carry
/// `DecisionParameters`, valve-control rows carry their own payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    #[serde(rename = "type")]
    pub decision_type: String,
    pub parameters: serde_json::Value,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// The aggregate report returned by one engine invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionReport {
    pub timestamp: DateTime<Utc>,
    pub health_analysis: HealthAssessment,
    pub decisions: Vec<Recommendation>,
    pub predictions: Vec<Prediction>,
    pub routing_plan: RoutingPlan,
    pub weather_context: WeatherContext,
}
