use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMetric {
    WaterLevel,
    Storage,
}

impl PredictionMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionMetric::WaterLevel => "water_level",
            PredictionMetric::Storage => "storage",
        }
    }
}

impl std::fmt::Display for PredictionMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    // No current projection rule emits Decreasing; the variant closes the
    // tag set for consumers.
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One-step-ahead projection for a single metric. Transient, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub metric: PredictionMetric,
    pub current: f64,
    pub predicted_next: f64,
    pub trend: Trend,
    pub confidence: f64,
}
