use crate::models::{Prediction, PredictionMetric, SensorCategory, SensorSnapshot, Trend};

/// One-step-ahead projections for water level and storage. The two checks
/// are independent; either, both, or neither may produce an entry.
pub fn project(snapshot: &SensorSnapshot) -> Vec<Prediction> {
    let mut predictions = Vec::new();

    let rainfall = snapshot.average(SensorCategory::Rainfall);
    let water_level = snapshot.average(SensorCategory::WaterLevel);
    if rainfall > 10.0 {
        predictions.push(Prediction {
            metric: PredictionMetric::WaterLevel,
            current: water_level,
            predicted_next: (water_level + rainfall * 2.0).min(100.0),
            trend: Trend::Increasing,
            confidence: 0.8,
        });
    }

    let storage = snapshot.average(SensorCategory::Storage);
    if storage > 70.0 {
        predictions.push(Prediction {
            metric: PredictionMetric::Storage,
            current: storage,
            predicted_next: (storage + 5.0).min(100.0),
            trend: Trend::Increasing,
            confidence: 0.7,
        });
    }

    predictions
}
