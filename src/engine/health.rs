use crate::models::{HealthAssessment, SensorCategory, SensorSnapshot};

/// Score the network: start at 100 and apply at most one penalty per
/// metric, highest matching threshold first, in fixed evaluation order.
/// Total over every snapshot; missing categories read as 0.
pub fn analyze(snapshot: &SensorSnapshot) -> HealthAssessment {
    let mut penalty: u32 = 0;
    let mut issues = Vec::new();

    let rainfall = snapshot.average(SensorCategory::Rainfall);
    if rainfall > 20.0 {
        penalty += 20;
        issues.push("Heavy rainfall detected - risk of flooding".to_string());
    } else if rainfall > 10.0 {
        penalty += 10;
        issues.push("Moderate rainfall - monitor water levels".to_string());
    }

    let water_level = snapshot.average(SensorCategory::WaterLevel);
    if water_level > 85.0 {
        penalty += 25;
        issues.push("Critical water levels - immediate action required".to_string());
    } else if water_level > 70.0 {
        penalty += 15;
        issues.push("High water levels - prepare for overflow".to_string());
    }

    let storage = snapshot.average(SensorCategory::Storage);
    if storage > 95.0 {
        penalty += 30;
        issues.push("Storage tanks at critical capacity".to_string());
    } else if storage > 80.0 {
        penalty += 10;
        issues.push("Storage tanks nearing capacity".to_string());
    }

    let flow_rate = snapshot.average(SensorCategory::FlowRate);
    if flow_rate > 200.0 {
        penalty += 15;
        issues.push("High flow rates - system stress".to_string());
    } else if flow_rate < 50.0 {
        penalty += 10;
        issues.push("Low flow rates - potential blockage".to_string());
    }

    let score = 100u32.saturating_sub(penalty) as u8;
    HealthAssessment::new(score, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthStatus;

    fn snapshot(entries: &[(SensorCategory, f64)]) -> SensorSnapshot {
        let mut s = SensorSnapshot::new();
        for (category, average) in entries {
            s.insert(*category, *average, 1);
        }
        s
    }

    #[test]
    fn heavy_rainfall_alone_scores_eighty() {
        let assessment = analyze(&snapshot(&[
            (SensorCategory::Rainfall, 25.0),
            (SensorCategory::WaterLevel, 60.0),
            (SensorCategory::Storage, 50.0),
            (SensorCategory::FlowRate, 100.0),
        ]));

        assert_eq!(assessment.health_score, 80);
        assert_eq!(assessment.status, HealthStatus::Healthy);
        assert_eq!(assessment.issues.len(), 1);
        assert!(assessment.issues[0].contains("Heavy rainfall"));
    }

    #[test]
    fn critical_water_and_storage_score_fifty_five() {
        let assessment = analyze(&snapshot(&[
            (SensorCategory::Rainfall, 0.0),
            (SensorCategory::WaterLevel, 90.0),
            (SensorCategory::Storage, 96.0),
            (SensorCategory::FlowRate, 100.0),
        ]));

        assert_eq!(assessment.health_score, 55);
        assert_eq!(assessment.status, HealthStatus::Warning);
        assert_eq!(assessment.issues.len(), 2);
    }

    #[test]
    fn highest_matching_threshold_wins_per_metric() {
        // 25mm is over both rainfall thresholds; only the -20 applies
        let assessment = analyze(&snapshot(&[
            (SensorCategory::Rainfall, 25.0),
            (SensorCategory::FlowRate, 100.0),
        ]));
        assert_eq!(assessment.health_score, 80);
    }

    #[test]
    fn empty_snapshot_penalizes_only_low_flow() {
        // All categories default to 0; flow_rate 0 < 50 triggers the
        // blockage penalty, nothing else fires
        let assessment = analyze(&SensorSnapshot::new());
        assert_eq!(assessment.health_score, 90);
        assert_eq!(assessment.issues.len(), 1);
        assert!(assessment.issues[0].contains("Low flow"));
    }

    #[test]
    fn score_never_leaves_bounds() {
        let assessment = analyze(&snapshot(&[
            (SensorCategory::Rainfall, 99.0),
            (SensorCategory::WaterLevel, 99.0),
            (SensorCategory::Storage, 99.0),
            (SensorCategory::FlowRate, 300.0),
        ]));
        assert!(assessment.health_score <= 100);
        assert_eq!(assessment.health_score, 10);
        assert_eq!(assessment.status, HealthStatus::Critical);
    }

    #[test]
    fn issues_preserve_evaluation_order() {
        let assessment = analyze(&snapshot(&[
            (SensorCategory::Rainfall, 15.0),
            (SensorCategory::WaterLevel, 75.0),
            (SensorCategory::Storage, 85.0),
            (SensorCategory::FlowRate, 250.0),
        ]));
        assert_eq!(assessment.issues.len(), 4);
        assert!(assessment.issues[0].contains("rainfall"));
        assert!(assessment.issues[1].contains("water levels"));
        assert!(assessment.issues[2].contains("Storage"));
        assert!(assessment.issues[3].contains("flow"));
    }

    #[test]
    fn analysis_is_deterministic() {
        let s = snapshot(&[
            (SensorCategory::Rainfall, 12.0),
            (SensorCategory::FlowRate, 60.0),
        ]);
        let a = analyze(&s);
        let b = analyze(&s);
        assert_eq!(a.health_score, b.health_score);
        assert_eq!(a.issues, b.issues);
    }
}
