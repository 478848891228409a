pub mod health;
pub mod predictor;
pub mod routing;
pub mod rules;

pub use rules::RulesEngine;

use crate::db::Database;
use crate::error::Result;
use crate::models::{
    ControlAction, DecisionKind, DecisionReport, HealthAssessment, HealthStatus, Priority,
    Recommendation, RoutingPlan,
};
use crate::weather::WeatherProvider;
use chrono::Utc;
use tracing::warn;

/// Outcome of a decision request. `Degraded` means the storage collaborator
/// was unreachable and the report is the static fallback, not a computed
/// one; nothing was persisted for it.
pub enum EngineOutcome {
    Computed(DecisionReport),
    Degraded(DecisionReport),
}

impl EngineOutcome {
    pub fn report(&self) -> &DecisionReport {
        match self {
            EngineOutcome::Computed(r) | EngineOutcome::Degraded(r) => r,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, EngineOutcome::Degraded(_))
    }
}

/// The decision pipeline: aggregate read, weather context, then four
/// mutually independent analysis stages, then the audit append.
pub struct DecisionEngine {
    db: Database,
    weather: Box<dyn WeatherProvider>,
    rules: RulesEngine,
}

impl DecisionEngine {
    pub fn new(db: Database, weather: Box<dyn WeatherProvider>) -> Self {
        Self {
            db,
            weather,
            rules: RulesEngine::new(),
        }
    }

    /// Run one full pass and persist every recommendation. Fails only when
    /// the aggregate read fails; audit write failures are isolated per
    /// record and never withhold the report.
    pub fn make_decision(&self) -> Result<DecisionReport> {
        let snapshot = self.db.current_snapshot()?;
        if snapshot.is_empty() {
            warn!("No active sensors reporting; analyzing zero defaults");
        }
        let weather_context = self.weather.current_context();

        let health_analysis = health::analyze(&snapshot);
        let decisions = self.rules.evaluate(&snapshot, &weather_context);
        let predictions = predictor::project(&snapshot);
        let routing_plan = routing::allocate(&snapshot);

        match self.db.store_decisions(&decisions, health_analysis.health_score) {
            Ok(written) if written < decisions.len() => {
                warn!(
                    written,
                    total = decisions.len(),
                    "Some decisions could not be recorded"
                );
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Decision audit unavailable: {}", e);
            }
        }

        Ok(DecisionReport {
            timestamp: Utc::now(),
            health_analysis,
            decisions,
            predictions,
            routing_plan,
            weather_context,
        })
    }

    /// Two-tier entry point for callers that must always answer: computes a
    /// report, or falls back to the static degraded report when storage is
    /// unreachable.
    pub fn decide_with_fallback(&self) -> EngineOutcome {
        match self.make_decision() {
            Ok(report) => EngineOutcome::Computed(report),
            Err(e) => {
                warn!("Decision engine unavailable, serving degraded report: {}", e);
                EngineOutcome::Degraded(self.degraded_report())
            }
        }
    }

    fn degraded_report(&self) -> DecisionReport {
        DecisionReport {
            timestamp: Utc::now(),
            health_analysis: HealthAssessment {
                health_score: 75,
                issues: vec!["Decision engine temporarily unavailable".to_string()],
                status: HealthStatus::Warning,
            },
            decisions: vec![Recommendation::new(
                DecisionKind::NormalOperation,
                Priority::Low,
                "Decision engine temporarily unavailable. Continue monitoring and retry.",
                ControlAction::Monitor,
                0.5,
            )],
            predictions: Vec::new(),
            routing_plan: RoutingPlan::default(),
            weather_context: self.weather.current_context(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Season, Sensor, SensorCategory, SensorStatus, WeatherContext};
    use crate::weather::WeatherProvider;

    struct FixedWeather(WeatherContext);

    impl WeatherProvider for FixedWeather {
        fn current_context(&self) -> WeatherContext {
            self.0.clone()
        }
    }

    fn fixed(rain_probability: f64) -> Box<FixedWeather> {
        Box::new(FixedWeather(WeatherContext {
            rain_probability,
            season: Season::Monsoon,
            temperature_c: 26.0,
            humidity_percent: 70.0,
        }))
    }

    fn seeded_db(entries: &[(&str, SensorCategory, f64)]) -> Database {
        let db = Database::open_in_memory().unwrap();
        for (id, category, value) in entries {
            db.upsert_sensor(&Sensor {
                id: None,
                sensor_id: (*id).into(),
                category: *category,
                location: "Test Station".into(),
                latitude: None,
                longitude: None,
                value: *value,
                status: SensorStatus::Active,
                updated_at: Utc::now(),
            })
            .unwrap();
        }
        db
    }

    #[test]
    fn full_pass_produces_report_and_audit_rows() {
        let db = seeded_db(&[
            ("rain_001", SensorCategory::Rainfall, 25.0),
            ("lake_001", SensorCategory::WaterLevel, 60.0),
            ("tank_001", SensorCategory::Storage, 50.0),
            ("flow_001", SensorCategory::FlowRate, 100.0),
        ]);
        let engine = DecisionEngine::new(db.clone(), fixed(0.1));

        let report = engine.make_decision().unwrap();

        assert_eq!(report.health_analysis.health_score, 80);
        assert_eq!(report.health_analysis.status, HealthStatus::Healthy);

        // Heavy rain over half-empty storage: only the recharge rule fires
        assert_eq!(report.decisions.len(), 1);
        assert_eq!(report.decisions[0].kind, DecisionKind::RechargeWells);

        // Rainfall over 10mm projects the water level; storage stays quiet
        assert_eq!(report.predictions.len(), 1);
        assert_eq!(report.predictions[0].predicted_next, 100.0);

        // 250L available, low-storage split
        assert_eq!(report.routing_plan.storage_tanks, 150.0);
        assert_eq!(report.routing_plan.recharge_wells, 100.0);

        let history = db.decision_history(1).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].decision_type, "recharge_wells");
        assert_eq!(history[0].parameters["health_score"], 80);
        assert_eq!(history[0].parameters["priority"], "high");
    }

    #[test]
    fn empty_fleet_records_normal_operation() {
        let db = seeded_db(&[]);
        let engine = DecisionEngine::new(db.clone(), fixed(0.1));

        let report = engine.make_decision().unwrap();

        assert_eq!(report.decisions.len(), 1);
        assert_eq!(report.decisions[0].kind, DecisionKind::NormalOperation);
        assert!(report.predictions.is_empty());
        assert_eq!(report.routing_plan.total(), 0.0);

        let history = db.decision_history(1).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, "monitor");
    }

    #[test]
    fn unreachable_storage_degrades_instead_of_failing() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            conn.execute("DROP TABLE sensors", [])?;
            Ok(())
        })
        .unwrap();
        let engine = DecisionEngine::new(db, fixed(0.1));

        let outcome = engine.decide_with_fallback();

        assert!(outcome.is_degraded());
        let report = outcome.report();
        assert_eq!(report.health_analysis.health_score, 75);
        assert_eq!(report.health_analysis.status, HealthStatus::Warning);
        assert_eq!(report.decisions.len(), 1);
        assert_eq!(report.decisions[0].kind, DecisionKind::NormalOperation);
        assert_eq!(report.decisions[0].confidence, 0.5);
    }

    #[test]
    fn healthy_pass_is_not_degraded() {
        let db = seeded_db(&[("flow_001", SensorCategory::FlowRate, 100.0)]);
        let engine = DecisionEngine::new(db, fixed(0.1));

        assert!(!engine.decide_with_fallback().is_degraded());
    }
}
