use crate::db::Database;
use crate::error::{AquaOpsError, Result};
use crate::models::{
    DecisionParameters, DecisionRecord, Recommendation, Sensor, SensorCategory, SensorReading,
    SensorSnapshot, SensorStatus,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::warn;

// Sensor Registry Queries

impl Database {
    pub fn upsert_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO sensors
                    (sensor_id, category, location, latitude, longitude, value, status, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(sensor_id) DO UPDATE SET
                    category = excluded.category,
                    location = excluded.location,
                    latitude = excluded.latitude,
                    longitude = excluded.longitude,
                    value = excluded.value,
                    status = excluded.status,
                    updated_at = excluded.updated_at
                "#,
                params![
                    sensor.sensor_id,
                    sensor.category.as_str(),
                    sensor.location,
                    sensor.latitude,
                    sensor.longitude,
                    sensor.value,
                    sensor.status.as_str(),
                    Utc::now().to_rfc3339(),
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_sensor(&self, sensor_id: &str) -> Result<Option<Sensor>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM sensors WHERE sensor_id = ?1",
                [sensor_id],
                row_to_sensor,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn list_sensors(&self) -> Result<Vec<Sensor>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM sensors ORDER BY sensor_id")?;
            let sensors = stmt
                .query_map([], row_to_sensor)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(sensors)
        })
    }

    pub fn set_sensor_value(&self, sensor_id: &str, value: f64) -> Result<()> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE sensors SET value = ?1, updated_at = ?2 WHERE sensor_id = ?3",
                params![value, Utc::now().to_rfc3339(), sensor_id],
            )?;
            if updated == 0 {
                return Err(AquaOpsError::NotFound(format!(
                    "No sensor registered as '{}'",
                    sensor_id
                )));
            }
            Ok(())
        })
    }

    // recorded_at is left to the column default so it stays in the same
    // format the window predicate compares against.
    pub fn append_sensor_history(&self, sensor_id: &str, value: f64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO sensor_history (sensor_id, value) VALUES (?1, ?2)",
                params![sensor_id, value],
            )?;
            Ok(())
        })
    }

    pub fn sensor_history(&self, sensor_id: &str, hours: u32) -> Result<Vec<SensorReading>> {
        let window = format!("-{} hours", hours);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT sensor_id, value, recorded_at FROM sensor_history
                WHERE sensor_id = ?1 AND recorded_at > datetime('now', ?2)
                ORDER BY recorded_at ASC, id ASC
                "#,
            )?;
            let readings = stmt
                .query_map(params![sensor_id, window], |row| {
                    let recorded_at: String = row.get("recorded_at")?;
                    Ok(SensorReading {
                        sensor_id: row.get("sensor_id")?,
                        value: row.get("value")?,
                        recorded_at: parse_db_timestamp(&recorded_at),
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();
            Ok(readings)
        })
    }
}

// Aggregate Queries

impl Database {
    /// Grouped average and sample count over active sensors. Categories with
    /// no active sensors are simply absent from the snapshot.
    pub fn current_snapshot(&self) -> Result<SensorSnapshot> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT category, AVG(value) AS avg_value, COUNT(*) AS sample_count
                FROM sensors
                WHERE status = 'active'
                GROUP BY category
                "#,
            )?;

            let mut snapshot = SensorSnapshot::new();
            let rows = stmt.query_map([], |row| {
                let category: String = row.get("category")?;
                let average: f64 = row.get("avg_value")?;
                let samples: i64 = row.get("sample_count")?;
                Ok((category, average, samples))
            })?;

            for row in rows.filter_map(|r| r.ok()) {
                let (category_str, average, samples) = row;
                match SensorCategory::from_str(&category_str) {
                    Some(category) => snapshot.insert(category, average, samples as u64),
                    None => {
                        warn!(category = %category_str, "Unknown sensor category in database, skipping");
                    }
                }
            }

            Ok(snapshot)
        })
    }
}

// Decision Audit Queries

impl Database {
    /// Append one audit row per recommendation. Each insert is atomic on its
    /// own; a failed row is logged and skipped without touching rows already
    /// written. Returns the number of rows that made it in.
    pub fn store_decisions(
        &self,
        recommendations: &[Recommendation],
        health_score: u8,
    ) -> Result<usize> {
        let mut written = 0;
        for rec in recommendations {
            let parameters = DecisionParameters {
                priority: rec.priority,
                confidence: rec.confidence,
                health_score,
            };
            let payload = serde_json::to_value(&parameters)?;
            match self.insert_decision(rec.kind.as_str(), &payload, rec.action.as_str()) {
                Ok(()) => written += 1,
                Err(e) => {
                    warn!(
                        decision = rec.kind.as_str(),
                        "Failed to record decision: {}", e
                    );
                }
            }
        }
        Ok(written)
    }

    pub fn insert_decision(
        &self,
        decision_type: &str,
        parameters: &serde_json::Value,
        action: &str,
    ) -> Result<()> {
        let payload = serde_json::to_string(parameters)?;
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO decisions (decision_type, parameters, action)
                VALUES (?1, ?2, ?3)
                "#,
                params![decision_type, payload, action],
            )?;
            Ok(())
        })
    }

    /// Audit rows within the trailing window, newest first.
    pub fn decision_history(&self, hours: u32) -> Result<Vec<DecisionRecord>> {
        let window = format!("-{} hours", hours);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT decision_type, parameters, action, created_at FROM decisions
                WHERE created_at > datetime('now', ?1)
                ORDER BY created_at DESC, id DESC
                "#,
            )?;
            let records = stmt
                .query_map([window], row_to_decision_record)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(records)
        })
    }
}

fn row_to_sensor(row: &Row) -> rusqlite::Result<Sensor> {
    let category_str: String = row.get("category")?;
    let status_str: String = row.get("status")?;
    let updated_at_str: String = row.get("updated_at")?;

    let category = SensorCategory::from_str(&category_str).unwrap_or_else(|| {
        warn!(
            category = %category_str,
            "Unknown sensor category in database, defaulting to Valve"
        );
        SensorCategory::Valve
    });
    let status = SensorStatus::from_str(&status_str).unwrap_or_else(|| {
        warn!(status = %status_str, "Unknown sensor status in database, treating as inactive");
        SensorStatus::Inactive
    });

    Ok(Sensor {
        id: Some(row.get("id")?),
        sensor_id: row.get("sensor_id")?,
        category,
        location: row.get("location")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        value: row.get("value")?,
        status,
        updated_at: parse_db_timestamp(&updated_at_str),
    })
}

fn row_to_decision_record(row: &Row) -> rusqlite::Result<DecisionRecord> {
    let parameters_str: String = row.get("parameters")?;
    let created_at_str: String = row.get("created_at")?;

    let parameters = serde_json::from_str(&parameters_str).unwrap_or_else(|e| {
        warn!("Malformed decision parameters in database: {}", e);
        serde_json::Value::Null
    });

    Ok(DecisionRecord {
        decision_type: row.get("decision_type")?,
        parameters,
        action: row.get("action")?,
        timestamp: parse_db_timestamp(&created_at_str),
    })
}

/// Rows written by this crate carry RFC 3339 timestamps; rows created via
/// SQLite column defaults carry `datetime('now')` format. Accept both.
fn parse_db_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.and_utc())
        })
        .unwrap_or_else(|_| {
            warn!(timestamp = %s, "Unparseable timestamp in database, substituting now");
            Utc::now()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ControlAction, DecisionKind, Priority};

    fn sensor(id: &str, category: SensorCategory, value: f64, status: SensorStatus) -> Sensor {
        Sensor {
            id: None,
            sensor_id: id.into(),
            category,
            location: "Test Station".into(),
            latitude: None,
            longitude: None,
            value,
            status,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn snapshot_groups_active_sensors_by_category() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_sensor(&sensor("rain_001", SensorCategory::Rainfall, 10.0, SensorStatus::Active))
            .unwrap();
        db.upsert_sensor(&sensor("rain_002", SensorCategory::Rainfall, 20.0, SensorStatus::Active))
            .unwrap();
        db.upsert_sensor(&sensor("tank_001", SensorCategory::Storage, 75.0, SensorStatus::Active))
            .unwrap();

        let snapshot = db.current_snapshot().unwrap();
        assert_eq!(snapshot.average(SensorCategory::Rainfall), 15.0);
        assert_eq!(snapshot.samples(SensorCategory::Rainfall), 2);
        assert_eq!(snapshot.average(SensorCategory::Storage), 75.0);
        assert_eq!(snapshot.average(SensorCategory::FlowRate), 0.0);
    }

    #[test]
    fn snapshot_excludes_inactive_sensors() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_sensor(&sensor("rain_001", SensorCategory::Rainfall, 10.0, SensorStatus::Active))
            .unwrap();
        db.upsert_sensor(&sensor(
            "rain_002",
            SensorCategory::Rainfall,
            90.0,
            SensorStatus::Inactive,
        ))
        .unwrap();

        let snapshot = db.current_snapshot().unwrap();
        assert_eq!(snapshot.average(SensorCategory::Rainfall), 10.0);
        assert_eq!(snapshot.samples(SensorCategory::Rainfall), 1);
    }

    #[test]
    fn upsert_replaces_existing_registration() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_sensor(&sensor("tank_001", SensorCategory::Storage, 50.0, SensorStatus::Active))
            .unwrap();
        db.upsert_sensor(&sensor("tank_001", SensorCategory::Storage, 62.0, SensorStatus::Active))
            .unwrap();

        let sensors = db.list_sensors().unwrap();
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].value, 62.0);
    }

    #[test]
    fn set_sensor_value_requires_registration() {
        let db = Database::open_in_memory().unwrap();
        let err = db.set_sensor_value("ghost", 1.0).unwrap_err();
        assert!(matches!(err, AquaOpsError::NotFound(_)));
    }

    #[test]
    fn decisions_round_trip_through_history() {
        let db = Database::open_in_memory().unwrap();
        let recs = vec![
            Recommendation::new(
                DecisionKind::RechargeWells,
                Priority::High,
                "Rainfall of 8.0mm detected.",
                ControlAction::ActivateRechargeWells,
                0.85,
            ),
            Recommendation::new(
                DecisionKind::OverflowPump,
                Priority::Critical,
                "Critical levels detected.",
                ControlAction::ActivateOverflowPumps,
                0.95,
            ),
        ];

        let written = db.store_decisions(&recs, 55).unwrap();
        assert_eq!(written, 2);

        let history = db.decision_history(24).unwrap();
        assert_eq!(history.len(), 2);
        for record in &history {
            assert_eq!(record.parameters["health_score"], 55);
        }
        let types: Vec<_> = history.iter().map(|r| r.decision_type.as_str()).collect();
        assert!(types.contains(&"recharge_wells"));
        assert!(types.contains(&"overflow_pump"));
    }

    #[test]
    fn decision_history_window_excludes_old_rows() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO decisions (decision_type, parameters, action, created_at)
                VALUES ('normal_operation', '{}', 'monitor', datetime('now', '-48 hours'))
                "#,
                [],
            )?;
            Ok(())
        })
        .unwrap();

        assert!(db.decision_history(24).unwrap().is_empty());
        assert_eq!(db.decision_history(72).unwrap().len(), 1);
    }

    #[test]
    fn sensor_history_is_ascending_and_windowed() {
        let db = Database::open_in_memory().unwrap();
        db.append_sensor_history("rain_001", 1.0).unwrap();
        db.append_sensor_history("rain_001", 2.0).unwrap();
        db.append_sensor_history("rain_002", 9.0).unwrap();

        let readings = db.sensor_history("rain_001", 24).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].value, 1.0);
        assert_eq!(readings[1].value, 2.0);
    }
}
