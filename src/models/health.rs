use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
        }
    }

    /// Tier for a clamped health score: <50 critical, <80 warning,
    /// otherwise healthy (80 itself is healthy).
    pub fn for_score(score: u8) -> Self {
        if score < 50 {
            HealthStatus::Critical
        } else if score < 80 {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Composite assessment of network stress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAssessment {
    /// 0-100, clamped regardless of accumulated penalties.
    pub health_score: u8,
    /// Triggered issues, in fixed evaluation order.
    pub issues: Vec<String>,
    pub status: HealthStatus,
}

impl HealthAssessment {
    pub fn new(score: u8, issues: Vec<String>) -> Self {
        Self {
            health_score: score,
            issues,
            status: HealthStatus::for_score(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tier_boundaries() {
        assert_eq!(HealthStatus::for_score(0), HealthStatus::Critical);
        assert_eq!(HealthStatus::for_score(49), HealthStatus::Critical);
        assert_eq!(HealthStatus::for_score(50), HealthStatus::Warning);
        assert_eq!(HealthStatus::for_score(79), HealthStatus::Warning);
        assert_eq!(HealthStatus::for_score(80), HealthStatus::Healthy);
        assert_eq!(HealthStatus::for_score(100), HealthStatus::Healthy);
    }
}
