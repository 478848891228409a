use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Monsoon,
    Winter,
    Summer,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Monsoon => "monsoon",
            Season::Winter => "winter",
            Season::Summer => "summer",
        }
    }

    /// Season for a calendar month (1-12).
    pub fn for_month(month: u32) -> Self {
        match month {
            6..=9 => Season::Monsoon,
            10..=12 | 1 => Season::Winter,
            _ => Season::Summer,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ambient weather conditions at decision time. Recomputed per invocation,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherContext {
    /// Probability of rain in the coming period, 0.0-1.0.
    pub rain_probability: f64,
    pub season: Season,
    pub temperature_c: f64,
    pub humidity_percent: f64,
}

/// One day of the synthetic rainfall outlook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlookDay {
    pub date: NaiveDate,
    pub expected_mm: f64,
    pub probability_percent: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_month_table() {
        assert_eq!(Season::for_month(6), Season::Monsoon);
        assert_eq!(Season::for_month(9), Season::Monsoon);
        assert_eq!(Season::for_month(10), Season::Winter);
        assert_eq!(Season::for_month(12), Season::Winter);
        assert_eq!(Season::for_month(1), Season::Winter);
        assert_eq!(Season::for_month(2), Season::Summer);
        assert_eq!(Season::for_month(5), Season::Summer);
    }
}
