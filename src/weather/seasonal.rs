use super::WeatherProvider;
use crate::models::{OutlookDay, Season, WeatherContext};
use chrono::{Datelike, Duration, Local, Timelike};
use rand::Rng;

/// Synthetic weather derived from the wall clock: season from the month,
/// rain probability from season and hour, temperature and humidity drawn
/// uniformly from fixed ranges. The random draws are illustrative stand-ins
/// for a forecast feed.
pub struct SeasonalWeather;

impl SeasonalWeather {
    pub fn new() -> Self {
        Self
    }

    /// Synthetic rainfall outlook: wetter in the near term (0-15mm for the
    /// first three days), drier beyond (0-8mm).
    pub fn rainfall_outlook(&self, days: u32) -> Vec<OutlookDay> {
        let mut rng = rand::thread_rng();
        let today = Local::now().date_naive();

        (0..days)
            .map(|i| {
                let expected_mm: f64 = if i < 3 {
                    rng.gen_range(0.0..15.0)
                } else {
                    rng.gen_range(0.0..8.0)
                };
                OutlookDay {
                    date: today + Duration::days(i as i64),
                    expected_mm: (expected_mm * 10.0).round() / 10.0,
                    probability_percent: rng.gen_range(20..=80),
                }
            })
            .collect()
    }
}

impl Default for SeasonalWeather {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherProvider for SeasonalWeather {
    fn current_context(&self) -> WeatherContext {
        let now = Local::now();
        let season = Season::for_month(now.month());
        let mut rng = rand::thread_rng();

        WeatherContext {
            rain_probability: rain_probability(season, now.hour()),
            season,
            temperature_c: rng.gen_range(20.0..35.0),
            humidity_percent: rng.gen_range(40.0..90.0),
        }
    }
}

/// Rain probability by season and hour of day. Daytime is 06:00-18:00
/// inclusive.
pub fn rain_probability(season: Season, hour: u32) -> f64 {
    let daytime = (6..=18).contains(&hour);
    match (daytime, season) {
        (true, Season::Monsoon) => 0.3,
        (true, _) => 0.1,
        (false, Season::Monsoon) => 0.2,
        (false, _) => 0.05,
    }
}
