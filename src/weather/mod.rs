pub mod seasonal;

pub use seasonal::SeasonalWeather;

use crate::models::WeatherContext;

/// Capability supplying the ambient weather context for a decision.
///
/// The engine takes this as an injected dependency so the synthetic
/// seasonal provider can be swapped for a real forecast feed, or for a
/// fixed context in tests, without touching the pipeline.
pub trait WeatherProvider: Send + Sync {
    fn current_context(&self) -> WeatherContext;
}
