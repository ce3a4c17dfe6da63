pub mod gemini;
pub mod openweathermap;

pub use gemini::GeminiClient;
pub use openweathermap::OpenWeatherMapClient;

use crate::error::Result;
use crate::models::ForecastPayload;

/// Outbound forecast service. The orchestrator treats any error as a
/// signal to degrade to the neutral summary.
pub trait ForecastProvider {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastPayload>;
}

/// Outbound free-text advice generator. The orchestrator treats any
/// error as a signal to fall back to the rule-based advisor.
pub trait AdviceGenerator {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
