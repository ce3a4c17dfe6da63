use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AdditionalParams, Crop, ForecastLocation, RiskLevel, Season, SeasonInfo};

/// Which path produced the final advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdviceSource {
    #[serde(rename = "gemini_ai")]
    GeminiAi,
    #[serde(rename = "basic_seasonal")]
    BasicSeasonal,
}

impl AdviceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceSource::GeminiAi => "gemini_ai",
            AdviceSource::BasicSeasonal => "basic_seasonal",
        }
    }
}

impl std::fmt::Display for AdviceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A physical input the farmer should line up, with a fixed textual cost
/// estimate and sourcing hint from the knowledge tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNeed {
    pub resource: String,
    pub purpose: String,
    pub quantity: String,
    pub cost_estimate: String,
    pub source: String,
}

impl ResourceNeed {
    pub fn new(
        resource: &str,
        purpose: &str,
        quantity: &str,
        cost_estimate: &str,
        source: &str,
    ) -> Self {
        Self {
            resource: resource.to_string(),
            purpose: purpose.to_string(),
            quantity: quantity.to_string(),
            cost_estimate: cost_estimate.to_string(),
            source: source.to_string(),
        }
    }
}

/// A disease the crop is exposed to, with its risk level for the season
/// the advice was generated in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    pub symptoms: String,
    pub risk_factors: String,
    pub prevention: String,
    pub treatment: String,
    pub seasonal_risk: RiskLevel,
}

/// Metadata block stamped once by the orchestrator as the final step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceMetadata {
    pub generated_at: DateTime<Utc>,
    pub advice_source: AdviceSource,
    pub location: ForecastLocation,
    pub season: SeasonInfo,
    pub additional_params: AdditionalParams,
    pub weather_service_available: bool,
    pub ai_service_available: bool,
    pub api_version: String,
}

/// The unified output shape, produced by either advisor.
///
/// List fields are always present (empty when nothing applies); the three
/// narrative strings are empty when their trigger parameter was absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub forecast_summary: String,
    pub season: Season,
    pub crop: Crop,
    pub soil_ph_analysis: String,
    pub growth_state_advice: String,
    pub variety_tips: String,
    pub actions: Vec<String>,
    pub resources: Vec<ResourceNeed>,
    pub diseases: Vec<DiseaseRecord>,
    pub warnings: Vec<String>,
    pub productivity_tips: Vec<String>,
    pub metadata: AdviceMetadata,
}
