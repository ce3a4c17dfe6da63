use serde::{Deserialize, Serialize};

use super::GrowthStage;

/// Inbound advice request. Field names follow the public API contract
/// (camelCase); everything except `crop` is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdviceRequest {
    pub crop: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub soil_ph: Option<f64>,
    pub growth_state: Option<String>,
    pub variety: Option<String>,
    #[serde(rename = "useAI")]
    pub use_ai: Option<bool>,
}

impl AdviceRequest {
    pub fn for_crop(crop: impl Into<String>) -> Self {
        Self {
            crop: crop.into(),
            ..Default::default()
        }
    }
}

/// Validated optional agronomic parameters. The three fields are
/// independent and may be partially present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalParams {
    pub soil_ph: Option<f64>,
    pub growth_state: Option<GrowthStage>,
    pub variety: Option<String>,
}

impl AdditionalParams {
    pub fn is_empty(&self) -> bool {
        self.soil_ph.is_none() && self.growth_state.is_none() && self.variety.is_none()
    }
}
