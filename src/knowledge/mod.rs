pub mod crops;
pub mod soil;
pub mod stages;
pub mod thresholds;

pub use crops::{CropProfile, PhRange, VarietyInfo};
pub use soil::SoilPhCategory;
pub use stages::StageInfo;
pub use thresholds::WeatherThresholds;

use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;

use crate::error::{Result, ShambaOpsError};
use crate::models::{Crop, GrowthStage, Season};

/// Static agronomic lookup tables: crops, seasons, growth stages, soil
/// pH categories, and weather thresholds. Built once at startup and
/// passed by reference; never mutated afterwards.
pub struct KnowledgeBase {
    crops: BTreeMap<Crop, CropProfile>,
    thresholds: WeatherThresholds,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self {
            crops: crops::build_crop_table(),
            thresholds: WeatherThresholds::default(),
        }
    }

    /// Resolve a user-supplied crop name to a known crop.
    pub fn resolve_crop(&self, name: &str) -> Result<Crop> {
        Crop::from_str(name).ok_or_else(|| ShambaOpsError::UnknownCrop(name.to_string()))
    }

    /// Profile lookup for a typed crop. The table is built for every
    /// `Crop` variant, so indexing cannot miss.
    pub fn crop_profile(&self, crop: Crop) -> &CropProfile {
        &self.crops[&crop]
    }

    pub fn crop_profiles(&self) -> impl Iterator<Item = &CropProfile> {
        self.crops.values()
    }

    pub fn season_for_month(&self, month: u32) -> Season {
        Season::for_month(month)
    }

    pub fn current_season(&self, now: DateTime<Utc>) -> Season {
        Season::for_month(now.month())
    }

    pub fn soil_ph_category(&self, ph: f64) -> Option<&'static SoilPhCategory> {
        soil::category_for(ph)
    }

    pub fn stage_info(&self, stage: GrowthStage) -> StageInfo {
        stages::stage_info(stage)
    }

    pub fn thresholds(&self) -> &WeatherThresholds {
        &self.thresholds
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}
