mod crop_care;
mod growth_stage;
mod seasonal;
mod soil_ph;
mod variety;
mod weather;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::knowledge::KnowledgeBase;
use crate::models::{
    AdditionalParams, Advice, AdviceMetadata, AdviceSource, DiseaseRecord, ForecastLocation,
    ForecastSummary, ResourceNeed, Season,
};
use crate::API_VERSION;

/// Partial advice contributed by one rule step. The advisor concatenates
/// fragments in a fixed order, so each step stays a pure function and
/// list ordering cannot drift.
#[derive(Debug, Clone, Default)]
pub struct AdviceFragment {
    pub soil_ph_analysis: Option<String>,
    pub growth_state_advice: Option<String>,
    pub variety_tips: Option<String>,
    pub actions: Vec<String>,
    pub resources: Vec<ResourceNeed>,
    pub diseases: Vec<DiseaseRecord>,
    pub warnings: Vec<String>,
    pub productivity_tips: Vec<String>,
}

impl AdviceFragment {
    fn merge(&mut self, other: AdviceFragment) {
        if other.soil_ph_analysis.is_some() {
            self.soil_ph_analysis = other.soil_ph_analysis;
        }
        if other.growth_state_advice.is_some() {
            self.growth_state_advice = other.growth_state_advice;
        }
        if other.variety_tips.is_some() {
            self.variety_tips = other.variety_tips;
        }
        self.actions.extend(other.actions);
        self.resources.extend(other.resources);
        self.diseases.extend(other.diseases);
        self.warnings.extend(other.warnings);
        self.productivity_tips.extend(other.productivity_tips);
    }
}

/// Deterministic advisor with no network dependency. Serves both as the
/// basic advice mode and as the fallback when the external generator
/// fails or is disabled.
pub struct RuleBasedAdvisor;

impl RuleBasedAdvisor {
    /// Build a full advice object from the knowledge base, the forecast
    /// summary and whatever optional parameters were supplied.
    ///
    /// Rule steps run in fixed order: soil pH, growth stage, variety,
    /// season block, weather block, crop block; the summary's own
    /// warnings are appended last. The only failure is an unknown crop
    /// name.
    pub fn advise(
        kb: &KnowledgeBase,
        crop: &str,
        season: Option<Season>,
        summary: &ForecastSummary,
        params: &AdditionalParams,
        now: DateTime<Utc>,
    ) -> Result<Advice> {
        let crop = kb.resolve_crop(crop)?;
        let season = season.unwrap_or_else(|| kb.current_season(now));
        let profile = kb.crop_profile(crop);

        let mut combined = AdviceFragment::default();
        if let Some(fragment) = soil_ph::evaluate(kb, profile, params.soil_ph) {
            combined.merge(fragment);
        }
        if let Some(fragment) = growth_stage::evaluate(kb, params.growth_state) {
            combined.merge(fragment);
        }
        if let Some(fragment) = variety::evaluate(profile, params.variety.as_deref(), summary) {
            combined.merge(fragment);
        }
        combined.merge(seasonal::evaluate(season));
        combined.merge(weather::evaluate(summary, kb.thresholds()));
        combined.merge(crop_care::evaluate(crop, season));

        let mut warnings = combined.warnings;
        warnings.extend(summary.warnings.iter().cloned());

        Ok(Advice {
            forecast_summary: forecast_narrative(summary),
            season,
            crop,
            soil_ph_analysis: combined.soil_ph_analysis.unwrap_or_default(),
            growth_state_advice: combined.growth_state_advice.unwrap_or_default(),
            variety_tips: combined.variety_tips.unwrap_or_default(),
            actions: combined.actions,
            resources: combined.resources,
            diseases: combined.diseases,
            warnings,
            productivity_tips: combined.productivity_tips,
            metadata: AdviceMetadata {
                generated_at: now,
                advice_source: AdviceSource::BasicSeasonal,
                // Provisional block; the orchestrator stamps the final
                // metadata as its last step.
                location: ForecastLocation::new(summary.location.clone(), 0.0, 0.0),
                season: season.info(),
                additional_params: params.clone(),
                weather_service_available: false,
                ai_service_available: false,
                api_version: API_VERSION.to_string(),
            },
        })
    }
}

fn forecast_narrative(summary: &ForecastSummary) -> String {
    let conditions = if summary.conditions.is_empty() {
        "settled".to_string()
    } else {
        summary
            .conditions
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Next 48 hours around {}: {:.1} mm of rain over {} interval(s), \
         temperatures {:.1} to {:.1}°C, wind up to {} km/h ({})",
        summary.location,
        summary.total_rainfall_mm,
        summary.rain_hours,
        summary.min_temperature_c,
        summary.max_temperature_c,
        summary.max_wind_speed_kmh,
        conditions
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Crop, GrowthStage};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap()
    }

    fn dry_summary() -> ForecastSummary {
        let mut summary = ForecastSummary::neutral();
        summary.location = "Eldoret".to_string();
        summary
    }

    #[test]
    fn every_crop_and_season_yields_actions() {
        let kb = KnowledgeBase::new();
        let summary = dry_summary();
        for crop in Crop::all() {
            for season in Season::all() {
                let advice = RuleBasedAdvisor::advise(
                    &kb,
                    crop.as_str(),
                    Some(season),
                    &summary,
                    &AdditionalParams::default(),
                    now(),
                )
                .unwrap();
                assert!(!advice.actions.is_empty());
                assert_eq!(advice.crop, crop);
                assert_eq!(advice.season, season);
                assert!(!advice.forecast_summary.is_empty());
                assert!(!advice.productivity_tips.is_empty());
                assert_eq!(advice.diseases.len(), 2);
            }
        }
    }

    #[test]
    fn unknown_crop_is_rejected() {
        let kb = KnowledgeBase::new();
        let result = RuleBasedAdvisor::advise(
            &kb,
            "cassava",
            Some(Season::LongRains),
            &dry_summary(),
            &AdditionalParams::default(),
            now(),
        );
        assert!(matches!(
            result,
            Err(crate::error::ShambaOpsError::UnknownCrop(_))
        ));
    }

    #[test]
    fn narrative_fields_default_to_empty_without_params() {
        let kb = KnowledgeBase::new();
        let advice = RuleBasedAdvisor::advise(
            &kb,
            "maize",
            Some(Season::LongDry),
            &dry_summary(),
            &AdditionalParams::default(),
            now(),
        )
        .unwrap();
        assert_eq!(advice.soil_ph_analysis, "");
        assert_eq!(advice.growth_state_advice, "");
        assert_eq!(advice.variety_tips, "");
    }

    #[test]
    fn acidic_soil_recommends_lime() {
        let kb = KnowledgeBase::new();
        let params = AdditionalParams {
            soil_ph: Some(5.0),
            ..Default::default()
        };
        let advice = RuleBasedAdvisor::advise(
            &kb,
            "maize",
            Some(Season::LongRains),
            &dry_summary(),
            &params,
            now(),
        )
        .unwrap();
        assert!(advice.soil_ph_analysis.contains("acidic"));
        assert!(advice.actions.iter().any(|a| a.contains("lime")));
        assert!(!advice.warnings.is_empty());
    }

    #[test]
    fn alkaline_soil_recommends_lowering_ph() {
        let kb = KnowledgeBase::new();
        let params = AdditionalParams {
            soil_ph: Some(8.0),
            ..Default::default()
        };
        let advice = RuleBasedAdvisor::advise(
            &kb,
            "maize",
            Some(Season::LongRains),
            &dry_summary(),
            &params,
            now(),
        )
        .unwrap();
        assert!(advice.soil_ph_analysis.contains("alkaline"));
        assert!(advice.actions.iter().any(|a| a.contains("sulfur")));
    }

    #[test]
    fn suitable_soil_gets_a_tip_not_a_warning() {
        let kb = KnowledgeBase::new();
        let params = AdditionalParams {
            soil_ph: Some(6.5),
            ..Default::default()
        };
        let advice = RuleBasedAdvisor::advise(
            &kb,
            "maize",
            Some(Season::ShortDry),
            &dry_summary(),
            &params,
            now(),
        )
        .unwrap();
        assert!(advice.soil_ph_analysis.contains("suits"));
        assert!(advice
            .productivity_tips
            .iter()
            .any(|t| t.contains("right range")));
        assert!(!advice.warnings.iter().any(|w| w.contains("pH")));
    }

    #[test]
    fn growth_stage_contributes_two_actions_and_a_narrative() {
        let kb = KnowledgeBase::new();
        let params = AdditionalParams {
            growth_state: Some(GrowthStage::Flowering),
            ..Default::default()
        };
        let bare = RuleBasedAdvisor::advise(
            &kb,
            "beans",
            Some(Season::ShortRains),
            &dry_summary(),
            &AdditionalParams::default(),
            now(),
        )
        .unwrap();
        let staged = RuleBasedAdvisor::advise(
            &kb,
            "beans",
            Some(Season::ShortRains),
            &dry_summary(),
            &params,
            now(),
        )
        .unwrap();
        assert_eq!(staged.actions.len(), bare.actions.len() + 2);
        assert!(staged.growth_state_advice.contains("flowering"));
    }

    #[test]
    fn low_drought_resistance_variety_in_a_dry_window_adds_irrigation() {
        let kb = KnowledgeBase::new();
        let params = AdditionalParams {
            variety: Some("H614".to_string()),
            ..Default::default()
        };
        // dry_summary has zero rainfall
        let advice = RuleBasedAdvisor::advise(
            &kb,
            "maize",
            Some(Season::LongDry),
            &dry_summary(),
            &params,
            now(),
        )
        .unwrap();
        assert!(advice.variety_tips.contains("H614"));
        assert!(advice.warnings.iter().any(|w| w.contains("H614")));
        assert!(advice
            .actions
            .iter()
            .any(|a| a.to_lowercase().contains("irrigat")));
    }

    #[test]
    fn advice_is_idempotent_for_identical_inputs() {
        let kb = KnowledgeBase::new();
        let summary = dry_summary();
        let params = AdditionalParams {
            soil_ph: Some(6.2),
            growth_state: Some(GrowthStage::Vegetative),
            variety: Some("Katumani".to_string()),
        };
        let first = RuleBasedAdvisor::advise(
            &kb,
            "maize",
            Some(Season::ShortDry),
            &summary,
            &params,
            now(),
        )
        .unwrap();
        let second = RuleBasedAdvisor::advise(
            &kb,
            "maize",
            Some(Season::ShortDry),
            &summary,
            &params,
            now(),
        )
        .unwrap();
        assert_eq!(first.actions, second.actions);
        assert_eq!(first.warnings, second.warnings);
        assert_eq!(first.productivity_tips, second.productivity_tips);
        assert_eq!(first.resources, second.resources);
    }

    #[test]
    fn summary_warnings_are_appended_last() {
        let kb = KnowledgeBase::new();
        let mut summary = dry_summary();
        summary.warnings = vec!["No rain expected over the forecast window".to_string()];
        let advice = RuleBasedAdvisor::advise(
            &kb,
            "potatoes",
            Some(Season::LongRains),
            &summary,
            &AdditionalParams::default(),
            now(),
        )
        .unwrap();
        assert_eq!(
            advice.warnings.last().map(String::as_str),
            Some("No rain expected over the forecast window")
        );
    }

    #[test]
    fn season_defaults_to_the_calendar_when_not_supplied() {
        let kb = KnowledgeBase::new();
        let advice = RuleBasedAdvisor::advise(
            &kb,
            "maize",
            None,
            &dry_summary(),
            &AdditionalParams::default(),
            now(), // April -> long rains
        )
        .unwrap();
        assert_eq!(advice.season, Season::LongRains);
    }
}
