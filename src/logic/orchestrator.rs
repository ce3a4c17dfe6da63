use chrono::{DateTime, Utc};

use crate::datasources::{AdviceGenerator, ForecastProvider};
use crate::error::{Result, ShambaOpsError};
use crate::knowledge::{CropProfile, KnowledgeBase};
use crate::logic::advisor::RuleBasedAdvisor;
use crate::logic::parser::{parse_external_advice, ParseContext};
use crate::logic::summarizer::{generate_warnings, summarize_forecast, FORECAST_HORIZON_POINTS};
use crate::models::{
    AdditionalParams, Advice, AdviceMetadata, AdviceRequest, AdviceSource, Crop, ForecastLocation,
    ForecastSummary, GrowthStage, Season,
};
use crate::API_VERSION;

/// How the forecast step resolved: a live summary from the provider, or
/// the neutral substitute with the reason it degraded.
enum ForecastOutcome {
    Live(ForecastSummary),
    Degraded { summary: ForecastSummary, reason: String },
}

/// Top-level per-request policy. Stateless across requests; the only
/// errors it returns are upfront validation failures. Provider failures
/// degrade the forecast or fall back to the rule-based advisor and are
/// visible to the caller only through the metadata flags.
pub struct AdviceOrchestrator<F, G> {
    knowledge: KnowledgeBase,
    default_location: ForecastLocation,
    forecast_provider: Option<F>,
    advice_generator: Option<G>,
}

impl<F: ForecastProvider, G: AdviceGenerator> AdviceOrchestrator<F, G> {
    pub fn new(
        knowledge: KnowledgeBase,
        default_location: ForecastLocation,
        forecast_provider: Option<F>,
        advice_generator: Option<G>,
    ) -> Self {
        Self {
            knowledge,
            default_location,
            forecast_provider,
            advice_generator,
        }
    }

    pub async fn advise(&self, request: &AdviceRequest) -> Result<Advice> {
        self.advise_at(request, Utc::now()).await
    }

    /// Deterministic entrypoint: the caller pins the clock, which fixes
    /// both the season lookup and the generated timestamp.
    pub async fn advise_at(&self, request: &AdviceRequest, now: DateTime<Utc>) -> Result<Advice> {
        let location = self.resolve_location(request)?;
        let crop = Crop::from_str(&request.crop)
            .ok_or_else(|| ShambaOpsError::UnsupportedCrop(request.crop.clone()))?;
        let params = validate_params(request)?;
        let season = self.knowledge.current_season(now);

        let (mut summary, weather_available) = match self.fetch_summary(&location).await {
            ForecastOutcome::Live(summary) => (summary, true),
            ForecastOutcome::Degraded { summary, reason } => {
                tracing::warn!("forecast degraded to neutral summary: {}", reason);
                (summary, false)
            }
        };
        summary.warnings = generate_warnings(&summary, self.knowledge.thresholds());

        let ai_available = self.advice_generator.is_some();
        let want_external = request.use_ai.unwrap_or(true);

        let (mut advice, source) = match self.advice_generator.as_ref() {
            Some(generator) if want_external => {
                match self
                    .external_advice(generator, crop, season, &summary, &params, now)
                    .await
                {
                    Ok(mut advice) => {
                        // The generator does not see the locally derived
                        // warnings; put them ahead of its own.
                        let mut warnings = summary.warnings.clone();
                        warnings.append(&mut advice.warnings);
                        advice.warnings = warnings;
                        (advice, AdviceSource::GeminiAi)
                    }
                    Err(e) => {
                        tracing::warn!("advice generator failed, using rule-based advisor: {}", e);
                        (
                            RuleBasedAdvisor::advise(
                                &self.knowledge,
                                crop.as_str(),
                                Some(season),
                                &summary,
                                &params,
                                now,
                            )?,
                            AdviceSource::BasicSeasonal,
                        )
                    }
                }
            }
            _ => (
                RuleBasedAdvisor::advise(
                    &self.knowledge,
                    crop.as_str(),
                    Some(season),
                    &summary,
                    &params,
                    now,
                )?,
                AdviceSource::BasicSeasonal,
            ),
        };

        advice.metadata = AdviceMetadata {
            generated_at: now,
            advice_source: source,
            location,
            season: season.info(),
            additional_params: params,
            weather_service_available: weather_available,
            ai_service_available: ai_available,
            api_version: API_VERSION.to_string(),
        };
        Ok(advice)
    }

    fn resolve_location(&self, request: &AdviceRequest) -> Result<ForecastLocation> {
        match (request.lat, request.lon) {
            (None, None) => Ok(self.default_location.clone()),
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(ShambaOpsError::InvalidCoordinates(format!(
                        "latitude {} is outside -90..90",
                        lat
                    )));
                }
                if !(-180.0..=180.0).contains(&lon) {
                    return Err(ShambaOpsError::InvalidCoordinates(format!(
                        "longitude {} is outside -180..180",
                        lon
                    )));
                }
                Ok(ForecastLocation::new(
                    format!("{:.4}, {:.4}", lat, lon),
                    lat,
                    lon,
                ))
            }
            _ => Err(ShambaOpsError::InvalidCoordinates(
                "latitude and longitude must be supplied together".to_string(),
            )),
        }
    }

    async fn fetch_summary(&self, location: &ForecastLocation) -> ForecastOutcome {
        let provider = match self.forecast_provider.as_ref() {
            Some(provider) => provider,
            None => {
                return ForecastOutcome::Degraded {
                    summary: ForecastSummary::neutral(),
                    reason: "forecast provider not configured".to_string(),
                }
            }
        };
        match provider
            .fetch_forecast(location.latitude, location.longitude)
            .await
        {
            Ok(payload) => match summarize_forecast(
                &payload,
                FORECAST_HORIZON_POINTS,
                self.knowledge.thresholds(),
            ) {
                Ok(summary) => ForecastOutcome::Live(summary),
                Err(e) => ForecastOutcome::Degraded {
                    summary: ForecastSummary::neutral(),
                    reason: e.to_string(),
                },
            },
            Err(e) => ForecastOutcome::Degraded {
                summary: ForecastSummary::neutral(),
                reason: e.to_string(),
            },
        }
    }

    async fn external_advice(
        &self,
        generator: &G,
        crop: Crop,
        season: Season,
        summary: &ForecastSummary,
        params: &AdditionalParams,
        now: DateTime<Utc>,
    ) -> Result<Advice> {
        let profile = self.knowledge.crop_profile(crop);
        let prompt = build_prompt(profile, season, summary, params);
        let text = generator.generate(&prompt).await?;
        parse_external_advice(
            &text,
            &ParseContext {
                summary,
                season,
                crop,
                params,
            },
            now,
        )
    }
}

fn validate_params(request: &AdviceRequest) -> Result<AdditionalParams> {
    let soil_ph = match request.soil_ph {
        Some(ph) if !(4.0..=8.5).contains(&ph) => {
            return Err(ShambaOpsError::InvalidParameter {
                field: "soilPh",
                message: format!("{} is outside the 4.0-8.5 range", ph),
            })
        }
        other => other,
    };

    let growth_state = match request.growth_state.as_deref() {
        None => None,
        Some(raw) => Some(GrowthStage::from_str(raw).ok_or_else(|| {
            ShambaOpsError::InvalidParameter {
                field: "growthState",
                message: format!(
                    "'{}' is not one of germination, vegetative, flowering, fruiting",
                    raw
                ),
            }
        })?),
    };

    let variety = match request.variety.as_deref() {
        Some(raw) if raw.trim().is_empty() => {
            return Err(ShambaOpsError::InvalidParameter {
                field: "variety",
                message: "must be a non-empty string".to_string(),
            })
        }
        Some(raw) => Some(raw.trim().to_string()),
        None => None,
    };

    Ok(AdditionalParams {
        soil_ph,
        growth_state,
        variety,
    })
}

fn build_prompt(
    profile: &CropProfile,
    season: Season,
    summary: &ForecastSummary,
    params: &AdditionalParams,
) -> String {
    let info = season.info();
    let mut prompt = format!(
        "You are an agronomist advising smallholder farmers in Kenya.\n\
         Crop: {} (water need {}, growing period {})\n\
         Season: {} ({})\n\
         Forecast for {}: {:.1} mm of rain over {} interval(s), temperatures \
         {:.1} to {:.1}°C, wind up to {} km/h.\n",
        profile.crop.as_str(),
        profile.water_need,
        profile.growing_period,
        season.as_str(),
        info.description,
        summary.location,
        summary.total_rainfall_mm,
        summary.rain_hours,
        summary.min_temperature_c,
        summary.max_temperature_c,
        summary.max_wind_speed_kmh,
    );
    if let Some(ph) = params.soil_ph {
        prompt.push_str(&format!("Soil pH: {:.1}\n", ph));
    }
    if let Some(stage) = params.growth_state {
        prompt.push_str(&format!("Growth stage: {}\n", stage));
    }
    if let Some(variety) = &params.variety {
        prompt.push_str(&format!("Variety: {}\n", variety));
    }
    prompt.push_str(
        "\nRespond with a single JSON object and no other text, using exactly these keys: \
         forecast_summary (string), season (string), crop (string), soil_ph_analysis (string), \
         growth_state_advice (string), variety_tips (string), actions (array of strings), \
         resources (array of objects with resource, purpose, quantity, cost_estimate, source), \
         diseases (array of objects with name, symptoms, risk_factors, prevention, treatment, \
         seasonal_risk), warnings (array of strings), productivity_tips (array of strings).",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProviderError, ProviderErrorKind};
    use crate::models::{ForecastPayload, ForecastPoint};
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn now() -> DateTime<Utc> {
        // July -> long dry season
        Utc.with_ymd_and_hms(2024, 7, 10, 6, 0, 0).unwrap()
    }

    fn nairobi() -> ForecastLocation {
        ForecastLocation::new("Nairobi", -1.2864, 36.8172)
    }

    struct StaticForecast {
        payload: ForecastPayload,
    }

    impl StaticForecast {
        fn rainy() -> Self {
            let base = Utc.with_ymd_and_hms(2024, 7, 10, 9, 0, 0).unwrap();
            let points = (0..8)
                .map(|i| ForecastPoint {
                    timestamp: base + chrono::Duration::hours(i * 3),
                    temp_c: 18.0 + i as f64,
                    precipitation_mm: if i == 1 { 12.0 } else { 0.5 },
                    wind_speed_ms: 3.0,
                    conditions: vec!["Rain".to_string()],
                })
                .collect();
            Self {
                payload: ForecastPayload {
                    location: ForecastLocation::new("Nairobi", -1.2864, 36.8172),
                    points,
                },
            }
        }
    }

    impl ForecastProvider for StaticForecast {
        async fn fetch_forecast(&self, _lat: f64, _lon: f64) -> Result<ForecastPayload> {
            Ok(self.payload.clone())
        }
    }

    struct FailingForecast;

    impl ForecastProvider for FailingForecast {
        async fn fetch_forecast(&self, _lat: f64, _lon: f64) -> Result<ForecastPayload> {
            Err(ProviderError::new(
                "openweathermap",
                ProviderErrorKind::Server,
                "502: bad gateway",
            )
            .into())
        }
    }

    struct StaticGenerator {
        response: String,
        calls: AtomicUsize,
    }

    impl StaticGenerator {
        fn returning(response: &str) -> Self {
            Self {
                response: response.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl AdviceGenerator for StaticGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    fn valid_generator_json() -> String {
        concat!(
            "Here is your advice:\n```json\n",
            "{\"forecast_summary\":\"A dry, mild week ahead\",\"season\":\"longDry\",",
            "\"crop\":\"maize\",\"soil_ph_analysis\":\"\",\"growth_state_advice\":\"\",",
            "\"variety_tips\":\"\",\"actions\":[\"Mulch the rows\"],\"resources\":[],",
            "\"diseases\":[],\"warnings\":[\"Generator warning\"],",
            "\"productivity_tips\":[\"Keep records\"]}",
            "\n```"
        )
        .to_string()
    }

    fn orchestrator(
        forecast: Option<StaticForecast>,
        generator: Option<StaticGenerator>,
    ) -> AdviceOrchestrator<StaticForecast, StaticGenerator> {
        AdviceOrchestrator::new(KnowledgeBase::new(), nairobi(), forecast, generator)
    }

    #[tokio::test]
    async fn invalid_latitude_is_rejected() {
        let orchestrator = orchestrator(None, None);
        let mut request = AdviceRequest::for_crop("maize");
        request.lat = Some(123.0);
        request.lon = Some(36.8);
        let err = orchestrator.advise_at(&request, now()).await.unwrap_err();
        assert!(matches!(err, ShambaOpsError::InvalidCoordinates(_)));
    }

    #[tokio::test]
    async fn lone_coordinate_is_rejected() {
        let orchestrator = orchestrator(None, None);
        let mut request = AdviceRequest::for_crop("maize");
        request.lat = Some(-1.3);
        let err = orchestrator.advise_at(&request, now()).await.unwrap_err();
        assert!(matches!(err, ShambaOpsError::InvalidCoordinates(_)));
    }

    #[tokio::test]
    async fn unsupported_crop_is_rejected() {
        let orchestrator = orchestrator(None, None);
        let request = AdviceRequest::for_crop("rice");
        let err = orchestrator.advise_at(&request, now()).await.unwrap_err();
        assert!(matches!(err, ShambaOpsError::UnsupportedCrop(name) if name == "rice"));
    }

    #[tokio::test]
    async fn out_of_range_soil_ph_names_the_field() {
        let orchestrator = orchestrator(None, None);
        let mut request = AdviceRequest::for_crop("maize");
        request.soil_ph = Some(9.2);
        let err = orchestrator.advise_at(&request, now()).await.unwrap_err();
        assert!(matches!(
            err,
            ShambaOpsError::InvalidParameter { field: "soilPh", .. }
        ));
    }

    #[tokio::test]
    async fn unknown_growth_stage_names_the_field() {
        let orchestrator = orchestrator(None, None);
        let mut request = AdviceRequest::for_crop("maize");
        request.growth_state = Some("ripening".to_string());
        let err = orchestrator.advise_at(&request, now()).await.unwrap_err();
        assert!(matches!(
            err,
            ShambaOpsError::InvalidParameter {
                field: "growthState",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn failing_forecast_degrades_but_still_succeeds() {
        let orchestrator = AdviceOrchestrator::new(
            KnowledgeBase::new(),
            nairobi(),
            Some(FailingForecast),
            Option::<StaticGenerator>::None,
        );
        let request = AdviceRequest::for_crop("maize");
        let advice = orchestrator.advise_at(&request, now()).await.unwrap();
        assert!(!advice.forecast_summary.is_empty());
        assert!(!advice.metadata.weather_service_available);
        assert_eq!(advice.metadata.advice_source, AdviceSource::BasicSeasonal);
        // neutral summary is bone dry, so the no-rain advisory fires
        assert!(advice.warnings.iter().any(|w| w.contains("No rain")));
    }

    #[tokio::test]
    async fn unparsable_generator_output_falls_back_transparently() {
        let generator = StaticGenerator::returning("I am sorry, I cannot help with that.");
        let orchestrator = orchestrator(Some(StaticForecast::rainy()), Some(generator));
        let request = AdviceRequest::for_crop("maize");
        let advice = orchestrator.advise_at(&request, now()).await.unwrap();
        assert_eq!(advice.metadata.advice_source, AdviceSource::BasicSeasonal);
        assert!(advice.metadata.ai_service_available);
        assert!(!advice.actions.is_empty());
    }

    #[tokio::test]
    async fn external_success_prepends_summary_warnings() {
        let generator = StaticGenerator::returning(&valid_generator_json());
        let orchestrator = orchestrator(Some(StaticForecast::rainy()), Some(generator));
        let request = AdviceRequest::for_crop("maize");
        let advice = orchestrator.advise_at(&request, now()).await.unwrap();
        assert_eq!(advice.metadata.advice_source, AdviceSource::GeminiAi);
        assert_eq!(advice.forecast_summary, "A dry, mild week ahead");
        // heavy-rain warning from the summary comes before the
        // generator's own warning
        let heavy_idx = advice
            .warnings
            .iter()
            .position(|w| w.contains("Heavy rain"))
            .unwrap();
        let generator_idx = advice
            .warnings
            .iter()
            .position(|w| w == "Generator warning")
            .unwrap();
        assert!(heavy_idx < generator_idx);
        assert!(advice.metadata.weather_service_available);
    }

    #[tokio::test]
    async fn use_ai_false_skips_the_generator_entirely() {
        let generator = StaticGenerator::returning(&valid_generator_json());
        let orchestrator = orchestrator(Some(StaticForecast::rainy()), Some(generator));
        let mut request = AdviceRequest::for_crop("beans");
        request.use_ai = Some(false);
        let advice = orchestrator.advise_at(&request, now()).await.unwrap();
        assert_eq!(advice.metadata.advice_source, AdviceSource::BasicSeasonal);
        assert!(advice.metadata.ai_service_available);
        assert_eq!(
            orchestrator
                .advice_generator
                .as_ref()
                .unwrap()
                .calls
                .load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn default_location_is_used_when_no_coordinates_arrive() {
        let orchestrator = orchestrator(None, None);
        let request = AdviceRequest::for_crop("bananas");
        let advice = orchestrator.advise_at(&request, now()).await.unwrap();
        assert_eq!(advice.metadata.location.name, "Nairobi");
        assert_eq!(advice.metadata.season.season, Season::LongDry);
        assert_eq!(advice.metadata.api_version, API_VERSION);
    }

    #[tokio::test]
    async fn crop_name_is_normalized_before_lookup() {
        let orchestrator = orchestrator(None, None);
        let request = AdviceRequest::for_crop("  MAIZE ");
        let advice = orchestrator.advise_at(&request, now()).await.unwrap();
        assert_eq!(advice.crop, Crop::Maize);
    }

    #[test]
    fn prompt_includes_context_and_the_required_keys() {
        let kb = KnowledgeBase::new();
        let profile = kb.crop_profile(Crop::Maize);
        let params = AdditionalParams {
            soil_ph: Some(6.2),
            growth_state: Some(GrowthStage::Vegetative),
            variety: Some("H614".to_string()),
        };
        let prompt = build_prompt(
            profile,
            Season::LongRains,
            &ForecastSummary::neutral(),
            &params,
        );
        assert!(prompt.contains("Crop: maize"));
        assert!(prompt.contains("Season: longRains"));
        assert!(prompt.contains("Soil pH: 6.2"));
        assert!(prompt.contains("Variety: H614"));
        assert!(prompt.contains("productivity_tips"));
    }
}
