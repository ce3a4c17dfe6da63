use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{Result, ShambaOpsError};
use crate::models::{
    AdditionalParams, Advice, AdviceMetadata, AdviceSource, Crop, DiseaseRecord, ForecastLocation,
    ForecastSummary, ResourceNeed, Season,
};
use crate::API_VERSION;

/// Request context the generator prompt was built from; used to echo
/// metadata and to normalize values the generator mangled.
pub struct ParseContext<'a> {
    pub summary: &'a ForecastSummary,
    pub season: Season,
    pub crop: Crop,
    pub params: &'a AdditionalParams,
}

const REQUIRED_FIELDS: [&str; 6] = [
    "forecast_summary",
    "season",
    "crop",
    "actions",
    "warnings",
    "productivity_tips",
];

/// Convert the generator's free text into the unified advice shape.
///
/// The structured payload is the span from the first `{` to the last
/// `}`; models often wrap it in prose or markdown fences. Presence of
/// the six required fields is validated; array contents are trusted.
pub fn parse_external_advice(
    text: &str,
    ctx: &ParseContext<'_>,
    now: DateTime<Utc>,
) -> Result<Advice> {
    let start = text.find('{').ok_or(ShambaOpsError::NoStructuredPayload)?;
    let end = text.rfind('}').ok_or(ShambaOpsError::NoStructuredPayload)?;
    if end < start {
        return Err(ShambaOpsError::NoStructuredPayload);
    }

    let payload: Value = serde_json::from_str(&text[start..=end])
        .map_err(|e| ShambaOpsError::MalformedPayload(e.to_string()))?;
    let object = payload
        .as_object()
        .ok_or_else(|| ShambaOpsError::MalformedPayload("payload is not a JSON object".into()))?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ShambaOpsError::IncompleteResponse { fields: missing });
    }

    // Values are taken as-is where possible; season/crop strings that do
    // not resolve fall back to the request context.
    let season = object
        .get("season")
        .and_then(Value::as_str)
        .and_then(Season::from_str)
        .unwrap_or(ctx.season);
    let crop = object
        .get("crop")
        .and_then(Value::as_str)
        .and_then(Crop::from_str)
        .unwrap_or(ctx.crop);

    Ok(Advice {
        forecast_summary: string_field(object.get("forecast_summary")),
        season,
        crop,
        soil_ph_analysis: string_field(object.get("soil_ph_analysis")),
        growth_state_advice: string_field(object.get("growth_state_advice")),
        variety_tips: string_field(object.get("variety_tips")),
        actions: string_list(object.get("actions")),
        resources: record_list::<ResourceNeed>(object.get("resources")),
        diseases: record_list::<DiseaseRecord>(object.get("diseases")),
        warnings: string_list(object.get("warnings")),
        productivity_tips: string_list(object.get("productivity_tips")),
        metadata: AdviceMetadata {
            generated_at: now,
            advice_source: AdviceSource::GeminiAi,
            // Provisional block; the orchestrator stamps the final
            // metadata as its last step.
            location: ForecastLocation::new(ctx.summary.location.clone(), 0.0, 0.0),
            season: season.info(),
            additional_params: ctx.params.clone(),
            weather_service_available: false,
            ai_service_available: true,
            api_version: API_VERSION.to_string(),
        },
    })
}

fn string_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Normalize an array-typed field: a non-array (or absent) value becomes
/// an empty list rather than a failure. Non-string items are kept via
/// their JSON rendering.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Same normalization for record-shaped lists; entries that do not match
/// the expected record shape drop the whole list back to empty.
fn record_list<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    match value {
        Some(v @ Value::Array(_)) => serde_json::from_value(v.clone()).unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ctx_fixture() -> (ForecastSummary, AdditionalParams) {
        (ForecastSummary::neutral(), AdditionalParams::default())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap()
    }

    fn parse(text: &str) -> Result<Advice> {
        let (summary, params) = ctx_fixture();
        parse_external_advice(
            text,
            &ParseContext {
                summary: &summary,
                season: Season::LongDry,
                crop: Crop::Maize,
                params: &params,
            },
            now(),
        )
    }

    #[test]
    fn braced_span_is_extracted_from_surrounding_noise() {
        let text = concat!(
            "noise {\"forecast_summary\":\"x\",\"season\":\"longDry\",\"crop\":\"maize\",",
            "\"actions\":[],\"warnings\":[],\"productivity_tips\":[]} trailing"
        );
        let advice = parse(text).unwrap();
        assert_eq!(advice.forecast_summary, "x");
        assert_eq!(advice.season, Season::LongDry);
        assert_eq!(advice.crop, Crop::Maize);
        assert!(advice.actions.is_empty());
        assert_eq!(advice.metadata.advice_source, AdviceSource::GeminiAi);
    }

    #[test]
    fn missing_braces_mean_no_structured_payload() {
        assert!(matches!(
            parse("no json here at all"),
            Err(ShambaOpsError::NoStructuredPayload)
        ));
        assert!(matches!(
            parse("only an opening { and nothing else"),
            Err(ShambaOpsError::NoStructuredPayload)
        ));
        assert!(matches!(
            parse("} backwards {"),
            Err(ShambaOpsError::NoStructuredPayload)
        ));
    }

    #[test]
    fn unparsable_span_is_malformed() {
        assert!(matches!(
            parse("{not valid json}"),
            Err(ShambaOpsError::MalformedPayload(_))
        ));
    }

    #[test]
    fn missing_required_fields_are_named() {
        let text = r#"{"forecast_summary":"x","crop":"maize","actions":[]}"#;
        match parse(text) {
            Err(ShambaOpsError::IncompleteResponse { fields }) => {
                assert_eq!(fields, vec!["season", "warnings", "productivity_tips"]);
            }
            other => panic!("expected IncompleteResponse, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn non_array_fields_coerce_to_empty_lists() {
        let text = concat!(
            "{\"forecast_summary\":\"x\",\"season\":\"longDry\",\"crop\":\"maize\",",
            "\"actions\":\"do things\",\"warnings\":{},\"productivity_tips\":[\"keep records\"],",
            "\"resources\":\"none\",\"diseases\":[{\"bogus\":true}]}"
        );
        let advice = parse(text).unwrap();
        assert!(advice.actions.is_empty());
        assert!(advice.warnings.is_empty());
        assert_eq!(advice.productivity_tips, vec!["keep records".to_string()]);
        assert!(advice.resources.is_empty());
        assert!(advice.diseases.is_empty());
    }

    #[test]
    fn unresolvable_season_and_crop_fall_back_to_context() {
        let text = concat!(
            "{\"forecast_summary\":\"x\",\"season\":\"monsoon\",\"crop\":\"teff\",",
            "\"actions\":[],\"warnings\":[],\"productivity_tips\":[]}"
        );
        let advice = parse(text).unwrap();
        assert_eq!(advice.season, Season::LongDry);
        assert_eq!(advice.crop, Crop::Maize);
    }

    #[test]
    fn well_formed_records_survive_parsing() {
        let text = concat!(
            "{\"forecast_summary\":\"dry week\",\"season\":\"shortRains\",\"crop\":\"beans\",",
            "\"actions\":[\"plant\"],\"warnings\":[\"wind\"],\"productivity_tips\":[],",
            "\"resources\":[{\"resource\":\"seed\",\"purpose\":\"planting\",\"quantity\":\"10 kg\",",
            "\"cost_estimate\":\"KES 2,000\",\"source\":\"agrovet\"}]}"
        );
        let advice = parse(text).unwrap();
        assert_eq!(advice.season, Season::ShortRains);
        assert_eq!(advice.crop, Crop::Beans);
        assert_eq!(advice.resources.len(), 1);
        assert_eq!(advice.resources[0].resource, "seed");
        assert_eq!(advice.warnings, vec!["wind".to_string()]);
    }
}
