use std::collections::BTreeSet;

use crate::error::{Result, ShambaOpsError};
use crate::knowledge::WeatherThresholds;
use crate::models::{ForecastPayload, ForecastSummary};

/// Default aggregation horizon: 16 three-hour intervals = 48 hours.
pub const FORECAST_HORIZON_POINTS: usize = 16;

const KMH_PER_MS: f64 = 3.6;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reduce a raw forecast payload to fixed aggregate metrics over the
/// first `horizon_points` intervals. Callers supply an already-bounded
/// or oversized list; anything past the horizon is ignored.
///
/// The returned summary has `warnings` empty; `generate_warnings`
/// populates it in a separate step.
pub fn summarize_forecast(
    payload: &ForecastPayload,
    horizon_points: usize,
    thresholds: &WeatherThresholds,
) -> Result<ForecastSummary> {
    if payload.points.is_empty() {
        return Err(ShambaOpsError::InvalidForecastData(
            "forecast contains no points".to_string(),
        ));
    }
    if payload.location.name.trim().is_empty() {
        return Err(ShambaOpsError::InvalidForecastData(
            "forecast has no location".to_string(),
        ));
    }

    let window = &payload.points[..payload.points.len().min(horizon_points)];

    let mut max_temp = f64::NEG_INFINITY;
    let mut min_temp = f64::INFINITY;
    let mut total_rain = 0.0;
    let mut max_wind_ms: f64 = 0.0;
    let mut rain_hours = 0;
    let mut heavy_rain_hours = 0;
    let mut windy_hours = 0;

    for point in window {
        max_temp = max_temp.max(point.temp_c);
        min_temp = min_temp.min(point.temp_c);
        if point.precipitation_mm > 0.0 {
            total_rain += point.precipitation_mm;
            rain_hours += 1;
        }
        if point.precipitation_mm >= thresholds.heavy_rain_mm {
            heavy_rain_hours += 1;
        }
        max_wind_ms = max_wind_ms.max(point.wind_speed_ms);
        if point.wind_speed_ms * KMH_PER_MS >= thresholds.wind_warning_kmh {
            windy_hours += 1;
        }
    }

    let max_temperature_c = round1(max_temp);
    let min_temperature_c = round1(min_temp);
    let total_rainfall_mm = round1(total_rain);
    let max_wind_speed_kmh = (max_wind_ms * KMH_PER_MS).round() as i64;

    let mut conditions = BTreeSet::new();
    if rain_hours > 0 {
        conditions.insert("rain".to_string());
    }
    if heavy_rain_hours > 0 {
        conditions.insert("heavy rain".to_string());
    }
    if windy_hours > 0 {
        conditions.insert("windy".to_string());
    }
    if max_temperature_c > thresholds.high_temp_c {
        conditions.insert("hot".to_string());
    }
    if min_temperature_c < thresholds.low_temp_c {
        conditions.insert("cold".to_string());
    }

    Ok(ForecastSummary {
        location: payload.location.name.clone(),
        total_rainfall_mm,
        max_temperature_c,
        min_temperature_c,
        max_wind_speed_kmh,
        rain_hours,
        heavy_rain_hours,
        windy_hours,
        conditions,
        warnings: Vec::new(),
    })
}

/// Derive the warning strings for a summary. Emission order is fixed:
/// high temperature, low temperature, wind (danger over warning), heavy
/// rain, then the no-rain advisory. Each condition is checked exactly
/// once.
pub fn generate_warnings(summary: &ForecastSummary, thresholds: &WeatherThresholds) -> Vec<String> {
    let mut warnings = Vec::new();

    if summary.max_temperature_c > thresholds.high_temp_c {
        warnings.push(format!(
            "High temperatures up to {:.1}°C expected; shade young plants and water in the evening",
            summary.max_temperature_c
        ));
    }
    if summary.min_temperature_c < thresholds.low_temp_c {
        warnings.push(format!(
            "Low temperatures down to {:.1}°C expected; cold stress can slow growth",
            summary.min_temperature_c
        ));
    }
    if summary.max_wind_speed_kmh as f64 >= thresholds.wind_danger_kmh {
        warnings.push(format!(
            "Dangerous winds up to {} km/h expected; secure structures and stop spraying",
            summary.max_wind_speed_kmh
        ));
    } else if summary.max_wind_speed_kmh as f64 >= thresholds.wind_warning_kmh {
        warnings.push(format!(
            "Strong winds up to {} km/h expected; sprays will drift and tall crops may lodge",
            summary.max_wind_speed_kmh
        ));
    }
    if summary.heavy_rain_hours > 0 {
        warnings.push(format!(
            "Heavy rain in {} forecast interval(s); expect waterlogging on poorly drained plots",
            summary.heavy_rain_hours
        ));
    }
    if summary.no_rain_expected() {
        warnings.push("No rain expected over the forecast window; plan irrigation".to_string());
    }

    warnings
}
