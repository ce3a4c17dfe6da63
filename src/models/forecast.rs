use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Location block echoed from the forecast provider (or the configured
/// default when no coordinates were supplied).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ForecastLocation {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// A single 3-hour forecast interval, already converted out of the
/// provider's wire units (Kelvin, m/s) by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub temp_c: f64,
    /// Rain falling within this interval; 0.0 when the provider omitted
    /// the rain block.
    pub precipitation_mm: f64,
    pub wind_speed_ms: f64,
    pub conditions: Vec<String>,
}

/// Raw chronological forecast as returned by the provider client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub location: ForecastLocation,
    pub points: Vec<ForecastPoint>,
}

/// Fixed-horizon aggregate of a forecast payload.
///
/// `warnings` starts empty and is populated exactly once by the warning
/// generator before the summary reaches an advisor. The interval counts
/// keep the provider's 3-hour granularity, hence the `_hours` names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub location: String,
    pub total_rainfall_mm: f64,
    pub max_temperature_c: f64,
    pub min_temperature_c: f64,
    pub max_wind_speed_kmh: i64,
    pub rain_hours: u32,
    pub heavy_rain_hours: u32,
    pub windy_hours: u32,
    pub conditions: BTreeSet<String>,
    pub warnings: Vec<String>,
}

impl ForecastSummary {
    /// Substitute summary used when the forecast provider is down or not
    /// configured: no rain, mild 15-25°C, light wind.
    pub fn neutral() -> Self {
        let mut conditions = BTreeSet::new();
        conditions.insert("unknown".to_string());
        Self {
            location: "Unknown".to_string(),
            total_rainfall_mm: 0.0,
            max_temperature_c: 25.0,
            min_temperature_c: 15.0,
            max_wind_speed_kmh: 8,
            rain_hours: 0,
            heavy_rain_hours: 0,
            windy_hours: 0,
            conditions,
            warnings: Vec::new(),
        }
    }

    /// True when the whole window is rain-free (no accumulated rainfall
    /// and no intervals with any precipitation).
    pub fn no_rain_expected(&self) -> bool {
        self.total_rainfall_mm == 0.0 && self.rain_hours == 0
    }
}
