/// Static weather thresholds used by the summarizer, warning generator
/// and weather rule block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherThresholds {
    /// Rain in a single 3-hour interval at or above this counts as heavy.
    pub heavy_rain_mm: f64,
    pub high_temp_c: f64,
    pub low_temp_c: f64,
    /// Wind at or above this (km/h) counts an interval as windy and
    /// triggers the caution warning.
    pub wind_warning_kmh: f64,
    /// Wind at or above this (km/h) upgrades the warning to dangerous.
    pub wind_danger_kmh: f64,
}

impl Default for WeatherThresholds {
    fn default() -> Self {
        Self {
            heavy_rain_mm: 10.0,
            high_temp_c: 35.0,
            low_temp_c: 10.0,
            wind_warning_kmh: 25.0,
            wind_danger_kmh: 40.0,
        }
    }
}
