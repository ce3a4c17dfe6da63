use super::AdviceFragment;
use crate::knowledge::WeatherThresholds;
use crate::models::{ForecastSummary, ResourceNeed};

/// Weather rule - reacts to the aggregated forecast.
///
/// Three independent checks, each contributing 2 actions and 1 resource
/// when it fires (0-3 may fire):
/// - completely dry window
/// - one or more heavy-rain intervals
/// - maximum wind at or above the warning threshold
pub(super) fn evaluate(summary: &ForecastSummary, thresholds: &WeatherThresholds) -> AdviceFragment {
    let mut fragment = AdviceFragment::default();

    if summary.no_rain_expected() {
        fragment.actions.extend([
            "Plan irrigation now; the forecast window is completely dry".to_string(),
            "Water deeply and less often to push roots down".to_string(),
        ]);
        fragment.resources.push(ResourceNeed::new(
            "Irrigation water",
            "Replace the missing rainfall",
            "20,000-30,000 L per acre per week",
            "KES 1,000-2,500",
            "Borehole or water vendor",
        ));
    }

    if summary.heavy_rain_hours > 0 {
        fragment.actions.extend([
            "Dig or clear trenches so storm water drains off the beds".to_string(),
            "Hold off fertilizer application until the heavy rain passes".to_string(),
        ]);
        fragment.resources.push(ResourceNeed::new(
            "Drainage tools (hoes, trenching spades)",
            "Move storm water off the plots",
            "Shared set",
            "KES 1,500-3,000",
            "Hardware shops",
        ));
    }

    if summary.max_wind_speed_kmh as f64 >= thresholds.wind_warning_kmh {
        fragment.actions.extend([
            "Stake tall plants and young trees before the wind arrives".to_string(),
            "Delay any spraying until the wind drops".to_string(),
        ]);
        fragment.resources.push(ResourceNeed::new(
            "Stakes and tying twine",
            "Support plants against wind damage",
            "50-100 stakes per acre",
            "KES 1,000-2,000",
            "Local suppliers",
        ));
    }

    fragment
}
