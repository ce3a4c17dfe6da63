use super::AdviceFragment;
use crate::models::{ResourceNeed, Season};

/// Season rule - exactly one of four fixed branches fires, contributing
/// 3 actions and 2 resource needs for the active season.
pub(super) fn evaluate(season: Season) -> AdviceFragment {
    let mut fragment = AdviceFragment::default();
    match season {
        Season::ShortDry => {
            fragment.actions.extend([
                "Irrigate in the early morning or evening to cut evaporation losses".to_string(),
                "Mulch around plants to hold soil moisture through the dry spell".to_string(),
                "Prepare land and buy inputs now so planting can start when the long rains break"
                    .to_string(),
            ]);
            fragment.resources.push(ResourceNeed::new(
                "Mulch (dry grass or crop residue)",
                "Conserve soil moisture",
                "10-15 bags per acre",
                "KES 2,000-3,000",
                "Own farm or neighbours",
            ));
            fragment.resources.push(ResourceNeed::new(
                "Drip irrigation kit",
                "Water crops through the dry weeks",
                "1 kit per quarter acre",
                "KES 15,000-30,000",
                "Agro-dealers",
            ));
        }
        Season::LongRains => {
            fragment.actions.extend([
                "Plant early so the crop takes full advantage of the rains".to_string(),
                "Open drainage furrows so storm water leaves the plots quickly".to_string(),
                "Scout weekly for fungal disease; wet foliage spreads infection fast".to_string(),
            ]);
            fragment.resources.push(ResourceNeed::new(
                "Certified seed",
                "Main-season planting",
                "Per recommended seed rate",
                "KES 2,500-5,000 per acre",
                "Certified agro-dealers",
            ));
            fragment.resources.push(ResourceNeed::new(
                "Fungicide (mancozeb or copper-based)",
                "Control fungal pressure in the rains",
                "1-2 kg per acre",
                "KES 1,500-2,500",
                "Agrovet shops",
            ));
        }
        Season::LongDry => {
            fragment.actions.extend([
                "Ration stored water and irrigate only at critical growth points".to_string(),
                "Apply a thick mulch layer and shade vulnerable seedlings".to_string(),
                "Monitor for spider mites and aphids; they build up in hot, dry weather"
                    .to_string(),
            ]);
            fragment.resources.push(ResourceNeed::new(
                "Water storage tank",
                "Buffer irrigation water through the dry months",
                "1 x 5,000 L tank",
                "KES 25,000-40,000",
                "Hardware suppliers",
            ));
            fragment.resources.push(ResourceNeed::new(
                "Shade netting",
                "Protect seedlings from heat stress",
                "Per nursery area",
                "KES 3,000-6,000",
                "Agro-dealers",
            ));
        }
        Season::ShortRains => {
            fragment.actions.extend([
                "Plant quick-maturing varieties that finish before the rains end".to_string(),
                "Clear drainage channels before the storms arrive".to_string(),
                "Top-dress just after rain while the soil is still moist".to_string(),
            ]);
            fragment.resources.push(ResourceNeed::new(
                "Quick-maturing certified seed",
                "Short-season planting",
                "Per recommended seed rate",
                "KES 2,000-4,000 per acre",
                "Certified agro-dealers",
            ));
            fragment.resources.push(ResourceNeed::new(
                "Fungicide",
                "Head off leaf disease in the wet spell",
                "1 kg per acre",
                "KES 1,500-2,000",
                "Agrovet shops",
            ));
        }
    }
    fragment
}
