use super::AdviceFragment;
use crate::knowledge::{CropProfile, KnowledgeBase};

/// Soil pH rule - compares a measured pH against the crop's tolerated
/// band.
///
/// Contributions:
/// - unsuitable pH: warning + remediation action (lime when too acidic,
///   sulfur/organic matter when too alkaline)
/// - suitable pH: maintenance productivity tip
/// - always: the pH analysis narrative, plus the generic pH-category
///   description as a tip when the value falls in a known band
pub(super) fn evaluate(
    kb: &KnowledgeBase,
    profile: &CropProfile,
    soil_ph: Option<f64>,
) -> Option<AdviceFragment> {
    let ph = soil_ph?;
    let mut fragment = AdviceFragment::default();
    let range = &profile.ph_range;
    let crop_name = profile.crop.display_name();

    if range.contains(ph) {
        fragment.soil_ph_analysis = Some(format!(
            "Soil pH {:.1} suits {} (tolerated {:.1}-{:.1}, optimal {:.1})",
            ph, crop_name, range.min, range.max, range.optimal
        ));
        fragment.productivity_tips.push(format!(
            "Soil pH {:.1} is in the right range for {}; maintain it with regular compost or manure",
            ph, crop_name
        ));
    } else if ph < range.min {
        fragment.soil_ph_analysis = Some(format!(
            "Soil pH {:.1} is too acidic for {} (tolerated {:.1}-{:.1}); raise it before planting",
            ph, crop_name, range.min, range.max
        ));
        fragment.warnings.push(format!(
            "Soil pH {:.1} is below the {:.1}-{:.1} band {} tolerates",
            ph, range.min, range.max, crop_name
        ));
        fragment
            .actions
            .push("Apply agricultural lime to raise the soil pH".to_string());
    } else {
        fragment.soil_ph_analysis = Some(format!(
            "Soil pH {:.1} is too alkaline for {} (tolerated {:.1}-{:.1}); lower it before planting",
            ph, crop_name, range.min, range.max
        ));
        fragment.warnings.push(format!(
            "Soil pH {:.1} is above the {:.1}-{:.1} band {} tolerates",
            ph, range.min, range.max, crop_name
        ));
        fragment.actions.push(
            "Work in elemental sulfur or acidic organic matter to lower the soil pH".to_string(),
        );
    }

    if let Some(category) = kb.soil_ph_category(ph) {
        fragment
            .productivity_tips
            .push(category.description.to_string());
    }

    Some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Crop;

    #[test]
    fn absent_ph_contributes_nothing() {
        let kb = KnowledgeBase::new();
        let profile = kb.crop_profile(Crop::Maize);
        assert!(evaluate(&kb, profile, None).is_none());
    }

    #[test]
    fn acidic_value_warns_and_recommends_lime() {
        let kb = KnowledgeBase::new();
        let profile = kb.crop_profile(Crop::Maize); // tolerates 5.5-7.0
        let fragment = evaluate(&kb, profile, Some(5.0)).unwrap();
        assert!(fragment.soil_ph_analysis.unwrap().contains("too acidic"));
        assert_eq!(fragment.warnings.len(), 1);
        assert!(fragment.actions[0].contains("lime"));
    }

    #[test]
    fn alkaline_value_recommends_sulfur() {
        let kb = KnowledgeBase::new();
        let profile = kb.crop_profile(Crop::Maize);
        let fragment = evaluate(&kb, profile, Some(8.0)).unwrap();
        assert!(fragment.soil_ph_analysis.unwrap().contains("too alkaline"));
        assert!(fragment.actions[0].contains("sulfur"));
    }

    #[test]
    fn suitable_value_tips_instead_of_warning() {
        let kb = KnowledgeBase::new();
        let profile = kb.crop_profile(Crop::Maize);
        let fragment = evaluate(&kb, profile, Some(6.5)).unwrap();
        assert!(fragment.warnings.is_empty());
        assert!(fragment.actions.is_empty());
        // suitability tip plus the band description
        assert_eq!(fragment.productivity_tips.len(), 2);
    }

    #[test]
    fn category_tip_is_skipped_outside_all_bands() {
        let kb = KnowledgeBase::new();
        let profile = kb.crop_profile(Crop::Bananas); // tolerates up to 7.5
        // 8.6 is alkaline for the crop and outside the category table
        let fragment = evaluate(&kb, profile, Some(8.6)).unwrap();
        assert_eq!(fragment.productivity_tips.len(), 0);
        assert_eq!(fragment.warnings.len(), 1);
    }
}
