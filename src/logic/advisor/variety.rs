use super::AdviceFragment;
use crate::knowledge::CropProfile;
use crate::models::{DroughtResistance, ForecastSummary};

/// Variety rule - surfaces what is known about the named variety.
///
/// Contributions when the variety is recognized for the crop:
/// - two tips (the variety description, its drought resistance level)
/// - the variety narrative
/// - when drought resistance is low AND the forecast window holds no
///   rain at all: an extra warning and an extra irrigation action
///
/// An unrecognized variety contributes nothing; upstream validation only
/// guarantees the string is non-empty.
pub(super) fn evaluate(
    profile: &CropProfile,
    variety: Option<&str>,
    summary: &ForecastSummary,
) -> Option<AdviceFragment> {
    let requested = variety?;
    let (name, info) = profile.variety(requested)?;
    let mut fragment = AdviceFragment::default();

    fragment
        .productivity_tips
        .push(format!("{}: {}", name, info.description));
    fragment.productivity_tips.push(format!(
        "{} has {} drought resistance",
        name, info.drought_resistance
    ));
    fragment.variety_tips = Some(format!(
        "{} - {}. Drought resistance: {}.",
        name, info.description, info.drought_resistance
    ));

    if info.drought_resistance == DroughtResistance::Low && summary.total_rainfall_mm == 0.0 {
        fragment.warnings.push(format!(
            "{} copes poorly with drought and no rain is forecast",
            name
        ));
        fragment.actions.push(format!(
            "Set up supplemental irrigation for the {} plot; this variety will not ride out a dry spell",
            name
        ));
    }

    Some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::models::Crop;

    fn dry_summary() -> ForecastSummary {
        ForecastSummary::neutral()
    }

    #[test]
    fn absent_or_unrecognized_variety_contributes_nothing() {
        let kb = KnowledgeBase::new();
        let profile = kb.crop_profile(Crop::Maize);
        assert!(evaluate(profile, None, &dry_summary()).is_none());
        assert!(evaluate(profile, Some("B73"), &dry_summary()).is_none());
    }

    #[test]
    fn recognized_variety_contributes_two_tips_and_a_narrative() {
        let kb = KnowledgeBase::new();
        let profile = kb.crop_profile(Crop::Beans);
        let fragment = evaluate(profile, Some("rose coco"), &dry_summary()).unwrap();
        assert_eq!(fragment.productivity_tips.len(), 2);
        assert!(fragment.variety_tips.unwrap().contains("Rose Coco"));
        assert!(fragment.warnings.is_empty());
    }

    #[test]
    fn low_resistance_and_dry_window_add_warning_and_irrigation() {
        let kb = KnowledgeBase::new();
        let profile = kb.crop_profile(Crop::Maize);
        let fragment = evaluate(profile, Some("H614"), &dry_summary()).unwrap();
        assert_eq!(fragment.warnings.len(), 1);
        assert_eq!(fragment.actions.len(), 1);
        assert!(fragment.actions[0].contains("irrigation"));
    }

    #[test]
    fn low_resistance_with_rain_forecast_stays_quiet() {
        let kb = KnowledgeBase::new();
        let profile = kb.crop_profile(Crop::Maize);
        let mut summary = dry_summary();
        summary.total_rainfall_mm = 12.0;
        summary.rain_hours = 3;
        let fragment = evaluate(profile, Some("H614"), &summary).unwrap();
        assert!(fragment.warnings.is_empty());
        assert!(fragment.actions.is_empty());
    }
}
