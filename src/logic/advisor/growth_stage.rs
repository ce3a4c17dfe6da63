use super::AdviceFragment;
use crate::knowledge::KnowledgeBase;
use crate::models::GrowthStage;

/// Growth stage rule - tailors advice to where the crop is in its
/// lifecycle.
///
/// Contributions:
/// - a tip naming the stage's description and typical duration
/// - the growth-stage narrative
/// - the stage's two fixed actions (germination: moisture/protection,
///   vegetative: nitrogen/weeding, flowering: water/pollinator safety,
///   fruiting: nutrition/support)
pub(super) fn evaluate(kb: &KnowledgeBase, stage: Option<GrowthStage>) -> Option<AdviceFragment> {
    let stage = stage?;
    let info = kb.stage_info(stage);
    let mut fragment = AdviceFragment::default();

    fragment.productivity_tips.push(format!(
        "{} stage ({}): {}",
        capitalize(stage.as_str()),
        info.duration,
        info.description
    ));
    fragment.growth_state_advice = Some(format!(
        "The crop is in the {} stage, which typically runs {}. {}",
        stage, info.duration, info.description
    ));
    fragment
        .actions
        .extend(info.actions.iter().map(|a| a.to_string()));

    Some(fragment)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
