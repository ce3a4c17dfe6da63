use crate::models::GrowthStage;

/// Metadata for one growth stage: what it is, how long it runs, and the
/// two stage-specific actions the rule-based advisor appends.
#[derive(Debug, Clone, Copy)]
pub struct StageInfo {
    pub stage: GrowthStage,
    pub description: &'static str,
    pub duration: &'static str,
    pub actions: [&'static str; 2],
}

pub fn stage_info(stage: GrowthStage) -> StageInfo {
    match stage {
        GrowthStage::Germination => StageInfo {
            stage,
            description: "Seed sprouting and early root establishment",
            duration: "1-3 weeks",
            actions: [
                "Keep the seedbed moist with light, frequent watering",
                "Protect emerging seedlings from birds, cutworms and soil pests",
            ],
        },
        GrowthStage::Vegetative => StageInfo {
            stage,
            description: "Rapid leaf and stem growth",
            duration: "3-8 weeks",
            actions: [
                "Top-dress with nitrogen fertilizer to drive leaf growth",
                "Weed every 2-3 weeks so the crop does not compete for nutrients",
            ],
        },
        GrowthStage::Flowering => StageInfo {
            stage,
            description: "Flower formation and pollination",
            duration: "2-4 weeks",
            actions: [
                "Keep watering consistent; moisture stress now cuts yield directly",
                "Avoid spraying pesticides during hours when pollinators are active",
            ],
        },
        GrowthStage::Fruiting => StageInfo {
            stage,
            description: "Grain fill, fruit development and ripening",
            duration: "4-10 weeks",
            actions: [
                "Apply potassium-rich fertilizer to fill grain and fruit",
                "Stake or prop heavy stems so they do not lodge or break",
            ],
        },
    }
}
