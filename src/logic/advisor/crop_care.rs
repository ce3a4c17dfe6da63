use super::AdviceFragment;
use crate::models::{Crop, DiseaseRecord, ResourceNeed, RiskLevel, Season};

/// Crop rule - exactly one of four fixed branches fires, contributing 3
/// productivity tips, 2 resource needs and 2 disease records. Each
/// disease carries its own per-season risk mapping; the high-risk season
/// differs disease by disease, it is not a generic wet/dry rule.
pub(super) fn evaluate(crop: Crop, season: Season) -> AdviceFragment {
    match crop {
        Crop::Maize => maize(season),
        Crop::Beans => beans(season),
        Crop::Potatoes => potatoes(season),
        Crop::Bananas => bananas(season),
    }
}

fn disease(
    name: &str,
    symptoms: &str,
    risk_factors: &str,
    prevention: &str,
    treatment: &str,
    seasonal_risk: RiskLevel,
) -> DiseaseRecord {
    DiseaseRecord {
        name: name.to_string(),
        symptoms: symptoms.to_string(),
        risk_factors: risk_factors.to_string(),
        prevention: prevention.to_string(),
        treatment: treatment.to_string(),
        seasonal_risk,
    }
}

fn maize(season: Season) -> AdviceFragment {
    let mut fragment = AdviceFragment::default();
    fragment.productivity_tips.extend([
        "Plant maize at the onset of steady rains with 75 cm between rows".to_string(),
        "Top-dress with CAN when the crop is knee high".to_string(),
        "Check funnels twice a week for fall armyworm and act early".to_string(),
    ]);
    fragment.resources.push(ResourceNeed::new(
        "DAP planting fertilizer",
        "Establish strong maize roots",
        "50 kg per acre",
        "KES 3,500-4,500 per bag",
        "Agrovet shops",
    ));
    fragment.resources.push(ResourceNeed::new(
        "CAN top-dressing fertilizer",
        "Drive vegetative growth",
        "50 kg per acre",
        "KES 3,000-4,000 per bag",
        "Agrovet shops",
    ));
    fragment.diseases.push(disease(
        "Gray Leaf Spot",
        "Rectangular grey-brown lesions running along the leaf veins",
        "Warm humid weather and continuous maize cropping",
        "Rotate with legumes and plant tolerant hybrids",
        "Spray a strobilurin fungicide at the first lesions",
        match season {
            Season::LongRains => RiskLevel::High,
            Season::ShortRains => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        },
    ));
    fragment.diseases.push(disease(
        "Maize Streak Virus",
        "Broken yellow streaks along young leaves and stunted plants",
        "Leafhopper flights after the rains begin",
        "Plant early and control grassy weeds that host leafhoppers",
        "Rogue infected plants and control leafhoppers with an approved insecticide",
        match season {
            Season::ShortRains => RiskLevel::High,
            Season::LongRains => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        },
    ));
    fragment
}

fn beans(season: Season) -> AdviceFragment {
    let mut fragment = AdviceFragment::default();
    fragment.productivity_tips.extend([
        "Inoculate bean seed with rhizobium for free nitrogen".to_string(),
        "Stay out of the bean plot while the foliage is wet".to_string(),
        "Harvest promptly once pods dry to prevent shattering".to_string(),
    ]);
    fragment.resources.push(ResourceNeed::new(
        "Rhizobium inoculant",
        "Fix nitrogen on bean roots",
        "1 sachet per 15 kg of seed",
        "KES 300-500",
        "Agro-dealers",
    ));
    fragment.resources.push(ResourceNeed::new(
        "Foliar feed",
        "Correct nutrient gaps at flowering",
        "1 L per acre",
        "KES 800-1,500",
        "Agrovet shops",
    ));
    fragment.diseases.push(disease(
        "Anthracnose",
        "Dark sunken lesions on pods, stems and leaf veins",
        "Cool wet weather and infected seed",
        "Use certified seed and rotate out of legumes for two seasons",
        "Spray a copper-based fungicide at the first sign",
        match season {
            Season::LongRains => RiskLevel::High,
            Season::ShortRains => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        },
    ));
    fragment.diseases.push(disease(
        "Bean Rust",
        "Rusty brown pustules on the underside of leaves",
        "Prolonged leaf wetness at moderate temperatures",
        "Plant resistant varieties and space rows for airflow",
        "Apply a triazole fungicide when pustules appear",
        match season {
            Season::ShortRains => RiskLevel::High,
            Season::LongRains => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        },
    ));
    fragment
}

fn potatoes(season: Season) -> AdviceFragment {
    let mut fragment = AdviceFragment::default();
    fragment.productivity_tips.extend([
        "Plant certified seed tubers; home-saved seed carries disease".to_string(),
        "Ridge the rows twice to stop tubers greening".to_string(),
        "Store harvested tubers in a dark, ventilated store".to_string(),
    ]);
    fragment.resources.push(ResourceNeed::new(
        "Certified seed tubers",
        "Clean planting material",
        "16 bags per acre",
        "KES 2,500-4,000 per bag",
        "Certified multipliers",
    ));
    fragment.resources.push(ResourceNeed::new(
        "NPK 17:17:17 fertilizer",
        "Balanced tuber nutrition",
        "200 kg per acre",
        "KES 3,200-4,200 per 50 kg bag",
        "Agrovet shops",
    ));
    fragment.diseases.push(disease(
        "Late Blight",
        "Water-soaked leaf patches turning brown with white mould beneath",
        "Cool nights, misty mornings and extended leaf wetness",
        "Plant tolerant varieties and start protectant sprays before the rains peak",
        "Alternate systemic and contact fungicides weekly during outbreaks",
        if season.is_rainy() {
            RiskLevel::High
        } else {
            RiskLevel::Low
        },
    ));
    fragment.diseases.push(disease(
        "Bacterial Wilt",
        "Plants wilt in the heat of the day while still green",
        "Infected seed tubers and waterlogged soil",
        "Strict rotation and clean seed; rogue and burn infected plants",
        "No chemical cure; remove infected plants together with the surrounding soil",
        match season {
            Season::LongRains => RiskLevel::High,
            Season::ShortRains => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        },
    ));
    fragment
}

fn bananas(season: Season) -> AdviceFragment {
    let mut fragment = AdviceFragment::default();
    fragment.productivity_tips.extend([
        "De-leaf dead foliage to open the canopy and cut disease pressure".to_string(),
        "Maintain a mulch ring around each mat all year round".to_string(),
        "Prop heavy bunches so the pseudostem does not snap".to_string(),
    ]);
    fragment.resources.push(ResourceNeed::new(
        "Well-rotted manure",
        "Feed the banana mat",
        "1-2 wheelbarrows per mat per year",
        "KES 500-1,000 per load",
        "Own farm or livestock keepers",
    ));
    fragment.resources.push(ResourceNeed::new(
        "Forked props",
        "Support fruiting pseudostems",
        "1 per fruiting mat",
        "KES 100-200 each",
        "Local suppliers",
    ));
    fragment.diseases.push(disease(
        "Black Sigatoka",
        "Dark leaf streaks that merge until the leaf dries out",
        "Warm wet weather with long leaf wetness",
        "Remove infected leaves and widen spacing for airflow",
        "Protectant oil and fungicide sprays on a schedule",
        match season {
            Season::LongRains => RiskLevel::High,
            Season::ShortRains => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        },
    ));
    fragment.diseases.push(disease(
        "Panama Disease",
        "Yellowing older leaves that collapse around the stem",
        "Infected planting material and contaminated soil or runoff",
        "Use clean tissue-culture plantlets on fresh ground",
        "No cure; destroy infected mats and quarantine the spot",
        match season {
            Season::LongRains => RiskLevel::High,
            _ => RiskLevel::Moderate,
        },
    ));
    fragment
}
