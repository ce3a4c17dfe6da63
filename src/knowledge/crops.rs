use std::collections::BTreeMap;

use crate::models::{Crop, DroughtResistance, GrowthStage, Season};

/// Soil pH band a crop tolerates, with the agronomic optimum. Kept
/// independent of the generic soil pH categories in `soil.rs`; the two
/// tables are not derivable from each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhRange {
    pub min: f64,
    pub max: f64,
    pub optimal: f64,
}

impl PhRange {
    pub fn contains(&self, ph: f64) -> bool {
        ph >= self.min && ph <= self.max
    }
}

#[derive(Debug, Clone)]
pub struct VarietyInfo {
    pub description: &'static str,
    pub drought_resistance: DroughtResistance,
}

/// Static per-crop record: water need, preferred season (`None` = grows
/// in any season), growth period, tolerated pH band, the ordered growth
/// stages, and the named varieties farmers actually plant.
#[derive(Debug, Clone)]
pub struct CropProfile {
    pub crop: Crop,
    pub water_need: &'static str,
    pub best_season: Option<Season>,
    pub growing_period: &'static str,
    pub ph_range: PhRange,
    pub stages: [GrowthStage; 4],
    pub varieties: BTreeMap<&'static str, VarietyInfo>,
}

impl CropProfile {
    /// Case-insensitive variety lookup.
    pub fn variety(&self, name: &str) -> Option<(&'static str, &VarietyInfo)> {
        let wanted = name.trim().to_lowercase();
        self.varieties
            .iter()
            .find(|(key, _)| key.to_lowercase() == wanted)
            .map(|(key, info)| (*key, info))
    }
}

fn variety(
    name: &'static str,
    description: &'static str,
    drought_resistance: DroughtResistance,
) -> (&'static str, VarietyInfo) {
    (
        name,
        VarietyInfo {
            description,
            drought_resistance,
        },
    )
}

pub(super) fn build_crop_table() -> BTreeMap<Crop, CropProfile> {
    let stages = GrowthStage::all();
    let mut table = BTreeMap::new();

    table.insert(
        Crop::Maize,
        CropProfile {
            crop: Crop::Maize,
            water_need: "high",
            best_season: Some(Season::LongRains),
            growing_period: "90-120 days",
            ph_range: PhRange {
                min: 5.5,
                max: 7.0,
                optimal: 6.2,
            },
            stages,
            varieties: BTreeMap::from([
                variety(
                    "H614",
                    "Late-maturing highland hybrid favoured in high-rainfall zones",
                    DroughtResistance::Low,
                ),
                variety(
                    "DK8031",
                    "Early-maturing hybrid suited to mid-altitude zones",
                    DroughtResistance::Moderate,
                ),
                variety(
                    "Katumani",
                    "Open-pollinated dryland composite bred for the short rains",
                    DroughtResistance::High,
                ),
            ]),
        },
    );

    table.insert(
        Crop::Beans,
        CropProfile {
            crop: Crop::Beans,
            water_need: "moderate",
            best_season: Some(Season::ShortRains),
            growing_period: "60-90 days",
            ph_range: PhRange {
                min: 6.0,
                max: 7.5,
                optimal: 6.5,
            },
            stages,
            varieties: BTreeMap::from([
                variety(
                    "Rose Coco",
                    "Popular mottled-seed type with a ready market",
                    DroughtResistance::Moderate,
                ),
                variety(
                    "Mwitemania",
                    "Drought-tolerant bush bean for drier mid-altitudes",
                    DroughtResistance::High,
                ),
                variety(
                    "Canadian Wonder",
                    "Large-seeded red bean that needs steady moisture",
                    DroughtResistance::Low,
                ),
            ]),
        },
    );

    table.insert(
        Crop::Potatoes,
        CropProfile {
            crop: Crop::Potatoes,
            water_need: "high",
            best_season: Some(Season::LongRains),
            growing_period: "90-120 days",
            ph_range: PhRange {
                min: 5.0,
                max: 6.5,
                optimal: 5.8,
            },
            stages,
            varieties: BTreeMap::from([
                variety(
                    "Shangi",
                    "Fast-maturing, short-dormancy variety dominating local markets",
                    DroughtResistance::Moderate,
                ),
                variety(
                    "Kenya Mpya",
                    "High-yielding variety with good late blight tolerance",
                    DroughtResistance::High,
                ),
                variety(
                    "Dutch Robijn",
                    "Red-skinned processing favourite that suffers in dry spells",
                    DroughtResistance::Low,
                ),
            ]),
        },
    );

    table.insert(
        Crop::Bananas,
        CropProfile {
            crop: Crop::Bananas,
            water_need: "high",
            best_season: None,
            growing_period: "12-18 months",
            ph_range: PhRange {
                min: 5.5,
                max: 7.5,
                optimal: 6.5,
            },
            stages,
            varieties: BTreeMap::from([
                variety(
                    "Grand Naine",
                    "Cavendish dessert type for well-watered or irrigated plots",
                    DroughtResistance::Low,
                ),
                variety(
                    "Gros Michel",
                    "Tall sweet variety common in backyard stands",
                    DroughtResistance::Moderate,
                ),
                variety(
                    "FHIA-17",
                    "Hardy hybrid tolerant of drought and leaf disease",
                    DroughtResistance::High,
                ),
            ]),
        },
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_crop() {
        let table = build_crop_table();
        for crop in Crop::all() {
            assert!(table.contains_key(&crop), "missing {}", crop.as_str());
        }
    }

    #[test]
    fn variety_lookup_is_case_insensitive() {
        let table = build_crop_table();
        let maize = &table[&Crop::Maize];
        let (name, info) = maize.variety("katumani").unwrap();
        assert_eq!(name, "Katumani");
        assert_eq!(info.drought_resistance, DroughtResistance::High);
        assert!(maize.variety("B73").is_none());
    }

    #[test]
    fn ph_range_bounds_are_inclusive() {
        let range = PhRange {
            min: 5.5,
            max: 7.0,
            optimal: 6.2,
        };
        assert!(range.contains(5.5));
        assert!(range.contains(7.0));
        assert!(!range.contains(5.4));
        assert!(!range.contains(7.1));
    }

    #[test]
    fn optimal_ph_lies_inside_each_crops_own_range() {
        for profile in build_crop_table().values() {
            assert!(
                profile.ph_range.contains(profile.ph_range.optimal),
                "{} optimal outside range",
                profile.crop.as_str()
            );
        }
    }
}
