use serde::{Deserialize, Serialize};

/// Supported crops. String resolution is case-insensitive so callers can
/// send "Maize" or "MAIZE".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Maize,
    Beans,
    Potatoes,
    Bananas,
}

impl Crop {
    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Maize => "maize",
            Crop::Beans => "beans",
            Crop::Potatoes => "potatoes",
            Crop::Bananas => "bananas",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Crop::Maize => "Maize",
            Crop::Beans => "Beans",
            Crop::Potatoes => "Potatoes",
            Crop::Bananas => "Bananas",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "maize" => Some(Crop::Maize),
            "beans" => Some(Crop::Beans),
            "potatoes" => Some(Crop::Potatoes),
            "bananas" => Some(Crop::Bananas),
            _ => None,
        }
    }

    pub fn all() -> [Crop; 4] {
        [Crop::Maize, Crop::Beans, Crop::Potatoes, Crop::Bananas]
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four fixed crop-lifecycle phases, in growing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    Germination,
    Vegetative,
    Flowering,
    Fruiting,
}

impl GrowthStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Germination => "germination",
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::Flowering => "flowering",
            GrowthStage::Fruiting => "fruiting",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "germination" => Some(GrowthStage::Germination),
            "vegetative" => Some(GrowthStage::Vegetative),
            "flowering" => Some(GrowthStage::Flowering),
            "fruiting" => Some(GrowthStage::Fruiting),
            _ => None,
        }
    }

    pub fn all() -> [GrowthStage; 4] {
        [
            GrowthStage::Germination,
            GrowthStage::Vegetative,
            GrowthStage::Flowering,
            GrowthStage::Fruiting,
        ]
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Qualitative drought tolerance of a crop variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DroughtResistance {
    Low,
    Moderate,
    High,
}

impl DroughtResistance {
    pub fn as_str(&self) -> &'static str {
        match self {
            DroughtResistance::Low => "low",
            DroughtResistance::Moderate => "moderate",
            DroughtResistance::High => "high",
        }
    }
}

impl std::fmt::Display for DroughtResistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Qualitative seasonal risk level for a disease record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
