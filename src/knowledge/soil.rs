/// A named soil pH band. The six bands are non-overlapping and together
/// cover 4.0-8.5; values outside that span have no category.
#[derive(Debug, Clone, Copy)]
pub struct SoilPhCategory {
    pub name: &'static str,
    /// Lower bound inclusive, upper bound exclusive (the final band is
    /// closed at 8.5).
    pub min: f64,
    pub max: f64,
    pub description: &'static str,
}

pub const CATEGORIES: [SoilPhCategory; 6] = [
    SoilPhCategory {
        name: "very strongly acidic",
        min: 4.0,
        max: 5.0,
        description: "Very strongly acidic soil; phosphorus locks up and most crops struggle",
    },
    SoilPhCategory {
        name: "strongly acidic",
        min: 5.0,
        max: 5.5,
        description: "Strongly acidic soil suited to acid-tolerant crops such as potatoes",
    },
    SoilPhCategory {
        name: "moderately acidic",
        min: 5.5,
        max: 6.0,
        description: "Moderately acidic soil; most staples do well with modest liming",
    },
    SoilPhCategory {
        name: "slightly acidic",
        min: 6.0,
        max: 6.8,
        description: "Slightly acidic soil; the sweet spot for most field crops",
    },
    SoilPhCategory {
        name: "neutral",
        min: 6.8,
        max: 7.3,
        description: "Neutral soil with nutrients readily available",
    },
    SoilPhCategory {
        name: "alkaline",
        min: 7.3,
        max: 8.5,
        description: "Alkaline soil; watch for iron and zinc deficiencies",
    },
];

pub fn category_for(ph: f64) -> Option<&'static SoilPhCategory> {
    CATEGORIES.iter().find(|c| {
        if c.max >= 8.5 {
            ph >= c.min && ph <= c.max
        } else {
            ph >= c.min && ph < c.max
        }
    })
}
