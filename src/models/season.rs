use serde::{Deserialize, Serialize};

/// The four fixed calendar-month bands of the regional agricultural
/// cycle. Exactly one season is active per calendar month; boundaries
/// are fixed month ranges, not derived from climate data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Season {
    ShortDry,
    LongRains,
    LongDry,
    ShortRains,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::ShortDry => "shortDry",
            Season::LongRains => "longRains",
            Season::LongDry => "longDry",
            Season::ShortRains => "shortRains",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shortdry" | "short dry" => Some(Season::ShortDry),
            "longrains" | "long rains" => Some(Season::LongRains),
            "longdry" | "long dry" => Some(Season::LongDry),
            "shortrains" | "short rains" => Some(Season::ShortRains),
            _ => None,
        }
    }

    /// Season for a calendar month (1-12).
    pub fn for_month(month: u32) -> Self {
        match month {
            1 | 2 => Season::ShortDry,
            3..=5 => Season::LongRains,
            6..=10 => Season::LongDry,
            _ => Season::ShortRains,
        }
    }

    pub fn is_rainy(&self) -> bool {
        matches!(self, Season::LongRains | Season::ShortRains)
    }

    pub fn is_dry(&self) -> bool {
        !self.is_rainy()
    }

    pub fn all() -> [Season; 4] {
        [
            Season::ShortDry,
            Season::LongRains,
            Season::LongDry,
            Season::ShortRains,
        ]
    }

    pub fn info(&self) -> SeasonInfo {
        let (description, start_month, end_month) = match self {
            Season::ShortDry => (
                "Short dry season - a hot, dry spell between the short and long rains",
                "January",
                "February",
            ),
            Season::LongRains => (
                "Long rains - the main planting season with heavy, reliable rainfall",
                "March",
                "May",
            ),
            Season::LongDry => (
                "Long dry season - cool months giving way to a hot, dry spell",
                "June",
                "October",
            ),
            Season::ShortRains => (
                "Short rains - the secondary planting season with lighter rainfall",
                "November",
                "December",
            ),
        };
        SeasonInfo {
            season: *self,
            description: description.to_string(),
            start_month: start_month.to_string(),
            end_month: end_month.to_string(),
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human-facing season metadata echoed into advice metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonInfo {
    pub season: Season,
    pub description: String,
    pub start_month: String,
    pub end_month: String,
}
