//! Soil profiles and the free-text soil classifier
//!
//! Descriptions arrive as free text from the soil detection collaborator
//! (e.g. "Clay soil - High water retention"). Matching is case-sensitive
//! substring search in a fixed priority order. A typed `SoilCategory`
//! bypasses keyword matching entirely.

use crate::impact::ImpactLabel;
use serde::{Deserialize, Serialize};

/// Closed set of soil categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilCategory {
    Clay,
    Silt,
    Loam,
    Sand,
    Rock,
}

/// Static reference data for one soil category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilProfile {
    pub category: SoilCategory,
    pub risk: ImpactLabel,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}

pub static SOIL_PROFILES: [SoilProfile; 5] = [
    SoilProfile {
        category: SoilCategory::Clay,
        risk: ImpactLabel::High,
        description: "High water retention, prone to instability when saturated",
        recommendations: &[
            "Monitor soil moisture",
            "Improve drainage",
            "Avoid construction during monsoon",
        ],
    },
    SoilProfile {
        category: SoilCategory::Silt,
        risk: ImpactLabel::Moderate,
        description: "Moderate stability, requires monitoring during heavy rainfall",
        recommendations: &[
            "Regular monitoring",
            "Maintain drainage",
            "Monitor during heavy rains",
        ],
    },
    SoilProfile {
        category: SoilCategory::Loam,
        risk: ImpactLabel::Low,
        description: "Balanced composition, generally stable",
        recommendations: &[
            "Routine checks",
            "Maintain vegetation",
            "Monitor during extreme weather",
        ],
    },
    SoilProfile {
        category: SoilCategory::Sand,
        risk: ImpactLabel::Low,
        description: "Good drainage, generally stable",
        recommendations: &[
            "Standard monitoring",
            "Prevent erosion",
            "Maintain vegetation",
        ],
    },
    SoilProfile {
        category: SoilCategory::Rock,
        risk: ImpactLabel::VeryLow,
        description: "High stability, excellent drainage",
        recommendations: &[
            "Minimal monitoring required",
            "Check for rock fall",
            "Standard safety measures",
        ],
    },
];

/// Keywords for the impact classifier, in priority order
const IMPACT_KEYWORDS: [(&str, ImpactLabel); 4] = [
    ("Clay", ImpactLabel::High),
    ("Silt", ImpactLabel::Moderate),
    ("Sandy", ImpactLabel::Low),
    ("Rocky", ImpactLabel::VeryLow),
];

/// Keywords for the scorer, in priority order
const POINT_KEYWORDS: [(&str, u32); 4] = [("Clay", 10), ("Silt", 7), ("Loamy", 5), ("Sandy", 3)];

/// Points for a description matching none of the scorer keywords
pub const FALLBACK_SOIL_POINTS: u32 = 1;

const CATEGORY_KEYWORDS: [(&str, SoilCategory); 5] = [
    ("Clay", SoilCategory::Clay),
    ("Silt", SoilCategory::Silt),
    ("Loamy", SoilCategory::Loam),
    ("Sandy", SoilCategory::Sand),
    ("Rocky", SoilCategory::Rock),
];

impl SoilCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilCategory::Clay => "clay",
            SoilCategory::Silt => "silt",
            SoilCategory::Loam => "loam",
            SoilCategory::Sand => "sand",
            SoilCategory::Rock => "rock",
        }
    }

    /// Detect a category from free text, first keyword wins
    pub fn from_description(description: &str) -> Option<SoilCategory> {
        CATEGORY_KEYWORDS
            .iter()
            .find(|(keyword, _)| description.contains(keyword))
            .map(|(_, category)| *category)
    }

    pub fn profile(&self) -> &'static SoilProfile {
        match self {
            SoilCategory::Clay => &SOIL_PROFILES[0],
            SoilCategory::Silt => &SOIL_PROFILES[1],
            SoilCategory::Loam => &SOIL_PROFILES[2],
            SoilCategory::Sand => &SOIL_PROFILES[3],
            SoilCategory::Rock => &SOIL_PROFILES[4],
        }
    }

    pub fn impact(&self) -> ImpactLabel {
        self.profile().risk
    }

    pub fn points(&self) -> u32 {
        match self {
            SoilCategory::Clay => 10,
            SoilCategory::Silt => 7,
            SoilCategory::Loam => 5,
            SoilCategory::Sand => 3,
            SoilCategory::Rock => FALLBACK_SOIL_POINTS,
        }
    }

    /// Whether this soil calls for close moisture monitoring
    pub fn is_clay(&self) -> bool {
        matches!(self, SoilCategory::Clay)
    }
}

impl std::fmt::Display for SoilCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a free-text soil description
///
/// No keyword (including an empty description) yields `Unknown`.
pub fn classify_soil(description: &str) -> ImpactLabel {
    IMPACT_KEYWORDS
        .iter()
        .find(|(keyword, _)| description.contains(keyword))
        .map(|(_, label)| *label)
        .unwrap_or(ImpactLabel::Unknown)
}

/// Scorer points for a free-text soil description
pub fn soil_points(description: &str) -> u32 {
    POINT_KEYWORDS
        .iter()
        .find(|(keyword, _)| description.contains(keyword))
        .map(|(_, points)| *points)
        .unwrap_or(FALLBACK_SOIL_POINTS)
}
