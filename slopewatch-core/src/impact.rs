//! Impact labels and the numeric factor classifier
//!
//! Breakpoints are evaluated top-down with strict greater-than
//! comparisons; the first match wins.

use serde::{Deserialize, Serialize};

/// Ordinal contribution of one factor to landslide risk
///
/// `Unknown` sits outside the ordinal scale and is never equal to `Moderate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactLabel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
    Unknown,
}

impl ImpactLabel {
    /// Human-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLabel::VeryLow => "Very Low",
            ImpactLabel::Low => "Low",
            ImpactLabel::Moderate => "Moderate",
            ImpactLabel::High => "High",
            ImpactLabel::VeryHigh => "Very High",
            ImpactLabel::Unknown => "Unknown",
        }
    }

    /// Position on the ordinal scale, `None` for `Unknown`
    pub fn rank(&self) -> Option<u8> {
        match self {
            ImpactLabel::VeryLow => Some(0),
            ImpactLabel::Low => Some(1),
            ImpactLabel::Moderate => Some(2),
            ImpactLabel::High => Some(3),
            ImpactLabel::VeryHigh => Some(4),
            ImpactLabel::Unknown => None,
        }
    }
}

impl std::fmt::Display for ImpactLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric factors known to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorKind {
    Rainfall,
    Slope,
    Precipitation,
    Elevation,
}

/// (VeryHigh, High, Moderate) lower thresholds, exclusive
const RAINFALL_BREAKPOINTS: [f64; 3] = [2000.0, 1500.0, 1000.0];
const SLOPE_BREAKPOINTS: [f64; 3] = [45.0, 30.0, 20.0];

/// Map a factor value to an impact label
///
/// Only rainfall and slope have breakpoints. Every other kind falls back
/// to `Moderate`.
pub fn classify_factor(value: f64, kind: FactorKind) -> ImpactLabel {
    let breakpoints = match kind {
        FactorKind::Rainfall => &RAINFALL_BREAKPOINTS,
        FactorKind::Slope => &SLOPE_BREAKPOINTS,
        FactorKind::Precipitation | FactorKind::Elevation => return ImpactLabel::Moderate,
    };

    let [very_high, high, moderate] = *breakpoints;
    if value > very_high {
        ImpactLabel::VeryHigh
    } else if value > high {
        ImpactLabel::High
    } else if value > moderate {
        ImpactLabel::Moderate
    } else {
        ImpactLabel::Low
    }
}
