//! Assessment aggregation
//!
//! Composes the score, factor labels, zone label, and recommendations
//! into one `RiskAssessment`. Category boundaries here (`>= 70`, `>= 50`,
//! `>= 30`) differ from the recommendation tiers and are applied to the
//! final rounded percentage.

use crate::impact::{classify_factor, FactorKind, ImpactLabel};
use crate::recommend::recommend;
use crate::sample::EnvironmentalSample;
use crate::scoring::{score_breakdown, Jitter, NoJitter, ScoreBreakdown};
use crate::soil::classify_soil;
use crate::zone::ZoneTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Four-level risk classification of the final percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskCategory {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 70 {
            RiskCategory::VeryHigh
        } else if percentage >= 50 {
            RiskCategory::High
        } else if percentage >= 30 {
            RiskCategory::Moderate
        } else {
            RiskCategory::Low
        }
    }

    /// Display label, e.g. "Very High Risk"
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Moderate => "Moderate Risk",
            RiskCategory::High => "High Risk",
            RiskCategory::VeryHigh => "Very High Risk",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskCategory::VeryHigh => {
                "Immediate action required. High probability of landslide occurrence."
            }
            RiskCategory::High => {
                "Significant landslide risk. Enhanced monitoring and precautions needed."
            }
            RiskCategory::Moderate => {
                "Moderate landslide susceptibility. Regular monitoring advised."
            }
            RiskCategory::Low => "Low landslide probability. Standard precautions sufficient.",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Impact label per contributing factor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorImpacts {
    pub rainfall: ImpactLabel,
    pub topography: ImpactLabel,
    pub soil: ImpactLabel,
    pub location: ImpactLabel,
}

impl FactorImpacts {
    pub fn for_sample(sample: &EnvironmentalSample, zones: &ZoneTable) -> Self {
        let soil = match sample.soil_category {
            Some(category) => category.impact(),
            None => classify_soil(&sample.soil_description),
        };
        FactorImpacts {
            rainfall: classify_factor(sample.rainfall_annual_mm, FactorKind::Rainfall),
            topography: classify_factor(sample.slope_degrees, FactorKind::Slope),
            soil,
            location: zones.classify(sample.latitude, sample.longitude),
        }
    }
}

/// Landslide susceptibility result for one sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub percentage: u8,
    pub category: RiskCategory,
    pub description: String,
    pub factor_impacts: FactorImpacts,
    pub recommendations: Vec<String>,
}

/// Build an assessment from an already computed percentage
pub fn aggregate(percentage: u8, sample: &EnvironmentalSample, zones: &ZoneTable) -> RiskAssessment {
    let percentage = percentage.min(100);
    let category = RiskCategory::from_percentage(percentage);

    RiskAssessment {
        percentage,
        category,
        description: category.description().to_string(),
        factor_impacts: FactorImpacts::for_sample(sample, zones),
        recommendations: recommend(percentage, sample),
    }
}

/// Assess with the score breakdown alongside
pub fn assess_explained(
    sample: &EnvironmentalSample,
    zones: &ZoneTable,
    jitter: &mut dyn Jitter,
) -> (RiskAssessment, ScoreBreakdown) {
    let breakdown = score_breakdown(sample, jitter);
    debug!(
        raw = breakdown.raw(),
        jitter = breakdown.jitter,
        percentage = breakdown.percentage,
        "scored sample"
    );

    let assessment = aggregate(breakdown.percentage, sample, zones);
    debug!(category = ?assessment.category, "classified sample");

    (assessment, breakdown)
}

pub fn assess_with(
    sample: &EnvironmentalSample,
    zones: &ZoneTable,
    jitter: &mut dyn Jitter,
) -> RiskAssessment {
    assess_explained(sample, zones, jitter).0
}

/// Deterministic assessment against the built-in zones
pub fn assess(sample: &EnvironmentalSample) -> RiskAssessment {
    assess_with(sample, &ZoneTable::builtin(), &mut NoJitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::SoilCategory;

    fn sample(soil: &str, lat: f64, lng: f64) -> EnvironmentalSample {
        EnvironmentalSample {
            rainfall_annual_mm: 1200.0,
            precipitation_recent_mm: 120.0,
            slope_degrees: 25.0,
            elevation_meters: 800.0,
            soil_description: soil.to_string(),
            soil_category: None,
            latitude: lat,
            longitude: lng,
        }
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(RiskCategory::from_percentage(100), RiskCategory::VeryHigh);
        assert_eq!(RiskCategory::from_percentage(70), RiskCategory::VeryHigh);
        assert_eq!(RiskCategory::from_percentage(69), RiskCategory::High);
        assert_eq!(RiskCategory::from_percentage(50), RiskCategory::High);
        assert_eq!(RiskCategory::from_percentage(49), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_percentage(30), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_percentage(29), RiskCategory::Low);
        assert_eq!(RiskCategory::from_percentage(0), RiskCategory::Low);
    }

    #[test]
    fn test_moderate_scenario() {
        let assessment = assess(&sample("Loamy soil - Balanced composition", 20.5937, 78.9629));
        assert_eq!(assessment.percentage, 56);
        assert_eq!(assessment.category, RiskCategory::High);
        assert_eq!(assessment.description, RiskCategory::High.description());
        assert_eq!(
            assessment.factor_impacts,
            FactorImpacts {
                rainfall: ImpactLabel::Moderate,
                topography: ImpactLabel::Moderate,
                soil: ImpactLabel::Unknown,
                location: ImpactLabel::Moderate,
            }
        );
        // 56 falls in the "> 40" recommendation tier
        assert_eq!(assessment.recommendations[0], "Enhanced monitoring required");
        assert_eq!(assessment.recommendations.len(), 4);
    }

    #[test]
    fn test_typed_soil_impact() {
        let mut s = sample("", 31.1, 77.2);
        s.soil_category = Some(SoilCategory::Loam);
        let assessment = assess(&s);
        assert_eq!(assessment.factor_impacts.soil, ImpactLabel::Low);
        assert_eq!(assessment.factor_impacts.location, ImpactLabel::VeryHigh);
    }

    #[test]
    fn test_aggregate_uses_distinct_tiers() {
        // 70 is VeryHigh as a category but only the "> 40" recommendation tier
        let assessment = aggregate(70, &sample("Silt", 0.0, 0.0), &ZoneTable::builtin());
        assert_eq!(assessment.category, RiskCategory::VeryHigh);
        assert_eq!(assessment.recommendations[0], "Enhanced monitoring required");
    }

    #[test]
    fn test_json_field_names() {
        let assessment = assess(&sample("Clay soil", 10.0, 76.0));
        let value = serde_json::to_value(&assessment).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "category",
                "description",
                "factorImpacts",
                "percentage",
                "recommendations"
            ]
        );
        assert_eq!(value["factorImpacts"]["soil"], "High");
        assert_eq!(value["factorImpacts"]["location"], "High");
        assert_eq!(value["factorImpacts"]["topography"], "Moderate");
    }
}
