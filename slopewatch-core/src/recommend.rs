//! Mitigation recommendations
//!
//! A base tier chosen by percentage (`> 70`, `> 40`, `> 20`, else), then
//! factor-specific items appended in fixed order. Items accumulate with
//! no deduplication; list order is priority order.

use crate::sample::EnvironmentalSample;

const VERY_HIGH_TIER: [&str; 4] = [
    "Immediate evacuation planning recommended",
    "Install early warning systems",
    "Restrict construction activities",
    "Implement emergency response protocols",
];

const ELEVATED_TIER: [&str; 4] = [
    "Enhanced monitoring required",
    "Consider drainage improvements",
    "Regular slope stability assessments",
    "Community awareness programs",
];

const ROUTINE_TIER: [&str; 3] = [
    "Routine monitoring advised",
    "Maintain proper drainage systems",
    "Regular geological surveys",
];

const BASELINE_TIER: [&str; 3] = [
    "Standard monitoring protocols",
    "Maintain awareness of weather conditions",
    "Regular inspection of slopes",
];

pub const MONSOON_CAUTION: &str = "Extra caution during monsoon season";
pub const SLOPE_STABILIZATION: &str = "Consider slope stabilization measures";
pub const SOIL_MOISTURE: &str = "Monitor soil moisture levels closely";

/// Base tier for a percentage
pub fn base_tier(percentage: u8) -> &'static [&'static str] {
    if percentage > 70 {
        &VERY_HIGH_TIER
    } else if percentage > 40 {
        &ELEVATED_TIER
    } else if percentage > 20 {
        &ROUTINE_TIER
    } else {
        &BASELINE_TIER
    }
}

fn is_clay(sample: &EnvironmentalSample) -> bool {
    match sample.soil_category {
        Some(category) => category.is_clay(),
        None => sample.soil_description.contains("Clay"),
    }
}

/// Ordered recommendation list for a scored sample
pub fn recommend(percentage: u8, sample: &EnvironmentalSample) -> Vec<String> {
    let mut recommendations: Vec<String> =
        base_tier(percentage).iter().map(|s| s.to_string()).collect();

    if sample.rainfall_annual_mm > 2000.0 {
        recommendations.push(MONSOON_CAUTION.to_string());
    }
    if sample.slope_degrees > 30.0 {
        recommendations.push(SLOPE_STABILIZATION.to_string());
    }
    if is_clay(sample) {
        recommendations.push(SOIL_MOISTURE.to_string());
    }

    recommendations
}
