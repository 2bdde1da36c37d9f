//! Built-in sample scenarios and reference locations
//!
//! Used by the `scenarios` command and as fixtures. `expected` is the
//! level documented alongside each scenario, kept verbatim even where the
//! engine disagrees with it.

use crate::impact::ImpactLabel;
use crate::sample::{number, RawSample};

/// Map centre used when a scenario is run without coordinates
pub const DEFAULT_CENTER: (f64, f64) = (20.5937, 78.9629);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub name: &'static str,
    pub terrain: &'static str,
    pub rainfall_annual_mm: f64,
    pub precipitation_recent_mm: f64,
    pub slope_degrees: f64,
    pub elevation_meters: f64,
    pub soil_description: &'static str,
    pub expected: &'static str,
}

impl Scenario {
    /// Raw record for this scenario at the given coordinates
    pub fn to_raw(&self, latitude: f64, longitude: f64) -> RawSample {
        RawSample {
            rainfall_annual_mm: Some(number(self.rainfall_annual_mm)),
            precipitation_recent_mm: Some(number(self.precipitation_recent_mm)),
            slope_degrees: Some(number(self.slope_degrees)),
            elevation_meters: Some(number(self.elevation_meters)),
            soil_description: Some(self.soil_description.to_string()),
            soil_category: None,
            latitude: Some(number(latitude)),
            longitude: Some(number(longitude)),
        }
    }
}

pub static SCENARIOS: [Scenario; 4] = [
    Scenario {
        name: "High Risk Scenario",
        terrain: "Steep mountainous terrain",
        rainfall_annual_mm: 2500.0,
        precipitation_recent_mm: 250.0,
        slope_degrees: 50.0,
        elevation_meters: 1800.0,
        soil_description: "Clay soil - High water retention",
        expected: "Very High",
    },
    Scenario {
        name: "Moderate Risk Scenario",
        terrain: "Hilly region with good drainage",
        rainfall_annual_mm: 1200.0,
        precipitation_recent_mm: 120.0,
        slope_degrees: 25.0,
        elevation_meters: 800.0,
        soil_description: "Loamy soil - Balanced composition",
        expected: "Moderate",
    },
    Scenario {
        name: "Low Risk Scenario",
        terrain: "Gentle slopes with stable soil",
        rainfall_annual_mm: 800.0,
        precipitation_recent_mm: 50.0,
        slope_degrees: 15.0,
        elevation_meters: 300.0,
        soil_description: "Sandy soil - Good drainage",
        expected: "Low",
    },
    Scenario {
        name: "Monsoon Emergency Scenario",
        terrain: "Clay-rich slopes during heavy rains",
        rainfall_annual_mm: 3000.0,
        precipitation_recent_mm: 300.0,
        slope_degrees: 40.0,
        elevation_meters: 1200.0,
        soil_description: "Clay soil - High water retention",
        expected: "Very High",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub description: &'static str,
}

pub static LOCATIONS: [Location; 6] = [
    Location {
        name: "Mumbai, Maharashtra",
        latitude: 19.0760,
        longitude: 72.8777,
        description: "Coastal city with moderate landslide risk in hilly areas",
    },
    Location {
        name: "Darjeeling, West Bengal",
        latitude: 27.0360,
        longitude: 88.2627,
        description: "Himalayan hill station with high landslide susceptibility",
    },
    Location {
        name: "Munnar, Kerala",
        latitude: 10.0889,
        longitude: 77.0595,
        description: "Western Ghats hill station with monsoon-related risks",
    },
    Location {
        name: "Shimla, Himachal Pradesh",
        latitude: 31.1048,
        longitude: 77.1734,
        description: "Himalayan region with steep slopes and seismic activity",
    },
    Location {
        name: "Ooty, Tamil Nadu",
        latitude: 11.4064,
        longitude: 76.6932,
        description: "Nilgiri hills with moderate risk during monsoons",
    },
    Location {
        name: "Dehradun, Uttarakhand",
        latitude: 30.3165,
        longitude: 78.0322,
        description: "Foothills of Himalayas with variable risk zones",
    },
];

/// Recorded landslide at one of the sample locations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalIncident {
    /// ISO date
    pub date: &'static str,
    /// Matches a `Location::name`
    pub location: &'static str,
    pub severity: ImpactLabel,
    pub casualties: u32,
    pub cause: &'static str,
    pub area_affected_sq_km: f64,
}

pub static HISTORICAL_INCIDENTS: [HistoricalIncident; 3] = [
    HistoricalIncident {
        date: "2020-08-10",
        location: "Munnar, Kerala",
        severity: ImpactLabel::High,
        casualties: 15,
        cause: "Heavy monsoon rainfall",
        area_affected_sq_km: 2.5,
    },
    HistoricalIncident {
        date: "2018-07-15",
        location: "Darjeeling, West Bengal",
        severity: ImpactLabel::VeryHigh,
        casualties: 8,
        cause: "Prolonged rainfall and deforestation",
        area_affected_sq_km: 1.8,
    },
    HistoricalIncident {
        date: "2019-09-22",
        location: "Shimla, Himachal Pradesh",
        severity: ImpactLabel::Moderate,
        casualties: 3,
        cause: "Cloudbursts and steep slopes",
        area_affected_sq_km: 0.8,
    },
];

impl Location {
    /// Recorded incidents at this location, oldest first
    pub fn incidents(&self) -> Vec<&'static HistoricalIncident> {
        let mut found: Vec<_> = HISTORICAL_INCIDENTS
            .iter()
            .filter(|i| i.location == self.name)
            .collect();
        found.sort_by_key(|i| i.date);
        found
    }
}

/// Scenario by case-insensitive name fragment
pub fn find_scenario(fragment: &str) -> Option<&'static Scenario> {
    let needle = fragment.to_lowercase();
    SCENARIOS
        .iter()
        .find(|s| s.name.to_lowercase().contains(&needle))
}
