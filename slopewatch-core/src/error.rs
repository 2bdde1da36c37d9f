//! Validation errors raised at the input boundary

use serde::Serialize;
use thiserror::Error;

/// Input fields checked by the validator, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Latitude,
    Longitude,
    RainfallAnnualMm,
    PrecipitationRecentMm,
    SlopeDegrees,
    ElevationMeters,
}

impl Field {
    /// Boundary name of the field, as it appears in input records
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::RainfallAnnualMm => "rainfallAnnualMm",
            Field::PrecipitationRecentMm => "precipitationRecentMm",
            Field::SlopeDegrees => "slopeDegrees",
            Field::ElevationMeters => "elevationMeters",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Missing,
    NotNumeric,
    Negative,
    OutOfRange,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Missing => "is required",
            Reason::NotNumeric => "must be a finite number",
            Reason::Negative => "must not be negative",
            Reason::OutOfRange => "is out of range",
        }
    }
}

/// First offending field found by the input validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("please provide a valid {field} value: {field} {}", .reason.as_str())]
pub struct ValidationError {
    pub field: Field,
    pub reason: Reason,
}

impl ValidationError {
    pub fn new(field: Field, reason: Reason) -> Self {
        ValidationError { field, reason }
    }
}
