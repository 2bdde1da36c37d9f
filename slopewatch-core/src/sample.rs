//! Environmental samples and the input validator
//!
//! `RawSample` is the untyped boundary record handed over by the UI or
//! data collaborators. `validate` turns it into an `EnvironmentalSample`
//! or fails on the first offending field.
//!
//! Check order: latitude, longitude, rainfall, precipitation, slope, elevation.

use crate::error::{Field, Reason, ValidationError};
use crate::soil::SoilCategory;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Candidate input record as received at the boundary
///
/// Numeric fields stay untyped until validation so that missing,
/// non-numeric, and negative values can each be reported by field name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSample {
    #[serde(default)]
    pub rainfall_annual_mm: Option<Value>,
    #[serde(default)]
    pub precipitation_recent_mm: Option<Value>,
    #[serde(default)]
    pub slope_degrees: Option<Value>,
    #[serde(default)]
    pub elevation_meters: Option<Value>,
    #[serde(default)]
    pub soil_description: Option<String>,
    /// Typed soil category, when the collaborator can supply one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_category: Option<SoilCategory>,
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
}

/// Validated measurements for one geographic point
///
/// Constructed fresh per assessment request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalSample {
    pub rainfall_annual_mm: f64,
    pub precipitation_recent_mm: f64,
    pub slope_degrees: f64,
    pub elevation_meters: f64,
    pub soil_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_category: Option<SoilCategory>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Wrap a number for a `RawSample` field
///
/// Non-finite values are kept as text so the validator reports them as
/// non-numeric instead of missing.
pub fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(value.to_string()))
}

impl RawSample {
    /// Build a raw record from already-parsed numbers (CLI flags, tests)
    #[allow(clippy::too_many_arguments)]
    pub fn from_numbers(
        rainfall_annual_mm: Option<f64>,
        precipitation_recent_mm: Option<f64>,
        slope_degrees: Option<f64>,
        elevation_meters: Option<f64>,
        soil_description: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        RawSample {
            rainfall_annual_mm: rainfall_annual_mm.map(number),
            precipitation_recent_mm: precipitation_recent_mm.map(number),
            slope_degrees: slope_degrees.map(number),
            elevation_meters: elevation_meters.map(number),
            soil_description,
            soil_category: None,
            latitude: latitude.map(number),
            longitude: longitude.map(number),
        }
    }

    /// Validate this record, see [`validate`]
    pub fn validate(&self) -> Result<EnvironmentalSample, ValidationError> {
        validate(self)
    }
}

/// Check a raw record for completeness and range validity
pub fn validate(raw: &RawSample) -> Result<EnvironmentalSample, ValidationError> {
    let latitude = coordinate(raw.latitude.as_ref(), Field::Latitude, 90.0)?;
    let longitude = coordinate(raw.longitude.as_ref(), Field::Longitude, 180.0)?;

    let rainfall_annual_mm = measurement(raw.rainfall_annual_mm.as_ref(), Field::RainfallAnnualMm)?;
    let precipitation_recent_mm =
        measurement(raw.precipitation_recent_mm.as_ref(), Field::PrecipitationRecentMm)?;
    let slope_degrees = measurement(raw.slope_degrees.as_ref(), Field::SlopeDegrees)?;
    let elevation_meters = measurement(raw.elevation_meters.as_ref(), Field::ElevationMeters)?;

    Ok(EnvironmentalSample {
        rainfall_annual_mm,
        precipitation_recent_mm,
        slope_degrees,
        elevation_meters,
        soil_description: raw.soil_description.clone().unwrap_or_default(),
        soil_category: raw.soil_category,
        latitude,
        longitude,
    })
}

/// Extract a finite number; `null` counts as missing
fn numeric(value: Option<&Value>, field: Field) -> Result<f64, ValidationError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(ValidationError::new(field, Reason::Missing)),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(ValidationError::new(field, Reason::Missing))
        }
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::new(field, Reason::NotNumeric)),
    }
}

fn measurement(value: Option<&Value>, field: Field) -> Result<f64, ValidationError> {
    let v = numeric(value, field)?;
    if v < 0.0 {
        return Err(ValidationError::new(field, Reason::Negative));
    }
    Ok(v)
}

fn coordinate(value: Option<&Value>, field: Field, limit: f64) -> Result<f64, ValidationError> {
    let v = numeric(value, field)?;
    if !(-limit..=limit).contains(&v) {
        return Err(ValidationError::new(field, Reason::OutOfRange));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> RawSample {
        RawSample::from_numbers(
            Some(1200.0),
            Some(120.0),
            Some(25.0),
            Some(800.0),
            Some("Loamy soil - Balanced composition".to_string()),
            Some(10.0889),
            Some(77.0595),
        )
    }

    #[test]
    fn test_complete_record_validates() {
        let sample = complete().validate().unwrap();
        assert_eq!(sample.rainfall_annual_mm, 1200.0);
        assert_eq!(sample.slope_degrees, 25.0);
        assert_eq!(sample.soil_description, "Loamy soil - Balanced composition");
        assert_eq!(sample.latitude, 10.0889);
    }

    #[test]
    fn test_missing_coordinates_reported_first() {
        let mut raw = complete();
        raw.latitude = None;
        raw.rainfall_annual_mm = None;
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field, Field::Latitude);
        assert_eq!(err.reason, Reason::Missing);
    }

    #[test]
    fn test_missing_longitude() {
        let mut raw = complete();
        raw.longitude = Some(Value::Null);
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field, Field::Longitude);
    }

    #[test]
    fn test_check_order_rainfall_before_slope() {
        let mut raw = complete();
        raw.slope_degrees = Some(json!(-3));
        raw.rainfall_annual_mm = Some(json!("lots"));
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field, Field::RainfallAnnualMm);
        assert_eq!(err.reason, Reason::NotNumeric);
    }

    #[test]
    fn test_negative_precipitation() {
        let mut raw = complete();
        raw.precipitation_recent_mm = Some(json!(-1.5));
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field, Field::PrecipitationRecentMm);
        assert_eq!(err.reason, Reason::Negative);
    }

    #[test]
    fn test_elevation_checked_last() {
        let mut raw = complete();
        raw.elevation_meters = None;
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field, Field::ElevationMeters);
        assert_eq!(err.reason, Reason::Missing);
    }

    #[test]
    fn test_non_finite_is_not_numeric() {
        let mut raw = complete();
        raw.slope_degrees = Some(number(f64::NAN));
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field, Field::SlopeDegrees);
        assert_eq!(err.reason, Reason::NotNumeric);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let mut raw = complete();
        raw.rainfall_annual_mm = Some(json!(" 2500 "));
        let sample = raw.validate().unwrap();
        assert_eq!(sample.rainfall_annual_mm, 2500.0);
    }

    #[test]
    fn test_empty_string_is_missing() {
        let mut raw = complete();
        raw.elevation_meters = Some(json!(""));
        let err = raw.validate().unwrap_err();
        assert_eq!(err.reason, Reason::Missing);
    }

    #[test]
    fn test_latitude_out_of_range() {
        let mut raw = complete();
        raw.latitude = Some(json!(91.0));
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field, Field::Latitude);
        assert_eq!(err.reason, Reason::OutOfRange);
    }

    #[test]
    fn test_zero_coordinates_are_present() {
        let mut raw = complete();
        raw.latitude = Some(json!(0));
        raw.longitude = Some(json!(0));
        assert!(raw.validate().is_ok());
    }

    #[test]
    fn test_missing_soil_description_is_empty() {
        let mut raw = complete();
        raw.soil_description = None;
        let sample = raw.validate().unwrap();
        assert_eq!(sample.soil_description, "");
    }

    #[test]
    fn test_deserialize_boundary_record() {
        let raw: RawSample = serde_json::from_value(json!({
            "rainfallAnnualMm": 800,
            "precipitationRecentMm": 50,
            "slopeDegrees": 15,
            "elevationMeters": 300,
            "soilDescription": "Sandy soil - Good drainage",
            "soilCategory": "sand",
            "latitude": 19.076,
            "longitude": 72.8777
        }))
        .unwrap();
        let sample = raw.validate().unwrap();
        assert_eq!(sample.soil_category, Some(SoilCategory::Sand));
        assert_eq!(sample.longitude, 72.8777);
    }
}
