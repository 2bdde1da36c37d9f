//! Additive landslide risk scoring
//!
//! One term per factor, each picked from a descending threshold table
//! (strict greater-than, first match wins). The raw sum lies in [19, 95].
//! An optional jitter is added before the result is clamped to [0, 100]
//! and rounded.
//!
//! Without jitter the score is a pure function of the sample.

use crate::sample::EnvironmentalSample;
use crate::soil;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Descending (exclusive threshold, points) table with a fallback
#[derive(Debug, Clone, Copy)]
pub struct PointTable {
    pub steps: &'static [(f64, u32)],
    pub otherwise: u32,
}

impl PointTable {
    pub fn points(&self, value: f64) -> u32 {
        self.steps
            .iter()
            .find(|(threshold, _)| value > *threshold)
            .map(|(_, points)| *points)
            .unwrap_or(self.otherwise)
    }
}

pub const RAINFALL_POINTS: PointTable = PointTable {
    steps: &[(2000.0, 25), (1500.0, 20), (1000.0, 15), (500.0, 10)],
    otherwise: 5,
};

pub const PRECIPITATION_POINTS: PointTable = PointTable {
    steps: &[(200.0, 25), (150.0, 20), (100.0, 15), (50.0, 10)],
    otherwise: 5,
};

pub const SLOPE_POINTS: PointTable = PointTable {
    steps: &[(45.0, 25), (30.0, 20), (20.0, 15), (10.0, 10)],
    otherwise: 5,
};

pub const ELEVATION_POINTS: PointTable = PointTable {
    steps: &[(2000.0, 10), (1000.0, 8), (500.0, 6)],
    otherwise: 3,
};

/// Default jitter half-width in percentage points
pub const DEFAULT_JITTER_AMPLITUDE: f64 = 5.0;

/// Largest accepted jitter half-width
pub const MAX_JITTER_AMPLITUDE: f64 = 50.0;

/// Source of the random perturbation added to the raw score
pub trait Jitter {
    /// Offset in percentage points
    fn offset(&mut self) -> f64;
}

/// Identity jitter; keeps scoring deterministic
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn offset(&mut self) -> f64 {
        0.0
    }
}

/// Uniform jitter in `[-amplitude, +amplitude]` from a seeded ChaCha stream
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: ChaCha8Rng,
    amplitude: f64,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        SeededJitter::with_amplitude(seed, DEFAULT_JITTER_AMPLITUDE)
    }

    /// Negative amplitudes are treated as their magnitude, capped at
    /// `MAX_JITTER_AMPLITUDE`. NaN and infinite amplitudes disable jitter.
    pub fn with_amplitude(seed: u64, amplitude: f64) -> Self {
        let amplitude = if amplitude.is_finite() {
            amplitude.abs().min(MAX_JITTER_AMPLITUDE)
        } else {
            0.0
        };
        SeededJitter {
            rng: ChaCha8Rng::seed_from_u64(seed),
            amplitude,
        }
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl Jitter for SeededJitter {
    fn offset(&mut self) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-self.amplitude..=self.amplitude)
    }
}

/// Points per factor plus the adjustment applied to their sum
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub rainfall: u32,
    pub precipitation: u32,
    pub slope: u32,
    pub elevation: u32,
    pub soil: u32,
    pub jitter: f64,
    /// Clamped to [0, 100] but not rounded
    pub adjusted: f64,
    pub percentage: u8,
}

impl ScoreBreakdown {
    /// Sum of the factor points before jitter
    pub fn raw(&self) -> u32 {
        self.rainfall + self.precipitation + self.slope + self.elevation + self.soil
    }
}

/// Scorer points for the sample's soil
///
/// A typed category wins over keyword matching on the description.
pub fn soil_points_for(sample: &EnvironmentalSample) -> u32 {
    match sample.soil_category {
        Some(category) => category.points(),
        None => soil::soil_points(&sample.soil_description),
    }
}

/// Sum of factor points, no jitter
pub fn raw_score(sample: &EnvironmentalSample) -> u32 {
    RAINFALL_POINTS.points(sample.rainfall_annual_mm)
        + PRECIPITATION_POINTS.points(sample.precipitation_recent_mm)
        + SLOPE_POINTS.points(sample.slope_degrees)
        + ELEVATION_POINTS.points(sample.elevation_meters)
        + soil_points_for(sample)
}

/// Score a sample with full breakdown
pub fn score_breakdown(sample: &EnvironmentalSample, jitter: &mut dyn Jitter) -> ScoreBreakdown {
    let rainfall = RAINFALL_POINTS.points(sample.rainfall_annual_mm);
    let precipitation = PRECIPITATION_POINTS.points(sample.precipitation_recent_mm);
    let slope = SLOPE_POINTS.points(sample.slope_degrees);
    let elevation = ELEVATION_POINTS.points(sample.elevation_meters);
    let soil = soil_points_for(sample);

    let offset = jitter.offset();
    let raw = f64::from(rainfall + precipitation + slope + elevation + soil);
    let adjusted = (raw + offset).clamp(0.0, 100.0);

    ScoreBreakdown {
        rainfall,
        precipitation,
        slope,
        elevation,
        soil,
        jitter: offset,
        adjusted,
        percentage: to_percentage(adjusted),
    }
}

/// Score a sample as an integer percentage in [0, 100]
pub fn score(sample: &EnvironmentalSample, jitter: &mut dyn Jitter) -> u8 {
    score_breakdown(sample, jitter).percentage
}

/// Clamp and round half away from zero
pub fn to_percentage(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    // Clamped to [0, 100] first, so the cast cannot truncate
    value.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(
        rainfall: f64,
        precipitation: f64,
        slope: f64,
        elevation: f64,
        soil: &str,
    ) -> EnvironmentalSample {
        EnvironmentalSample {
            rainfall_annual_mm: rainfall,
            precipitation_recent_mm: precipitation,
            slope_degrees: slope,
            elevation_meters: elevation,
            soil_description: soil.to_string(),
            soil_category: None,
            latitude: 20.0,
            longitude: 78.0,
        }
    }

    /// Jitter returning a fixed offset
    struct Fixed(f64);

    impl Jitter for Fixed {
        fn offset(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_point_tables() {
        assert_eq!(RAINFALL_POINTS.points(2001.0), 25);
        assert_eq!(RAINFALL_POINTS.points(2000.0), 20);
        assert_eq!(RAINFALL_POINTS.points(500.0), 5);
        assert_eq!(PRECIPITATION_POINTS.points(50.0), 5);
        assert_eq!(PRECIPITATION_POINTS.points(50.1), 10);
        assert_eq!(SLOPE_POINTS.points(10.0), 5);
        assert_eq!(SLOPE_POINTS.points(46.0), 25);
        assert_eq!(ELEVATION_POINTS.points(1800.0), 8);
        assert_eq!(ELEVATION_POINTS.points(0.0), 3);
    }

    #[test]
    fn test_raw_score_range() {
        // 5 + 5 + 5 + 3 + 1
        assert_eq!(raw_score(&sample(0.0, 0.0, 0.0, 0.0, "")), 19);
        assert_eq!(raw_score(&sample(1e9, 1e9, 90.0, 8848.0, "Clay")), 95);
    }

    #[test]
    fn test_high_risk_breakdown() {
        let s = sample(2500.0, 250.0, 50.0, 1800.0, "Clay soil");
        let b = score_breakdown(&s, &mut NoJitter);
        assert_eq!(
            (b.rainfall, b.precipitation, b.slope, b.elevation, b.soil),
            (25, 25, 25, 8, 10)
        );
        assert_eq!(b.raw(), 93);
        assert_eq!(b.percentage, 93);
        assert_eq!(b.jitter, 0.0);
    }

    #[test]
    fn test_jitter_is_clamped() {
        let s = sample(1e9, 1e9, 90.0, 8848.0, "Clay");
        assert_eq!(score(&s, &mut Fixed(50.0)), 100);
        let low = sample(0.0, 0.0, 0.0, 0.0, "");
        assert_eq!(score(&low, &mut Fixed(-50.0)), 0);
    }

    #[test]
    fn test_rounding() {
        // 10 + 5 + 10 + 3 + 3
        let s = sample(800.0, 50.0, 15.0, 300.0, "Sandy soil");
        assert_eq!(score(&s, &mut Fixed(0.4)), 31);
        assert_eq!(score(&s, &mut Fixed(0.5)), 32);
        assert_eq!(score(&s, &mut Fixed(-0.6)), 30);
    }

    #[test]
    fn test_seeded_jitter_is_reproducible_and_bounded() {
        let mut a = SeededJitter::new(7);
        let mut b = SeededJitter::new(7);
        for _ in 0..200 {
            let x = a.offset();
            assert_eq!(x, b.offset());
            assert!((-5.0..=5.0).contains(&x));
        }
    }

    #[test]
    fn test_zero_amplitude_jitter() {
        let mut j = SeededJitter::with_amplitude(1, 0.0);
        assert_eq!(j.offset(), 0.0);
    }

    #[test]
    fn test_oversized_amplitude_is_capped() {
        for amplitude in [1e308, f64::MAX, -1e308, 75.0] {
            let mut j = SeededJitter::with_amplitude(1, amplitude);
            assert_eq!(j.amplitude(), MAX_JITTER_AMPLITUDE);
            for _ in 0..50 {
                assert!(j.offset().abs() <= MAX_JITTER_AMPLITUDE);
            }
        }
    }

    #[test]
    fn test_non_finite_amplitude_disables_jitter() {
        for amplitude in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut j = SeededJitter::with_amplitude(1, amplitude);
            assert_eq!(j.amplitude(), 0.0);
            assert_eq!(j.offset(), 0.0);
        }
    }

    #[test]
    fn test_typed_soil_overrides_description() {
        let mut s = sample(800.0, 50.0, 15.0, 300.0, "Clay soil");
        s.soil_category = Some(crate::soil::SoilCategory::Rock);
        assert_eq!(soil_points_for(&s), 1);
    }
}
