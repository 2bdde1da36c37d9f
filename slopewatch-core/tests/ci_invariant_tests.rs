//! CI Invariant Tests
//!
//! These tests explicitly validate critical invariants that must always hold.
//! Run in CI to prevent regressions.

use slopewatch_core::scoring::{raw_score, score_breakdown};
use slopewatch_core::zone::{ZoneBounds, ZoneDefinition};
use slopewatch_core::{
    assess, assess_with, render_json, AssessmentReport, EnvironmentalSample, ImpactLabel,
    Jitter, NoJitter, RiskCategory, SeededJitter, ZoneTable,
};
use std::borrow::Cow;

fn sample(rainfall: f64, precipitation: f64, slope: f64, elevation: f64) -> EnvironmentalSample {
    EnvironmentalSample {
        rainfall_annual_mm: rainfall,
        precipitation_recent_mm: precipitation,
        slope_degrees: slope,
        elevation_meters: elevation,
        soil_description: "Silt soil".to_string(),
        soil_category: None,
        latitude: 15.0,
        longitude: 75.0,
    }
}

/// Jitter pinned to a fixed offset
struct Pinned(f64);

impl Jitter for Pinned {
    fn offset(&mut self) -> f64 {
        self.0
    }
}

#[test]
fn test_score_deterministic_without_jitter() {
    let s = sample(1600.0, 180.0, 33.0, 900.0);
    let first = score_breakdown(&s, &mut NoJitter);
    for _ in 0..10 {
        assert_eq!(score_breakdown(&s, &mut NoJitter), first);
    }
}

#[test]
fn test_percentage_always_clamped() {
    let extremes = [
        sample(0.0, 0.0, 0.0, 0.0),
        sample(f64::MAX, f64::MAX, 90.0, f64::MAX),
        sample(1e12, 0.0, 3600.0, 0.0),
    ];
    for s in &extremes {
        for offset in [-1000.0, -5.0, 0.0, 5.0, 1000.0] {
            let b = score_breakdown(s, &mut Pinned(offset));
            assert!(b.percentage <= 100, "offset {} gave {}", offset, b.percentage);
            assert!((0.0..=100.0).contains(&b.adjusted));
        }
    }
}

#[test]
fn test_seeded_jitter_stays_within_five_points() {
    let s = sample(1200.0, 120.0, 25.0, 800.0);
    let raw = f64::from(raw_score(&s));
    let mut jitter = SeededJitter::new(2024);
    for _ in 0..500 {
        let b = score_breakdown(&s, &mut jitter);
        assert!((b.adjusted - raw).abs() <= 5.0);
    }
}

#[test]
fn test_rainfall_monotonicity() {
    let steps = [0.0, 499.0, 500.0, 501.0, 1000.0, 1001.0, 1500.0, 1501.0, 2000.0, 2001.0, 9000.0];
    let mut previous = 0;
    for rainfall in steps {
        let current = raw_score(&sample(rainfall, 120.0, 25.0, 800.0));
        assert!(
            current >= previous,
            "score dropped from {} to {} at rainfall {}",
            previous,
            current,
            rainfall
        );
        previous = current;
    }
}

#[test]
fn test_every_factor_is_monotonic() {
    let values = [0.0, 10.0, 20.5, 30.5, 45.5, 50.5, 100.5, 150.5, 200.5, 500.5, 1000.5, 2000.5];
    for window in values.windows(2) {
        let (lo, hi) = (window[0], window[1]);
        assert!(raw_score(&sample(lo, 0.0, 0.0, 0.0)) <= raw_score(&sample(hi, 0.0, 0.0, 0.0)));
        assert!(raw_score(&sample(0.0, lo, 0.0, 0.0)) <= raw_score(&sample(0.0, hi, 0.0, 0.0)));
        assert!(raw_score(&sample(0.0, 0.0, lo, 0.0)) <= raw_score(&sample(0.0, 0.0, hi, 0.0)));
        assert!(raw_score(&sample(0.0, 0.0, 0.0, lo)) <= raw_score(&sample(0.0, 0.0, 0.0, hi)));
    }
}

#[test]
fn test_category_boundaries_are_inclusive() {
    assert_eq!(RiskCategory::from_percentage(70), RiskCategory::VeryHigh);
    assert_eq!(RiskCategory::from_percentage(69), RiskCategory::High);
    assert_eq!(RiskCategory::from_percentage(50), RiskCategory::High);
    assert_eq!(RiskCategory::from_percentage(30), RiskCategory::Moderate);
    assert_eq!(RiskCategory::from_percentage(29), RiskCategory::Low);
}

#[test]
fn test_zone_priority_beats_geography() {
    // Western Ghats box stretched north until it overlaps the Himalayan box
    let stretched = ZoneDefinition {
        id: None,
        name: Cow::Borrowed("Stretched Ghats"),
        bounds: ZoneBounds {
            north: 33.0,
            south: 8.0,
            east: 78.0,
            west: 72.0,
        },
        base_risk: ImpactLabel::High,
        description: Cow::Borrowed(""),
    };
    let mut zones = ZoneTable::builtin().zones().to_vec();
    zones.push(stretched);
    let table = ZoneTable::new(zones);

    assert_eq!(table.classify(31.1, 77.2), ImpactLabel::VeryHigh);
    assert_eq!(table.ambiguous_overlaps().len(), 1);

    let mut s = sample(1200.0, 120.0, 25.0, 800.0);
    s.latitude = 31.1;
    s.longitude = 77.2;
    let assessment = assess_with(&s, &table, &mut NoJitter);
    assert_eq!(assessment.factor_impacts.location, ImpactLabel::VeryHigh);
}

#[test]
fn test_aggregator_idempotent_byte_for_byte() {
    let s = sample(2100.0, 90.0, 31.0, 1500.0);
    let first = render_json(&[AssessmentReport::new(assess(&s))]);
    let second = render_json(&[AssessmentReport::new(assess(&s))]);
    assert_eq!(first, second);

    let zones = ZoneTable::builtin();
    let seeded_a = assess_with(&s, &zones, &mut SeededJitter::new(11));
    let seeded_b = assess_with(&s, &zones, &mut SeededJitter::new(11));
    assert_eq!(
        render_json(&[AssessmentReport::new(seeded_a)]),
        render_json(&[AssessmentReport::new(seeded_b)])
    );
}

#[test]
fn test_assessment_does_not_mutate_sample() {
    let s = sample(2100.0, 90.0, 31.0, 1500.0);
    let before = s.clone();
    let _ = assess(&s);
    assert_eq!(s, before);
}

#[test]
fn test_classifiers_are_total() {
    let coords = [(-90.0, -180.0), (90.0, 180.0), (0.0, 0.0), (31.1, 77.2)];
    for (lat, lng) in coords {
        let _ = slopewatch_core::classify_zone(lat, lng);
    }
    for text in ["", "Clay", "???", "Rocky outcrop", "clay"] {
        let label = slopewatch_core::classify_soil(text);
        assert!(label == ImpactLabel::Unknown || label.rank().is_some());
    }
}
