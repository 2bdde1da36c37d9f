//! Slopewatch core library - landslide susceptibility assessment

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Every assessment is a function of one sample and its options
// - No global mutable state; samples are never mutated after validation
// - Randomness only through an explicitly supplied, seedable jitter
// - Classifier lookups are total; only input validation can fail
// - Identical input and seed yield byte-for-byte identical output

pub mod assessment;
pub mod config;
pub mod error;
pub mod impact;
pub mod presets;
pub mod recommend;
pub mod report;
pub mod sample;
pub mod scoring;
pub mod soil;
pub mod zone;

pub use assessment::{assess, assess_with, FactorImpacts, RiskAssessment, RiskCategory};
pub use config::ResolvedConfig;
pub use error::{Field, Reason, ValidationError};
pub use impact::{classify_factor, FactorKind, ImpactLabel};
pub use report::{render_json, render_text, AssessmentReport};
pub use sample::{validate, EnvironmentalSample, RawSample};
pub use scoring::{score, Jitter, NoJitter, ScoreBreakdown, SeededJitter};
pub use soil::{classify_soil, SoilCategory, SoilProfile};
pub use zone::{classify_zone, ZoneTable};

use rayon::prelude::*;
use scoring::DEFAULT_JITTER_AMPLITUDE;
use tracing::{debug, warn};

/// Options shared by every record of one run
#[derive(Debug, Clone, Copy)]
pub struct AssessmentOptions<'a> {
    pub zones: &'a ZoneTable,
    /// Jitter seed; `None` disables jitter
    pub jitter_seed: Option<u64>,
    pub jitter_amplitude: f64,
}

impl<'a> AssessmentOptions<'a> {
    /// Deterministic options over the given zones
    pub fn new(zones: &'a ZoneTable) -> Self {
        AssessmentOptions {
            zones,
            jitter_seed: None,
            jitter_amplitude: DEFAULT_JITTER_AMPLITUDE,
        }
    }

    pub fn from_config(config: &'a ResolvedConfig, jitter_seed: Option<u64>) -> Self {
        AssessmentOptions {
            zones: &config.zones,
            jitter_seed,
            jitter_amplitude: config.jitter_amplitude,
        }
    }

    /// Jitter for the record at `index`
    ///
    /// Each record gets its own stream (`seed + index`), so results do not
    /// depend on evaluation order.
    fn jitter_for(&self, index: usize) -> Box<dyn Jitter> {
        match self.jitter_seed {
            Some(seed) => Box::new(SeededJitter::with_amplitude(
                seed.wrapping_add(index as u64),
                self.jitter_amplitude,
            )),
            None => Box::new(NoJitter),
        }
    }
}

/// Outcome for one raw record
pub type Evaluation = Result<(RiskAssessment, ScoreBreakdown), ValidationError>;

/// Validate and assess one raw record
pub fn assess_raw(raw: &RawSample, options: &AssessmentOptions<'_>) -> Evaluation {
    warn_if_jittered(options);
    evaluate(0, raw, options)
}

/// Validate and assess many raw records in parallel
///
/// Results keep input order. A record that fails validation yields its
/// error without affecting the others.
pub fn assess_batch(raws: &[RawSample], options: &AssessmentOptions<'_>) -> Vec<Evaluation> {
    warn_if_jittered(options);
    raws.par_iter()
        .enumerate()
        .map(|(i, raw)| evaluate(i, raw, options))
        .collect()
}

/// Once per run, not per record
fn warn_if_jittered(options: &AssessmentOptions<'_>) {
    if let Some(seed) = options.jitter_seed {
        warn!(
            seed,
            amplitude = options.jitter_amplitude,
            "score jitter enabled; results vary with the seed"
        );
    }
}

fn evaluate(index: usize, raw: &RawSample, options: &AssessmentOptions<'_>) -> Evaluation {
    let sample = match validate(raw) {
        Ok(sample) => sample,
        Err(e) => {
            debug!(index, field = %e.field, "rejected sample");
            return Err(e);
        }
    };
    debug!(index, ?sample, "validated sample");

    let mut jitter = options.jitter_for(index);
    Ok(assessment::assess_explained(&sample, options.zones, &mut *jitter))
}
