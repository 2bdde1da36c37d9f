//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Output order matches input order
//! - Byte-for-byte identical output for identical assessments

use crate::assessment::RiskAssessment;
use crate::scoring::ScoreBreakdown;
use crate::soil::SOIL_PROFILES;
use crate::zone::ZoneTable;
use serde::Serialize;

/// One assessment plus optional presentation extras
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<ScoreBreakdown>,
}

impl AssessmentReport {
    pub fn new(assessment: RiskAssessment) -> Self {
        AssessmentReport {
            title: None,
            assessment,
            zone: None,
            score_breakdown: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach the score breakdown and matched zone name
    pub fn explained(mut self, breakdown: ScoreBreakdown, zone: Option<String>) -> Self {
        self.score_breakdown = Some(breakdown);
        self.zone = zone;
        self
    }
}

/// Render reports as text output
pub fn render_text(reports: &[AssessmentReport]) -> String {
    let mut output = String::new();

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let a = &report.assessment;

        if let Some(ref title) = report.title {
            output.push_str(&format!("== {} ==\n", title));
        }
        output.push_str(&format!("Risk: {}% ({})\n", a.percentage, a.category));
        output.push_str(&format!("{}\n", a.description));
        output.push('\n');

        output.push_str(&format!("{:<12} {}\n", "FACTOR", "IMPACT"));
        let impacts = &a.factor_impacts;
        for (name, label) in [
            ("rainfall", impacts.rainfall),
            ("topography", impacts.topography),
            ("soil", impacts.soil),
            ("location", impacts.location),
        ] {
            output.push_str(&format!("{:<12} {}\n", name, label));
        }

        if let Some(ref zone) = report.zone {
            output.push_str(&format!("{:<12} {}\n", "zone", zone));
        }

        if let Some(ref b) = report.score_breakdown {
            output.push('\n');
            output.push_str("Score breakdown:\n");
            for (name, points) in [
                ("rainfall", b.rainfall),
                ("precipitation", b.precipitation),
                ("slope", b.slope),
                ("elevation", b.elevation),
                ("soil", b.soil),
            ] {
                output.push_str(&format!("  {:<14} {:>3}\n", name, points));
            }
            output.push_str(&format!("  {:<14} {:>3}\n", "raw", b.raw()));
            if b.jitter != 0.0 {
                output.push_str(&format!("  {:<14} {:+.2}\n", "jitter", b.jitter));
            }
            output.push_str(&format!("  {:<14} {:>3}\n", "final", b.percentage));
        }

        output.push('\n');
        output.push_str("Recommendations:\n");
        for (n, rec) in a.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", n + 1, rec));
        }
    }

    output
}

/// Render reports as JSON output
///
/// A single report renders as an object, several as an array.
pub fn render_json(reports: &[AssessmentReport]) -> String {
    let rendered = match reports {
        [single] => serde_json::to_string_pretty(single),
        _ => serde_json::to_string_pretty(reports),
    };
    rendered.unwrap_or_else(|_| "[]".to_string())
}

/// Render a zone table in priority order, with ambiguous overlaps
pub fn render_zone_table(table: &ZoneTable) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<4} {:<20} {:<10} {:<28} {}\n",
        "#", "ZONE", "IMPACT", "BOUNDS (S..N, W..E)", "DESCRIPTION"
    ));

    for (i, zone) in table.zones().iter().enumerate() {
        let bounds = format!(
            "{}..{}, {}..{}",
            zone.bounds.south, zone.bounds.north, zone.bounds.west, zone.bounds.east
        );
        output.push_str(&format!(
            "{:<4} {:<20} {:<10} {:<28} {}\n",
            i + 1,
            truncate_or_pad(&zone.name, 20),
            zone.base_risk.as_str(),
            bounds,
            zone.description
        ));
    }

    let overlaps = table.ambiguous_overlaps();
    if !overlaps.is_empty() {
        output.push('\n');
        output.push_str("Ambiguous overlaps (earlier zone wins):\n");
        for overlap in overlaps {
            output.push_str(&format!(
                "  {} shadows {}\n",
                table.zones()[overlap.winner].name,
                table.zones()[overlap.shadowed].name
            ));
        }
    }

    output
}

/// Render the soil profile reference table
pub fn render_soil_profiles() -> String {
    let mut output = String::new();
    for profile in &SOIL_PROFILES {
        output.push_str(&format!(
            "{:<6} {:<10} {}\n",
            profile.category.as_str(),
            profile.risk.as_str(),
            profile.description
        ));
        for rec in profile.recommendations {
            output.push_str(&format!("         - {}\n", rec));
        }
    }
    output
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        format!("{:<width$}", s, width = width)
    }
}
