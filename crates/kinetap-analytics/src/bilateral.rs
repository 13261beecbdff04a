//! Bilateral comparison: asymmetry and slowness findings across two limbs.
//!
//! Findings are data for downstream clinical presentation, not errors or
//! diagnoses. Each carries a severity, a human-readable description, and a
//! non-diagnostic clinical note; a comparison with nothing to flag yields a
//! single "normal" finding so consumers never see an empty result.

use crate::summary::PerformanceSummary;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rate difference (events/s) above which speed asymmetry is flagged.
const SPEED_ASYMMETRY_MILD: f64 = 1.5;
/// Rate difference above which speed asymmetry is significant.
const SPEED_ASYMMETRY_SIGNIFICANT: f64 = 2.5;
/// Rhythm-score difference above which rhythm asymmetry is flagged.
const RHYTHM_ASYMMETRY_MILD: f64 = 25.0;
/// Rhythm-score difference above which rhythm asymmetry is significant.
const RHYTHM_ASYMMETRY_SIGNIFICANT: f64 = 40.0;
/// Mean rate (events/s) below which overall slowness is flagged.
const BRADYKINESIA_MILD: f64 = 3.0;
/// Mean rate below which overall slowness is significant.
const BRADYKINESIA_SIGNIFICANT: f64 = 2.0;
/// Mean rhythm score below which overall irregularity is flagged.
const RHYTHM_VARIABILITY_MILD: f64 = 40.0;
/// Mean rhythm score below which overall irregularity is significant.
const RHYTHM_VARIABILITY_SIGNIFICANT: f64 = 25.0;

/// What a bilateral finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FindingKind {
    /// Event-rate difference between the two sides
    SpeedAsymmetry,
    /// Rhythm-score difference between the two sides
    RhythmAsymmetry,
    /// Both sides slow on average
    Bradykinesia,
    /// Both sides irregular on average
    RhythmVariability,
    /// Nothing to flag
    Normal,
}

/// How strongly a finding is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// Within normal bands
    Normal,
    /// Past the mild band
    Mild,
    /// Past the significant band
    Significant,
}

/// One bilateral comparison finding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Finding {
    /// What the finding is about
    pub kind: FindingKind,
    /// How strongly it is flagged
    pub severity: Severity,
    /// Human-readable description with the measured values
    pub description: String,
    /// Non-diagnostic clinical context for the reader
    pub clinical_note: String,
}

/// Compares two analyzed trials (one per side) and returns the findings
/// list.
///
/// All band comparisons are strict, so a rhythm-score difference of exactly
/// 40 is flagged mild, not significant. An unremarkable comparison returns
/// a single [`FindingKind::Normal`] finding.
#[must_use]
pub fn compare(a: &PerformanceSummary, b: &PerformanceSummary) -> Vec<Finding> {
    let mut findings = Vec::new();

    let rate_diff = (a.average_rate - b.average_rate).abs();
    if rate_diff > SPEED_ASYMMETRY_MILD {
        let severity = if rate_diff > SPEED_ASYMMETRY_SIGNIFICANT {
            Severity::Significant
        } else {
            Severity::Mild
        };
        findings.push(Finding {
            kind: FindingKind::SpeedAsymmetry,
            severity,
            description: format!(
                "Tap rate differs by {rate_diff:.1}/s between sides ({}: {:.1}/s, {}: {:.1}/s)",
                a.limb, a.average_rate, b.limb, b.average_rate,
            ),
            clinical_note: "A marked side-to-side speed difference can accompany unilateral \
                            motor impairment and may merit clinical review."
                .to_string(),
        });
    }

    let rhythm_diff = (a.rhythm_score - b.rhythm_score).abs();
    if rhythm_diff > RHYTHM_ASYMMETRY_MILD {
        let severity = if rhythm_diff > RHYTHM_ASYMMETRY_SIGNIFICANT {
            Severity::Significant
        } else {
            Severity::Mild
        };
        findings.push(Finding {
            kind: FindingKind::RhythmAsymmetry,
            severity,
            description: format!(
                "Rhythm consistency differs by {rhythm_diff:.0} points between sides \
                 ({}: {:.0}, {}: {:.0})",
                a.limb, a.rhythm_score, b.limb, b.rhythm_score,
            ),
            clinical_note: "One side keeping a notably less regular beat than the other can \
                            reflect lateralized rhythm control differences."
                .to_string(),
        });
    }

    let mean_rate = (a.average_rate + b.average_rate) / 2.0;
    if mean_rate < BRADYKINESIA_MILD {
        let severity = if mean_rate < BRADYKINESIA_SIGNIFICANT {
            Severity::Significant
        } else {
            Severity::Mild
        };
        findings.push(Finding {
            kind: FindingKind::Bradykinesia,
            severity,
            description: format!("Mean tap rate across both sides is {mean_rate:.1}/s"),
            clinical_note: "Slowed repetitive movement on both sides is a descriptive flag \
                            only; it is not a diagnosis."
                .to_string(),
        });
    }

    let mean_rhythm = (a.rhythm_score + b.rhythm_score) / 2.0;
    if mean_rhythm < RHYTHM_VARIABILITY_MILD {
        let severity = if mean_rhythm < RHYTHM_VARIABILITY_SIGNIFICANT {
            Severity::Significant
        } else {
            Severity::Mild
        };
        findings.push(Finding {
            kind: FindingKind::RhythmVariability,
            severity,
            description: format!(
                "Mean rhythm score across both sides is {mean_rhythm:.0}/100"
            ),
            clinical_note: "High timing variability on both sides can reflect fatigue, \
                            inattention, or motor control differences."
                .to_string(),
        });
    }

    if findings.is_empty() {
        findings.push(Finding {
            kind: FindingKind::Normal,
            severity: Severity::Normal,
            description: "No bilateral asymmetry or slowness detected".to_string(),
            clinical_note: "Both sides performed within normal comparison bands.".to_string(),
        });
    }

    findings
}
