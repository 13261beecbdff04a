//! Performance summary types and clinical classification bands.
//!
//! Every field of a [`PerformanceSummary`] is present and well-typed even
//! for a zero-event trial: numeric metrics degrade to 0 and classifications
//! to their `NotAvailable` ("N/A") variant, so the presentation layer never
//! needs to null-check before formatting.

use chrono::{DateTime, Utc};
use kinetap_core::{LimbLabel, TrialId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normative ceiling rate for finger tapping, in events per second. Used as
/// the 100th-percentile reference when ranking an observed rate.
pub const REFERENCE_TAP_RATE_HZ: f64 = 7.0;

/// Rhythm-regularity band derived from the coefficient of variation of the
/// inter-event intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RhythmClass {
    /// CV below 5%
    Excellent,
    /// CV below 10%
    Good,
    /// CV below 15%
    Fair,
    /// CV of 15% or more
    Irregular,
    /// Fewer than two events; no interval series to classify
    #[cfg_attr(feature = "serde", serde(rename = "N/A"))]
    NotAvailable,
}

impl RhythmClass {
    /// Classifies a CV percentage for a trial with `event_count` events.
    #[must_use]
    pub fn from_cv(cv_percent: f64, event_count: usize) -> Self {
        if event_count <= 1 {
            return Self::NotAvailable;
        }
        if cv_percent < 5.0 {
            Self::Excellent
        } else if cv_percent < 10.0 {
            Self::Good
        } else if cv_percent < 15.0 {
            Self::Fair
        } else {
            Self::Irregular
        }
    }
}

impl std::fmt::Display for RhythmClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Irregular => "Irregular",
            Self::NotAvailable => "N/A",
        };
        write!(f, "{label}")
    }
}

/// Fatigue band derived from the half-split speed decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FatigueLabel {
    /// Speed drop below 5%
    Stable,
    /// Speed drop below 15%
    #[cfg_attr(feature = "serde", serde(rename = "Minor Fatigue"))]
    MinorFatigue,
    /// Speed drop of 15% or more
    #[cfg_attr(feature = "serde", serde(rename = "Significant Decrement"))]
    SignificantDecrement,
    /// Three or fewer events; halves cannot be compared
    #[cfg_attr(feature = "serde", serde(rename = "N/A"))]
    NotAvailable,
}

impl FatigueLabel {
    /// Classifies a speed-drop percentage for a trial with `event_count`
    /// events.
    #[must_use]
    pub fn from_drop(speed_drop_percent: f64, event_count: usize) -> Self {
        if event_count <= 3 {
            return Self::NotAvailable;
        }
        if speed_drop_percent < 5.0 {
            Self::Stable
        } else if speed_drop_percent < 15.0 {
            Self::MinorFatigue
        } else {
            Self::SignificantDecrement
        }
    }
}

impl std::fmt::Display for FatigueLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Stable => "Stable",
            Self::MinorFatigue => "Minor Fatigue",
            Self::SignificantDecrement => "Significant Decrement",
            Self::NotAvailable => "N/A",
        };
        write!(f, "{label}")
    }
}

/// Absolute-rate speed band, in events per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpeedClass {
    /// 6.0/s or more
    Excellent,
    /// 4.5/s or more
    Good,
    /// 3.0/s or more
    Fair,
    /// 2.0/s or more
    #[cfg_attr(feature = "serde", serde(rename = "Below Normal"))]
    BelowNormal,
    /// Below 2.0/s
    #[cfg_attr(feature = "serde", serde(rename = "Significantly Impaired"))]
    SignificantlyImpaired,
}

impl SpeedClass {
    /// Classifies an average event rate.
    #[must_use]
    pub fn from_rate(rate_hz: f64) -> Self {
        if rate_hz >= 6.0 {
            Self::Excellent
        } else if rate_hz >= 4.5 {
            Self::Good
        } else if rate_hz >= 3.0 {
            Self::Fair
        } else if rate_hz >= 2.0 {
            Self::BelowNormal
        } else {
            Self::SignificantlyImpaired
        }
    }
}

impl std::fmt::Display for SpeedClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::BelowNormal => "Below Normal",
            Self::SignificantlyImpaired => "Significantly Impaired",
        };
        write!(f, "{label}")
    }
}

/// Half-split fatigue/decrement analysis of one trial.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FatigueAnalysis {
    /// Event rate over the first half of the events, per second
    pub first_half_rate: f64,
    /// Event rate over the second half of the events, per second
    pub second_half_rate: f64,
    /// Percentage drop from first-half to second-half rate
    pub speed_drop_percent: f64,
    /// Fatigue band, `NotAvailable` for trials of three or fewer events
    pub label: FatigueLabel,
    /// Interval std-dev over the first half of the interval series, ms
    pub rhythm_first_half_ms: f64,
    /// Interval std-dev over the second half of the interval series, ms
    pub rhythm_second_half_ms: f64,
}

impl FatigueAnalysis {
    /// The sentinel analysis for trials with too few events.
    #[must_use]
    pub fn not_available() -> Self {
        Self {
            first_half_rate: 0.0,
            second_half_rate: 0.0,
            speed_drop_percent: 0.0,
            label: FatigueLabel::NotAvailable,
            rhythm_first_half_ms: 0.0,
            rhythm_second_half_ms: 0.0,
        }
    }
}

/// Read-only motor-performance aggregate for one sealed trial.
///
/// A pure projection: it has no lifecycle of its own and analyzing the same
/// sealed trial twice yields an identical summary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerformanceSummary {
    /// Identity of the analyzed trial
    pub trial_id: TrialId,
    /// Which limb the trial measured
    pub limb: LimbLabel,
    /// Wall-clock time the trial was started (export metadata)
    pub recorded_at: DateTime<Utc>,
    /// Configured window length in seconds
    pub configured_duration_secs: f64,

    /// Number of events in the trial
    pub event_count: usize,
    /// Events per second over the configured duration, 0 for an empty trial
    pub average_rate: f64,

    /// Raw inter-event intervals in milliseconds, for plotting
    pub intervals_ms: Vec<f64>,
    /// Mean inter-event interval, ms; 0 when no intervals exist
    pub mean_interval_ms: f64,
    /// Sample standard deviation of the intervals, ms; 0 when fewer than
    /// two intervals exist
    pub std_dev_interval_ms: f64,
    /// Coefficient of variation of the intervals, percent; 0 when the mean
    /// interval is not positive
    pub cv_percent: f64,

    /// Rhythm-regularity band
    pub rhythm_class: RhythmClass,
    /// Alternate rhythm representation: `max(0, 100 − CV)`
    pub rhythm_score: f64,

    /// Half-split fatigue analysis
    pub fatigue: FatigueAnalysis,

    /// Absolute-rate speed band
    pub speed_class: SpeedClass,
    /// Rank of the observed rate against the normative ceiling, [0, 100]
    pub percentile_rank: u32,
}
