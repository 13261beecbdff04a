//! Single-trial analysis: interval statistics, rhythm and speed bands, and
//! half-split fatigue analysis.

use kinetap_core::utils::{coefficient_of_variation, mean, sample_std_dev};
use kinetap_core::{TapEvent, Trial};

use crate::summary::{
    FatigueAnalysis, FatigueLabel, PerformanceSummary, RhythmClass, SpeedClass,
    REFERENCE_TAP_RATE_HZ,
};

/// Floor applied to each half's span when computing half-split rates, so a
/// burst of events inside a few milliseconds cannot produce an absurd rate.
const MIN_HALF_SPAN_SECS: f64 = 0.1;

/// Computes the full performance summary for one sealed trial.
///
/// Pure and idempotent: the same sealed trial always produces an identical
/// summary, and no field is ever NaN or infinite. Degenerate trials (zero
/// or one event) produce the documented sentinels instead of errors.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn analyze(trial: &Trial) -> PerformanceSummary {
    let events = trial.events();
    let event_count = events.len();
    let duration_secs = trial.duration_secs();

    let average_rate = if event_count == 0 || duration_secs <= 0.0 {
        0.0
    } else {
        event_count as f64 / duration_secs
    };

    let intervals_ms = trial.interval_series().into_vec();
    let mean_interval_ms = mean(&intervals_ms);
    let std_dev_interval_ms = sample_std_dev(&intervals_ms);
    let cv_percent = coefficient_of_variation(&intervals_ms);

    let rhythm_class = RhythmClass::from_cv(cv_percent, event_count);
    let rhythm_score = (100.0 - cv_percent).max(0.0);

    let fatigue = fatigue_analysis(events, &intervals_ms);

    let speed_class = SpeedClass::from_rate(average_rate);
    let percentile_rank =
        ((100.0 * average_rate / REFERENCE_TAP_RATE_HZ).round() as u32).min(100);

    PerformanceSummary {
        trial_id: trial.id(),
        limb: trial.limb().clone(),
        recorded_at: trial.started_at(),
        configured_duration_secs: duration_secs,
        event_count,
        average_rate,
        intervals_ms,
        mean_interval_ms,
        std_dev_interval_ms,
        cv_percent,
        rhythm_class,
        rhythm_score,
        fatigue,
        speed_class,
        percentile_rank,
    }
}

/// Half-split decrement analysis.
///
/// The *event* sequence splits at `mid = floor(n/2)` for the rate
/// comparison; the *interval* series splits at `mid − 1` for the per-half
/// rhythm comparison. Each half's span is floored at 0.1 s, and a half
/// needs at least two intervals for its std-dev, else 0.
#[allow(clippy::cast_precision_loss)]
fn fatigue_analysis(events: &[TapEvent], intervals_ms: &[f64]) -> FatigueAnalysis {
    let n = events.len();
    if n <= 3 {
        return FatigueAnalysis::not_available();
    }

    let mid = n / 2;
    let first_span_secs =
        ((events[mid - 1].timestamp_ms - events[0].timestamp_ms) / 1000.0).max(MIN_HALF_SPAN_SECS);
    let second_span_secs =
        ((events[n - 1].timestamp_ms - events[mid].timestamp_ms) / 1000.0).max(MIN_HALF_SPAN_SECS);

    let first_half_rate = mid as f64 / first_span_secs;
    let second_half_rate = (n - mid) as f64 / second_span_secs;

    let speed_drop_percent = if first_half_rate > 0.0 {
        100.0 * (first_half_rate - second_half_rate) / first_half_rate
    } else {
        0.0
    };

    let split = (mid - 1).min(intervals_ms.len());
    let (first_intervals, second_intervals) = intervals_ms.split_at(split);

    FatigueAnalysis {
        first_half_rate,
        second_half_rate,
        speed_drop_percent,
        label: FatigueLabel::from_drop(speed_drop_percent, n),
        rhythm_first_half_ms: sample_std_dev(first_intervals),
        rhythm_second_half_ms: sample_std_dev(second_intervals),
    }
}
