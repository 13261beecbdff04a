//! Known-value validation of the statistics engine against hand-computed
//! results, plus the end-to-end detector-to-analytics path.

use chrono::Utc;
use kinetap_analytics::{
    analyze, compare, FatigueLabel, FindingKind, RhythmClass, Severity, TrialStore,
};
use kinetap_core::{LimbLabel, Point2, TapEvent, Trial};

fn event_at(ms: f64) -> TapEvent {
    TapEvent {
        timestamp_ms: ms,
        position: Point2::new(0.5, 0.5),
        magnitude: 1.0,
        shape_metric: 8.0,
    }
}

fn trial_with(limb: LimbLabel, timestamps_ms: &[f64], duration_secs: f64) -> Trial {
    Trial::from_events(
        limb,
        0.0,
        duration_secs,
        Utc::now(),
        timestamps_ms.iter().map(|&t| event_at(t)).collect(),
    )
}

/// Five metronomic taps at 200 ms over one second.
#[test]
fn validate_regular_tapping_scenario() {
    let trial = trial_with(LimbLabel::right_hand(), &[0.0, 200.0, 400.0, 600.0, 800.0], 1.0);
    let summary = analyze(&trial);

    assert_eq!(summary.event_count, 5);
    assert_eq!(summary.intervals_ms, vec![200.0, 200.0, 200.0, 200.0]);
    assert!((summary.average_rate - 5.0).abs() < 1e-12);
    assert!((summary.mean_interval_ms - 200.0).abs() < 1e-12);
    assert!((summary.std_dev_interval_ms - 0.0).abs() < 1e-12);
    assert!((summary.cv_percent - 0.0).abs() < 1e-12);
    assert_eq!(summary.rhythm_class, RhythmClass::Excellent);
    assert_eq!(summary.rhythm_class.to_string(), "Excellent");
}

/// Erratic tapping: intervals [100, 200, 50, 550].
#[test]
fn validate_irregular_tapping_scenario() {
    let trial = trial_with(LimbLabel::right_hand(), &[0.0, 100.0, 300.0, 350.0, 900.0], 1.0);
    let summary = analyze(&trial);

    assert_eq!(summary.intervals_ms, vec![100.0, 200.0, 50.0, 550.0]);
    assert!((summary.mean_interval_ms - 225.0).abs() < 1e-12);
    // Sample std-dev: sqrt(152500 / 3)
    let expected_sd = (152_500.0_f64 / 3.0).sqrt();
    assert!((summary.std_dev_interval_ms - expected_sd).abs() < 1e-9);
    assert!(summary.cv_percent > 95.0 && summary.cv_percent < 105.0);
    assert_eq!(summary.rhythm_class, RhythmClass::Irregular);
}

/// Dense first half, sparse second half: a ~50% decrement.
#[test]
fn validate_fatigue_scenario() {
    let trial = trial_with(
        LimbLabel::right_hand(),
        &[0.0, 250.0, 500.0, 750.0, 1500.0, 2000.0, 2500.0, 3000.0],
        4.0,
    );
    let summary = analyze(&trial);

    assert!((summary.fatigue.speed_drop_percent - 50.0).abs() < 1.0);
    assert_eq!(summary.fatigue.label, FatigueLabel::SignificantDecrement);
    assert_eq!(summary.fatigue.label.to_string(), "Significant Decrement");
}

/// A fast regular side against a slow irregular side.
#[test]
fn validate_bilateral_asymmetry_scenario() {
    // Left: 6 events/s, metronomic. Right: 3 events/s with jitter.
    let left_ts: Vec<f64> = (0..12).map(|i| f64::from(i) * 166.0).collect();
    let left = analyze(&trial_with(LimbLabel::left_hand(), &left_ts, 2.0));
    assert!((left.average_rate - 6.0).abs() < 1e-9);
    assert!(left.rhythm_score > 85.0);

    let right_ts = [0.0, 280.0, 700.0, 950.0, 1400.0, 1800.0];
    let right = analyze(&trial_with(LimbLabel::right_hand(), &right_ts, 2.0));
    assert!((right.average_rate - 3.0).abs() < 1e-9);

    let findings = compare(&left, &right);
    let speed = findings
        .iter()
        .find(|f| f.kind == FindingKind::SpeedAsymmetry)
        .expect("3.0/s rate difference should be flagged");
    assert_eq!(speed.severity, Severity::Significant);
    assert!(findings.iter().all(|f| f.kind != FindingKind::Normal));
}

/// Zero- and one-event trials produce sentinels end to end, and repeated
/// analysis of the same sealed trial is bit-identical.
#[test]
fn validate_degenerate_and_idempotent() {
    let empty = trial_with(LimbLabel::left_hand(), &[], 10.0);
    let summary = analyze(&empty);
    assert_eq!(summary.event_count, 0);
    assert!((summary.average_rate - 0.0).abs() < f64::EPSILON);
    assert_eq!(summary.rhythm_class.to_string(), "N/A");
    assert_eq!(summary.fatigue.label.to_string(), "N/A");

    let single = trial_with(LimbLabel::left_hand(), &[400.0], 10.0);
    assert!(analyze(&single).intervals_ms.is_empty());

    let trial = trial_with(LimbLabel::left_hand(), &[0.0, 100.0, 300.0, 350.0, 900.0], 1.0);
    assert_eq!(analyze(&trial), analyze(&trial));
}

/// The store keeps the latest trial per limb for pairing.
#[test]
fn validate_store_pairing_flow() {
    let mut store = TrialStore::default_capacity();
    store.push(trial_with(LimbLabel::left_hand(), &[0.0, 200.0, 400.0], 1.0));
    store.push(trial_with(LimbLabel::right_hand(), &[0.0, 300.0, 600.0], 1.0));

    let left = analyze(store.latest_for(&LimbLabel::left_hand()).unwrap());
    let right = analyze(store.latest_for(&LimbLabel::right_hand()).unwrap());
    let findings = compare(&left, &right);
    assert!(!findings.is_empty());
}

#[cfg(feature = "serde")]
mod serde_contract {
    use super::*;

    /// Every summary field is present and well-typed even for a zero-event
    /// trial, and classification enums serialize to their sentinel strings.
    #[test]
    fn summary_serializes_with_sentinels() {
        let summary = analyze(&trial_with(LimbLabel::left_hand(), &[], 10.0));
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["event_count"], 0);
        assert_eq!(json["average_rate"], 0.0);
        assert_eq!(json["rhythm_class"], "N/A");
        assert_eq!(json["fatigue"]["label"], "N/A");
        assert!(json["intervals_ms"].as_array().unwrap().is_empty());
    }

    #[test]
    fn summary_roundtrip() {
        let summary = analyze(&trial_with(
            LimbLabel::right_hand(),
            &[0.0, 200.0, 400.0, 600.0, 800.0],
            1.0,
        ));
        let json = serde_json::to_string(&summary).unwrap();
        let parsed: kinetap_analytics::PerformanceSummary =
            serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summary);
    }
}
