//! Core data types for the kinetap motor-performance toolkit.
//!
//! This module defines the value types shared by the event detector and the
//! statistics engine.
//!
//! # Type Categories
//!
//! - **Input Types**: [`LandmarkFrame`], [`TrackedPoints`], [`Point2`]
//! - **Event Types**: [`TapEvent`]
//! - **Trial Types**: [`Trial`], [`IntervalSeries`]
//! - **Common Types**: [`TrialId`], [`LimbLabel`]
//!
//! Timestamps on frames and events come from the frame source's monotonic
//! capture clock, expressed in milliseconds as `f64`. Wall-clock time appears
//! only as export metadata ([`Trial::started_at`]) and never participates in
//! interval arithmetic.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{INDEX_FINGER_DIP, INDEX_FINGER_PIP, INDEX_FINGER_TIP};

// =============================================================================
// Common Types
// =============================================================================

/// Unique identifier for a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialId(Uuid);

impl TrialId {
    /// Creates a new unique trial ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a trial ID from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TrialId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TrialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Label for the limb or signal source a trial measures.
///
/// Free-form so callers can label hands (`"left_hand"`), individual fingers,
/// or a gaze stream, while the common hand labels have constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LimbLabel(String);

impl LimbLabel {
    /// Creates a new limb label from a string.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The left hand.
    #[must_use]
    pub fn left_hand() -> Self {
        Self::new("left_hand")
    }

    /// The right hand.
    #[must_use]
    pub fn right_hand() -> Self {
        Self::new("right_hand")
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LimbLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Input Types
// =============================================================================

/// A 2-D landmark position.
///
/// Coordinates are normalized to [0, 1] by the external tracker; the detector
/// scales them onto its reference canvas before applying thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2 {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (grows downward, image convention)
    pub y: f64,
}

impl Point2 {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The fixed-shape set of keypoints the detector requires per frame: the
/// moving tip plus two proximal joints used for the extension heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackedPoints {
    /// Tip of the moving digit (or equivalent tracked point)
    pub tip: Point2,
    /// First proximal joint
    pub joint_a: Point2,
    /// Second proximal joint
    pub joint_b: Point2,
}

impl TrackedPoints {
    /// Creates a new keypoint set.
    #[must_use]
    pub fn new(tip: Point2, joint_a: Point2, joint_b: Point2) -> Self {
        Self {
            tip,
            joint_a,
            joint_b,
        }
    }

    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.tip.is_finite() && self.joint_a.is_finite() && self.joint_b.is_finite()
    }
}

/// One frame of landmark input from the external tracker.
///
/// Immutable; produced once per camera frame. `points == None` means the
/// limb was not visible in this frame — the detector treats such frames as
/// dropped rather than as a state reset.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LandmarkFrame {
    /// Capture timestamp from the source's monotonic clock, in milliseconds
    pub timestamp_ms: f64,
    /// Required keypoints, absent when the limb is not visible
    pub points: Option<TrackedPoints>,
    /// Tracker confidence for this frame, [0.0, 1.0]
    pub confidence: f64,
}

impl LandmarkFrame {
    /// Creates a frame with visible keypoints, validating that the timestamp
    /// and every coordinate are finite.
    ///
    /// Returns `None` for malformed input (NaN/infinite values). This is the
    /// ingestion boundary: malformed frames become "frame dropped", never an
    /// error inside the detector.
    #[must_use]
    pub fn new(timestamp_ms: f64, points: TrackedPoints, confidence: f64) -> Option<Self> {
        if !timestamp_ms.is_finite() || !points.is_finite() || !confidence.is_finite() {
            return None;
        }
        Some(Self {
            timestamp_ms,
            points: Some(points),
            confidence,
        })
    }

    /// Creates a frame on which the limb was not visible.
    #[must_use]
    pub fn not_visible(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            points: None,
            confidence: 0.0,
        }
    }

    /// Maps a full 21-point hand landmark set to the tracked keypoints,
    /// using the index-finger tip and its two proximal joints.
    ///
    /// Returns `None` if fewer than 21 points are supplied or any required
    /// coordinate is malformed.
    #[must_use]
    pub fn from_hand(landmarks: &[Point2], timestamp_ms: f64, confidence: f64) -> Option<Self> {
        if landmarks.len() < crate::HAND_LANDMARK_COUNT {
            return None;
        }
        let points = TrackedPoints::new(
            landmarks[INDEX_FINGER_TIP],
            landmarks[INDEX_FINGER_DIP],
            landmarks[INDEX_FINGER_PIP],
        );
        Self::new(timestamp_ms, points, confidence)
    }

    /// Returns the keypoints if the limb was visible.
    #[must_use]
    pub fn points(&self) -> Option<&TrackedPoints> {
        self.points.as_ref()
    }

    /// Returns `true` if the limb was visible in this frame.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.points.is_some()
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// One discrete detected repetitive-motion instance (finger tap, fixation
/// shift).
///
/// Created exactly once by the event detector per qualifying frame;
/// immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TapEvent {
    /// Monotonic capture timestamp in milliseconds
    pub timestamp_ms: f64,
    /// Tip position at the moment the event fired
    pub position: Point2,
    /// Displacement relative to the firing threshold, capped at 3.0
    pub magnitude: f64,
    /// Extension heuristic value at the moment the event fired
    pub shape_metric: f64,
}

// =============================================================================
// Trial Types
// =============================================================================

/// A sealed, timed measurement window for one limb.
///
/// A `Trial` is assembled by the trial recorder at seal time and is immutable
/// from construction on — there is no way to append events to an existing
/// `Trial`, which is how the "no events after sealing" invariant is enforced.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trial {
    id: TrialId,
    limb: LimbLabel,
    start_ms: f64,
    duration_secs: f64,
    started_at: DateTime<Utc>,
    events: Vec<TapEvent>,
}

impl Trial {
    /// Assembles a sealed trial from recorded events.
    ///
    /// Events whose timestamps do not strictly increase are discarded (with
    /// a debug log), preserving the monotonicity invariant without failing
    /// the trial.
    #[must_use]
    pub fn from_events(
        limb: LimbLabel,
        start_ms: f64,
        duration_secs: f64,
        started_at: DateTime<Utc>,
        events: Vec<TapEvent>,
    ) -> Self {
        let mut ordered: Vec<TapEvent> = Vec::with_capacity(events.len());
        for event in events {
            match ordered.last() {
                Some(last) if event.timestamp_ms <= last.timestamp_ms => {
                    tracing::debug!(
                        timestamp_ms = event.timestamp_ms,
                        "discarding out-of-order event at trial seal"
                    );
                }
                _ => ordered.push(event),
            }
        }
        Self {
            id: TrialId::new(),
            limb,
            start_ms,
            duration_secs,
            started_at,
            events: ordered,
        }
    }

    /// Unique identity of this trial.
    #[must_use]
    pub fn id(&self) -> TrialId {
        self.id
    }

    /// Which limb this trial measured.
    #[must_use]
    pub fn limb(&self) -> &LimbLabel {
        &self.limb
    }

    /// Monotonic-clock start of the measurement window, in milliseconds.
    #[must_use]
    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Configured window length in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Monotonic-clock end of the measurement window, in milliseconds.
    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_secs * 1000.0
    }

    /// Wall-clock time the trial was started (export metadata only).
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The recorded events, oldest first, strictly increasing in timestamp.
    #[must_use]
    pub fn events(&self) -> &[TapEvent] {
        &self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// The derived inter-event interval series.
    #[must_use]
    pub fn interval_series(&self) -> IntervalSeries {
        IntervalSeries::from_events(&self.events)
    }
}

/// The read-only series of consecutive inter-event intervals of a trial,
/// in milliseconds.
///
/// Always `max(0, events.len() - 1)` long; recomputed on demand from the
/// sealed event sequence, never cached mutably.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntervalSeries {
    values: Vec<f64>,
}

impl IntervalSeries {
    /// Derives the interval series from an ordered event sequence.
    #[must_use]
    pub fn from_events(events: &[TapEvent]) -> Self {
        let values = events
            .windows(2)
            .map(|pair| pair[1].timestamp_ms - pair[0].timestamp_ms)
            .collect();
        Self { values }
    }

    /// The intervals in milliseconds, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of intervals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty (trials with fewer than two events).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the series, returning the raw interval vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_at(ms: f64) -> TapEvent {
        TapEvent {
            timestamp_ms: ms,
            position: Point2::new(0.5, 0.5),
            magnitude: 1.0,
            shape_metric: 10.0,
        }
    }

    #[test]
    fn landmark_frame_rejects_nan() {
        let points = TrackedPoints::new(
            Point2::new(f64::NAN, 0.5),
            Point2::new(0.5, 0.5),
            Point2::new(0.5, 0.5),
        );
        assert!(LandmarkFrame::new(0.0, points, 0.9).is_none());
    }

    #[test]
    fn landmark_frame_rejects_infinite_timestamp() {
        let points = TrackedPoints::new(
            Point2::new(0.5, 0.5),
            Point2::new(0.5, 0.5),
            Point2::new(0.5, 0.5),
        );
        assert!(LandmarkFrame::new(f64::INFINITY, points, 0.9).is_none());
    }

    #[test]
    fn landmark_frame_valid() {
        let points = TrackedPoints::new(
            Point2::new(0.5, 0.3),
            Point2::new(0.5, 0.4),
            Point2::new(0.5, 0.45),
        );
        let frame = LandmarkFrame::new(16.7, points, 0.95).unwrap();
        assert!(frame.is_visible());
        assert!((frame.timestamp_ms - 16.7).abs() < f64::EPSILON);
    }

    #[test]
    fn not_visible_frame() {
        let frame = LandmarkFrame::not_visible(100.0);
        assert!(!frame.is_visible());
        assert!(frame.points().is_none());
    }

    #[test]
    fn from_hand_requires_full_landmark_set() {
        let short = vec![Point2::new(0.5, 0.5); 10];
        assert!(LandmarkFrame::from_hand(&short, 0.0, 0.9).is_none());

        let full = vec![Point2::new(0.5, 0.5); 21];
        let frame = LandmarkFrame::from_hand(&full, 0.0, 0.9).unwrap();
        assert!(frame.is_visible());
    }

    #[test]
    fn from_hand_picks_index_finger_points() {
        let mut full = vec![Point2::new(0.0, 0.0); 21];
        full[crate::INDEX_FINGER_TIP] = Point2::new(0.1, 0.2);
        full[crate::INDEX_FINGER_DIP] = Point2::new(0.3, 0.4);
        full[crate::INDEX_FINGER_PIP] = Point2::new(0.5, 0.6);

        let frame = LandmarkFrame::from_hand(&full, 0.0, 0.9).unwrap();
        let points = frame.points().unwrap();
        assert!((points.tip.y - 0.2).abs() < f64::EPSILON);
        assert!((points.joint_a.y - 0.4).abs() < f64::EPSILON);
        assert!((points.joint_b.y - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn trial_from_events_preserves_ordered_events() {
        let trial = Trial::from_events(
            LimbLabel::left_hand(),
            0.0,
            10.0,
            Utc::now(),
            vec![event_at(0.0), event_at(200.0), event_at(400.0)],
        );
        assert_eq!(trial.event_count(), 3);
        assert!((trial.end_ms() - 10_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn trial_from_events_discards_out_of_order() {
        let trial = Trial::from_events(
            LimbLabel::left_hand(),
            0.0,
            10.0,
            Utc::now(),
            vec![
                event_at(0.0),
                event_at(200.0),
                event_at(200.0), // duplicate
                event_at(150.0), // regression
                event_at(400.0),
            ],
        );
        assert_eq!(trial.event_count(), 3);
        let timestamps: Vec<f64> = trial.events().iter().map(|e| e.timestamp_ms).collect();
        assert_eq!(timestamps, vec![0.0, 200.0, 400.0]);
    }

    #[test]
    fn interval_series_length_invariant() {
        assert_eq!(IntervalSeries::from_events(&[]).len(), 0);
        assert_eq!(IntervalSeries::from_events(&[event_at(0.0)]).len(), 0);
        assert_eq!(
            IntervalSeries::from_events(&[event_at(0.0), event_at(100.0)]).len(),
            1
        );
    }

    #[test]
    fn interval_series_values() {
        let series =
            IntervalSeries::from_events(&[event_at(0.0), event_at(100.0), event_at(300.0)]);
        assert_eq!(series.as_slice(), &[100.0, 200.0]);
    }

    #[test]
    fn trial_ids_are_unique() {
        let a = TrialId::new();
        let b = TrialId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn limb_label_display() {
        assert_eq!(LimbLabel::left_hand().as_str(), "left_hand");
        assert_eq!(LimbLabel::new("gaze").to_string(), "gaze");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn tap_event_serde_roundtrip() {
        let event = event_at(123.0);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: TapEvent = serde_json::from_str(&json).unwrap();
        assert!((parsed.timestamp_ms - 123.0).abs() < f64::EPSILON);
    }
}
