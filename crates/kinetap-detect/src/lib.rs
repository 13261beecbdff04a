//! # Kinetap Detect
//!
//! Per-limb tap/event detection and trial lifecycle for the kinetap
//! motor-performance toolkit.
//!
//! # Architecture
//!
//! A frame stream flows through three stages per limb:
//!
//! 1. **Detection** ([`TapDetector`]): a stateful per-frame filter turning
//!    landmark displacement edges into discrete timestamped [`TapEvent`]s,
//!    with sensitivity presets and a refractory period.
//! 2. **Recording** ([`TrialRecorder`]): the timed measurement window the
//!    events accumulate into, sealing on stop or expiry.
//! 3. **Session** ([`AssessmentSession`]): a caller-owned facade that wires
//!    the two together behind a single `process_frame` call.
//!
//! All per-frame work is bounded-time and non-blocking; frame dispatch is
//! single-writer per limb.
//!
//! # Example
//!
//! ```
//! use kinetap_core::{LandmarkFrame, LimbLabel, Point2, TrackedPoints};
//! use kinetap_detect::{AssessmentSession, Sensitivity};
//!
//! let mut session =
//!     AssessmentSession::with_sensitivity(LimbLabel::right_hand(), Sensitivity::Normal);
//! session.start_trial(10.0, 0.0).unwrap();
//!
//! // Two frames of a downward index-tip flick: 0.30 -> 0.42 normalized
//! // is 57.6 reference-canvas units, past the 25-unit threshold.
//! let mut events = 0;
//! for (ts, y) in [(0.0, 0.30), (33.0, 0.42)] {
//!     let points = TrackedPoints::new(
//!         Point2::new(0.5, y),
//!         Point2::new(0.5, y),
//!         Point2::new(0.5, y),
//!     );
//!     let frame = LandmarkFrame::new(ts, points, 0.95).unwrap();
//!     if session.process_frame(&frame).is_some() {
//!         events += 1;
//!     }
//! }
//! assert_eq!(events, 1);
//!
//! let trial = session.stop_trial().unwrap();
//! assert_eq!(trial.event_count(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod detector;
pub mod recorder;
pub mod session;

pub use config::{
    DetectorConfig, DetectorConfigBuilder, Sensitivity, REFERENCE_CANVAS_HEIGHT,
    REFERENCE_CANVAS_WIDTH,
};
pub use detector::{DetectorState, DetectorStats, TapDetector};
pub use recorder::{RecordOutcome, TrialRecorder};
pub use session::AssessmentSession;

// Re-exported so downstream callers need only this crate for the common path
pub use kinetap_core::{LandmarkFrame, TapEvent, Trial};
