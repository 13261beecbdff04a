//! # Kinetap Analytics
//!
//! Motor-performance statistics over sealed trials.
//!
//! The statistics engine is a set of pure functions invoked once per sealed
//! trial, never per frame:
//!
//! 1. **Single-trial analysis** ([`analyze`]): interval statistics,
//!    rhythm-consistency classification, half-split fatigue analysis, and
//!    absolute-rate speed banding, folded into one
//!    [`PerformanceSummary`].
//! 2. **Bilateral comparison** ([`compare`]): asymmetry and slowness
//!    findings across two analyzed sides, as descriptive data rather than
//!    diagnoses.
//! 3. **Trial store** ([`TrialStore`]): the in-memory working set pairs are
//!    read from.
//!
//! Statistical degeneracy is never an error: metrics degrade to documented
//! sentinels (0, `"N/A"`) and no output field is ever NaN or infinite.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use kinetap_analytics::{analyze, compare, RhythmClass};
//! use kinetap_core::{LimbLabel, Point2, TapEvent, Trial};
//!
//! let events: Vec<TapEvent> = (0..5)
//!     .map(|i| TapEvent {
//!         timestamp_ms: f64::from(i) * 200.0,
//!         position: Point2::new(0.5, 0.5),
//!         magnitude: 1.2,
//!         shape_metric: 8.0,
//!     })
//!     .collect();
//! let trial = Trial::from_events(LimbLabel::right_hand(), 0.0, 1.0, Utc::now(), events);
//!
//! let summary = analyze(&trial);
//! assert_eq!(summary.event_count, 5);
//! assert_eq!(summary.rhythm_class, RhythmClass::Excellent);
//!
//! let findings = compare(&summary, &summary);
//! assert_eq!(findings.len(), 1); // identical sides: a single normal finding
//! ```

#![forbid(unsafe_code)]

pub mod analyze;
pub mod bilateral;
pub mod store;
pub mod summary;

pub use analyze::analyze;
pub use bilateral::{compare, Finding, FindingKind, Severity};
pub use store::TrialStore;
pub use summary::{
    FatigueAnalysis, FatigueLabel, PerformanceSummary, RhythmClass, SpeedClass,
    REFERENCE_TAP_RATE_HZ,
};

// Re-exported so downstream callers need only this crate for the common path
pub use kinetap_core::{IntervalSeries, Trial};
