//! # Kinetap Core
//!
//! Core types, errors, and numeric helpers for the kinetap motor-performance
//! toolkit.
//!
//! Kinetap turns a per-frame stream of body-landmark coordinates into
//! discrete timestamped events and clinically interpretable
//! motor-performance metrics. This crate provides the foundational building
//! blocks shared by the detection and analytics crates:
//!
//! - **Core Data Types**: [`LandmarkFrame`], [`TapEvent`], [`Trial`], and
//!   [`IntervalSeries`] for representing landmark input and measurement
//!   results.
//!
//! - **Error Types**: the [`error`] module, with lifecycle errors surfaced
//!   synchronously and input problems handled as dropped frames.
//!
//! - **Numeric Helpers**: guarded statistics primitives in [`utils`] that
//!   never propagate NaN or infinity.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization of all public value types
//!
//! ## Example
//!
//! ```rust
//! use kinetap_core::{LandmarkFrame, Point2, TrackedPoints};
//!
//! let points = TrackedPoints::new(
//!     Point2::new(0.52, 0.31),
//!     Point2::new(0.52, 0.38),
//!     Point2::new(0.52, 0.44),
//! );
//! let frame = LandmarkFrame::new(16.7, points, 0.95).unwrap();
//! assert!(frame.is_visible());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types at the crate root
pub use error::{CoreError, CoreResult, TrialError};
pub use types::{
    // Input types
    LandmarkFrame, Point2, TrackedPoints,
    // Event types
    TapEvent,
    // Trial types
    IntervalSeries, Trial,
    // Common types
    LimbLabel, TrialId,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of keypoints in a full hand landmark set
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Index of the index-finger tip in a full hand landmark set
pub const INDEX_FINGER_TIP: usize = 8;

/// Index of the index-finger DIP joint in a full hand landmark set
pub const INDEX_FINGER_DIP: usize = 7;

/// Index of the index-finger PIP joint in a full hand landmark set
pub const INDEX_FINGER_PIP: usize = 6;

/// Prelude module for convenient imports.
///
/// ```rust
/// use kinetap_core::prelude::*;
/// ```
pub mod prelude {

    pub use crate::error::{CoreError, CoreResult, TrialError};
    pub use crate::types::{
        IntervalSeries, LandmarkFrame, LimbLabel, Point2, TapEvent, TrackedPoints, Trial, TrialId,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_valid() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn hand_landmark_indices_in_range() {
        assert!(INDEX_FINGER_TIP < HAND_LANDMARK_COUNT);
        assert!(INDEX_FINGER_DIP < HAND_LANDMARK_COUNT);
        assert!(INDEX_FINGER_PIP < HAND_LANDMARK_COUNT);
    }
}
