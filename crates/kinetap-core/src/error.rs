//! Error types for the kinetap motor-performance toolkit.
//!
//! This module provides error handling using [`thiserror`] for automatic
//! `Display` and `Error` trait implementations.
//!
//! # Error Hierarchy
//!
//! - [`CoreError`]: Top-level error type for the whole workspace
//! - [`TrialError`]: Lifecycle errors from the trial recorder
//!
//! # Example
//!
//! ```rust
//! use kinetap_core::error::{CoreError, TrialError};
//!
//! fn start_measurement() -> Result<(), CoreError> {
//!     // Lifecycle violation surfaced synchronously to the caller
//!     Err(TrialError::NotRunning.into())
//! }
//! ```

use thiserror::Error;

/// A specialized `Result` type for kinetap operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for the kinetap toolkit.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Trial lifecycle error
    #[error("Trial lifecycle error: {0}")]
    Trial(#[from] TrialError),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Validation error for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },
}

impl CoreError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Lifecycle errors are recoverable (the caller can stop the running
    /// trial and retry); configuration and validation errors are not.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Trial(e) => e.is_recoverable(),
            Self::Configuration { .. } | Self::Validation { .. } => false,
        }
    }
}

/// Lifecycle errors surfaced by the trial recorder.
///
/// These are always surfaced synchronously to the caller, never silently
/// swallowed. Dropped input frames and statistical degeneracy are *not*
/// errors and do not appear here.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TrialError {
    /// A trial for this limb is already open
    #[error("A trial for limb '{limb}' is already running")]
    AlreadyRunning {
        /// Label of the limb with the open trial
        limb: String,
    },

    /// No trial is currently open
    #[error("No trial is currently running")]
    NotRunning,

    /// Trial duration must be a positive, finite number of seconds
    #[error("Trial duration must be positive, got {seconds}s")]
    NonPositiveDuration {
        /// The rejected duration in seconds
        seconds: f64,
    },
}

impl TrialError {
    /// Creates a new `AlreadyRunning` error for the given limb.
    #[must_use]
    pub fn already_running(limb: impl Into<String>) -> Self {
        Self::AlreadyRunning { limb: limb.into() }
    }

    /// Returns `true` if this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::AlreadyRunning { .. } | Self::NotRunning => true,
            Self::NonPositiveDuration { .. } => false,
        }
    }
}
