//! Detector configuration and sensitivity presets.

use kinetap_core::{CoreError, CoreResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width of the fixed reference canvas thresholds are expressed against.
pub const REFERENCE_CANVAS_WIDTH: f64 = 640.0;

/// Height of the fixed reference canvas thresholds are expressed against.
pub const REFERENCE_CANVAS_HEIGHT: f64 = 480.0;

/// Sensitivity presets for the tap detector.
///
/// A lower threshold and a shorter refractory interval increase the
/// detection rate and the false-positive risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sensitivity {
    /// Threshold 35 canvas units, refractory 200 ms
    Low,
    /// Threshold 25 canvas units, refractory 150 ms
    #[default]
    Normal,
    /// Threshold 15 canvas units, refractory 100 ms
    High,
}

impl Sensitivity {
    /// The displacement threshold for this preset, in canvas units.
    #[must_use]
    pub const fn tap_threshold(self) -> f64 {
        match self {
            Self::Low => 35.0,
            Self::Normal => 25.0,
            Self::High => 15.0,
        }
    }

    /// The refractory interval for this preset, in milliseconds.
    #[must_use]
    pub const fn min_tap_interval_ms(self) -> f64 {
        match self {
            Self::Low => 200.0,
            Self::Normal => 150.0,
            Self::High => 100.0,
        }
    }
}

/// Configuration for the tap detector.
///
/// Thresholds are expressed in units of the fixed reference canvas
/// (640×480): normalized landmark coordinates are scaled onto that canvas
/// before comparison. Sensitivity therefore depends on camera distance and
/// framing, not on actual hand size.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// Minimum downward tip displacement per frame to fire, in canvas units
    pub tap_threshold: f64,

    /// Refractory period: minimum time between emitted events, in ms
    pub min_tap_interval_ms: f64,

    /// Upper bound on the extension heuristic; a fully curled digit does
    /// not fire. Canvas units.
    pub max_curvature: f64,

    /// Reset the edge-detection memory after the limb has been occluded
    /// this long, in ms. `None` (the default) keeps memory across
    /// occlusions of any length.
    pub occlusion_timeout_ms: Option<f64>,

    /// Reference canvas width used to scale normalized coordinates
    pub canvas_width: f64,

    /// Reference canvas height used to scale normalized coordinates
    pub canvas_height: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::preset(Sensitivity::Normal)
    }
}

impl DetectorConfig {
    /// Configuration for a sensitivity preset, with default curvature bound
    /// and reference canvas.
    #[must_use]
    pub fn preset(sensitivity: Sensitivity) -> Self {
        Self {
            tap_threshold: sensitivity.tap_threshold(),
            min_tap_interval_ms: sensitivity.min_tap_interval_ms(),
            max_curvature: 40.0,
            occlusion_timeout_ms: None,
            canvas_width: REFERENCE_CANVAS_WIDTH,
            canvas_height: REFERENCE_CANVAS_HEIGHT,
        }
    }

    /// Create a new builder.
    #[must_use]
    pub fn builder() -> DetectorConfigBuilder {
        DetectorConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any threshold, interval, or canvas
    /// dimension is non-finite or not strictly positive.
    pub fn validate(&self) -> CoreResult<()> {
        let positive = [
            ("tap_threshold", self.tap_threshold),
            ("min_tap_interval_ms", self.min_tap_interval_ms),
            ("max_curvature", self.max_curvature),
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::configuration(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if let Some(timeout) = self.occlusion_timeout_ms {
            if !timeout.is_finite() || timeout <= 0.0 {
                return Err(CoreError::configuration(format!(
                    "occlusion_timeout_ms must be positive and finite, got {timeout}"
                )));
            }
        }
        Ok(())
    }
}

/// Builder for [`DetectorConfig`].
#[derive(Debug, Default)]
pub struct DetectorConfigBuilder {
    config: DetectorConfig,
}

impl DetectorConfigBuilder {
    /// Create a new builder starting from the normal preset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Start from a sensitivity preset.
    #[must_use]
    pub fn sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.config.tap_threshold = sensitivity.tap_threshold();
        self.config.min_tap_interval_ms = sensitivity.min_tap_interval_ms();
        self
    }

    /// Set the displacement threshold in canvas units.
    #[must_use]
    pub fn tap_threshold(mut self, threshold: f64) -> Self {
        self.config.tap_threshold = threshold;
        self
    }

    /// Set the refractory interval in milliseconds.
    #[must_use]
    pub fn min_tap_interval_ms(mut self, interval_ms: f64) -> Self {
        self.config.min_tap_interval_ms = interval_ms;
        self
    }

    /// Set the curvature bound in canvas units.
    #[must_use]
    pub fn max_curvature(mut self, curvature: f64) -> Self {
        self.config.max_curvature = curvature;
        self
    }

    /// Reset detector memory after this long without the limb visible.
    #[must_use]
    pub fn occlusion_timeout_ms(mut self, timeout_ms: f64) -> Self {
        self.config.occlusion_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the reference canvas dimensions.
    #[must_use]
    pub fn canvas(mut self, width: f64, height: f64) -> Self {
        self.config.canvas_width = width;
        self.config.canvas_height = height;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> DetectorConfig {
        self.config
    }
}
