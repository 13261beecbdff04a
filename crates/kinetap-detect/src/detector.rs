//! Per-limb tap/event detection.
//!
//! The detector is a stateful per-frame filter: it consumes one
//! [`LandmarkFrame`] at a time and emits zero or one [`TapEvent`] per frame.
//! An event fires on a sufficiently large downward tip displacement between
//! consecutive visible frames, provided the digit is not fully curled and
//! the refractory interval since the previous event has elapsed.
//!
//! The state machine per limb instance is
//! `Idle → Armed → Refractory → Armed`: `Idle` until a first visible frame
//! provides the prior tip position, `Armed` while ready to fire, and
//! `Refractory` for `min_tap_interval_ms` after each emitted event.

use kinetap_core::{CoreResult, LandmarkFrame, TapEvent};

use crate::config::{DetectorConfig, Sensitivity};

/// Observable state of the detector's edge-detection machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// No prior tip sample yet
    Idle,
    /// Prior sample held, ready to detect
    Armed,
    /// An event recently fired; new events suppressed
    Refractory,
}

/// Counters describing what the detector has seen and emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectorStats {
    /// Frames presented to the detector
    pub frames_seen: usize,
    /// Frames dropped because the limb was not visible
    pub frames_not_visible: usize,
    /// Frames dropped because their timestamp did not advance
    pub frames_out_of_order: usize,
    /// Events emitted
    pub events_emitted: usize,
}

/// Stateful per-limb tap detector.
///
/// Each limb gets its own instance; instances are never shared between
/// producers (single-writer ownership, `&mut self` on the per-frame path).
#[derive(Debug)]
pub struct TapDetector {
    config: DetectorConfig,
    /// Prior tip Y in canvas units; the edge-detection memory.
    prev_tip_y: Option<f64>,
    /// Timestamp of the most recently emitted event.
    last_event_ms: Option<f64>,
    /// Timestamp of the most recently accepted frame.
    last_frame_ms: Option<f64>,
    /// Timestamp of the most recent frame on which the limb was visible.
    last_visible_ms: Option<f64>,
    stats: DetectorStats,
}

impl TapDetector {
    /// Creates a detector with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration fails
    /// [`DetectorConfig::validate`].
    pub fn new(config: DetectorConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            prev_tip_y: None,
            last_event_ms: None,
            last_frame_ms: None,
            last_visible_ms: None,
            stats: DetectorStats::default(),
        })
    }

    /// Creates a detector from a sensitivity preset.
    #[must_use]
    pub fn with_sensitivity(sensitivity: Sensitivity) -> Self {
        Self {
            config: DetectorConfig::preset(sensitivity),
            prev_tip_y: None,
            last_event_ms: None,
            last_frame_ms: None,
            last_visible_ms: None,
            stats: DetectorStats::default(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Counters describing frames seen, dropped, and events emitted.
    #[must_use]
    pub fn stats(&self) -> DetectorStats {
        self.stats
    }

    /// Current state of the edge-detection machine, relative to the last
    /// processed frame.
    #[must_use]
    pub fn state(&self) -> DetectorState {
        let Some(_prev) = self.prev_tip_y else {
            return DetectorState::Idle;
        };
        match (self.last_event_ms, self.last_frame_ms) {
            (Some(event_ms), Some(frame_ms))
                if frame_ms - event_ms <= self.config.min_tap_interval_ms =>
            {
                DetectorState::Refractory
            }
            _ => DetectorState::Armed,
        }
    }

    /// Consumes one landmark frame and emits at most one event.
    ///
    /// Frames on which the limb is not visible perform no transition and do
    /// not update the edge-detection memory: a single occlusion cannot be
    /// misread as a large displacement on the next visible frame. Frames
    /// whose timestamp does not advance past the previous frame are dropped
    /// defensively.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> Option<TapEvent> {
        self.stats.frames_seen += 1;
        let now_ms = frame.timestamp_ms;

        if let Some(last) = self.last_frame_ms {
            if now_ms <= last {
                self.stats.frames_out_of_order += 1;
                tracing::trace!(timestamp_ms = now_ms, "dropping non-monotonic frame");
                return None;
            }
        }
        self.last_frame_ms = Some(now_ms);

        let Some(points) = frame.points() else {
            self.stats.frames_not_visible += 1;
            if let (Some(timeout), Some(seen)) =
                (self.config.occlusion_timeout_ms, self.last_visible_ms)
            {
                if now_ms - seen > timeout && self.prev_tip_y.is_some() {
                    tracing::debug!(
                        occluded_ms = now_ms - seen,
                        "occlusion timeout elapsed, resetting detector memory"
                    );
                    self.prev_tip_y = None;
                }
            }
            return None;
        };
        self.last_visible_ms = Some(now_ms);

        let tip_y = points.tip.y * self.config.canvas_height;

        let event = match self.prev_tip_y {
            None => None,
            Some(prev_y) => {
                let dy = tip_y - prev_y;
                // Extension heuristic: average vertical offset of the two
                // proximal joints minus the tip position, in canvas units.
                let curvature = ((points.joint_a.y + points.joint_b.y) / 2.0 - points.tip.y)
                    * self.config.canvas_height;
                let refractory_clear = self
                    .last_event_ms
                    .is_none_or(|t| now_ms - t > self.config.min_tap_interval_ms);

                if dy > self.config.tap_threshold
                    && curvature < self.config.max_curvature
                    && refractory_clear
                {
                    self.last_event_ms = Some(now_ms);
                    self.stats.events_emitted += 1;
                    Some(TapEvent {
                        timestamp_ms: now_ms,
                        position: points.tip,
                        magnitude: (dy / self.config.tap_threshold).min(3.0),
                        shape_metric: curvature,
                    })
                } else {
                    None
                }
            }
        };

        // Edge-detection memory, updated on every visible frame whether or
        // not an event fired.
        self.prev_tip_y = Some(tip_y);

        event
    }

    /// Clears all per-stream state and counters; configuration is kept.
    pub fn reset(&mut self) {
        self.prev_tip_y = None;
        self.last_event_ms = None;
        self.last_frame_ms = None;
        self.last_visible_ms = None;
        self.stats = DetectorStats::default();
    }
}
