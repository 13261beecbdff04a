//! Caller-owned assessment session for one limb.
//!
//! A session composes one [`TapDetector`] and one [`TrialRecorder`] with an
//! explicit lifetime; there is no process-wide shared instance, so
//! refractory timers and thresholds cannot leak across measurement
//! sessions. Each tracked limb gets its own session; when both
//! hands are tracked from one video stream, the two sessions are
//! independent state machines and each is only ever touched by one task at
//! a time.

use kinetap_core::{CoreResult, LandmarkFrame, LimbLabel, TapEvent, Trial};

use crate::config::{DetectorConfig, Sensitivity};
use crate::detector::{DetectorStats, TapDetector};
use crate::recorder::{RecordOutcome, TrialRecorder};

/// One limb's detector + trial lifecycle behind a single ingest call.
///
/// The session is the ingestion boundary: malformed frames never reach it
/// (frame construction already rejects them), not-visible frames flow
/// through as drops, and events are recorded only while a trial window is
/// live. Frames arriving after the window seals are processed by the
/// detector but simply not recorded.
#[derive(Debug)]
pub struct AssessmentSession {
    limb: LimbLabel,
    detector: TapDetector,
    recorder: TrialRecorder,
}

impl AssessmentSession {
    /// Creates a session with an explicit detector configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration is invalid.
    pub fn new(limb: LimbLabel, config: DetectorConfig) -> CoreResult<Self> {
        Ok(Self {
            limb,
            detector: TapDetector::new(config)?,
            recorder: TrialRecorder::new(),
        })
    }

    /// Creates a session from a sensitivity preset.
    #[must_use]
    pub fn with_sensitivity(limb: LimbLabel, sensitivity: Sensitivity) -> Self {
        Self {
            limb,
            detector: TapDetector::with_sensitivity(sensitivity),
            recorder: TrialRecorder::new(),
        }
    }

    /// The limb this session measures.
    #[must_use]
    pub fn limb(&self) -> &LimbLabel {
        &self.limb
    }

    /// Opens a timed trial window starting at `now_ms` on the stream clock.
    ///
    /// The detector is reset so refractory timers and edge-detection memory
    /// never leak between trials.
    ///
    /// # Errors
    ///
    /// Propagates [`TrialError::AlreadyRunning`] and
    /// [`TrialError::NonPositiveDuration`] from the recorder.
    ///
    /// [`TrialError::AlreadyRunning`]: kinetap_core::TrialError::AlreadyRunning
    /// [`TrialError::NonPositiveDuration`]: kinetap_core::TrialError::NonPositiveDuration
    pub fn start_trial(&mut self, duration_secs: f64, now_ms: f64) -> CoreResult<()> {
        self.recorder
            .start(self.limb.clone(), duration_secs, now_ms)?;
        self.detector.reset();
        Ok(())
    }

    /// Whether a trial window is currently open.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.recorder.is_running()
    }

    /// Ingests one landmark frame: checks window expiry, runs the detector,
    /// and records any emitted event into the open trial.
    ///
    /// Returns the emitted event, if any, whether or not a trial was open
    /// to record it.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> Option<TapEvent> {
        // Expiry by wall-clock comparison on every frame tick, so a quiet
        // stream still seals the window on time.
        self.recorder.check_expiry(frame.timestamp_ms);

        let event = self.detector.process_frame(frame)?;

        if self.recorder.is_running() {
            match self.recorder.record_event(event) {
                Ok(RecordOutcome::Recorded) => {}
                Ok(RecordOutcome::DroppedOutOfOrder | RecordOutcome::Expired) | Err(_) => {
                    tracing::trace!(timestamp_ms = event.timestamp_ms, "event not recorded");
                }
            }
        }
        Some(event)
    }

    /// Stops the open trial early and returns it sealed.
    ///
    /// # Errors
    ///
    /// [`TrialError::NotRunning`] if no trial is open (including when the
    /// window already sealed itself on expiry — use
    /// [`take_completed`](Self::take_completed) for that trial).
    ///
    /// [`TrialError::NotRunning`]: kinetap_core::TrialError::NotRunning
    pub fn stop_trial(&mut self) -> CoreResult<Trial> {
        self.recorder.stop()
    }

    /// Takes a trial that sealed automatically on expiry, if one is pending.
    #[must_use]
    pub fn take_completed(&mut self) -> Option<Trial> {
        self.recorder.take_completed()
    }

    /// Detector counters for this session.
    #[must_use]
    pub fn detector_stats(&self) -> DetectorStats {
        self.detector.stats()
    }
}
