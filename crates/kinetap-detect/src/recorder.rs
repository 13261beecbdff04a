//! Trial lifecycle: the timed measurement window events are recorded into.
//!
//! A recorder owns at most one open trial at a time. Events append to the
//! open trial only while the window is live; the moment the configured
//! duration elapses (or `stop` is called) the trial seals and no further
//! events are accepted. Out-of-order events are dropped and logged, never
//! surfaced as failures; lifecycle misuse is surfaced synchronously.

use chrono::{DateTime, Utc};
use kinetap_core::{CoreResult, LimbLabel, TapEvent, Trial, TrialError};

/// What happened to an event offered to [`TrialRecorder::record_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Appended to the open trial
    Recorded,
    /// Dropped: timestamp not strictly greater than the last recorded event
    DroppedOutOfOrder,
    /// The window had elapsed; the trial sealed and the event was dropped
    Expired,
}

#[derive(Debug)]
struct OpenTrial {
    limb: LimbLabel,
    start_ms: f64,
    duration_secs: f64,
    started_at: DateTime<Utc>,
    events: Vec<TapEvent>,
}

impl OpenTrial {
    fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_secs * 1000.0
    }

    fn seal(self) -> Trial {
        Trial::from_events(
            self.limb,
            self.start_ms,
            self.duration_secs,
            self.started_at,
            self.events,
        )
    }
}

/// Owns the start/stop lifecycle of one timed measurement window per limb.
///
/// Purely in-memory; performs no I/O and never blocks.
#[derive(Debug, Default)]
pub struct TrialRecorder {
    open: Option<OpenTrial>,
    completed: Option<Trial>,
}

impl TrialRecorder {
    /// Creates an idle recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new trial for `limb`, starting at `now_ms` on the monotonic
    /// stream clock.
    ///
    /// # Errors
    ///
    /// - [`TrialError::AlreadyRunning`] if a trial is already open
    /// - [`TrialError::NonPositiveDuration`] if `duration_secs` is not a
    ///   positive, finite number
    pub fn start(&mut self, limb: LimbLabel, duration_secs: f64, now_ms: f64) -> CoreResult<()> {
        if let Some(open) = &self.open {
            return Err(TrialError::already_running(open.limb.as_str()).into());
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(TrialError::NonPositiveDuration {
                seconds: duration_secs,
            }
            .into());
        }
        tracing::debug!(limb = %limb, duration_secs, "trial started");
        self.open = Some(OpenTrial {
            limb,
            start_ms: now_ms,
            duration_secs,
            started_at: Utc::now(),
            events: Vec::new(),
        });
        Ok(())
    }

    /// Whether a trial is currently open.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.open.is_some()
    }

    /// Offers an event to the open trial.
    ///
    /// Expiry is checked against the event's own timestamp before the event
    /// is accepted: an event at or past the end of the window seals the
    /// trial (retrievable via [`take_completed`](Self::take_completed)) and
    /// is itself dropped. Monotonicity is enforced defensively even though
    /// the detector already guarantees ordering: an event whose timestamp is
    /// not strictly greater than the last recorded one is dropped and
    /// logged, never an error.
    ///
    /// # Errors
    ///
    /// [`TrialError::NotRunning`] if no trial is open.
    pub fn record_event(&mut self, event: TapEvent) -> CoreResult<RecordOutcome> {
        let Some(open) = &mut self.open else {
            return Err(TrialError::NotRunning.into());
        };

        if event.timestamp_ms >= open.end_ms() {
            self.seal_open();
            return Ok(RecordOutcome::Expired);
        }

        let last_ms = open
            .events
            .last()
            .map_or(open.start_ms - 1.0, |e| e.timestamp_ms);
        if event.timestamp_ms <= last_ms || event.timestamp_ms < open.start_ms {
            tracing::debug!(
                timestamp_ms = event.timestamp_ms,
                "dropping out-of-order event"
            );
            return Ok(RecordOutcome::DroppedOutOfOrder);
        }

        open.events.push(event);
        Ok(RecordOutcome::Recorded)
    }

    /// Seals the open trial if the window has elapsed at `now_ms`.
    ///
    /// Supports an external timer tick; returns `true` if the trial sealed
    /// on this call. The sealed trial is retrieved via
    /// [`take_completed`](Self::take_completed).
    pub fn check_expiry(&mut self, now_ms: f64) -> bool {
        match &self.open {
            Some(open) if now_ms >= open.end_ms() => {
                self.seal_open();
                true
            }
            _ => false,
        }
    }

    /// Stops the open trial early, sealing and returning it immediately.
    ///
    /// # Errors
    ///
    /// [`TrialError::NotRunning`] if no trial is open.
    pub fn stop(&mut self) -> CoreResult<Trial> {
        match self.open.take() {
            Some(open) => {
                tracing::debug!(events = open.events.len(), "trial stopped");
                Ok(open.seal())
            }
            None => Err(TrialError::NotRunning.into()),
        }
    }

    /// Takes a trial that sealed automatically on expiry, if one is pending.
    #[must_use]
    pub fn take_completed(&mut self) -> Option<Trial> {
        self.completed.take()
    }

    fn seal_open(&mut self) {
        if let Some(open) = self.open.take() {
            tracing::debug!(events = open.events.len(), "trial window elapsed, sealing");
            self.completed = Some(open.seal());
        }
    }
}
