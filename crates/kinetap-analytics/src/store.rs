//! In-memory store of sealed trials.
//!
//! Holds the working set the presentation layer reads from — most
//! importantly the latest trial per limb for bilateral comparison. Capacity
//! limited with oldest-first eviction; nothing survives a process restart.

use kinetap_core::{LimbLabel, Trial};

/// Capacity-limited trial store with oldest-first eviction.
#[derive(Debug)]
pub struct TrialStore {
    /// Stored trials (oldest first).
    trials: Vec<Trial>,
    /// Maximum number of trials to retain.
    max_trials: usize,
}

impl TrialStore {
    /// Create a new store with a given maximum capacity.
    ///
    /// When the capacity is exceeded, the oldest trials are evicted.
    #[must_use]
    pub fn new(max_trials: usize) -> Self {
        Self {
            trials: Vec::with_capacity(max_trials.min(256)),
            max_trials: max_trials.max(1),
        }
    }

    /// Create with default capacity (64 trials, a full assessment session).
    #[must_use]
    pub fn default_capacity() -> Self {
        Self::new(64)
    }

    /// Push a sealed trial into the store.
    ///
    /// If the store is at capacity, the oldest trial is evicted.
    pub fn push(&mut self, trial: Trial) {
        if self.trials.len() >= self.max_trials {
            self.trials.remove(0);
        }
        self.trials.push(trial);
    }

    /// The most recently stored trial, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Trial> {
        self.trials.last()
    }

    /// The most recently stored trial for a specific limb, if any.
    #[must_use]
    pub fn latest_for(&self, limb: &LimbLabel) -> Option<&Trial> {
        self.trials.iter().rev().find(|t| t.limb() == limb)
    }

    /// The last `n` trials (most recent last).
    ///
    /// Returns fewer than `n` if the store contains fewer trials.
    #[must_use]
    pub fn history(&self, n: usize) -> &[Trial] {
        let start = self.trials.len().saturating_sub(n);
        &self.trials[start..]
    }

    /// Number of trials currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Maximum capacity of the store.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_trials
    }

    /// Clear all stored trials.
    pub fn clear(&mut self) {
        self.trials.clear();
    }
}

impl Default for TrialStore {
    fn default() -> Self {
        Self::default_capacity()
    }
}
