//! Settlement tracking for per-stem audio loads.
//!
//! After separation, each stem file is loaded by the audio collaborator
//! asynchronously and reports back with a one-shot completion event. Playback
//! controls must stay disabled until *every* requested load has settled
//! (succeeded or failed) and at least the minimum viable number succeeded.
//! `StemLoadSet` makes that rule explicit and testable, independent of the
//! loading machinery.

use crate::separation::StemKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Pending,
    Loaded,
    Failed,
}

/// Tracks one batch of stem loads from request to settlement.
#[derive(Debug, Clone)]
pub struct StemLoadSet {
    entries: Vec<(StemKey, LoadState)>,
    minimum: usize,
}

impl StemLoadSet {
    /// Begin tracking the given stems. Duplicates are ignored.
    pub fn new(requested: impl IntoIterator<Item = StemKey>) -> Self {
        let mut entries: Vec<(StemKey, LoadState)> = Vec::new();
        for key in requested {
            if !entries.iter().any(|(k, _)| *k == key) {
                entries.push((key, LoadState::Pending));
            }
        }
        Self {
            entries,
            minimum: 1,
        }
    }

    /// Raise the minimum number of successful loads required before controls
    /// unlock. Defaults to 1.
    pub fn with_minimum(mut self, minimum: usize) -> Self {
        self.minimum = minimum;
        self
    }

    /// Record a successful load completion.
    pub fn mark_loaded(&mut self, key: StemKey) {
        self.settle(key, LoadState::Loaded);
    }

    /// Record a failed load completion.
    pub fn mark_failed(&mut self, key: StemKey) {
        self.settle(key, LoadState::Failed);
    }

    fn settle(&mut self, key: StemKey, state: LoadState) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = state,
            None => log::warn!("completion event for unrequested stem {:?}", key),
        }
    }

    /// Number of loads that have succeeded so far.
    pub fn succeeded(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, s)| *s == LoadState::Loaded)
            .count()
    }

    /// True once every requested load has completed, either way.
    pub fn settled(&self) -> bool {
        self.entries.iter().all(|(_, s)| *s != LoadState::Pending)
    }

    /// Whether playback controls may be enabled: all loads settled and the
    /// minimum viable set succeeded. An empty request never unlocks.
    pub fn controls_enabled(&self) -> bool {
        !self.entries.is_empty() && self.settled() && self.succeeded() >= self.minimum
    }
}
