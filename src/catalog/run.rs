//! Run generations for discarding results of superseded fetches.
//!
//! Every call to [`RunTracker::begin`] bumps a shared counter and hands out
//! a [`RunToken`] holding the new value. A token whose generation no longer
//! equals the counter belongs to a stale run: the orchestrator stops issuing
//! requests for it and its results are never published.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RunTracker {
    current: Arc<AtomicU64>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run, superseding every earlier token.
    pub fn begin(&self) -> RunToken {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        RunToken {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Supersede the active run without starting another.
    pub fn cancel(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current_generation(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct RunToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RunToken {
    /// A token not tied to any tracker; it stays current forever.
    pub fn detached() -> Self {
        RunTracker::new().begin()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    pub fn is_stale(&self) -> bool {
        !self.is_current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_run_supersedes_older() {
        let tracker = RunTracker::new();
        let first = tracker.begin();
        assert!(first.is_current());

        let second = tracker.begin();
        assert!(first.is_stale());
        assert!(second.is_current());
        assert_eq!(second.generation(), first.generation() + 1);
        assert_eq!(tracker.current_generation(), second.generation());
    }

    #[test]
    fn test_cancel_makes_active_run_stale() {
        let tracker = RunTracker::new();
        let token = tracker.begin();
        tracker.cancel();
        assert!(token.is_stale());
    }

    #[test]
    fn test_clones_share_the_counter() {
        let tracker = RunTracker::new();
        let token = tracker.begin();
        tracker.clone().begin();
        assert!(token.is_stale());
    }

    #[test]
    fn test_detached_token_stays_current() {
        let token = RunToken::detached();
        assert!(token.is_current());
        assert_eq!(token.generation(), 1);
    }
}
