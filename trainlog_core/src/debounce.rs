//! Cancellable deferred tasks with a quiet period.
//!
//! The owner feeds in monotonic timestamps; nothing runs on its own. A
//! scheduled payload becomes due once `quiet_period` has passed without a
//! newer `schedule` call, and `poll` hands it out exactly once.

use std::time::{Duration, Instant};

/// Default quiet period before a text edit is acted on
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct Pending<T> {
    payload: T,
    due_at: Instant,
}

/// A single-slot debouncer: a newer schedule replaces the pending task
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Schedule `payload`, cancelling anything still pending
    pub fn schedule(&mut self, payload: T, now: Instant) {
        if self.pending.is_some() {
            tracing::trace!("Superseding pending debounced task");
        }
        self.pending = Some(Pending {
            payload,
            due_at: now + self.quiet_period,
        });
    }

    /// Drop the pending task, returning its payload if there was one
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the payload if its quiet period has elapsed by `now`
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.due_at => self.pending.take().map(|p| p.payload),
            _ => None,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(300));
        d.schedule("a", t0);

        assert_eq!(d.poll(t0 + ms(299)), None);
        assert_eq!(d.poll(t0 + ms(300)), Some("a"));
        // only once
        assert_eq!(d.poll(t0 + ms(900)), None);
    }

    #[test]
    fn test_newer_schedule_supersedes() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(300));
        d.schedule("first", t0);
        d.schedule("second", t0 + ms(200));

        // first would have been due here, but it was replaced
        assert_eq!(d.poll(t0 + ms(300)), None);
        assert_eq!(d.poll(t0 + ms(500)), Some("second"));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(10));
        d.schedule(1, t0);
        assert!(d.is_pending());
        assert_eq!(d.cancel(), Some(1));
        assert_eq!(d.poll(t0 + ms(50)), None);
        assert_eq!(d.cancel(), None);
    }

    #[test]
    fn test_default_quiet_period() {
        let d: Debouncer<()> = Debouncer::default();
        assert_eq!(d.quiet_period(), ms(300));
        assert!(!d.is_pending());
    }
}
