//! Tick-driven deferred actions
//!
//! A tiny cancellable timer queue: actions fire after a duration,
//! advanced by the host's per-frame tick. No threads, no sleeping; a
//! pending action can be cancelled at any point before it fires.

use std::time::Duration;

/// Handle to a scheduled action, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<A> {
    id: u64,
    remaining: Duration,
    action: A,
}

/// Cancellable fire-after-duration queue
#[derive(Debug)]
pub struct Scheduler<A> {
    next_id: u64,
    entries: Vec<Entry<A>>,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Schedule `action` to fire once `delay` has elapsed across ticks.
    /// A zero delay fires on the next tick, never synchronously.
    pub fn schedule(&mut self, delay: Duration, action: A) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            remaining: delay,
            action,
        });
        TimerHandle(id)
    }

    /// Cancel a pending action. Returns whether anything was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != handle.0);
        self.entries.len() != before
    }

    /// Drop every pending action
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Number of pending actions
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Advance all pending actions by `delta`, returning the ones that
    /// fired, in the order they were scheduled.
    pub fn advance(&mut self, delta: Duration) -> Vec<A> {
        for entry in &mut self.entries {
            entry.remaining = entry.remaining.saturating_sub(delta);
        }

        let mut fired = Vec::new();
        let mut remaining = Vec::new();
        for entry in self.entries.drain(..) {
            if entry.remaining.is_zero() {
                fired.push(entry.action);
            } else {
                remaining.push(entry);
            }
        }
        self.entries = remaining;
        fired
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(1500), "advance");

        assert!(scheduler.advance(Duration::from_millis(1000)).is_empty());
        assert_eq!(scheduler.pending(), 1);

        let fired = scheduler.advance(Duration::from_millis(500));
        assert_eq!(fired, vec!["advance"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_zero_delay_fires_on_next_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::ZERO, 1u8);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(Duration::ZERO), vec![1]);
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(100), "stale");
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(10), 1);
        scheduler.schedule(Duration::from_millis(20), 2);
        scheduler.cancel_all();
        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_fires_in_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(10), 1);
        scheduler.schedule(Duration::from_millis(5), 2);
        // Both elapse in the same tick; schedule order wins.
        assert_eq!(scheduler.advance(Duration::from_millis(10)), vec![1, 2]);
    }
}
