//! Cancellable scheduled callbacks.
//!
//! The [`Scheduler`] trait is the seam between timer-driven state machines
//! (the loading gate) and whatever actually keeps time. [`VirtualScheduler`]
//! is a deterministic clock: nothing happens until the owner pops the next
//! due event, which makes timelines reproducible in tests and at build time.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle for a scheduled event, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

pub trait Scheduler<E> {
    /// Deliver `event` once, `after` from now.
    fn schedule(&mut self, after: Duration, event: E) -> TimerId;

    /// Cancel a pending event. Returns `false` if it already fired or was
    /// cancelled before.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// A manual clock. Events fire only when popped via [`VirtualScheduler::next`]
/// or [`VirtualScheduler::next_until`]; popping advances `now` to the event's
/// due time.
#[derive(Debug)]
pub struct VirtualScheduler<E> {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TimerId), E>,
    due: BTreeMap<TimerId, Duration>,
}

impl<E> Default for VirtualScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> VirtualScheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
            due: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest pending event, advancing the clock to its due time.
    /// Ties fire in scheduling order.
    pub fn next(&mut self) -> Option<(Duration, E)> {
        let (&(at, id), _) = self.queue.iter().next()?;
        let event = self.queue.remove(&(at, id))?;
        self.due.remove(&id);
        self.now = at;
        Some((at, event))
    }

    /// Pop the earliest event due at or before `deadline`. When none is due,
    /// the clock moves to `deadline` and `None` is returned.
    pub fn next_until(&mut self, deadline: Duration) -> Option<(Duration, E)> {
        match self.queue.keys().next() {
            Some(&(at, _)) if at <= deadline => self.next(),
            _ => {
                self.now = self.now.max(deadline);
                None
            }
        }
    }
}

impl<E> Scheduler<E> for VirtualScheduler<E> {
    fn schedule(&mut self, after: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let at = self.now + after;
        self.queue.insert((at, id), event);
        self.due.insert(id, at);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        match self.due.remove(&id) {
            Some(at) => self.queue.remove(&(at, id)).is_some(),
            None => false,
        }
    }
}
