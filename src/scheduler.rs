//! Deterministic timer queue.
//!
//! Every component that waits on time (notification timeouts, the simulated
//! form submission, counter ticks, the typewriter, the loader, the resize
//! debounce) owns a [`Scheduler`] instead of registering callbacks with a
//! real clock. The host tells the component what time it is; the component
//! pops whatever is due.
//!
//! ## Ordering
//!
//! Timers are ordered by due time, then by insertion order. Within one
//! scheduler, two timers due at the same millisecond fire in the order they
//! were scheduled. Across components the order at a shared millisecond is
//! fixed by [`App`](crate::app::App): form submission, notifications,
//! counters, typewriter, loader, then the resize debounce.
//!
//! ## Time
//!
//! Time is a plain millisecond count ([`Millis`]) since page load. It never
//! goes backwards: asking a scheduler to advance to an earlier instant is a
//! no-op.

use std::collections::{BTreeMap, HashMap};

/// Milliseconds since the page finished loading.
pub type Millis = u64;

/// Handle to a scheduled timer, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A queue of tasks keyed by the instant they become due.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Millis,
    next_seq: u64,
    queue: BTreeMap<(Millis, u64), T>,
    due_of: HashMap<u64, Millis>,
}

impl<T> Scheduler<T> {
    pub fn new(now: Millis) -> Self {
        Self {
            now,
            next_seq: 0,
            queue: BTreeMap::new(),
            due_of: HashMap::new(),
        }
    }

    /// The last instant this scheduler was advanced to.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedule `task` to fire `delay` ms after the scheduler's current time.
    pub fn schedule_in(&mut self, delay: Millis, task: T) -> TimerId {
        self.schedule_at(self.now.saturating_add(delay), task)
    }

    /// Schedule `task` at an absolute instant. Instants in the past fire on
    /// the next [`pop_due`](Self::pop_due).
    pub fn schedule_at(&mut self, due: Millis, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), task);
        self.due_of.insert(seq, due);
        TimerId(seq)
    }

    /// Remove a pending timer. Returns its task if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let due = self.due_of.remove(&id.0)?;
        self.queue.remove(&(due, id.0))
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// The scheduler's clock moves to the timer's due time (never backwards),
    /// so tasks scheduled while handling it are relative to when it fired,
    /// not to `until`.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, T)> {
        let &(due, seq) = self.queue.keys().next()?;
        if due > until {
            return None;
        }
        let task = self.queue.remove(&(due, seq))?;
        self.due_of.remove(&seq);
        self.now = self.now.max(due);
        Some((due, task))
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Trailing-edge debounce: only the last trigger inside the window fires.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait: Millis,
    timers: Scheduler<()>,
    pending: Option<TimerId>,
}

impl Debounce {
    pub fn new(wait: Millis, now: Millis) -> Self {
        Self {
            wait,
            timers: Scheduler::new(now),
            pending: None,
        }
    }

    /// Restart the window at `now`.
    pub fn trigger(&mut self, now: Millis) {
        self.timers.advance_to(now);
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }
        self.pending = Some(self.timers.schedule_in(self.wait, ()));
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    /// Returns true once when the window elapses without a new trigger.
    pub fn fire(&mut self, now: Millis) -> bool {
        match self.timers.pop_due(now) {
            Some(_) => {
                self.pending = None;
                true
            }
            None => {
                self.timers.advance_to(now);
                false
            }
        }
    }
}
