//! Deadline-based task primitives.
//!
//! Both types are plain values owned by the component that schedules work.
//! They never run anything on their own: the owner polls them with the
//! current `Instant` and acts on what they report. Dropping the owner drops
//! the schedule, so there is nothing left to fire after disposal.

use std::time::{Duration, Instant};

/// A cancellable recurring task with a fixed period.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Schedule the first firing one period after `now`. Restarting an
    /// active interval re-anchors it.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns how many periods have elapsed since the last poll and
    /// advances the deadline past `now`. Missed periods are all reported so
    /// a stalled caller catches up instead of drifting.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut fired = 0;
        while due <= now {
            fired += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        fired
    }
}

/// A cancellable one-shot task that is pushed back every time it is touched.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    due: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    /// Cancel whatever is pending and schedule a new firing `delay` from `now`.
    pub fn touch(&mut self, now: Instant) {
        self.due = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Fires at most once per `touch`: true when the quiet period has
    /// elapsed, after which nothing is pending.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
