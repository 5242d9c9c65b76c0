//! Pomodoro countdown alternating fixed work and break intervals.
//!
//! The timer owns its one-second `Interval`; pausing cancels it and
//! dropping the timer releases it.

use crate::scheduler::Interval;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const WORK_SECS: u32 = 25 * 60;
pub const BREAK_SECS: u32 = 5 * 60;
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TimerMode {
    #[strum(serialize = "work")]
    Work,
    #[strum(serialize = "break")]
    Break,
}

impl TimerMode {
    pub fn duration_secs(self) -> u32 {
        match self {
            TimerMode::Work => WORK_SECS,
            TimerMode::Break => BREAK_SECS,
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimerMode::Work => TimerMode::Break,
            TimerMode::Break => TimerMode::Work,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not counting; `remaining` is kept for resume.
    Idle { mode: TimerMode, remaining: u32 },
    Running { mode: TimerMode, remaining: u32 },
    /// An interval finished and the timer waits for a manual start. `mode`
    /// is the interval that comes next. Only reached without auto-continue.
    Expired { mode: TimerMode, remaining: u32 },
}

impl TimerState {
    pub fn mode(&self) -> TimerMode {
        match *self {
            TimerState::Idle { mode, .. }
            | TimerState::Running { mode, .. }
            | TimerState::Expired { mode, .. } => mode,
        }
    }

    pub fn remaining(&self) -> u32 {
        match *self {
            TimerState::Idle { remaining, .. }
            | TimerState::Running { remaining, .. }
            | TimerState::Expired { remaining, .. } => remaining,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    state: TimerState,
    interval: Interval,
    auto_continue: bool,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PomodoroTimer {
    pub fn new(auto_continue: bool) -> Self {
        Self {
            state: TimerState::Idle {
                mode: TimerMode::Work,
                remaining: WORK_SECS,
            },
            interval: Interval::new(TICK),
            auto_continue,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode()
    }

    pub fn remaining(&self) -> u32 {
        self.state.remaining()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Whether the recurring tick is currently scheduled.
    pub fn is_ticking(&self) -> bool {
        self.interval.is_active()
    }

    /// Idle or expired -> running, scheduling the one-second tick from `now`.
    /// Already running is left untouched.
    pub fn start(&mut self, now: Instant) {
        match self.state {
            TimerState::Running { .. } => {}
            TimerState::Idle { mode, remaining } | TimerState::Expired { mode, remaining } => {
                self.state = TimerState::Running { mode, remaining };
                self.interval.start(now);
                debug!(%mode, remaining, "pomodoro started");
            }
        }
    }

    /// Running -> idle, cancelling the tick. `remaining` is preserved.
    pub fn pause(&mut self) {
        if let TimerState::Running { mode, remaining } = self.state {
            self.state = TimerState::Idle { mode, remaining };
            self.interval.cancel();
            debug!(%mode, remaining, "pomodoro paused");
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_active() {
            self.pause();
        } else {
            self.start(now);
        }
    }

    /// Back to an idle full work interval.
    pub fn reset(&mut self) {
        self.interval.cancel();
        self.state = TimerState::Idle {
            mode: TimerMode::Work,
            remaining: WORK_SECS,
        };
    }

    /// One second of countdown. Returns the new mode when an interval ran
    /// out and the timer switched over; no-op unless running.
    pub fn tick(&mut self) -> Option<TimerMode> {
        let TimerState::Running { mode, remaining } = self.state else {
            return None;
        };

        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.state = TimerState::Running { mode, remaining };
            return None;
        }

        let next = mode.next();
        let remaining = next.duration_secs();
        if self.auto_continue {
            self.state = TimerState::Running {
                mode: next,
                remaining,
            };
        } else {
            self.interval.cancel();
            self.state = TimerState::Expired {
                mode: next,
                remaining,
            };
        }
        info!(finished = %mode, next = %next, auto_continue = self.auto_continue, "pomodoro interval finished");
        Some(next)
    }

    /// Apply every tick that has come due by `now`. Returns the mode
    /// switches that happened, oldest first.
    pub fn advance(&mut self, now: Instant) -> Vec<TimerMode> {
        let due = self.interval.poll(now);
        let mut switched = Vec::new();
        for _ in 0..due {
            if !self.is_active() {
                break;
            }
            if let Some(mode) = self.tick() {
                switched.push(mode);
            }
        }
        switched
    }

    /// `MM:SS` of the remaining time.
    pub fn format_remaining(&self) -> String {
        format_mm_ss(self.remaining())
    }
}

pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
