use chrono::{DateTime, Local};
use std::time::Instant;
use tracing::info;

pub const DEFAULT_MOOD: &str = "focused";
pub const DEFAULT_FOCUS: u8 = 8;

/// One continuous writing interval. Lives in memory only.
#[derive(Debug, Clone)]
pub struct WritingSession {
    pub started_at: Instant,
    pub started_at_local: DateTime<Local>,
    pub words_written: usize,
    pub mood: String,
    /// 1-10
    pub focus: u8,
    pub distractions: u32,
    pub breaks: u32,
    /// Word count of the open text when counting last (re)started.
    baseline: usize,
    /// Words written before the last rebase.
    carried: usize,
}

impl WritingSession {
    /// `baseline` is the word count already on the page; only words past it
    /// count as written in this session.
    pub fn new(now: Instant, baseline: usize) -> Self {
        Self {
            started_at: now,
            started_at_local: Local::now(),
            words_written: 0,
            mood: DEFAULT_MOOD.to_string(),
            focus: DEFAULT_FOCUS,
            distractions: 0,
            breaks: 0,
            baseline,
            carried: 0,
        }
    }
}

/// Holds at most one active session and derives rate metrics from it.
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    active: Option<WritingSession>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session at `now` on a page that already holds
    /// `baseline_words`. Does nothing if one is already running.
    pub fn start_session(&mut self, now: Instant, baseline_words: usize) {
        if self.active.is_some() {
            return;
        }
        let session = WritingSession::new(now, baseline_words);
        info!(
            started_at = %session.started_at_local.format("%H:%M"),
            baseline = baseline_words,
            "writing session started"
        );
        self.active = Some(session);
    }

    /// Discard the active session, handing it back to the caller.
    pub fn end_session(&mut self) -> Option<WritingSession> {
        let session = self.active.take();
        if let Some(ref s) = session {
            info!(words = s.words_written, "writing session ended");
        }
        session
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn session(&self) -> Option<&WritingSession> {
        self.active.as_ref()
    }

    /// Record the current word count of the open text.
    pub fn record_words(&mut self, words: usize) {
        if let Some(ref mut s) = self.active {
            s.words_written = s.carried + words.saturating_sub(s.baseline);
        }
    }

    /// The open text was swapped (a chapter switch or a load): keep what was
    /// written so far and count from `words` onwards.
    pub fn rebase(&mut self, words: usize) {
        if let Some(ref mut s) = self.active {
            s.carried = s.words_written;
            s.baseline = words;
        }
    }

    pub fn record_break(&mut self) {
        if let Some(ref mut s) = self.active {
            s.breaks += 1;
        }
    }

    /// Whole minutes since the session began, floored. Zero without a session.
    pub fn elapsed_minutes(&self, now: Instant) -> u64 {
        self.active
            .as_ref()
            .map(|s| now.saturating_duration_since(s.started_at).as_secs() / 60)
            .unwrap_or(0)
    }

    /// `round(words / max(1, elapsed_minutes))`. Zero without a session.
    pub fn words_per_minute(&self, current_words: usize, now: Instant) -> u64 {
        if self.active.is_none() {
            return 0;
        }
        let minutes = self.elapsed_minutes(now).max(1);
        (current_words as f64 / minutes as f64).round() as u64
    }
}
