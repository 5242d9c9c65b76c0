use crate::collaborators::SnapshotStore;
use crate::project::{Project, ProjectSnapshot};
use crate::scheduler::Debounce;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub const AUTOSAVE_DELAY: Duration = Duration::from_secs(3);
pub const SAVING_INDICATOR: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed(String),
}

/// Debounced save trigger: fires once after three quiet seconds and then
/// shows a "saving" flag for one second.
#[derive(Debug, Clone)]
pub struct AutoSaver {
    pending: Debounce,
    indicator: Debounce,
    saves: usize,
}

impl Default for AutoSaver {
    fn default() -> Self {
        Self::new(AUTOSAVE_DELAY)
    }
}

impl AutoSaver {
    pub fn new(delay: Duration) -> Self {
        Self {
            pending: Debounce::new(delay),
            indicator: Debounce::new(SAVING_INDICATOR),
            saves: 0,
        }
    }

    /// Every edit restarts the quiet period. Clearing the buffer drops the
    /// pending save instead of scheduling one.
    pub fn on_edit(&mut self, now: Instant, content: &str) {
        if content.is_empty() {
            self.pending.cancel();
        } else {
            self.pending.touch(now);
        }
    }

    /// Restart the quiet period of a pending save; no-op when idle.
    pub fn reschedule(&mut self, now: Instant) {
        if self.pending.is_pending() {
            self.pending.touch(now);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn is_saving(&self) -> bool {
        self.indicator.is_pending()
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Fire the save if the quiet period is over and expire the indicator.
    /// Returns the outcome when a save happened on this poll.
    pub fn poll(
        &mut self,
        now: Instant,
        project: &Project,
        store: &dyn SnapshotStore,
    ) -> Option<SaveOutcome> {
        self.indicator.poll(now);

        if !self.pending.poll(now) {
            return None;
        }

        self.indicator.touch(now);
        self.saves += 1;
        let outcome = match store.save(&ProjectSnapshot::of(project)) {
            Ok(()) => {
                info!(words = project.total_words(), "auto-saved");
                SaveOutcome::Saved
            }
            Err(e) => {
                warn!(error = %e, "auto-save failed");
                SaveOutcome::Failed(e.to_string())
            }
        };
        Some(outcome)
    }

    /// Cancel anything outstanding.
    pub fn dispose(&mut self) {
        self.pending.cancel();
        self.indicator.cancel();
    }
}
