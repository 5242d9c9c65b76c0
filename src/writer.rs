use crate::autosave::{AutoSaver, SaveOutcome};
use crate::collaborators::{
    AmbientPlayer, ContentGenerator, ExportFormat, Exporter, GenerationRequest, NullStore,
    SilentPlayer, SnapshotStore, UnwiredExporter, UnwiredGenerator,
};
use crate::config::Config;
use crate::goal::GoalTracker;
use crate::pomodoro::{PomodoroTimer, TimerMode};
use crate::project::{Project, ProjectSnapshot};
use crate::session::SessionTracker;
use crate::ui_state::{reduce, UiEvent, UiState};
use crate::word_count::{self, count_words};
use std::time::Instant;
use tracing::{debug, info};

/// The services a `Writer` hands work off to.
pub struct Collaborators {
    pub store: Box<dyn SnapshotStore>,
    pub generator: Box<dyn ContentGenerator>,
    pub exporter: Box<dyn Exporter>,
    pub player: Box<dyn AmbientPlayer>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            store: Box::new(NullStore),
            generator: Box::new(UnwiredGenerator),
            exporter: Box::new(UnwiredExporter),
            player: Box::new(SilentPlayer::default()),
        }
    }
}

/// What happened during one `on_tick`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub switched: Vec<TimerMode>,
    pub saved: Option<SaveOutcome>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.switched.is_empty() && self.saved.is_none()
    }
}

/// Owns the chapter being written and everything that reacts to it: text
/// edits recount words and feed the session and auto-save, clock ticks
/// drive the pomodoro and fire pending saves.
pub struct Writer {
    pub project: Project,
    pub goal: GoalTracker,
    pub sessions: SessionTracker,
    pub timer: PomodoroTimer,
    pub ui: UiState,
    buffer: String,
    words: usize,
    is_writing: bool,
    autosave: AutoSaver,
    collaborators: Collaborators,
    status: Option<String>,
}

impl Writer {
    pub fn new(config: &Config) -> Self {
        Self::with_collaborators(config, Collaborators::default())
    }

    pub fn with_collaborators(config: &Config, collaborators: Collaborators) -> Self {
        let mut ui = UiState::default();
        ui = reduce(&ui, UiEvent::SetTheme(config.theme));
        if !config.show_sidebar {
            ui = reduce(&ui, UiEvent::ToggleSidebar);
        }

        Self {
            project: Project::untitled(config.chapter_target, config.project_target),
            goal: GoalTracker::new(config.daily_goal),
            sessions: SessionTracker::new(),
            timer: PomodoroTimer::new(config.pomodoro_auto_continue),
            ui,
            buffer: String::new(),
            words: 0,
            is_writing: false,
            autosave: AutoSaver::default(),
            collaborators,
            status: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn words(&self) -> usize {
        self.words
    }

    pub fn pages(&self) -> usize {
        word_count::pages(self.words)
    }

    pub fn reading_minutes(&self) -> usize {
        word_count::reading_minutes(self.words)
    }

    pub fn is_writing(&self) -> bool {
        self.is_writing
    }

    pub fn is_saving(&self) -> bool {
        self.autosave.is_saving()
    }

    pub fn save_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    pub fn saves(&self) -> usize {
        self.autosave.saves()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Enter writing mode, starting a session if none is active.
    pub fn begin_writing(&mut self, now: Instant) {
        self.is_writing = true;
        self.sessions.start_session(now, self.words);
    }

    /// Leave writing mode. The session is discarded and nothing stays
    /// scheduled.
    pub fn stop_writing(&mut self) {
        self.is_writing = false;
        self.sessions.end_session();
        self.dispose();
    }

    /// Replace the whole buffer, e.g. with a file's contents. The new text
    /// is the page the session starts from, not words written in it.
    pub fn set_text(&mut self, text: &str, now: Instant) {
        self.load_buffer(text.to_string());
        self.begin_writing(now);
        self.store_into_chapter();
        self.autosave.on_edit(now, &self.buffer);
    }

    /// Append "Chapter N" and open it in the editor.
    pub fn add_chapter(&mut self, now: Instant) {
        self.store_into_chapter();
        let title = self.project.add_chapter().title.clone();
        info!(chapter = %title, "chapter added");
        self.open_current_chapter(now);
    }

    /// Open the chapter at `index` in the editor. Returns false, leaving
    /// everything as it was, when there is no such chapter.
    pub fn select_chapter(&mut self, index: usize, now: Instant) -> bool {
        if index == self.project.current_chapter {
            return index < self.project.chapters.len();
        }
        self.store_into_chapter();
        if !self.project.select_chapter(index) {
            return false;
        }
        debug!(index, "chapter selected");
        self.open_current_chapter(now);
        true
    }

    fn open_current_chapter(&mut self, now: Instant) {
        let content = self
            .project
            .current_chapter()
            .map(|c| c.content.clone())
            .unwrap_or_default();
        self.load_buffer(content);
        // the outgoing chapter's edits are still waiting to be saved
        self.autosave.reschedule(now);
    }

    fn load_buffer(&mut self, text: String) {
        self.buffer = text;
        self.words = count_words(&self.buffer);
        self.sessions.rebase(self.words);
    }

    fn store_into_chapter(&mut self) {
        if let Some(chapter) = self.project.current_chapter_mut() {
            if chapter.content != self.buffer {
                chapter.set_content(&self.buffer);
            }
        }
    }

    pub fn insert_char(&mut self, c: char, now: Instant) {
        self.buffer.push(c);
        self.on_edit(now);
    }

    pub fn insert_str(&mut self, s: &str, now: Instant) {
        self.buffer.push_str(s);
        self.on_edit(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.buffer.pop().is_some() {
            self.on_edit(now);
        }
    }

    fn on_edit(&mut self, now: Instant) {
        if !self.is_writing {
            self.begin_writing(now);
        }
        self.words = count_words(&self.buffer);
        self.store_into_chapter();
        self.sessions.record_words(self.words);
        self.autosave.on_edit(now, &self.buffer);
    }

    /// Advance the clock-driven parts to `now`.
    pub fn on_tick(&mut self, now: Instant) -> TickReport {
        let switched = self.timer.advance(now);
        for mode in &switched {
            if *mode == TimerMode::Break {
                self.sessions.record_break();
            }
            self.status = Some(match mode {
                TimerMode::Break => "Work interval done. Take a break.".to_string(),
                TimerMode::Work => "Break over. Back to the page.".to_string(),
            });
        }

        let saved = self
            .autosave
            .poll(now, &self.project, self.collaborators.store.as_ref());
        if let Some(SaveOutcome::Failed(ref e)) = saved {
            self.status = Some(format!("Auto-save failed: {}", e));
        }

        TickReport { switched, saved }
    }

    pub fn set_goal(&mut self, target: usize) {
        self.goal.set_goal(target);
        debug!(goal = self.goal.target(), "daily goal set");
    }

    pub fn goal_percent(&self) -> f64 {
        self.goal.percent(self.words)
    }

    pub fn goal_remaining(&self) -> usize {
        self.goal.remaining(self.words)
    }

    pub fn elapsed_minutes(&self, now: Instant) -> u64 {
        self.sessions.elapsed_minutes(now)
    }

    pub fn words_per_minute(&self, now: Instant) -> u64 {
        self.sessions.words_per_minute(self.words, now)
    }

    pub fn chapter_percent(&self) -> f64 {
        self.project
            .current_chapter()
            .map(|c| c.percent())
            .unwrap_or(0.0)
    }

    pub fn project_percent(&self) -> f64 {
        self.project.percent()
    }

    /// Apply a view event. Changes to the ambient selection are forwarded
    /// to the player.
    pub fn dispatch(&mut self, event: UiEvent) {
        let next = reduce(&self.ui, event);
        let sound_changed = next.ambient_sound != self.ui.ambient_sound
            || next.effective_volume() != self.ui.effective_volume();
        self.ui = next;
        if sound_changed {
            self.collaborators
                .player
                .play(self.ui.ambient_sound, self.ui.effective_volume());
        }
    }

    /// Ask the generator to continue the chapter. The result is appended on
    /// success; failures land in the status line.
    pub fn generate(&mut self, now: Instant) {
        let context = self.buffer.clone();
        let request = GenerationRequest {
            style: self.ui.writing_style,
            model: self.ui.model,
            context: &context,
        };
        match self.collaborators.generator.generate(&request) {
            Ok(text) => {
                info!(model = self.ui.model, words = count_words(&text), "generated text");
                self.insert_str(&text, now);
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    pub fn export(&mut self, format: ExportFormat) {
        let snapshot = ProjectSnapshot::of(&self.project);
        match self.collaborators.exporter.export(&snapshot, format) {
            Ok(artifact) => {
                info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "exported");
                self.status = Some(format!("Exported {}", artifact.file_name));
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Save right away, skipping the debounce.
    pub fn save_now(&mut self) {
        let snapshot = ProjectSnapshot::of(&self.project);
        self.status = Some(match self.collaborators.store.save(&snapshot) {
            Ok(()) => "Saved".to_string(),
            Err(e) => format!("Save failed: {}", e),
        });
    }

    /// Cancel the pomodoro tick and any pending save.
    pub fn dispose(&mut self) {
        self.timer.pause();
        self.autosave.dispose();
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        self.dispose();
    }
}
