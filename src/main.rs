mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use novelist::{
    app_dirs::AppDirs,
    collaborators::ExportFormat,
    config::{Config, ConfigStore, FileConfigStore},
    goal::{MAX_DAILY_GOAL, MIN_DAILY_GOAL},
    logging,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    ui_state::{Tab, Theme, UiEvent},
    writer::Writer,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};
use tracing::info;

/// Slider step for the daily goal.
const GOAL_STEP: usize = 50;
/// Slider step for the ambient volume.
const VOLUME_STEP: u8 = 10;

/// distraction-free novel writing in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A distraction-free writing companion: live word counts, a daily goal, session pace, and a pomodoro timer."
)]
pub struct Cli {
    /// daily word goal (clamped to 100-5000)
    #[clap(short = 'g', long)]
    goal: Option<usize>,

    /// color theme
    #[clap(short = 't', long, value_enum)]
    theme: Option<Theme>,

    /// stop the pomodoro when an interval ends instead of rolling into the next one
    #[clap(long)]
    no_auto_continue: bool,

    /// preload a chapter's text from a file (never written back)
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// log verbosity; RUST_LOG overrides it
    #[clap(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    /// Flags win over what was saved last time.
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(goal) = self.goal {
            config.daily_goal = goal.clamp(MIN_DAILY_GOAL, MAX_DAILY_GOAL);
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if self.no_auto_continue {
            config.pomodoro_auto_continue = false;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Writing,
}

pub struct App {
    pub writer: Writer,
    pub config: Config,
    pub state: AppState,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            writer: Writer::new(&config),
            config,
            state: AppState::Welcome,
        }
    }

    /// Start a fresh project and open its first chapter.
    pub fn new_novel(&mut self, now: Instant) {
        self.sync_config();
        self.writer = Writer::new(&self.config);
        self.writer.begin_writing(now);
        self.state = AppState::Writing;
    }

    /// Open the writer on existing text.
    pub fn open_text(&mut self, text: &str, now: Instant) {
        self.sync_config();
        self.writer = Writer::new(&self.config);
        self.writer.set_text(text, now);
        self.state = AppState::Writing;
    }

    /// Fold what changed during the run back into the config.
    pub fn sync_config(&mut self) {
        self.config.daily_goal = self.writer.goal.target();
        self.config.theme = self.writer.ui.theme;
        self.config.show_sidebar = self.writer.ui.show_sidebar;
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.state {
            AppState::Welcome => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return true,
                KeyCode::Char('n') | KeyCode::Enter => self.new_novel(now),
                KeyCode::Char('t') => self.writer.dispatch(UiEvent::CycleTheme),
                _ => {}
            },
            AppState::Writing => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.handle_shortcut(key.code, now);
                } else {
                    self.handle_edit(key.code, now);
                }
            }
        }
        false
    }

    fn handle_shortcut(&mut self, code: KeyCode, now: Instant) {
        let w = &mut self.writer;
        match code {
            KeyCode::Char('s') => w.save_now(),
            KeyCode::Char('f') => w.dispatch(UiEvent::ToggleFocusMode),
            KeyCode::Char('b') => w.dispatch(UiEvent::ToggleSidebar),
            KeyCode::Char('o') => w.dispatch(UiEvent::ToggleStatistics),
            KeyCode::Char('t') => w.dispatch(UiEvent::CycleTheme),
            KeyCode::Char('n') => w.dispatch(UiEvent::NextTab),
            KeyCode::Char('a') => w.dispatch(UiEvent::CycleAmbient),
            KeyCode::Char('u') => w.dispatch(UiEvent::ToggleMute),
            KeyCode::Char('l') => w.dispatch(UiEvent::CycleModel),
            KeyCode::Char('w') => {
                let style = w.ui.writing_style.next();
                w.dispatch(UiEvent::SetWritingStyle(style));
            }
            KeyCode::PageUp => {
                let volume = w.ui.ambient_volume.saturating_add(VOLUME_STEP);
                w.dispatch(UiEvent::SetVolume(volume));
            }
            KeyCode::PageDown => {
                let volume = w.ui.ambient_volume.saturating_sub(VOLUME_STEP);
                w.dispatch(UiEvent::SetVolume(volume));
            }
            KeyCode::Char('k') => w.add_chapter(now),
            KeyCode::Right => {
                let next = w.project.current_chapter + 1;
                w.select_chapter(next, now);
            }
            KeyCode::Left => {
                if let Some(prev) = w.project.current_chapter.checked_sub(1) {
                    w.select_chapter(prev, now);
                }
            }
            KeyCode::Char('p') => w.timer.toggle(now),
            KeyCode::Char('r') => w.timer.reset(),
            KeyCode::Char('g') => w.generate(now),
            KeyCode::Char('e') => w.export(ExportFormat::Pdf),
            KeyCode::Up => {
                let goal = w.goal.target() + GOAL_STEP;
                w.set_goal(goal);
            }
            KeyCode::Down => {
                let goal = w.goal.target().saturating_sub(GOAL_STEP);
                w.set_goal(goal);
            }
            _ => {}
        }
    }

    fn handle_edit(&mut self, code: KeyCode, now: Instant) {
        let w = &mut self.writer;
        match code {
            KeyCode::Esc => {
                w.stop_writing();
                self.state = AppState::Welcome;
            }
            KeyCode::F(11) => w.dispatch(UiEvent::ToggleFullscreen),
            KeyCode::F(1) => w.dispatch(UiEvent::SelectTab(Tab::Write)),
            KeyCode::F(2) => w.dispatch(UiEvent::SelectTab(Tab::Plan)),
            KeyCode::F(3) => w.dispatch(UiEvent::SelectTab(Tab::Stats)),
            KeyCode::F(4) => w.dispatch(UiEvent::SelectTab(Tab::Tools)),
            KeyCode::Char(c) => {
                w.clear_status();
                w.insert_char(c, now);
            }
            KeyCode::Enter => w.insert_char('\n', now),
            KeyCode::Tab => w.insert_str("    ", now),
            KeyCode::Backspace => w.backspace(now),
            _ => {}
        }
    }

    pub fn handle_paste(&mut self, text: &str, now: Instant) {
        if self.state == AppState::Writing {
            self.writer.insert_str(text, now);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init(&cli.log_level.to_string(), AppDirs::log_path().as_deref())?;

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    let preload = match cli.file {
        Some(ref path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };

    let mut app = App::new(config);
    if let Some(text) = preload {
        app.open_text(&text, Instant::now());
    }
    info!(goal = app.config.daily_goal, theme = %app.config.theme, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    app.writer.dispose();
    app.sync_config();
    store.save(&app.config)?;
    info!("bye");

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui(app, f))?;
    loop {
        let now = Instant::now();
        let redraw = match runner.step() {
            AppEvent::Tick => {
                let report = app.writer.on_tick(now);
                // the countdown and the saving flag change without input
                !report.is_empty() || app.writer.timer.is_active() || app.writer.is_saving()
            }
            AppEvent::Resize => true,
            AppEvent::Paste(text) => {
                app.handle_paste(&text, now);
                true
            }
            AppEvent::Key(key) => {
                if app.handle_key(key, now) {
                    break;
                }
                true
            }
        };

        if redraw {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
