//! Global view state as an immutable snapshot with a pure reducer.

use crate::collaborators::WritingStyle;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Midnight,
    Forest,
    Ocean,
    Sunset,
    Minimal,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Midnight,
        Theme::Forest,
        Theme::Ocean,
        Theme::Sunset,
        Theme::Minimal,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Theme::Midnight => "Midnight Writer",
            Theme::Forest => "Forest Sanctuary",
            Theme::Ocean => "Ocean Depths",
            Theme::Sunset => "Golden Hour",
            Theme::Minimal => "Pure Focus",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Tab {
    #[default]
    Write,
    Plan,
    Stats,
    Tools,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Write => Tab::Plan,
            Tab::Plan => Tab::Stats,
            Tab::Stats => Tab::Tools,
            Tab::Tools => Tab::Write,
        }
    }
}

pub const AMBIENT_SOUNDS: [&str; 6] = ["rain", "forest", "cafe", "ocean", "fireplace", "library"];
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const MODELS: [&str; 3] = ["gpt-4", "gpt-3.5", "claude"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub theme: Theme,
    pub show_sidebar: bool,
    pub focus_mode: bool,
    pub fullscreen: bool,
    pub show_statistics: bool,
    pub active_tab: Tab,
    pub ambient_sound: Option<&'static str>,
    pub ambient_volume: u8,
    pub muted: bool,
    pub writing_style: WritingStyle,
    pub model: &'static str,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            show_sidebar: true,
            focus_mode: false,
            fullscreen: false,
            show_statistics: false,
            active_tab: Tab::default(),
            ambient_sound: None,
            ambient_volume: 50,
            muted: false,
            writing_style: WritingStyle::default(),
            model: DEFAULT_MODEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    CycleTheme,
    SetTheme(Theme),
    ToggleSidebar,
    ToggleFocusMode,
    ToggleFullscreen,
    ToggleStatistics,
    SelectTab(Tab),
    NextTab,
    /// Selecting the sound already playing turns it off.
    SelectAmbient(&'static str),
    CycleAmbient,
    SetVolume(u8),
    ToggleMute,
    SetWritingStyle(WritingStyle),
    CycleModel,
}

impl UiState {
    /// Panels are hidden in focus mode regardless of their own flags.
    pub fn sidebar_visible(&self) -> bool {
        self.show_sidebar && !self.focus_mode
    }

    pub fn statistics_visible(&self) -> bool {
        self.show_statistics && !self.focus_mode
    }

    /// Volume actually sent to the player.
    pub fn effective_volume(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.ambient_volume
        }
    }
}

pub fn reduce(state: &UiState, event: UiEvent) -> UiState {
    let mut next = state.clone();
    match event {
        UiEvent::CycleTheme => next.theme = state.theme.next(),
        UiEvent::SetTheme(theme) => next.theme = theme,
        UiEvent::ToggleSidebar => next.show_sidebar = !state.show_sidebar,
        UiEvent::ToggleFocusMode => next.focus_mode = !state.focus_mode,
        UiEvent::ToggleFullscreen => next.fullscreen = !state.fullscreen,
        UiEvent::ToggleStatistics => next.show_statistics = !state.show_statistics,
        UiEvent::SelectTab(tab) => next.active_tab = tab,
        UiEvent::NextTab => next.active_tab = state.active_tab.next(),
        UiEvent::SelectAmbient(sound) => {
            next.ambient_sound = if state.ambient_sound == Some(sound) {
                None
            } else {
                Some(sound)
            };
        }
        UiEvent::CycleAmbient => {
            next.ambient_sound = match state.ambient_sound {
                None => Some(AMBIENT_SOUNDS[0]),
                Some(current) => AMBIENT_SOUNDS
                    .iter()
                    .position(|s| *s == current)
                    .and_then(|i| AMBIENT_SOUNDS.get(i + 1))
                    .copied(),
            };
        }
        UiEvent::SetVolume(volume) => next.ambient_volume = volume.min(100),
        UiEvent::ToggleMute => next.muted = !state.muted,
        UiEvent::SetWritingStyle(style) => next.writing_style = style,
        UiEvent::CycleModel => {
            let idx = MODELS.iter().position(|m| *m == state.model).unwrap_or(0);
            next.model = MODELS[(idx + 1) % MODELS.len()];
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = UiState::default();

        assert_eq!(state.theme, Theme::Midnight);
        assert!(state.sidebar_visible());
        assert!(!state.statistics_visible());
        assert_eq!(state.active_tab, Tab::Write);
        assert_eq!(state.ambient_volume, 50);
        assert_eq!(state.model, "gpt-4");
    }

    #[test]
    fn test_cycle_theme_wraps_after_five() {
        let mut state = UiState::default();
        let mut seen = vec![state.theme];
        for _ in 0..5 {
            state = reduce(&state, UiEvent::CycleTheme);
            seen.push(state.theme);
        }

        assert_eq!(&seen[..5], &Theme::ALL);
        assert_eq!(state.theme, Theme::Midnight);
    }

    #[test]
    fn test_toggles_are_involutions() {
        let state = UiState::default();
        for event in [
            UiEvent::ToggleSidebar,
            UiEvent::ToggleFocusMode,
            UiEvent::ToggleFullscreen,
            UiEvent::ToggleStatistics,
            UiEvent::ToggleMute,
        ] {
            let once = reduce(&state, event);
            assert_ne!(once, state, "{:?} should change state", event);
            assert_eq!(reduce(&once, event), state);
        }
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let state = UiState::default();
        let before = state.clone();
        let _ = reduce(&state, UiEvent::SetTheme(Theme::Ocean));

        assert_eq!(state, before);
    }

    #[test]
    fn test_focus_mode_hides_panels() {
        let state = reduce(&UiState::default(), UiEvent::ToggleStatistics);
        assert!(state.statistics_visible());

        let focused = reduce(&state, UiEvent::ToggleFocusMode);
        assert!(!focused.sidebar_visible());
        assert!(!focused.statistics_visible());
        assert!(focused.show_sidebar);
    }

    #[test]
    fn test_select_ambient_toggles_same_sound() {
        let state = reduce(&UiState::default(), UiEvent::SelectAmbient("rain"));
        assert_eq!(state.ambient_sound, Some("rain"));

        let state = reduce(&state, UiEvent::SelectAmbient("cafe"));
        assert_eq!(state.ambient_sound, Some("cafe"));

        let state = reduce(&state, UiEvent::SelectAmbient("cafe"));
        assert_eq!(state.ambient_sound, None);
    }

    #[test]
    fn test_cycle_ambient_ends_with_silence() {
        let mut state = UiState::default();
        for expected in AMBIENT_SOUNDS {
            state = reduce(&state, UiEvent::CycleAmbient);
            assert_eq!(state.ambient_sound, Some(expected));
        }
        state = reduce(&state, UiEvent::CycleAmbient);
        assert_eq!(state.ambient_sound, None);
    }

    #[test]
    fn test_volume_clamped_and_muted() {
        let state = reduce(&UiState::default(), UiEvent::SetVolume(180));
        assert_eq!(state.ambient_volume, 100);

        let muted = reduce(&state, UiEvent::ToggleMute);
        assert_eq!(muted.effective_volume(), 0);
        assert_eq!(muted.ambient_volume, 100);
    }

    #[test]
    fn test_tabs_and_models_cycle() {
        let state = reduce(&UiState::default(), UiEvent::NextTab);
        assert_eq!(state.active_tab, Tab::Plan);
        let state = reduce(&state, UiEvent::SelectTab(Tab::Tools));
        let state = reduce(&state, UiEvent::NextTab);
        assert_eq!(state.active_tab, Tab::Write);

        let state = reduce(&state, UiEvent::CycleModel);
        assert_eq!(state.model, "gpt-3.5");
        let state = reduce(&reduce(&state, UiEvent::CycleModel), UiEvent::CycleModel);
        assert_eq!(state.model, "gpt-4");
    }

    #[test]
    fn test_theme_titles() {
        assert_eq!(Theme::Sunset.title(), "Golden Hour");
        assert_eq!(Theme::Minimal.to_string(), "minimal");
    }
}
