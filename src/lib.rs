// Library surface for headless/integration tests and reuse.
// The terminal front-end (App, rendering) stays in the binary.
pub mod app_dirs;
pub mod autosave;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod goal;
pub mod logging;
pub mod pomodoro;
pub mod project;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod ui_state;
pub mod word_count;
pub mod writer;

pub use error::{Error, Result};
