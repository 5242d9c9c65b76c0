//! Interfaces to the services the writer hands work off to.
//!
//! None of them has a real backend yet. The defaults either acknowledge
//! without doing anything or report `Error::Unwired`.

use crate::error::{Error, Result};
use crate::project::ProjectSnapshot;
use std::cell::RefCell;
use tracing::debug;

pub trait SnapshotStore {
    fn save(&self, snapshot: &ProjectSnapshot) -> Result<()>;
}

/// Acknowledges every save without writing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl SnapshotStore for NullStore {
    fn save(&self, snapshot: &ProjectSnapshot) -> Result<()> {
        debug!(
            project = %snapshot.project.title,
            words = snapshot.project.total_words(),
            "snapshot accepted (not persisted)"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum WritingStyle {
    #[default]
    Narrative,
    Descriptive,
    Dialogue,
    Action,
    Literary,
}

impl WritingStyle {
    pub const ALL: [WritingStyle; 5] = [
        WritingStyle::Narrative,
        WritingStyle::Descriptive,
        WritingStyle::Dialogue,
        WritingStyle::Action,
        WritingStyle::Literary,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest<'a> {
    pub style: WritingStyle,
    pub model: &'a str,
    pub context: &'a str,
}

pub trait ContentGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnwiredGenerator;

impl ContentGenerator for UnwiredGenerator {
    fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String> {
        Err(Error::Unwired("content generation"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ExportFormat {
    #[strum(serialize = "PDF")]
    Pdf,
    #[strum(serialize = "DOCX")]
    Docx,
    #[strum(serialize = "EPUB")]
    Epub,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Epub => "epub",
        }
    }
}

/// A finished export, ready to be written wherever the caller wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub trait Exporter {
    fn export(&self, snapshot: &ProjectSnapshot, format: ExportFormat) -> Result<Artifact>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnwiredExporter;

impl Exporter for UnwiredExporter {
    fn export(&self, _snapshot: &ProjectSnapshot, _format: ExportFormat) -> Result<Artifact> {
        Err(Error::Unwired("export"))
    }
}

pub trait AmbientPlayer {
    /// `None` stops playback. Volume is 0-100.
    fn play(&self, source: Option<&str>, volume: u8);
}

/// Records the last request instead of producing sound.
#[derive(Debug, Default)]
pub struct SilentPlayer {
    last: RefCell<Option<(Option<String>, u8)>>,
}

impl SilentPlayer {
    pub fn last_request(&self) -> Option<(Option<String>, u8)> {
        self.last.borrow().clone()
    }
}

impl AmbientPlayer for SilentPlayer {
    fn play(&self, source: Option<&str>, volume: u8) {
        debug!(?source, volume, "ambient playback requested");
        *self.last.borrow_mut() = Some((source.map(str::to_string), volume));
    }
}
