use crate::goal::{self, DEFAULT_CHAPTER_TARGET, DEFAULT_PROJECT_TARGET};
use crate::word_count::count_words;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChapterMood {
    #[default]
    Light,
    Dark,
    Mysterious,
    Romantic,
    Action,
    Dramatic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub content: String,
    pub word_count: usize,
    pub is_complete: bool,
    pub mood: ChapterMood,
    pub notes: String,
    pub target_words: usize,
}

impl Chapter {
    pub fn new(id: String, title: impl Into<String>, target_words: usize) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            word_count: 0,
            is_complete: false,
            mood: ChapterMood::default(),
            notes: String::new(),
            target_words,
        }
    }

    /// Replace the chapter text and recount.
    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.word_count = count_words(content);
    }

    pub fn percent(&self) -> f64 {
        goal::percent(self.word_count, self.target_words)
    }
}

/// A novel: an ordered list of chapters with one of them open for writing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub genre: String,
    pub description: String,
    pub chapters: Vec<Chapter>,
    pub current_chapter: usize,
    pub target_words: usize,
    pub created_at: DateTime<Local>,
}

impl Project {
    /// An "Untitled Novel" with an empty "Chapter 1" open.
    pub fn untitled(chapter_target: usize, project_target: usize) -> Self {
        let created_at = Local::now();
        let id = created_at.timestamp_millis().to_string();
        Self {
            chapters: vec![Chapter::new(id.clone(), "Chapter 1", chapter_target)],
            id,
            title: "Untitled Novel".to_string(),
            genre: "fiction".to_string(),
            description: String::new(),
            current_chapter: 0,
            target_words: project_target,
            created_at,
        }
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.chapters.get(self.current_chapter)
    }

    pub fn current_chapter_mut(&mut self) -> Option<&mut Chapter> {
        self.chapters.get_mut(self.current_chapter)
    }

    /// Append "Chapter N" and open it.
    pub fn add_chapter(&mut self) -> &Chapter {
        let number = self.chapters.len() + 1;
        let target = self
            .current_chapter()
            .map(|c| c.target_words)
            .unwrap_or(DEFAULT_CHAPTER_TARGET);
        let id = format!("{}-{}", self.id, number);
        self.chapters
            .push(Chapter::new(id, format!("Chapter {}", number), target));
        self.current_chapter = self.chapters.len() - 1;
        &self.chapters[self.current_chapter]
    }

    /// Open the chapter at `index`; out of range leaves the selection alone.
    pub fn select_chapter(&mut self, index: usize) -> bool {
        if index < self.chapters.len() {
            self.current_chapter = index;
            true
        } else {
            false
        }
    }

    pub fn total_words(&self) -> usize {
        self.chapters.iter().map(|c| c.word_count).sum()
    }

    pub fn percent(&self) -> f64 {
        goal::percent(self.total_words(), self.target_words)
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::untitled(DEFAULT_CHAPTER_TARGET, DEFAULT_PROJECT_TARGET)
    }
}

/// What gets handed to a `SnapshotStore` on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub project: Project,
    pub saved_at: DateTime<Local>,
}

impl ProjectSnapshot {
    pub fn of(project: &Project) -> Self {
        Self {
            project: project.clone(),
            saved_at: Local::now(),
        }
    }
}
