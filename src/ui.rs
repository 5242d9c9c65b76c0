use std::time::Instant;

use novelist::{
    pomodoro::{TimerMode, TimerState},
    ui_state::{Tab, Theme},
    writer::Writer,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{App, AppState};

const SIDE_PANEL_WIDTH: u16 = 30;
const CURSOR: char = '▏';

fn accent(theme: Theme) -> Color {
    match theme {
        Theme::Midnight => Color::Magenta,
        Theme::Forest => Color::Green,
        Theme::Ocean => Color::Cyan,
        Theme::Sunset => Color::LightRed,
        Theme::Minimal => Color::Blue,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Welcome => render_welcome(&self.writer, area, buf),
            AppState::Writing => render_writing(&self.writer, area, buf),
        }
    }
}

fn render_welcome(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let theme = writer.ui.theme;
    let bold_accent = Style::default()
        .fg(accent(theme))
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let lines = vec![
        Line::from(Span::styled("novelist", bold_accent)),
        Line::from(""),
        Line::from(vec![Span::styled("n", bold_accent), Span::raw("  start a new novel")]),
        Line::from(vec![
            Span::styled("t", bold_accent),
            Span::raw(format!("  theme: {}", theme.title())),
        ]),
        Line::from(vec![Span::styled("q", bold_accent), Span::raw("  quit")]),
        Line::from(""),
        Line::from(Span::styled(
            format!("daily goal {} words", writer.goal.target()),
            dim,
        )),
    ];
    let height = lines.len() as u16;

    let [_, middle, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .areas(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(middle, buf);
}

fn render_writing(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let ui = &writer.ui;
    let chrome = if ui.fullscreen { 0 } else { 1 };

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(chrome),
        Constraint::Min(0),
        Constraint::Length(chrome),
    ])
    .areas(area);

    if !ui.fullscreen {
        render_header(writer, header, buf);
        render_footer(writer, footer, buf);
    }

    let mut constraints = Vec::new();
    if ui.sidebar_visible() {
        constraints.push(Constraint::Length(SIDE_PANEL_WIDTH));
    }
    constraints.push(Constraint::Min(10));
    if ui.statistics_visible() {
        constraints.push(Constraint::Length(SIDE_PANEL_WIDTH));
    }
    let columns = Layout::horizontal(constraints).split(body);

    let mut idx = 0;
    if ui.sidebar_visible() {
        render_sidebar(writer, columns[idx], buf);
        idx += 1;
    }
    render_editor(writer, columns[idx], buf);
    idx += 1;
    if ui.statistics_visible() {
        render_statistics(writer, columns[idx], buf);
    }
}

fn render_header(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let theme = writer.ui.theme;
    let chapter = writer
        .project
        .current_chapter()
        .map(|c| c.title.as_str())
        .unwrap_or("");

    let mut spans = vec![
        Span::styled(
            format!(" {}", writer.project.title),
            Style::default()
                .fg(accent(theme))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" · {} · {}", chapter, theme.title())),
    ];
    if writer.is_saving() {
        spans.push(Span::styled(
            "  saving…",
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }
    Paragraph::new(Line::from(spans)).render(area, buf);
}

fn render_footer(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let timer = &writer.timer;
    let marker = match timer.state() {
        TimerState::Running { .. } => "▶",
        TimerState::Idle { .. } => "⏸",
        TimerState::Expired { .. } => "⏰",
    };
    let mode_color = match timer.mode() {
        TimerMode::Work => Color::Red,
        TimerMode::Break => Color::Green,
    };

    let mut spans = vec![
        Span::raw(format!(
            " {} words  {}/{} goal  ",
            writer.words(),
            writer.words(),
            writer.goal.target()
        )),
        Span::styled(
            format!("{} {} {}", marker, timer.mode(), timer.format_remaining()),
            Style::default().fg(mode_color),
        ),
    ];
    if let Some(status) = writer.status() {
        spans.push(Span::styled(
            format!("  {}", status),
            Style::default().fg(Color::Yellow),
        ));
    }
    Paragraph::new(Line::from(spans)).render(area, buf);
}

fn render_editor(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let inner = if writer.ui.focus_mode {
        area
    } else {
        let title = writer
            .project
            .current_chapter()
            .map(|c| format!(" {} ", c.title))
            .unwrap_or_default();
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        block.render(area, buf);
        inner
    };

    let mut text = writer.text().to_string();
    text.push(CURSOR);
    let lines = wrap_text(&text, inner.width as usize);
    // keep the cursor line in view
    let skip = lines.len().saturating_sub(inner.height as usize);
    let visible: Vec<Line> = lines.into_iter().skip(skip).map(Line::from).collect();

    Paragraph::new(visible).render(inner, buf);
}

fn render_sidebar(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let theme = writer.ui.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent(theme)));
    let inner = block.inner(area);
    block.render(area, buf);

    let [tabs_area, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

    let tabs: Vec<Span> = [Tab::Write, Tab::Plan, Tab::Stats, Tab::Tools]
        .into_iter()
        .map(|tab| {
            let style = if tab == writer.ui.active_tab {
                Style::default()
                    .fg(accent(theme))
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            Span::styled(format!("{} ", tab), style)
        })
        .collect();
    Paragraph::new(Line::from(tabs)).render(tabs_area, buf);

    match writer.ui.active_tab {
        Tab::Write => render_chapters(writer, content, buf),
        Tab::Plan => render_plan(writer, content, buf),
        Tab::Stats => render_goal(writer, content, buf),
        Tab::Tools => render_tools(writer, content, buf),
    }
}

fn render_chapters(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let mut lines: Vec<Line> = writer
        .project
        .chapters
        .iter()
        .enumerate()
        .map(|(idx, chapter)| {
            let current = idx == writer.project.current_chapter;
            let style = if current {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(
                    format!("{} {}", if current { ">" } else { " " }, chapter.title),
                    style,
                ),
                Span::styled(
                    format!("  {}/{}", chapter.word_count, chapter.target_words),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "ctrl+k new, ctrl+left/right switch",
        Style::default().add_modifier(Modifier::DIM),
    )));
    Paragraph::new(lines).render(area, buf);
}

fn render_plan(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let project = &writer.project;
    let mut lines = vec![
        Line::from(format!("Genre: {}", project.genre)),
        Line::from(format!("Target: {} words", project.target_words)),
    ];
    if let Some(chapter) = project.current_chapter() {
        lines.push(Line::from(format!("Mood: {}", chapter.mood)));
        let notes = if chapter.notes.is_empty() {
            "no notes yet"
        } else {
            chapter.notes.as_str()
        };
        lines.push(Line::from(format!("Notes: {}", notes)));
    }
    Paragraph::new(lines).render(area, buf);
}

fn render_goal(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let [count, gauge, rest] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    Paragraph::new(vec![
        Line::from("Today's goal"),
        Line::from(Span::styled(
            format!("{}/{}", writer.words(), writer.goal.target()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .render(count, buf);

    Gauge::default()
        .gauge_style(Style::default().fg(accent(writer.ui.theme)))
        .ratio(writer.goal_percent() / 100.0)
        .label(format!("{:.0}%", writer.goal_percent()))
        .render(gauge, buf);

    Paragraph::new(vec![
        Line::from(format!("{} words to go", writer.goal_remaining())),
        Line::from(Span::styled(
            "ctrl+up/down adjusts",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .render(rest, buf);
}

fn render_tools(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let ui = &writer.ui;
    let volume = if ui.muted {
        format!("{} (muted)", ui.ambient_volume)
    } else {
        ui.ambient_volume.to_string()
    };
    let lines = vec![
        Line::from(format!(
            "Pomodoro: {} {}",
            writer.timer.mode(),
            writer.timer.format_remaining()
        )),
        Line::from(format!("Ambient: {}", ui.ambient_sound.unwrap_or("off"))),
        Line::from(format!("Volume: {}", volume)),
        Line::from(format!("Style: {}", ui.writing_style)),
        Line::from(format!("Model: {}", ui.model)),
        Line::from(""),
        Line::from(Span::styled(
            "ctrl+w style, ctrl+pgup/pgdn volume",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    Paragraph::new(lines).render(area, buf);
}

fn render_statistics(writer: &Writer, area: Rect, buf: &mut Buffer) {
    let now = Instant::now();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Analytics ")
        .border_style(Style::default().fg(accent(writer.ui.theme)));
    let inner = block.inner(area);
    block.render(area, buf);

    let heading = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Current session", heading)),
        Line::from(format!("Duration  {}m", writer.elapsed_minutes(now))),
        Line::from(format!("Words     {}", writer.words())),
        Line::from(format!("WPM       {}", writer.words_per_minute(now))),
        Line::from(""),
        Line::from(Span::styled("Progress", heading)),
        Line::from(format!("Chapter   {:.0}%", writer.chapter_percent())),
        Line::from(format!("Novel     {:.0}%", writer.project_percent())),
        Line::from(format!("Pages     {}", writer.pages())),
        Line::from(format!("Min read  {}", writer.reading_minutes())),
    ];
    Paragraph::new(lines).render(inner, buf);
}

/// Soft-wrap at spaces, hard-wrap words longer than `width`. Newlines
/// always start a new line.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for logical in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;
        for c in logical.chars() {
            let cw = c.width().unwrap_or(0);
            if line_width + cw > width {
                match line.rfind(' ') {
                    Some(idx) if idx + 1 < line.len() => {
                        let tail = line.split_off(idx + 1);
                        lines.push(std::mem::take(&mut line));
                        line = tail;
                    }
                    _ if line.is_empty() => {}
                    _ => lines.push(std::mem::take(&mut line)),
                }
                line_width = line.width();
            }
            line.push(c);
            line_width += cw;
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_wide_chars_narrower_than_width() {
        assert_eq!(wrap_text("日本語", 1), vec!["日", "本", "語"]);
        assert_eq!(wrap_text("日本", 3), vec!["日", "本"]);
    }

    #[test]
    fn test_wrap_short_text_untouched() {
        assert_eq!(wrap_text("hello world", 40), vec!["hello world"]);
        assert_eq!(wrap_text("", 40), vec![""]);
    }

    #[test]
    fn test_wrap_breaks_at_spaces() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick ", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_hard_breaks_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_keeps_newlines() {
        assert_eq!(wrap_text("one\n\ntwo\n", 10), vec!["one", "", "two", ""]);
    }

    #[test]
    fn test_wrap_zero_width() {
        assert_eq!(wrap_text("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_accent_per_theme() {
        assert_eq!(accent(Theme::Forest), Color::Green);
        assert_ne!(accent(Theme::Midnight), accent(Theme::Ocean));
    }
}
