use crate::config::Config;
use crate::snippet::{storage, Snippet};
use crate::ui::highlight;
use crate::ui::pane::{inner_height, Pane, PaneOutcome, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What the viewer found behind a snippet's file reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerBody {
    Text(String),
    /// The file could not be read; holds the reason.
    Unreadable(String),
}

#[derive(Debug, Clone)]
struct Shown {
    title: String,
    language: String,
    body: ViewerBody,
    lines: Vec<Line<'static>>,
}

/// Read-only view of the selected snippet's content.
#[derive(Debug, Clone, Default)]
pub struct ContentViewer {
    shown: Option<Shown>,
    scroll: usize,
    area: Rect,
}

impl ContentViewer {
    /// Load the content of `snippet`, or clear the viewer for `None`.
    ///
    /// A read failure is kept as [`ViewerBody::Unreadable`]; it never
    /// propagates.
    pub fn show(&mut self, snippet: Option<&Snippet>, config: &Config) {
        self.scroll = 0;
        let Some(snippet) = snippet else {
            self.shown = None;
            return;
        };

        let body = match storage::read_content(config, snippet) {
            Ok(text) => ViewerBody::Text(text),
            Err(err) => {
                tracing::warn!(file = %snippet.file, error = %format!("{:#}", err), "content unavailable");
                ViewerBody::Unreadable(format!("{:#}", err))
            }
        };
        let lines = match &body {
            ViewerBody::Text(text) => highlight::highlight(text, &snippet.language),
            ViewerBody::Unreadable(_) => Vec::new(),
        };

        self.shown = Some(Shown {
            title: snippet.title.clone(),
            language: snippet.language.clone(),
            body,
            lines,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_none()
    }

    pub fn body(&self) -> Option<&ViewerBody> {
        self.shown.as_ref().map(|s| &s.body)
    }

    /// Loaded text, if the file was readable.
    pub fn content(&self) -> Option<&str> {
        match self.body()? {
            ViewerBody::Text(text) => Some(text),
            ViewerBody::Unreadable(_) => None,
        }
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn line_count(&self) -> usize {
        self.shown.as_ref().map_or(0, |s| s.lines.len())
    }

    fn max_scroll(&self) -> usize {
        self.line_count()
            .saturating_sub(inner_height(self.area).max(1))
    }

    fn half_page(&self) -> usize {
        (inner_height(self.area) / 2).max(1)
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll = (self.scroll + rows).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }
}

impl Pane for ContentViewer {
    fn handle_key(&mut self, key: KeyEvent, _len: usize) -> PaneOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let before = self.scroll;
        match key.code {
            KeyCode::Char('d') if ctrl => self.scroll_down(self.half_page()),
            KeyCode::Char('u') if ctrl => self.scroll_up(self.half_page()),
            KeyCode::PageDown => self.scroll_down(self.half_page()),
            KeyCode::PageUp => self.scroll_up(self.half_page()),
            _ => return PaneOutcome::Ignored,
        }
        if self.scroll == before {
            PaneOutcome::Ignored
        } else {
            PaneOutcome::Changed
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
        let theme = ctx.theme;
        let title = match &self.shown {
            Some(shown) => format!(" {} · {} ", shown.title, shown.language),
            None => " Content ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.fg_dim))
            .style(Style::default().bg(theme.bg).fg(theme.fg));

        let dim = Style::default().fg(theme.fg_dim);
        let lines: Vec<Line> = match &self.shown {
            None => vec![Line::from(Span::styled("No snippet selected", dim))],
            Some(Shown {
                body: ViewerBody::Unreadable(reason),
                ..
            }) => vec![
                Line::from(Span::styled(
                    "Content unavailable",
                    Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(reason.clone(), dim)),
            ],
            Some(shown) if shown.lines.is_empty() => {
                vec![Line::from(Span::styled("Empty snippet", dim))]
            }
            Some(shown) => shown.lines.iter().skip(self.scroll).cloned().collect(),
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn resize(&mut self, area: Rect) {
        self.area = area;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn area(&self) -> Rect {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippet::model::seed_date;
    use std::fs;
    use tempfile::TempDir;

    fn snippet(file: &str) -> Snippet {
        Snippet {
            folder: "go".to_string(),
            title: "hello".to_string(),
            tags: Vec::new(),
            date: seed_date(),
            favorite: false,
            file: file.to_string(),
            language: "go".to_string(),
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_show_readable_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        fs::write(temp_dir.path().join("hello.go"), "package main\n").unwrap();

        let mut viewer = ContentViewer::default();
        viewer.show(Some(&snippet("hello.go")), &config);
        assert_eq!(viewer.content(), Some("package main\n"));
    }

    #[test]
    fn test_missing_file_shows_empty_snippet() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());

        let mut viewer = ContentViewer::default();
        viewer.show(Some(&snippet("missing.go")), &config);
        assert_eq!(viewer.body(), Some(&ViewerBody::Text(String::new())));
        assert_eq!(viewer.content(), Some(""));
    }

    #[test]
    fn test_unreadable_file_becomes_placeholder() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        fs::create_dir(temp_dir.path().join("dir.go")).unwrap();

        let mut viewer = ContentViewer::default();
        viewer.show(Some(&snippet("dir.go")), &config);
        assert!(!viewer.is_empty());
        assert!(viewer.content().is_none());
        assert!(matches!(viewer.body(), Some(ViewerBody::Unreadable(_))));
    }

    #[test]
    fn test_show_none_clears() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        fs::write(temp_dir.path().join("hello.go"), "x").unwrap();

        let mut viewer = ContentViewer::default();
        viewer.show(Some(&snippet("hello.go")), &config);
        viewer.show(None, &config);
        assert!(viewer.is_empty());
    }

    #[test]
    fn test_scroll_is_bounded_by_content() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path());
        let body: String = (0..30).map(|i| format!("line {}\n", i)).collect();
        fs::write(temp_dir.path().join("long.txt"), body).unwrap();

        let mut viewer = ContentViewer::default();
        viewer.resize(Rect::new(0, 0, 40, 12));
        viewer.show(Some(&snippet("long.txt")), &config);

        assert_eq!(viewer.handle_key(ctrl('d'), 0), PaneOutcome::Changed);
        assert_eq!(viewer.scroll(), 5);
        for _ in 0..10 {
            viewer.handle_key(ctrl('d'), 0);
        }
        assert_eq!(viewer.scroll(), 20);

        viewer.handle_key(ctrl('u'), 0);
        assert_eq!(viewer.scroll(), 15);

        // Growing the pane pulls the scroll back inside the content
        viewer.resize(Rect::new(0, 0, 40, 27));
        assert_eq!(viewer.scroll(), 5);
    }
}
