use crate::config::DEFAULT_FOLDER;
use crate::ui::pane::{ListCursor, Pane, PaneOutcome, RenderContext};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use std::collections::BTreeSet;

/// The folder pane.
///
/// Holds the cursor and the folder the snippet list is narrowed to. With no
/// active folder every snippet is shown.
#[derive(Debug, Clone, Default)]
pub struct FolderList {
    cursor: ListCursor,
    active: Option<String>,
    area: Rect,
}

impl FolderList {
    /// The names listed by the pane: the derived folder set, or the default
    /// folder when the set is empty.
    pub fn entries(folders: &BTreeSet<String>) -> Vec<String> {
        if folders.is_empty() {
            vec![DEFAULT_FOLDER.to_string()]
        } else {
            folders.iter().cloned().collect()
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor.selected()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Narrow to the folder under the cursor.
    pub fn choose_current(&mut self, folders: &BTreeSet<String>) {
        self.active = Self::entries(folders).get(self.cursor()).cloned();
    }

    /// Narrow to `folder` and move the cursor onto it.
    pub fn activate(&mut self, folder: &str, folders: &BTreeSet<String>) {
        let entries = Self::entries(folders);
        if let Some(pos) = entries.iter().position(|f| f == folder) {
            self.cursor.select(pos, entries.len());
            self.active = Some(folder.to_string());
        }
    }

    /// Back to showing every folder.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Reconcile with a recomputed folder set: a vanished active folder is
    /// dropped and the cursor follows the active folder or is clamped.
    pub fn sync(&mut self, folders: &BTreeSet<String>) {
        let entries = Self::entries(folders);
        if let Some(active) = &self.active {
            match entries.iter().position(|f| f == active) {
                Some(pos) => {
                    self.cursor.select(pos, entries.len());
                    return;
                }
                None => self.active = None,
            }
        }
        self.cursor.clamp(entries.len());
    }
}

impl Pane for FolderList {
    fn handle_key(&mut self, key: KeyEvent, len: usize) -> PaneOutcome {
        self.cursor.handle_key(key, len)
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
        let theme = ctx.theme;
        let entries = Self::entries(&ctx.store.folders());

        let items: Vec<ListItem> = entries
            .iter()
            .map(|folder| {
                let is_active = self.active.as_deref() == Some(folder.as_str());
                let marker = if is_active { "▸ " } else { "  " };
                let count = ctx
                    .store
                    .all_snippets()
                    .iter()
                    .filter(|s| &s.folder == folder)
                    .count();
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(folder.clone(), Style::default().fg(theme.secondary)),
                    Span::styled(format!(" {}", count), Style::default().fg(theme.fg_dim)),
                ]))
            })
            .collect();

        let border_color = if ctx.focused {
            theme.accent
        } else {
            theme.fg_dim
        };
        let title = match &self.active {
            Some(_) => " Folders ".to_string(),
            None => " Folders (all) ".to_string(),
        };

        let highlight = if ctx.focused {
            Style::default()
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(border_color)),
            )
            .style(Style::default().fg(theme.fg).bg(theme.bg))
            .highlight_style(highlight);

        let mut state = ListState::default().with_selected(Some(self.cursor()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn resize(&mut self, area: Rect) {
        self.area = area;
    }

    fn area(&self) -> Rect {
        self.area
    }
}
