//! Shared pane plumbing: the capability trait every pane implements, the
//! screen layout, and the list cursor used by both list panes.

use crate::snippet::SnippetStore;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    Frame,
};

/// What a pane did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneOutcome {
    /// The key means nothing to this pane.
    Ignored,
    /// The pane's own state changed (text typed, content scrolled).
    Changed,
    /// The list cursor moved.
    SelectionMoved,
    /// The user confirmed (form only).
    Submit,
    /// The user cancelled (form only).
    Cancel,
}

/// Read-only data a pane may draw from.
pub struct RenderContext<'a> {
    pub store: &'a SnippetStore,
    /// Store indices currently shown by the snippet list.
    pub visible: &'a [usize],
    pub theme: &'a Theme,
    pub focused: bool,
    /// The filter text is being typed.
    pub filtering: bool,
}

/// Behaviour shared by the four panes.
pub trait Pane {
    /// Handle a key routed to this pane. `len` is the number of items the
    /// pane currently lists, zero for panes that are not lists.
    fn handle_key(&mut self, key: KeyEvent, len: usize) -> PaneOutcome;

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>);

    /// Recompute geometry for a new terminal size.
    fn resize(&mut self, area: Rect);

    /// Area assigned by the last resize.
    fn area(&self) -> Rect;
}

/// Where each region of the screen goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub header: Rect,
    pub folders: Rect,
    pub snippets: Rect,
    pub content: Rect,
    pub footer: Rect,
    /// Centered overlay used by the edit form.
    pub form: Rect,
}

/// Height of the edit form overlay: four fields plus borders and a hint line.
pub const FORM_HEIGHT: u16 = 11;

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(30),
            Constraint::Percentage(50),
        ])
        .split(rows[1]);

    ScreenLayout {
        header: rows[0],
        folders: columns[0],
        snippets: columns[1],
        content: columns[2],
        footer: rows[2],
        form: centered(area, 60, FORM_HEIGHT),
    }
}

/// A rectangle `percent_x` wide and `height` tall in the middle of `area`.
pub fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Number of rows a bordered pane can show.
pub fn inner_height(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(2))
}

/// Cursor over a list whose length is owned by someone else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    selected: usize,
}

impl ListCursor {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize, len: usize) {
        self.selected = index.min(len.saturating_sub(1));
    }

    /// Move down, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move up, wrapping to the bottom.
    pub fn previous(&mut self, len: usize) {
        if len > 0 {
            if self.selected > 0 {
                self.selected -= 1;
            } else {
                self.selected = len - 1;
            }
        }
    }

    /// Keep the cursor inside `0..len`.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Apply the shared list navigation keys.
    pub fn handle_key(&mut self, key: KeyEvent, len: usize) -> PaneOutcome {
        let before = self.selected;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.next(len),
            KeyCode::Up | KeyCode::Char('k') => self.previous(len),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = len.saturating_sub(1),
            _ => return PaneOutcome::Ignored,
        }
        if self.selected == before {
            PaneOutcome::Changed
        } else {
            PaneOutcome::SelectionMoved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_cursor_wraps() {
        let mut cursor = ListCursor::default();
        cursor.previous(3);
        assert_eq!(cursor.selected(), 2);
        cursor.next(3);
        assert_eq!(cursor.selected(), 0);
    }

    #[test]
    fn test_cursor_empty_list_stays_at_zero() {
        let mut cursor = ListCursor::default();
        cursor.next(0);
        cursor.previous(0);
        cursor.clamp(0);
        assert_eq!(cursor.selected(), 0);
    }

    #[test]
    fn test_cursor_clamp_after_shrink() {
        let mut cursor = ListCursor::default();
        cursor.select(4, 5);
        cursor.clamp(3);
        assert_eq!(cursor.selected(), 2);
    }

    #[test]
    fn test_cursor_keys() {
        let mut cursor = ListCursor::default();
        assert_eq!(
            cursor.handle_key(key(KeyCode::Char('G')), 4),
            PaneOutcome::SelectionMoved
        );
        assert_eq!(cursor.selected(), 3);
        assert_eq!(
            cursor.handle_key(key(KeyCode::Char('g')), 4),
            PaneOutcome::SelectionMoved
        );
        assert_eq!(
            cursor.handle_key(key(KeyCode::Char('g')), 4),
            PaneOutcome::Changed
        );
        assert_eq!(
            cursor.handle_key(key(KeyCode::Char('x')), 4),
            PaneOutcome::Ignored
        );
    }

    #[test]
    fn test_layout_fills_screen() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = screen_layout(area);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.height, 1);
        assert_eq!(layout.folders.height, 38);
        assert_eq!(
            layout.folders.width + layout.snippets.width + layout.content.width,
            100
        );
        assert_eq!(layout.form.height, FORM_HEIGHT);
        assert!(layout.form.x > 0);
    }
}
