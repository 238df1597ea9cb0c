use crate::snippet::SnippetStore;
use crate::ui::pane::{ListCursor, Pane, PaneOutcome, RenderContext};
use crate::ui::text_input::TextInput;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// The snippet pane: a cursor over the visible snippets plus the text filter.
#[derive(Debug, Clone)]
pub struct SnippetList {
    cursor: ListCursor,
    filter: TextInput,
    area: Rect,
}

impl Default for SnippetList {
    fn default() -> Self {
        Self {
            cursor: ListCursor::default(),
            filter: TextInput::new("title, tag, folder or language"),
            area: Rect::default(),
        }
    }
}

impl SnippetList {
    /// Store indices shown for the given folder and the current filter text.
    pub fn visible(&self, store: &SnippetStore, folder: Option<&str>) -> Vec<usize> {
        let query = self.filter.value();
        store
            .all_snippets()
            .iter()
            .enumerate()
            .filter(|(_, s)| folder.is_none_or(|f| s.folder == f))
            .filter(|(_, s)| s.matches(query))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor.selected()
    }

    /// Store index under the cursor.
    pub fn selected(&self, visible: &[usize]) -> Option<usize> {
        visible.get(self.cursor()).copied()
    }

    /// Put the cursor on store index `index` if it is visible, otherwise clamp.
    pub fn select_store_index(&mut self, index: usize, visible: &[usize]) {
        match visible.iter().position(|&i| i == index) {
            Some(pos) => self.cursor.select(pos, visible.len()),
            None => self.cursor.clamp(visible.len()),
        }
    }

    pub fn select_first(&mut self) {
        self.cursor.select(0, 1);
    }

    pub fn clamp(&mut self, len: usize) {
        self.cursor.clamp(len);
    }

    pub fn query(&self) -> &str {
        self.filter.value()
    }

    pub fn filter_applied(&self) -> bool {
        !self.filter.value().trim().is_empty()
    }

    /// Edit the filter text. Returns `true` when the text changed.
    pub fn edit_filter(&mut self, key: KeyEvent) -> bool {
        let changed = self.filter.handle_key(key);
        if changed {
            self.select_first();
        }
        changed
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    fn item<'a>(ctx: &RenderContext<'a>, index: usize) -> ListItem<'a> {
        let theme = ctx.theme;
        let Some(snippet) = ctx.store.get(index) else {
            return ListItem::new("");
        };

        let star = if snippet.favorite { "★ " } else { "  " };
        let mut meta = vec![
            Span::raw("  "),
            Span::styled(snippet.folder.clone(), Style::default().fg(theme.secondary)),
            Span::styled(
                format!(" · {}", snippet.language),
                Style::default().fg(theme.fg_dim),
            ),
        ];
        if !snippet.tags.is_empty() {
            meta.push(Span::styled(
                format!(" · {}", snippet.tags_label()),
                Style::default().fg(theme.fg_dim),
            ));
        }

        ListItem::new(vec![
            Line::from(vec![
                Span::styled(star, Style::default().fg(theme.favorite)),
                Span::styled(snippet.title.clone(), Style::default().fg(theme.fg)),
            ]),
            Line::from(meta),
        ])
    }
}

impl Pane for SnippetList {
    fn handle_key(&mut self, key: KeyEvent, len: usize) -> PaneOutcome {
        self.cursor.handle_key(key, len)
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
        let theme = ctx.theme;
        let border_color = if ctx.focused {
            theme.accent
        } else {
            theme.fg_dim
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Snippets ({}) ", ctx.visible.len()))
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let show_filter = ctx.filtering || self.filter_applied();
        let [filter_area, list_area] = Layout::vertical([
            Constraint::Length(u16::from(show_filter)),
            Constraint::Min(0),
        ])
        .areas(inner);

        if show_filter {
            let mut spans = vec![Span::styled("Find: ", Style::default().fg(theme.secondary))];
            spans.extend(
                self.filter
                    .line(
                        Style::default().fg(theme.fg),
                        Style::default().fg(theme.fg_dim),
                        ctx.filtering,
                    )
                    .spans,
            );
            frame.render_widget(Paragraph::new(Line::from(spans)), filter_area);
        }

        if ctx.visible.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "  No snippets",
                Style::default().fg(theme.fg_dim),
            )));
            frame.render_widget(empty, list_area);
            return;
        }

        let items: Vec<ListItem> = ctx
            .visible
            .iter()
            .map(|&index| Self::item(ctx, index))
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = ListState::default().with_selected(Some(self.cursor()));
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    fn resize(&mut self, area: Rect) {
        self.area = area;
    }

    fn area(&self) -> Rect {
        self.area
    }
}
