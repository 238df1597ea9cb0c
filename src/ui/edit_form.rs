use crate::config::DEFAULT_TITLE;
use crate::snippet::{Draft, Snippet};
use crate::ui::pane::{Pane, PaneOutcome, RenderContext};
use crate::ui::text_input::TextInput;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Field of the edit form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Folder,
    Title,
    Language,
    Tags,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Folder,
        FormField::Title,
        FormField::Language,
        FormField::Tags,
    ];

    fn label(self) -> &'static str {
        match self {
            FormField::Folder => "Folder",
            FormField::Title => "Title",
            FormField::Language => "Language",
            FormField::Tags => "Tags",
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// The edit form: folder, title and language inputs plus a tags input.
///
/// Holds a copy of the values being edited; nothing reaches the store until
/// the coordinator commits the [`Draft`].
#[derive(Debug, Clone)]
pub struct EditForm {
    inputs: [TextInput; 3],
    tags: TextInput,
    focus: FormField,
    heading: &'static str,
    area: Rect,
}

impl EditForm {
    /// An empty form for a new snippet in `folder`.
    pub fn for_new(folder: &str, default_language: &str) -> Self {
        Self {
            inputs: [
                TextInput::new(folder).with_value(folder),
                TextInput::new(DEFAULT_TITLE),
                TextInput::new(default_language),
            ],
            tags: TextInput::new("comma, separated, tags"),
            focus: FormField::Title,
            heading: " New Snippet ",
            area: Rect::default(),
        }
    }

    /// A form pre-filled from an existing snippet.
    pub fn for_existing(snippet: &Snippet, default_language: &str) -> Self {
        Self {
            inputs: [
                TextInput::new(snippet.folder.clone()).with_value(snippet.folder.clone()),
                TextInput::new(DEFAULT_TITLE).with_value(snippet.title.clone()),
                TextInput::new(default_language).with_value(snippet.language.clone()),
            ],
            tags: TextInput::new("comma, separated, tags").with_value(snippet.tags_label()),
            focus: FormField::Title,
            heading: " Edit Snippet ",
            area: Rect::default(),
        }
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Current text of every field.
    pub fn draft(&self) -> Draft {
        Draft {
            folder: self.inputs[0].value().to_string(),
            title: self.inputs[1].value().to_string(),
            language: self.inputs[2].value().to_string(),
            tags: self.tags.value().to_string(),
        }
    }

    fn input(&self, field: FormField) -> &TextInput {
        match field {
            FormField::Folder => &self.inputs[0],
            FormField::Title => &self.inputs[1],
            FormField::Language => &self.inputs[2],
            FormField::Tags => &self.tags,
        }
    }

    fn input_mut(&mut self, field: FormField) -> &mut TextInput {
        match field {
            FormField::Folder => &mut self.inputs[0],
            FormField::Title => &mut self.inputs[1],
            FormField::Language => &mut self.inputs[2],
            FormField::Tags => &mut self.tags,
        }
    }
}

impl Pane for EditForm {
    fn handle_key(&mut self, key: KeyEvent, _len: usize) -> PaneOutcome {
        match key.code {
            KeyCode::Enter => PaneOutcome::Submit,
            KeyCode::Esc => PaneOutcome::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                PaneOutcome::Changed
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.previous();
                PaneOutcome::Changed
            }
            _ => {
                if self.input_mut(self.focus).handle_key(key) {
                    PaneOutcome::Changed
                } else {
                    PaneOutcome::Ignored
                }
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
        let theme = ctx.theme;
        frame.render_widget(Clear, area);

        let mut lines = Vec::new();
        for field in FormField::ORDER {
            let focused = field == self.focus;
            let label_style = if focused {
                Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_dim)
            };
            let marker = if focused { "› " } else { "  " };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(format!("{:<10}", field.label()), label_style),
            ];
            spans.extend(
                self.input(field)
                    .line(
                        Style::default().fg(theme.fg),
                        Style::default().fg(theme.fg_dim),
                        focused,
                    )
                    .spans,
            );
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "  [Enter] Save  [Esc] Cancel  [Tab] Next field",
            Style::default().fg(theme.fg_dim),
        )));

        let form = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.heading)
                .border_style(Style::default().fg(theme.accent))
                .style(Style::default().bg(theme.bg)),
        );
        frame.render_widget(form, area);
    }

    fn resize(&mut self, area: Rect) {
        self.area = area;
    }

    fn area(&self) -> Rect {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippet::model::seed_date;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(form: &mut EditForm, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)), 0);
        }
    }

    #[test]
    fn test_new_form_starts_on_title() {
        let form = EditForm::for_new("go", "go");
        assert_eq!(form.focus(), FormField::Title);
        assert_eq!(
            form.draft(),
            Draft {
                folder: "go".to_string(),
                ..Draft::default()
            }
        );
    }

    #[test]
    fn test_existing_form_copies_fields() {
        let snippet = Snippet {
            folder: "rust".to_string(),
            title: "iterators".to_string(),
            tags: vec!["std".to_string(), "iter".to_string()],
            date: seed_date(),
            favorite: true,
            file: "iterators.rs".to_string(),
            language: "rust".to_string(),
        };
        let form = EditForm::for_existing(&snippet, "go");
        assert_eq!(
            form.draft(),
            Draft {
                folder: "rust".to_string(),
                title: "iterators".to_string(),
                language: "rust".to_string(),
                tags: "std, iter".to_string(),
            }
        );
    }

    #[test]
    fn test_focus_cycles_through_all_fields() {
        let mut form = EditForm::for_new("go", "go");
        form.handle_key(key(KeyCode::Tab), 0);
        assert_eq!(form.focus(), FormField::Language);
        form.handle_key(key(KeyCode::Down), 0);
        assert_eq!(form.focus(), FormField::Tags);
        form.handle_key(key(KeyCode::Tab), 0);
        assert_eq!(form.focus(), FormField::Folder);
        form.handle_key(key(KeyCode::BackTab), 0);
        assert_eq!(form.focus(), FormField::Tags);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = EditForm::for_new("go", "go");
        type_text(&mut form, "world");
        form.handle_key(key(KeyCode::Tab), 0);
        type_text(&mut form, "go");
        form.handle_key(key(KeyCode::Tab), 0);
        type_text(&mut form, "a, b");

        let draft = form.draft();
        assert_eq!(draft.title, "world");
        assert_eq!(draft.language, "go");
        assert_eq!(draft.tags, "a, b");
    }

    #[test]
    fn test_enter_and_esc() {
        let mut form = EditForm::for_new("go", "go");
        assert_eq!(form.handle_key(key(KeyCode::Enter), 0), PaneOutcome::Submit);
        assert_eq!(form.handle_key(key(KeyCode::Esc), 0), PaneOutcome::Cancel);
    }
}
