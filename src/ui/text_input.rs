//! Single-line input used by the edit form and the snippet filter.
//!
//! Editing is done by a one-line [`TextArea`]. This module only decides which
//! keys reach it (nothing that could add a second line) and draws the value
//! with its placeholder and cursor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use tui_textarea::{CursorMove, Input, Key, TextArea};

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    area: TextArea<'static>,
    placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            area: TextArea::default(),
            placeholder: placeholder.into(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> &str {
        self.area.lines().first().map_or("", String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    /// Cursor position counted in chars.
    pub fn cursor(&self) -> usize {
        self.area.cursor().1
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Replace the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.area = TextArea::new(vec![value.into()]);
        self.area.move_cursor(CursorMove::End);
    }

    pub fn clear(&mut self) {
        self.area = TextArea::default();
    }

    /// Apply an editing key. Returns `true` when the value changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('u') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.area.delete_line_by_head();
        }
        match single_line_input(key) {
            Some(input) => self.area.input(input),
            None => false,
        }
    }

    /// Styled line for rendering. The cursor cell is reversed when focused.
    pub fn line(&self, text_style: Style, placeholder_style: Style, focused: bool) -> Line<'static> {
        let cursor_style = text_style.add_modifier(Modifier::REVERSED);

        if self.is_empty() {
            if !focused {
                return Line::from(Span::styled(self.placeholder.clone(), placeholder_style));
            }
            let mut chars = self.placeholder.chars();
            let first = chars.next().map_or_else(|| " ".to_string(), String::from);
            return Line::from(vec![
                Span::styled(first, cursor_style),
                Span::styled(chars.collect::<String>(), placeholder_style),
            ]);
        }

        if !focused {
            return Line::from(Span::styled(self.value().to_string(), text_style));
        }

        let before: String = self.value().chars().take(self.cursor()).collect();
        let mut rest = self.value().chars().skip(self.cursor());
        let under = rest.next().map_or_else(|| " ".to_string(), String::from);

        Line::from(vec![
            Span::styled(before, text_style),
            Span::styled(under, cursor_style),
            Span::styled(rest.collect::<String>(), text_style),
        ])
    }
}

/// Translate a terminal key for the text area, dropping anything that would
/// break a line or scroll.
fn single_line_input(key: KeyEvent) -> Option<Input> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let key = match key.code {
        // Emacs-style moves and deletions within the line
        KeyCode::Char(c @ ('a' | 'e' | 'b' | 'f' | 'h' | 'd' | 'k' | 'w')) if ctrl => Key::Char(c),
        KeyCode::Char(_) if ctrl || alt => return None,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => return None,
    };

    Some(Input {
        key,
        ctrl,
        alt,
        ..Input::default()
    })
}
