//! Key bindings for the browsing states.
//!
//! Filtering, editing and the delete prompt read keys directly; everything
//! else goes through [`Action::from_key`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SwitchPane,
    Filter,
    Create,
    Edit,
    Delete,
    Copy,
    ToggleFavorite,
    MoveUp,
    MoveDown,
    ScrollContent,
    Confirm,
    Cancel,
    Help,
    Navigate,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Action> {
        if is_force_quit(key) {
            return Some(Action::Quit);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let action = match key.code {
            KeyCode::Char('d' | 'u') if ctrl => Action::ScrollContent,
            _ if ctrl => return None,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Tab | KeyCode::BackTab => Action::SwitchPane,
            KeyCode::Char('/') => Action::Filter,
            KeyCode::Char('n') => Action::Create,
            KeyCode::Char('e') => Action::Edit,
            KeyCode::Char('x') => Action::Delete,
            KeyCode::Char('c') => Action::Copy,
            KeyCode::Char('s') => Action::ToggleFavorite,
            KeyCode::Char('K') => Action::MoveUp,
            KeyCode::Char('J') => Action::MoveDown,
            KeyCode::PageDown | KeyCode::PageUp => Action::ScrollContent,
            KeyCode::Enter => Action::Confirm,
            KeyCode::Esc => Action::Cancel,
            KeyCode::Char('?') => Action::Help,
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::Char('j' | 'k' | 'g' | 'G') => Action::Navigate,
            _ => return None,
        };
        Some(action)
    }
}

/// `Ctrl-c` quits from any state that allows quitting, including filtering.
pub fn is_force_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Help text shown in the footer and the help overlay.
pub const HELP: &[(&str, &str)] = &[
    ("↑↓ / jk", "Navigate"),
    ("Tab", "Switch pane"),
    ("/", "Filter snippets"),
    ("n", "New snippet"),
    ("e", "Edit snippet"),
    ("x", "Delete snippet"),
    ("c", "Copy content"),
    ("s", "Toggle favorite"),
    ("K / J", "Move snippet up/down"),
    ("Ctrl-d / Ctrl-u", "Scroll content"),
    ("Esc", "Clear filter / folder"),
    ("?", "Toggle help"),
    ("q", "Quit"),
];
