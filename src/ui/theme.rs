//! # Theme System
//!
//! Colours for every pane, grouped by role. Rendering code never hardcodes a
//! `ratatui::style::Color`; it reads a field of the active [`Theme`].
//!
//! The theme is chosen once at startup with `--theme` / `SNIPBOX_THEME`.
//! Unknown names fall back to [`DEFAULT_THEME`].

use ratatui::style::Color;

/// Name of the theme used when none (or an unknown one) is configured.
pub const DEFAULT_THEME: &str = "Catppuccin Mocha";

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,

    /// Pane background.
    pub bg: Color,
    /// Regular text.
    pub fg: Color,
    /// Hints, unfocused borders, placeholders.
    pub fg_dim: Color,

    /// Focused borders and the selected row.
    pub accent: Color,
    /// Folder names, the filter prompt, the active form field.
    pub secondary: Color,
    /// Favorite marker.
    pub favorite: Color,
    /// Status messages.
    pub success: Color,
    /// Delete prompt and error messages.
    pub error: Color,

    /// Background of the selected row.
    pub selection_bg: Color,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a configured name, falling back to the default theme.
    pub fn resolve(name: &str) -> &'static Theme {
        Self::by_name(name).unwrap_or_else(Self::default_theme)
    }

    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }
}

static BUILT_IN_THEMES: [Theme; 4] = [
    Theme {
        name: DEFAULT_THEME,
        bg: Color::Rgb(30, 30, 46),
        fg: Color::Rgb(205, 214, 244),
        fg_dim: Color::Rgb(108, 112, 134),
        accent: Color::Rgb(203, 166, 247),    // mauve
        secondary: Color::Rgb(137, 180, 250), // blue
        favorite: Color::Rgb(249, 226, 175),  // yellow
        success: Color::Rgb(166, 227, 161),
        error: Color::Rgb(243, 139, 168),
        selection_bg: Color::Rgb(69, 71, 90),
    },
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(255, 121, 198),    // pink
        secondary: Color::Rgb(139, 233, 253), // cyan
        favorite: Color::Rgb(241, 250, 140),
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
        selection_bg: Color::Rgb(68, 71, 90),
    },
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),
        secondary: Color::Rgb(129, 161, 193),
        favorite: Color::Rgb(235, 203, 139),
        success: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
        selection_bg: Color::Rgb(67, 76, 94),
    },
    Theme {
        name: "Gruvbox Dark",
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(235, 219, 178),
        fg_dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(254, 128, 25),     // orange
        secondary: Color::Rgb(131, 165, 152), // blue
        favorite: Color::Rgb(250, 189, 47),
        success: Color::Rgb(184, 187, 38),
        error: Color::Rgb(251, 73, 52),
        selection_bg: Color::Rgb(80, 73, 69),
    },
];
