//! Syntax highlighting for the content viewer.
//!
//! The snippet's language tag picks the syntax, first as a syntect token
//! (`rust`, `go`, `python`) and then as a file extension (`rs`, `py`).
//! Unknown tags render as plain text.

use once_cell::sync::Lazy;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use syntect::{
    easy::HighlightLines,
    highlighting::ThemeSet,
    parsing::{SyntaxReference, SyntaxSet},
    util::LinesWithEndings,
};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const HIGHLIGHT_THEME: &str = "base16-ocean.dark";

fn syntax_for(language: &str) -> &'static SyntaxReference {
    let language = language.trim();
    SYNTAX_SET
        .find_syntax_by_token(language)
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(&language.to_lowercase()))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

/// Name of the syntax `language` resolves to.
pub fn syntax_name(language: &str) -> &'static str {
    &syntax_for(language).name
}

/// Highlight `content` line by line.
pub fn highlight(content: &str, language: &str) -> Vec<Line<'static>> {
    let Some(theme) = THEME_SET.themes.get(HIGHLIGHT_THEME) else {
        return plain(content);
    };

    let mut highlighter = HighlightLines::new(syntax_for(language), theme);
    let mut lines = Vec::new();

    for line in LinesWithEndings::from(content) {
        let Ok(regions) = highlighter.highlight_line(line, &SYNTAX_SET) else {
            return plain(content);
        };

        let spans: Vec<Span<'static>> = regions
            .iter()
            .map(|(style, text)| {
                let fg = style.foreground;
                Span::styled(
                    text.trim_end_matches(['\n', '\r']).to_string(),
                    Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                )
            })
            .collect();
        lines.push(Line::from(spans));
    }

    lines
}

fn plain(content: &str) -> Vec<Line<'static>> {
    content
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect()
}
