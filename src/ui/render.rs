use crate::ui::app::{App, FocusPane, Mode, State, StatusKind};
use crate::ui::keys::HELP;
use crate::ui::pane::{centered, Pane, RenderContext};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw one frame using the geometry computed by the last [`App::resize`].
pub fn render(frame: &mut Frame, app: &App) {
    let screen = frame.area();
    let layout = app.layout();
    let visible = app.visible();
    let focus = app.focus();

    let ctx = |focused: bool| RenderContext {
        store: &app.store,
        visible: &visible,
        theme: &app.theme,
        focused,
        filtering: app.state() == State::Filtering,
    };

    render_header(frame, app, layout.header.intersection(screen));
    app.folder_list.render(
        frame,
        app.folder_list.area().intersection(screen),
        &ctx(focus == FocusPane::Folders),
    );
    app.snippet_list.render(
        frame,
        app.snippet_list.area().intersection(screen),
        &ctx(focus == FocusPane::Snippets),
    );
    app.viewer
        .render(frame, app.viewer.area().intersection(screen), &ctx(false));

    if let Some(form) = app.mode.form() {
        form.render(frame, form.area().intersection(screen), &ctx(true));
    }

    if let Mode::ConfirmDelete { index } = app.mode {
        render_delete_prompt(frame, app, index);
    }

    if app.show_help {
        render_help(frame, app);
    }

    render_footer(frame, app, layout.footer.intersection(screen));
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let header = Line::from(vec![
        Span::styled(
            " snipbox ",
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {} snippets · {} folders",
                app.store.len(),
                app.store.folders().len()
            ),
            Style::default().fg(theme.fg_dim),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(header).style(Style::default().bg(theme.bg)),
        area,
    );
}

fn render_delete_prompt(frame: &mut Frame, app: &App, index: usize) {
    let theme = &app.theme;
    let title = app
        .store
        .get(index)
        .map_or_else(String::new, |s| s.title.clone());
    let area = centered(frame.area(), 50, 5);

    let prompt = Paragraph::new(vec![
        Line::from(format!("Delete \"{}\"?", title)),
        Line::from(""),
        Line::from(Span::styled(
            "[y] Delete  [n/Esc] Keep",
            Style::default().fg(theme.fg_dim),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Confirm ")
            .border_style(Style::default().fg(theme.error))
            .style(Style::default().bg(theme.bg).fg(theme.fg)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(prompt, area);
}

fn render_help(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let height = u16::try_from(HELP.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered(frame.area(), 50, height);

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>16}  ", keys),
                    Style::default().fg(theme.secondary),
                ),
                Span::styled(*what, Style::default().fg(theme.fg)),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let line = match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => theme.success,
                StatusKind::Error => theme.error,
            };
            Line::from(Span::styled(
                format!(" {}", status.text),
                Style::default().fg(color),
            ))
        }
        None => Line::from(Span::styled(
            footer_hint(app.state()),
            Style::default().fg(theme.fg_dim),
        )),
    };

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.bg)),
        area,
    );
}

fn footer_hint(state: State) -> &'static str {
    match state {
        State::BrowsingSnippets => {
            " [↑↓/jk] Navigate  [/] Filter  [n] New  [e] Edit  [x] Delete  [c] Copy  [Tab] Folders  [?] Help  [q] Quit"
        }
        State::BrowsingFolders => {
            " [↑↓/jk] Choose folder  [Enter] Open  [Esc] All folders  [/] Filter  [Tab] Snippets  [q] Quit"
        }
        State::Filtering => " Type to filter  [↑↓] Navigate  [Enter] Apply  [Esc] Clear",
        State::EditingNew | State::EditingExisting => {
            " [Tab] Next field  [Enter] Save  [Esc] Cancel"
        }
        State::ConfirmDelete => " [y] Delete  [n/Esc] Keep",
    }
}
