use crate::config::Config;
use crate::snippet::{Defaults, Snippet, SnippetStore};
use crate::ui::content_viewer::ContentViewer;
use crate::ui::edit_form::EditForm;
use crate::ui::folder_list::FolderList;
use crate::ui::keys::{is_force_quit, Action};
use crate::ui::pane::{screen_layout, Pane, PaneOutcome, ScreenLayout};
use crate::ui::snippet_list::SnippetList;
use crate::ui::theme::Theme;
use chrono::Utc;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use std::collections::BTreeSet;

/// The list a filter session returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browse {
    Folders,
    Snippets,
}

impl Browse {
    fn mode(self) -> Mode {
        match self {
            Browse::Folders => Mode::BrowsingFolders,
            Browse::Snippets => Mode::BrowsingSnippets,
        }
    }
}

/// Interaction mode. Data a mode needs lives inside its variant, so an edit
/// form only exists while editing and a delete target only while confirming.
#[derive(Debug, Clone)]
pub enum Mode {
    BrowsingFolders,
    BrowsingSnippets,
    Filtering {
        origin: Browse,
        /// Store index selected when filtering began, restored on `Esc`.
        selected_before: Option<usize>,
    },
    EditingNew {
        form: EditForm,
    },
    EditingExisting {
        index: usize,
        form: EditForm,
    },
    ConfirmDelete {
        index: usize,
    },
}

/// Fieldless view of [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    BrowsingFolders,
    BrowsingSnippets,
    Filtering,
    EditingNew,
    EditingExisting,
    ConfirmDelete,
}

impl Mode {
    pub fn state(&self) -> State {
        match self {
            Mode::BrowsingFolders => State::BrowsingFolders,
            Mode::BrowsingSnippets => State::BrowsingSnippets,
            Mode::Filtering { .. } => State::Filtering,
            Mode::EditingNew { .. } => State::EditingNew,
            Mode::EditingExisting { .. } => State::EditingExisting,
            Mode::ConfirmDelete { .. } => State::ConfirmDelete,
        }
    }

    /// Quitting is refused while an edit or a delete prompt is open.
    pub fn allows_quit(&self) -> bool {
        !matches!(
            self,
            Mode::EditingNew { .. } | Mode::EditingExisting { .. } | Mode::ConfirmDelete { .. }
        )
    }

    pub fn form(&self) -> Option<&EditForm> {
        match self {
            Mode::EditingNew { form } | Mode::EditingExisting { form, .. } => Some(form),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Folders,
    Snippets,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line message shown in the footer until the next key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

/// Owns the snippet store and every pane, and routes each event to exactly
/// one of them according to the current [`Mode`].
pub struct App {
    pub config: Config,
    pub store: SnippetStore,
    pub mode: Mode,
    pub folder_list: FolderList,
    pub snippet_list: SnippetList,
    pub viewer: ContentViewer,
    pub theme: Theme,
    pub should_quit: bool,
    pub show_help: bool,
    pub status: Option<Status>,
    pending_copy: Option<String>,
    layout: ScreenLayout,
}

impl App {
    pub fn new(config: Config, snippets: Vec<Snippet>) -> Self {
        let store = SnippetStore::new(snippets, Defaults::from_config(&config));
        let theme = Theme::resolve(&config.theme).clone();

        let mut app = Self {
            config,
            store,
            mode: Mode::BrowsingSnippets,
            folder_list: FolderList::default(),
            snippet_list: SnippetList::default(),
            viewer: ContentViewer::default(),
            theme,
            should_quit: false,
            show_help: false,
            status: None,
            pending_copy: None,
            layout: ScreenLayout::default(),
        };
        app.refresh_viewer();
        app
    }

    pub fn state(&self) -> State {
        self.mode.state()
    }

    pub fn focus(&self) -> FocusPane {
        match self.mode {
            Mode::BrowsingFolders => FocusPane::Folders,
            Mode::EditingNew { .. } | Mode::EditingExisting { .. } => FocusPane::Form,
            _ => FocusPane::Snippets,
        }
    }

    pub fn all_snippets(&self) -> &[Snippet] {
        self.store.all_snippets()
    }

    pub fn folders(&self) -> BTreeSet<String> {
        self.store.folders()
    }

    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    /// Store indices the snippet list currently shows.
    pub fn visible(&self) -> Vec<usize> {
        self.snippet_list.visible(&self.store, self.folder_list.active())
    }

    /// Store index of the selected snippet, if the list shows anything.
    pub fn selected_index(&self) -> Option<usize> {
        self.snippet_list.selected(&self.visible())
    }

    pub fn selected_snippet(&self) -> Option<&Snippet> {
        self.selected_index().and_then(|i| self.store.get(i))
    }

    /// Text waiting to be written to the clipboard by the event loop.
    pub fn take_clipboard(&mut self) -> Option<String> {
        self.pending_copy.take()
    }

    pub fn into_snippets(self) -> Vec<Snippet> {
        self.store.into_snippets()
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }
        self.status = None;

        let mode = std::mem::replace(&mut self.mode, Mode::BrowsingSnippets);
        self.mode = match mode {
            Mode::BrowsingFolders => self.on_browsing_folders(key),
            Mode::BrowsingSnippets => self.on_browsing_snippets(key),
            Mode::Filtering {
                origin,
                selected_before,
            } => self.on_filtering(key, origin, selected_before),
            Mode::EditingNew { form } => self.on_editing_new(key, form),
            Mode::EditingExisting { index, form } => self.on_editing_existing(key, index, form),
            Mode::ConfirmDelete { index } => self.on_confirm_delete(key, index),
        };
    }

    /// Recompute every pane's geometry for a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = screen_layout(Rect::new(0, 0, width, height));
        self.folder_list.resize(self.layout.folders);
        self.snippet_list.resize(self.layout.snippets);
        self.viewer.resize(self.layout.content);
        if let Mode::EditingNew { form } | Mode::EditingExisting { form, .. } = &mut self.mode {
            form.resize(self.layout.form);
        }
    }

    fn on_browsing_folders(&mut self, key: KeyEvent) -> Mode {
        let Some(action) = Action::from_key(key) else {
            return Mode::BrowsingFolders;
        };

        match action {
            Action::Quit => self.quit(),
            Action::SwitchPane => return Mode::BrowsingSnippets,
            Action::Filter => return self.begin_filter(Browse::Folders),
            Action::Help => self.show_help = true,
            Action::Confirm => {
                self.folder_list.choose_current(&self.store.folders());
                self.snippet_list.select_first();
                self.refresh_viewer();
                return Mode::BrowsingSnippets;
            }
            Action::Cancel => {
                let selected = self.selected_index();
                self.folder_list.clear();
                self.reselect(selected);
            }
            Action::Navigate => {
                let folders = self.store.folders();
                let len = FolderList::entries(&folders).len();
                if self.folder_list.handle_key(key, len) != PaneOutcome::Ignored {
                    self.folder_list.choose_current(&folders);
                    self.snippet_list.select_first();
                    self.refresh_viewer();
                }
            }
            _ => {}
        }
        Mode::BrowsingFolders
    }

    fn on_browsing_snippets(&mut self, key: KeyEvent) -> Mode {
        let Some(action) = Action::from_key(key) else {
            return Mode::BrowsingSnippets;
        };

        match action {
            Action::Quit => self.quit(),
            Action::SwitchPane => return Mode::BrowsingFolders,
            Action::Filter => return self.begin_filter(Browse::Snippets),
            Action::Help => self.show_help = true,
            Action::Create => {
                let folder = self
                    .folder_list
                    .active()
                    .map_or_else(|| self.store.defaults().folder.clone(), str::to_string);
                let mut form = EditForm::for_new(&folder, &self.config.default_language);
                form.resize(self.layout.form);
                return Mode::EditingNew { form };
            }
            Action::Edit => {
                if let Some(index) = self.selected_index() {
                    if let Some(snippet) = self.store.get(index) {
                        let mut form =
                            EditForm::for_existing(snippet, &self.config.default_language);
                        form.resize(self.layout.form);
                        return Mode::EditingExisting { index, form };
                    }
                }
                self.error("No snippet selected");
            }
            Action::Delete => match self.selected_index() {
                Some(index) => return Mode::ConfirmDelete { index },
                None => self.error("No snippet selected"),
            },
            Action::Copy => self.copy_selected(),
            Action::ToggleFavorite => self.toggle_favorite(),
            Action::MoveUp => self.move_selected(false),
            Action::MoveDown => self.move_selected(true),
            Action::ScrollContent => {
                self.viewer.handle_key(key, 0);
            }
            Action::Cancel => {
                if self.snippet_list.filter_applied() {
                    let selected = self.selected_index();
                    self.snippet_list.clear_filter();
                    self.reselect(selected);
                }
            }
            Action::Navigate => {
                let len = self.visible().len();
                if self.snippet_list.handle_key(key, len) == PaneOutcome::SelectionMoved {
                    self.refresh_viewer();
                }
            }
            Action::Confirm => {}
        }
        Mode::BrowsingSnippets
    }

    fn begin_filter(&mut self, origin: Browse) -> Mode {
        Mode::Filtering {
            origin,
            selected_before: self.selected_index(),
        }
    }

    fn on_filtering(
        &mut self,
        key: KeyEvent,
        origin: Browse,
        selected_before: Option<usize>,
    ) -> Mode {
        if is_force_quit(key) {
            self.quit();
        } else {
            match key.code {
                KeyCode::Esc => {
                    self.snippet_list.clear_filter();
                    self.reselect(selected_before);
                    return origin.mode();
                }
                KeyCode::Enter => return origin.mode(),
                KeyCode::Up | KeyCode::Down => {
                    let len = self.visible().len();
                    if self.snippet_list.handle_key(key, len) == PaneOutcome::SelectionMoved {
                        self.refresh_viewer();
                    }
                }
                _ => {
                    if self.snippet_list.edit_filter(key) {
                        self.refresh_viewer();
                    }
                }
            }
        }
        Mode::Filtering {
            origin,
            selected_before,
        }
    }

    fn on_editing_new(&mut self, key: KeyEvent, mut form: EditForm) -> Mode {
        if is_force_quit(key) {
            self.error("Save or cancel the snippet before quitting");
            return Mode::EditingNew { form };
        }
        match form.handle_key(key, 0) {
            PaneOutcome::Submit => {
                self.commit_new(&form);
                Mode::BrowsingSnippets
            }
            PaneOutcome::Cancel => {
                self.info("Discarded new snippet");
                Mode::BrowsingSnippets
            }
            _ => Mode::EditingNew { form },
        }
    }

    fn on_editing_existing(&mut self, key: KeyEvent, index: usize, mut form: EditForm) -> Mode {
        if is_force_quit(key) {
            self.error("Save or cancel the edit before quitting");
            return Mode::EditingExisting { index, form };
        }
        match form.handle_key(key, 0) {
            PaneOutcome::Submit => {
                self.commit_existing(index, &form);
                Mode::BrowsingSnippets
            }
            PaneOutcome::Cancel => {
                self.info("Edit discarded");
                Mode::BrowsingSnippets
            }
            _ => Mode::EditingExisting { index, form },
        }
    }

    fn on_confirm_delete(&mut self, key: KeyEvent, index: usize) -> Mode {
        match key.code {
            KeyCode::Char('y' | 'Y') => {
                self.delete(index);
                Mode::BrowsingSnippets
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Mode::BrowsingSnippets,
            _ => {
                if is_force_quit(key) {
                    self.error("Answer the delete prompt before quitting");
                }
                Mode::ConfirmDelete { index }
            }
        }
    }

    fn commit_new(&mut self, form: &EditForm) {
        let values = self.store.defaults().normalize(&form.draft());
        let snippet = Snippet::create(values, Utc::now());
        let folder = snippet.folder.clone();
        let title = snippet.title.clone();

        let cursor = self.selected_index();
        let index = self.store.add_snippet(cursor, snippet);
        tracing::info!(index, folder = %folder, title = %title, "created snippet");

        // The new entry must be visible: drop the text filter and follow its folder.
        self.snippet_list.clear_filter();
        let folders = self.store.folders();
        if self.folder_list.active().is_some_and(|active| active != folder) {
            self.folder_list.activate(&folder, &folders);
        }
        self.folder_list.sync(&folders);
        self.reselect(Some(index));
        self.info(format!("Created \"{}\"", title));
    }

    fn commit_existing(&mut self, index: usize, form: &EditForm) {
        let values = self.store.defaults().normalize(&form.draft());
        let folder = values.folder.clone();
        let title = values.title.clone();

        if !self.store.update_fields(index, values.into_updates()) {
            tracing::warn!(index, "edit target no longer exists");
            self.error("Snippet no longer exists");
            return;
        }
        tracing::info!(index, folder = %folder, title = %title, "updated snippet");

        // An applied filter may no longer match the edited entry.
        self.snippet_list.clear_filter();
        let folders = self.store.folders();
        if self.folder_list.active().is_some_and(|active| active != folder) {
            self.folder_list.activate(&folder, &folders);
        }
        self.folder_list.sync(&folders);
        self.reselect(Some(index));
        self.info(format!("Saved \"{}\"", title));
    }

    fn delete(&mut self, index: usize) {
        match self.store.delete_snippet(index) {
            Some(removed) => {
                tracing::info!(index, title = %removed.title, "deleted snippet");
                self.info(format!("Deleted \"{}\"", removed.title));
            }
            None => self.error("Snippet no longer exists"),
        }
        self.folder_list.sync(&self.store.folders());
        let len = self.visible().len();
        self.snippet_list.clamp(len);
        self.refresh_viewer();
    }

    fn copy_selected(&mut self) {
        let Some(title) = self.selected_snippet().map(|s| s.title.clone()) else {
            self.error("No snippet selected");
            return;
        };
        match self.viewer.content() {
            Some("") => self.error(format!("\"{}\" is empty", title)),
            Some(content) => {
                self.pending_copy = Some(content.to_string());
                tracing::debug!(title = %title, "copied snippet content");
                self.info(format!("Copied \"{}\"", title));
            }
            None => self.error(format!("Nothing to copy for \"{}\"", title)),
        }
    }

    fn toggle_favorite(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        match self.store.toggle_favorite(index) {
            Some(true) => self.info("Added to favorites"),
            Some(false) => self.info("Removed from favorites"),
            None => {}
        }
    }

    /// Swap the selected snippet with its visible neighbour.
    fn move_selected(&mut self, down: bool) {
        let visible = self.visible();
        let pos = self.snippet_list.cursor();
        let target = if down {
            pos.checked_add(1)
        } else {
            pos.checked_sub(1)
        };
        let (Some(&from), Some(&to)) = (visible.get(pos), target.and_then(|t| visible.get(t)))
        else {
            return;
        };

        if self.store.swap(from, to) {
            let visible = self.visible();
            self.snippet_list.select_store_index(to, &visible);
        }
    }

    /// Put the cursor back on `index` (or clamp it) and reload the viewer.
    fn reselect(&mut self, index: Option<usize>) {
        let visible = self.visible();
        match index {
            Some(index) => self.snippet_list.select_store_index(index, &visible),
            None => self.snippet_list.clamp(visible.len()),
        }
        self.refresh_viewer();
    }

    /// Load the selected snippet into the viewer.
    fn refresh_viewer(&mut self) {
        let selected = self.selected_index();
        let snippet = selected.and_then(|i| self.store.get(i));
        self.viewer.show(snippet, &self.config);
    }

    fn quit(&mut self) {
        tracing::info!("quit requested");
        self.should_quit = true;
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            kind: StatusKind::Info,
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            kind: StatusKind::Error,
        });
    }
}
