//! Application state tests
//!
//! Drives `App` through whole user flows: creating, editing and deleting
//! snippets, and checks the collection, the folder set and the selection
//! afterwards.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use snipbox::config::Config;
use snipbox::snippet::model::seed_date;
use snipbox::snippet::Snippet;
use snipbox::ui::app::{State, StatusKind};
use snipbox::ui::content_viewer::ViewerBody;
use snipbox::ui::App;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn snippet(folder: &str, title: &str, language: &str) -> Snippet {
    Snippet {
        folder: folder.to_string(),
        title: title.to_string(),
        tags: Vec::new(),
        date: seed_date(),
        favorite: false,
        file: format!("{}.{}", title, language),
        language: language.to_string(),
    }
}

/// Helper to create an app whose content files exist in a temp home
fn create_test_app(home: &TempDir, snippets: Vec<Snippet>) -> App {
    for s in &snippets {
        fs::write(home.path().join(&s.file), format!("// {}\n", s.title)).unwrap();
    }
    let mut app = App::new(Config::with_home(home.path()), snippets);
    app.resize(120, 40);
    app
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::empty()));
}

fn ctrl(app: &mut App, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn folder_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_create_snippet_in_chosen_folder() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);

    // Choose the "go" folder, then create from the snippet list
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state(), State::BrowsingFolders);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state(), State::BrowsingSnippets);
    assert_eq!(app.folder_list.active(), Some("go"));

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.state(), State::EditingNew);
    type_text(&mut app, "world");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.state(), State::BrowsingSnippets);
    assert_eq!(app.all_snippets().len(), 2);
    assert_eq!(app.folders(), folder_set(&["go"]));
    assert_eq!(app.visible().len(), 2);

    let created = app.selected_snippet().unwrap();
    assert_eq!(created.title, "world");
    assert_eq!(created.folder, "go");
    assert_eq!(created.language, "go");
    assert!(!created.favorite);
    assert!(created.tags.is_empty());
}

#[test]
fn test_create_with_blank_fields_uses_defaults() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);

    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Enter);

    let created = app.selected_snippet().unwrap();
    assert_eq!(created.folder, "misc");
    assert_eq!(created.title, "Untitled Snippet");
    assert_eq!(created.language, "go");
    assert_eq!(app.folders(), folder_set(&["go", "misc"]));
}

#[test]
fn test_create_follows_new_folder_and_parses_tags() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);

    // Narrow to "go", then create a snippet in another folder
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('n'));

    press(&mut app, KeyCode::BackTab); // Folder
    ctrl(&mut app, 'u');
    type_text(&mut app, "rust");
    press(&mut app, KeyCode::Tab); // Title
    type_text(&mut app, "ownership");
    press(&mut app, KeyCode::Tab); // Language
    type_text(&mut app, "rust");
    press(&mut app, KeyCode::Tab); // Tags
    type_text(&mut app, "borrow, , lifetimes ");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.folder_list.active(), Some("rust"));
    let created = app.selected_snippet().unwrap();
    assert_eq!(created.title, "ownership");
    assert_eq!(created.tags, vec!["borrow", "lifetimes"]);
    assert!(created.file.starts_with("ownership-"));
    assert!(created.file.ends_with(".rust"));
}

#[test]
fn test_cancel_new_leaves_collection_unchanged() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);
    let before = app.all_snippets().to_vec();

    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "draft");
    press(&mut app, KeyCode::Esc);

    assert_eq!(app.state(), State::BrowsingSnippets);
    assert_eq!(app.all_snippets(), before.as_slice());
}

#[test]
fn test_edit_updates_every_field_and_keeps_date() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);

    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.state(), State::EditingExisting);
    ctrl(&mut app, 'u');
    type_text(&mut app, "renamed");
    press(&mut app, KeyCode::BackTab); // Folder
    ctrl(&mut app, 'u');
    type_text(&mut app, "scratch");
    press(&mut app, KeyCode::Up); // Tags, wrapping backwards
    type_text(&mut app, "a,b");
    press(&mut app, KeyCode::Enter);

    let edited = &app.all_snippets()[0];
    assert_eq!(edited.title, "renamed");
    assert_eq!(edited.folder, "scratch");
    assert_eq!(edited.tags, vec!["a", "b"]);
    assert_eq!(edited.date, seed_date());
    assert_eq!(edited.file, "hello.go");
    assert_eq!(app.folders(), folder_set(&["scratch"]));
}

#[test]
fn test_edit_under_applied_filter_keeps_snippet_selected() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(
        &home,
        vec![snippet("go", "hello", "go"), snippet("go", "other", "go")],
    );

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.visible().len(), 1);

    // The new title no longer matches the filter
    press(&mut app, KeyCode::Char('e'));
    ctrl(&mut app, 'u');
    type_text(&mut app, "renamed");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.snippet_list.query(), "");
    assert_eq!(app.visible().len(), 2);
    assert_eq!(app.selected_snippet().unwrap().title, "renamed");
    assert_eq!(app.viewer.content(), Some("// hello\n"));
}

#[test]
fn test_cancel_edit_discards_every_pending_change() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);
    let before = app.all_snippets().to_vec();

    press(&mut app, KeyCode::Char('e'));
    type_text(&mut app, " world");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "rust");
    press(&mut app, KeyCode::Esc);

    assert_eq!(app.all_snippets(), before.as_slice());
}

#[test]
fn test_delete_only_snippet_of_a_folder() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(
        &home,
        vec![
            snippet("go", "a", "go"),
            snippet("python", "p", "python"),
            snippet("go", "b", "go"),
            snippet("go", "c", "go"),
        ],
    );

    // Folders are sorted: go, python
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.folder_list.active(), Some("python"));
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.selected_snippet().unwrap().title, "p");

    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.state(), State::ConfirmDelete);
    press(&mut app, KeyCode::Char('y'));

    assert_eq!(app.state(), State::BrowsingSnippets);
    assert_eq!(app.all_snippets().len(), 3);
    assert_eq!(app.folders(), folder_set(&["go"]));
    assert_eq!(app.folder_list.active(), None);
    assert_eq!(app.visible().len(), 3);
    assert!(app.selected_index().is_some());
}

#[test]
fn test_delete_declined_leaves_collection_unchanged() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.all_snippets().len(), 1);

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.all_snippets().len(), 1);
    assert_eq!(app.state(), State::BrowsingSnippets);
}

#[test]
fn test_delete_last_visible_entry_clamps_selection() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(
        &home,
        vec![
            snippet("go", "a", "go"),
            snippet("go", "b", "go"),
            snippet("go", "c", "go"),
        ],
    );

    press(&mut app, KeyCode::Char('G'));
    assert_eq!(app.selected_index(), Some(2));

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('y'));

    assert_eq!(app.selected_index(), Some(1));
    assert_eq!(app.selected_snippet().unwrap().title, "b");
    assert_eq!(app.viewer.content(), Some("// b\n"));
}

#[test]
fn test_delete_last_snippet_restores_placeholder() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("python", "only", "python")]);

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('y'));

    assert_eq!(app.all_snippets().len(), 1);
    let placeholder = &app.all_snippets()[0];
    assert_eq!(placeholder.folder, "misc");
    assert_eq!(placeholder.title, "Untitled Snippet");
    assert_eq!(placeholder.language, "go");
    assert_eq!(app.folders(), folder_set(&["misc"]));
    assert_eq!(app.selected_index(), Some(0));
}

#[test]
fn test_empty_collection_starts_with_placeholder() {
    let home = TempDir::new().unwrap();
    let app = create_test_app(&home, Vec::new());

    assert_eq!(app.all_snippets().len(), 1);
    assert_eq!(app.all_snippets()[0].folder, "misc");
}

#[test]
fn test_quit_from_browsing() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);

    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn test_quit_refused_while_editing() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);

    press(&mut app, KeyCode::Char('n'));
    ctrl(&mut app, 'c');
    assert!(!app.should_quit);
    assert_eq!(app.state(), State::EditingNew);
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);

    // 'q' is just text inside the form
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.selected_snippet().unwrap().title, "q");
}

#[test]
fn test_quit_refused_while_confirming_delete() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('q'));
    ctrl(&mut app, 'c');

    assert!(!app.should_quit);
    assert_eq!(app.state(), State::ConfirmDelete);
    assert_eq!(app.all_snippets().len(), 1);
}

#[test]
fn test_copy_selected_content() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);

    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.take_clipboard().as_deref(), Some("// hello\n"));
    assert_eq!(app.take_clipboard(), None);
}

#[test]
fn test_copy_unreadable_content_reports_error() {
    let home = TempDir::new().unwrap();
    // A directory where the content file should be
    fs::create_dir(home.path().join("hello.go")).unwrap();
    let mut app = App::new(
        Config::with_home(home.path()),
        vec![snippet("go", "hello", "go")],
    );

    press(&mut app, KeyCode::Char('c'));

    assert_eq!(app.take_clipboard(), None);
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
}

#[test]
fn test_new_snippet_shows_empty_content() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(&home, vec![snippet("go", "hello", "go")]);

    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "world");
    press(&mut app, KeyCode::Enter);

    // The content file does not exist yet
    let created = app.selected_snippet().unwrap().clone();
    assert!(!home.path().join(&created.file).exists());
    assert_eq!(app.viewer.body(), Some(&ViewerBody::Text(String::new())));

    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.take_clipboard(), None);
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
}

#[test]
fn test_toggle_favorite_and_reorder() {
    let home = TempDir::new().unwrap();
    let mut app = create_test_app(
        &home,
        vec![snippet("go", "a", "go"), snippet("go", "b", "go")],
    );

    press(&mut app, KeyCode::Char('s'));
    assert!(app.all_snippets()[0].favorite);
    press(&mut app, KeyCode::Char('s'));
    assert!(!app.all_snippets()[0].favorite);

    press(&mut app, KeyCode::Char('J'));
    let titles: Vec<_> = app.all_snippets().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["b", "a"]);
    assert_eq!(app.selected_snippet().unwrap().title, "a");

    // Already at the bottom
    press(&mut app, KeyCode::Char('J'));
    assert_eq!(app.selected_snippet().unwrap().title, "a");

    press(&mut app, KeyCode::Char('K'));
    assert_eq!(app.all_snippets()[0].title, "a");
}

#[test]
fn test_session_is_deterministic() {
    let run = || {
        let home = TempDir::new().unwrap();
        let mut app = create_test_app(
            &home,
            vec![snippet("go", "a", "go"), snippet("rust", "b", "rust")],
        );
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('K'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('y'));
        app.into_snippets()
    };

    assert_eq!(run(), run());
}
