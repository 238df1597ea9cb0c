//! # UI Module
//!
//! The terminal interface: four panes sharing one snippet store, and the
//! coordinator that decides which of them receives each key.
//!
//! ## Components
//!
//! - [`App`] - mode/focus state machine and owner of every pane
//! - [`mod@render`] - draws a frame from an `&App`
//! - [`pane`] - the [`pane::Pane`] trait, screen layout, list cursor
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ header                                                   │
//! ├──────────┬──────────────┬────────────────────────────────┤
//! │ Folders  │ Snippets     │ Content                        │
//! │          │ Find: ...    │                                │
//! │          │              │      ┌ Edit Snippet ──────┐    │
//! │          │              │      │ Folder / Title /   │    │
//! │          │              │      │ Language / Tags    │    │
//! │          │              │      └────────────────────┘    │
//! ├──────────┴──────────────┴────────────────────────────────┤
//! │ footer: key hints or status message                      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modes
//!
//! ```text
//!                 Tab                    n / e            Enter / Esc
//! BrowsingFolders <──> BrowsingSnippets ───────> Editing ───────────> BrowsingSnippets
//!        │ /                │ /   │ x
//!        └──> Filtering <───┘     └──> ConfirmDelete ──y / n / Esc──> BrowsingSnippets
//!             (Enter keeps the filter, Esc clears it)
//! ```

pub mod app;
pub mod clipboard;
pub mod content_viewer;
pub mod edit_form;
pub mod folder_list;
pub mod highlight;
pub mod keys;
pub mod pane;
pub mod render;
pub mod snippet_list;
pub mod text_input;
pub mod theme;

pub use app::App;
pub use render::render;
