//! # Snippet Module
//!
//! The snippet collection and its on-disk form.
//!
//! ## Components
//!
//! - [`Snippet`] - a single record (folder, title, tags, date, favorite, file, language)
//! - [`SnippetStore`] - the ordered, never-empty in-memory collection
//! - [`storage`] - startup load/seed and the exit-time save
//!
//! ## Data Format
//!
//! ```json
//! [
//!   {
//!     "folder": "go",
//!     "title": "hello",
//!     "tags": ["intro"],
//!     "date": "2022-11-12T15:04:05Z",
//!     "favorite": false,
//!     "file": "hello.go",
//!     "language": "go"
//!   }
//! ]
//! ```
//!
//! Folders are never stored; they are recomputed from the collection with
//! [`folders_of`].

pub mod model;
pub mod storage;
pub mod store;

pub use model::{parse_tags, Defaults, Draft, FieldUpdate, FieldValues, Snippet};
pub use store::{folders_of, SnippetStore};
