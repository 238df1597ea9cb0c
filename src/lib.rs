//! snipbox - a terminal snippet manager
//!
//! This library holds the snippet collection, its JSON storage, and the
//! terminal interface used to browse, filter, edit and copy snippets.

pub mod config;
pub mod snippet;
pub mod ui;
