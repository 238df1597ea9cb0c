use super::model::{Defaults, FieldUpdate, Snippet};
use chrono::Utc;
use std::collections::BTreeSet;

/// The in-memory snippet collection.
///
/// Never empty: whenever the last entry goes away a placeholder built from
/// [`Defaults`] takes its place.
#[derive(Debug, Clone)]
pub struct SnippetStore {
    snippets: Vec<Snippet>,
    defaults: Defaults,
}

impl SnippetStore {
    pub fn new(snippets: Vec<Snippet>, defaults: Defaults) -> Self {
        let mut store = Self { snippets, defaults };
        store.ensure_placeholder();
        store
    }

    /// Every snippet in display order.
    pub fn all_snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn get(&self, index: usize) -> Option<&Snippet> {
        self.snippets.get(index)
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Folder names derived from the current collection.
    pub fn folders(&self) -> BTreeSet<String> {
        folders_of(&self.snippets)
    }

    /// Insert `snippet` at `cursor` (appending when there is no cursor or it
    /// is past the end) and return the index it landed at.
    pub fn add_snippet(&mut self, cursor: Option<usize>, snippet: Snippet) -> usize {
        let index = cursor
            .filter(|&i| i <= self.snippets.len())
            .unwrap_or(self.snippets.len());
        self.snippets.insert(index, snippet);
        index
    }

    /// Remove the snippet at `index`. Out of range indices are ignored.
    pub fn delete_snippet(&mut self, index: usize) -> Option<Snippet> {
        if index >= self.snippets.len() {
            return None;
        }
        let removed = self.snippets.remove(index);
        self.ensure_placeholder();
        Some(removed)
    }

    /// Change a single field in place. Returns `false` for a stale index.
    pub fn update_field(&mut self, index: usize, update: FieldUpdate) -> bool {
        self.update_fields(index, vec![update])
    }

    /// Apply every update to one snippet, or none of them when `index` is stale.
    pub fn update_fields(&mut self, index: usize, updates: Vec<FieldUpdate>) -> bool {
        let Some(snippet) = self.snippets.get_mut(index) else {
            return false;
        };
        for update in updates {
            update.apply(snippet);
        }
        true
    }

    /// Flip the favorite flag, returning the new value.
    pub fn toggle_favorite(&mut self, index: usize) -> Option<bool> {
        let snippet = self.snippets.get_mut(index)?;
        snippet.favorite = !snippet.favorite;
        Some(snippet.favorite)
    }

    /// Exchange the positions of two snippets.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.snippets.len() || b >= self.snippets.len() {
            return false;
        }
        self.snippets.swap(a, b);
        true
    }

    pub fn into_snippets(self) -> Vec<Snippet> {
        self.snippets
    }

    fn ensure_placeholder(&mut self) {
        if self.snippets.is_empty() {
            self.snippets.push(self.defaults.placeholder(Utc::now()));
        }
    }
}

/// Distinct folder names present in `snippets`, sorted.
pub fn folders_of(snippets: &[Snippet]) -> BTreeSet<String> {
    snippets.iter().map(|s| s.folder.clone()).collect()
}
