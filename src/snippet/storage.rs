//! # Snippet Storage
//!
//! Reads the snippet index at startup and writes it back once on exit.
//!
//! ## Storage Location
//!
//! ```text
//! <home>/
//! ├── snippets.json    index of every snippet
//! ├── snipbox.txt      content of the seeded placeholder
//! └── <file>           one content file per snippet
//! ```
//!
//! A missing index is not an error: the home directory and the index are
//! created and seeded with a single placeholder entry.

use super::model::{Defaults, Snippet};
use crate::config::Config;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Create the home directory if needed.
pub fn ensure_home(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.home)
        .with_context(|| format!("Unable to create directory {}", config.home.display()))
}

/// Load the snippet index, creating and seeding it when absent.
pub fn load_or_seed(config: &Config) -> Result<Vec<Snippet>> {
    let path = config.index_path();

    if !path.exists() {
        ensure_home(config)?;
        let seed = vec![Defaults::from_config(config).seed()];
        save(&path, &seed)
            .with_context(|| format!("Unable to create file {}", path.display()))?;
        tracing::info!(path = %path.display(), "seeded new snippet index");
        return Ok(seed);
    }

    let snippets = load(&path)?;
    tracing::info!(
        path = %path.display(),
        count = snippets.len(),
        "loaded snippet index"
    );
    Ok(snippets)
}

/// Parse an existing index file.
pub fn load(path: &Path) -> Result<Vec<Snippet>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snippet file: {}", path.display()))?;

    let snippets: Vec<Snippet> = serde_json::from_str(&content)
        .with_context(|| format!("Unable to parse snippet file: {}", path.display()))?;

    Ok(snippets)
}

/// Overwrite the index with `snippets`.
pub fn save(path: &Path, snippets: &[Snippet]) -> Result<()> {
    let json =
        serde_json::to_string_pretty(snippets).context("Could not serialize snippet data")?;

    fs::write(path, json)
        .with_context(|| format!("Could not save snippets file: {}", path.display()))?;

    Ok(())
}

/// Read the content file referenced by `snippet`.
///
/// Content files are not created with their snippet, so a file that does not
/// exist yet reads as empty. Any other failure is an error.
pub fn read_content(config: &Config, snippet: &Snippet) -> Result<String> {
    let path = config.content_path(&snippet.file);
    match fs::read_to_string(&path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        result => result.with_context(|| format!("Unable to read {}", path.display())),
    }
}
