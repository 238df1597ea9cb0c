//! # Configuration
//!
//! Process-wide settings resolved once at startup and handed to
//! [`crate::ui::App::new`] by value.
//!
//! ## Sources
//!
//! Every setting is a command-line flag that falls back to an environment
//! variable (see `Args` in `main.rs`):
//!
//! ```text
//! --home              SNIPBOX_HOME              ~/.snipbox
//! --file              SNIPBOX_FILE              snippets.json
//! --default-language  SNIPBOX_DEFAULT_LANGUAGE  go
//! --theme             SNIPBOX_THEME             Catppuccin Mocha
//! ```

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Name of the dot directory created under the user's home.
pub const DEFAULT_HOME_DIR: &str = ".snipbox";

/// Default name of the snippet index file inside the home directory.
pub const DEFAULT_FILE: &str = "snippets.json";

/// Default language tag for new and placeholder snippets.
pub const DEFAULT_LANGUAGE: &str = "go";

/// Folder used when no folder is given.
pub const DEFAULT_FOLDER: &str = "misc";

/// Title used when no title is given.
pub const DEFAULT_TITLE: &str = "Untitled Snippet";

/// Content file referenced by the seeded placeholder snippet.
pub const DEFAULT_CONTENT_FILE: &str = "snipbox.txt";

/// Name of the log file written inside the home directory.
pub const LOG_FILE: &str = "snipbox.log";

/// Immutable application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the index file and every snippet content file.
    pub home: PathBuf,
    /// File name of the snippet index, relative to `home`.
    pub file: String,
    /// Language tag used for placeholders and blank form fields.
    pub default_language: String,
    /// Name of the colour theme.
    pub theme: String,
}

impl Config {
    /// Build a configuration, filling unset values with the defaults.
    ///
    /// The home directory falls back to `~/.snipbox`; failing to locate the
    /// user's home directory is an error.
    pub fn resolve(
        home: Option<PathBuf>,
        file: Option<String>,
        default_language: Option<String>,
        theme: Option<String>,
    ) -> Result<Self> {
        let home = match home {
            Some(home) => home,
            None => default_home()?,
        };

        Ok(Self {
            home,
            file: non_blank(file).unwrap_or_else(|| DEFAULT_FILE.to_string()),
            default_language: non_blank(default_language)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            theme: non_blank(theme).unwrap_or_else(|| crate::ui::theme::DEFAULT_THEME.to_string()),
        })
    }

    /// Configuration rooted at an explicit directory with every other value defaulted.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            file: DEFAULT_FILE.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            theme: crate::ui::theme::DEFAULT_THEME.to_string(),
        }
    }

    /// Full path of the snippet index file.
    pub fn index_path(&self) -> PathBuf {
        self.home.join(&self.file)
    }

    /// Full path of a snippet's content file.
    pub fn content_path(&self, file: &str) -> PathBuf {
        self.home.join(file)
    }

    /// Full path of the log file.
    pub fn log_path(&self) -> PathBuf {
        self.home.join(LOG_FILE)
    }
}

fn default_home() -> Result<PathBuf> {
    let dirs = directories::BaseDirs::new().context("Could not determine home directory")?;
    Ok(dirs.home_dir().join(DEFAULT_HOME_DIR))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
