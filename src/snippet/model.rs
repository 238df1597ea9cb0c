use crate::config::{self, Config};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single snippet record as stored in the index file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub folder: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time. Edits never touch it.
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub favorite: bool,
    /// Content file, relative to the home directory.
    pub file: String,
    pub language: String,
}

impl Snippet {
    /// Build a snippet from already-normalized form values.
    ///
    /// The content file name is derived from the title, creation time and
    /// language so that two snippets never share a file.
    pub fn create(values: FieldValues, date: DateTime<Utc>) -> Self {
        let file = content_file_name(&values.title, &values.language, date);
        Self {
            folder: values.folder,
            title: values.title,
            tags: values.tags,
            date,
            favorite: false,
            file,
            language: values.language,
        }
    }

    /// Case-insensitive match of `query` against title, tags, folder and language.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&query)
            || self.folder.to_lowercase().contains(&query)
            || self.language.to_lowercase().contains(&query)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
    }

    /// Tags as shown in the form and list, comma separated.
    pub fn tags_label(&self) -> String {
        self.tags.join(", ")
    }
}

/// Values used whenever a snippet field is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub folder: String,
    pub title: String,
    pub language: String,
    pub file: String,
}

impl Defaults {
    pub fn from_config(config: &Config) -> Self {
        Self {
            folder: config::DEFAULT_FOLDER.to_string(),
            title: config::DEFAULT_TITLE.to_string(),
            language: config.default_language.clone(),
            file: config::DEFAULT_CONTENT_FILE.to_string(),
        }
    }

    /// The synthetic entry used when there are no snippets at all.
    pub fn placeholder(&self, date: DateTime<Utc>) -> Snippet {
        Snippet {
            folder: self.folder.clone(),
            title: self.title.clone(),
            tags: Vec::new(),
            date,
            favorite: false,
            file: self.file.clone(),
            language: self.language.clone(),
        }
    }

    /// Placeholder written to a freshly created index file.
    pub fn seed(&self) -> Snippet {
        self.placeholder(seed_date())
    }

    /// Fill blank form values with defaults and split the tags input.
    pub fn normalize(&self, draft: &Draft) -> FieldValues {
        FieldValues {
            folder: or_default(&draft.folder, &self.folder),
            title: or_default(&draft.title, &self.title),
            language: or_default(&draft.language, &self.language),
            tags: parse_tags(&draft.tags),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            folder: config::DEFAULT_FOLDER.to_string(),
            title: config::DEFAULT_TITLE.to_string(),
            language: config::DEFAULT_LANGUAGE.to_string(),
            file: config::DEFAULT_CONTENT_FILE.to_string(),
        }
    }
}

/// Raw text of the edit form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub folder: String,
    pub title: String,
    pub language: String,
    pub tags: String,
}

/// Form values after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValues {
    pub folder: String,
    pub title: String,
    pub language: String,
    pub tags: Vec<String>,
}

impl FieldValues {
    /// One update per editable field, in form order.
    pub fn into_updates(self) -> Vec<FieldUpdate> {
        vec![
            FieldUpdate::Folder(self.folder),
            FieldUpdate::Title(self.title),
            FieldUpdate::Language(self.language),
            FieldUpdate::Tags(self.tags),
        ]
    }
}

/// A change to one editable field of a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Folder(String),
    Title(String),
    Tags(Vec<String>),
    Language(String),
}

impl FieldUpdate {
    pub(crate) fn apply(self, snippet: &mut Snippet) {
        match self {
            FieldUpdate::Folder(folder) => snippet.folder = folder,
            FieldUpdate::Title(title) => snippet.title = title,
            FieldUpdate::Tags(tags) => snippet.tags = tags,
            FieldUpdate::Language(language) => snippet.language = language,
        }
    }
}

/// Split a comma separated tags input. Order is kept and duplicates are allowed.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Date carried by the seeded placeholder entry.
pub fn seed_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 11, 12, 15, 4, 5)
        .single()
        .unwrap_or_default()
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn content_file_name(title: &str, language: &str, date: DateTime<Utc>) -> String {
    let stem = slug(title).unwrap_or_else(|| "snippet".to_string());
    let extension = slug(language).unwrap_or_else(|| "txt".to_string());
    format!("{}-{}.{}", stem, date.timestamp_millis(), extension)
}

/// Lowercase ASCII alphanumerics joined by single dashes, `None` if nothing is left.
fn slug(text: &str) -> Option<String> {
    let mut slug = String::new();
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    (!slug.is_empty()).then(|| slug.to_string())
}
