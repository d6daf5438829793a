//! Image descriptors and the raw page records they are built from.

use std::path::{Path, PathBuf};

/// Attribution-complete record for one downloadable background.
///
/// All three fields are non-empty; [`ImageDescriptor::new`] refuses to build
/// anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    source_url: String,
    author: String,
    title: String,
}

impl ImageDescriptor {
    /// Returns `None` if any field is empty.
    pub fn new(
        source_url: impl Into<String>,
        author: impl Into<String>,
        title: impl Into<String>,
    ) -> Option<Self> {
        let (source_url, author, title) = (source_url.into(), author.into(), title.into());
        if source_url.is_empty() || author.is_empty() || title.is_empty() {
            return None;
        }
        Some(Self {
            source_url,
            author,
            title,
        })
    }

    /// Location of the raw image bytes.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Image author; use it to attribute the work.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Stable name of the image, repeatable across runs.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// `{author}-{title}`, with path separators and NUL replaced by `_`.
    pub fn file_name(&self) -> String {
        let raw = format!("{}-{}", self.author, self.title);
        raw.chars()
            .map(|c| match c {
                '/' | '\\' | '\0' => '_',
                c => c,
            })
            .collect()
    }

    /// Destination of this image under `target_dir`.
    pub fn destination(&self, target_dir: &Path) -> PathBuf {
        target_dir.join(self.file_name())
    }
}

/// Page-extracted record before title resolution. Either field may be
/// missing; such records are not attributable backgrounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub href: Option<String>,
    pub author: Option<String>,
}

impl RawCandidate {
    /// Positional decode: `[href, author, ...]`. Missing, null or non-string
    /// positions become `None`; extra positions are ignored.
    pub fn from_json(record: &serde_json::Value) -> Self {
        let field = |i: usize| {
            record
                .get(i)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            href: field(0),
            author: field(1),
        }
    }

    /// `(href, author)` if both are present.
    pub fn attributable(self) -> Option<(String, String)> {
        match (self.href, self.author) {
            (Some(href), Some(author)) => Some((href, author)),
            _ => None,
        }
    }
}
