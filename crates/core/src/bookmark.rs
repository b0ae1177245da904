//! Bookmark records.
//!
//! [`RawRecord`] is what an importer produces: whatever the source file
//! contained, unvalidated. [`Bookmark`] is the validated value the trie
//! indexes: a non-empty URL, a display name and a normalized tag set.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{BkmkError, Result};

/// Name given to bookmarks whose source carried no title.
pub const DEFAULT_NAME: &str = "No Name";

/// Separator of the `.bookmarks` line format.
pub const LINE_SEPARATOR: &str = " : ";

static TAG_NORM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a single tag.
///
/// Surrounding whitespace is trimmed and inner whitespace runs become `_`.
/// Returns `None` for tags that are empty after trimming.
///
/// # Example
///
/// ```rust
/// use bkmkorg_core::bookmark::normalize_tag;
///
/// assert_eq!(normalize_tag("  machine   learning "), Some("machine_learning".to_string()));
/// assert_eq!(normalize_tag("   "), None);
/// ```
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(TAG_NORM.replace_all(trimmed, "_").into_owned())
}

/// An unvalidated `(name, url, tags)` triple from an importer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub name: Option<String>,
    pub url: Option<String>,
    pub tags: Vec<String>,
}

impl RawRecord {
    pub fn new(name: Option<String>, url: Option<String>, tags: Vec<String>) -> Self {
        Self { name, url, tags }
    }

    /// Validate the record into a [`Bookmark`].
    ///
    /// # Errors
    ///
    /// Returns [`BkmkError::MalformedRecord`] if the URL is missing or blank.
    pub fn into_bookmark(self) -> Result<Bookmark> {
        let url = self.url.ok_or_else(|| {
            BkmkError::MalformedRecord(format!("no url for '{}'", self.name.as_deref().unwrap_or(DEFAULT_NAME)))
        })?;
        Bookmark::new(url, self.name, self.tags)
    }
}

/// A validated bookmark.
///
/// Two bookmarks are duplicates when their URLs are equal; URLs are expected
/// to be normalized before construction (see [`crate::normalize`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    url: String,
    name: String,
    tags: BTreeSet<String>,
}

impl Bookmark {
    /// Creates a bookmark, normalizing its tags.
    ///
    /// Whitespace runs in the name, line breaks included, become single
    /// spaces. A missing or blank name becomes [`DEFAULT_NAME`]. An empty tag
    /// set is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`BkmkError::MalformedRecord`] if `url` is blank.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bkmkorg_core::Bookmark;
    ///
    /// let bookmark = Bookmark::new("https://example.com", Some("Example".into()), ["web dev", "rust"]).unwrap();
    /// assert_eq!(bookmark.tags().iter().collect::<Vec<_>>(), ["rust", "web_dev"]);
    /// ```
    pub fn new<S, I, T>(url: S, name: Option<String>, tags: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let url = url.into().trim().to_string();
        if url.is_empty() {
            return Err(BkmkError::MalformedRecord(format!(
                "blank url for '{}'",
                name.as_deref().unwrap_or(DEFAULT_NAME)
            )));
        }

        let name = match name.map(|n| n.split_whitespace().collect::<Vec<_>>().join(" ")) {
            Some(n) if !n.is_empty() => n,
            _ => DEFAULT_NAME.to_string(),
        };

        let tags = tags.into_iter().filter_map(|t| normalize_tag(t.as_ref())).collect();

        Ok(Self { url, name, tags })
    }

    /// Parses a `.bookmarks` line: `url : tag1 : tag2`.
    ///
    /// A line with only a URL yields an untagged bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`BkmkError::MalformedRecord`] for blank lines.
    pub fn from_line(line: &str, sep: &str) -> Result<Self> {
        let mut parts = line.split(sep).map(str::trim);
        let url = parts.next().unwrap_or_default();
        let tags: Vec<&str> = parts.collect();

        if tags.is_empty() && !url.is_empty() {
            tracing::warn!(url, "No tags for bookmark line");
        }

        Self::new(url, None, tags)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }

    /// Merges another bookmark for the same URL into a new one.
    ///
    /// Tags are unioned and the receiver's name is kept (first seen wins).
    pub fn merge(&self, other: &Bookmark) -> Bookmark {
        debug_assert_eq!(self.url, other.url);
        let mut merged = self.clone();
        merged.absorb_tags(other.tags.iter().cloned());
        merged
    }

    /// Adds tags in place, returning whether the tag set grew.
    pub(crate) fn absorb_tags<I: IntoIterator<Item = String>>(&mut self, tags: I) -> bool {
        let before = self.tags.len();
        self.tags.extend(tags);
        self.tags.len() != before
    }

    /// Replaces every tag using `f`, which may map one tag to several.
    pub fn map_tags<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> Vec<String>,
    {
        self.tags = self.tags.iter().flat_map(|t| f(t)).filter_map(|t| normalize_tag(&t)).collect();
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)?;
        for tag in &self.tags {
            write!(f, "{}{}", LINE_SEPARATOR, tag)?;
        }
        Ok(())
    }
}
