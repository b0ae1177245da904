//! Tag count and tag substitution files.
//!
//! Both formats are line based, fields separated by ` : `:
//!
//! ```text
//! # tag : count
//! rust : 12
//! machine_learning : 4
//!
//! # tag : count : replacement [: replacement ...]
//! ml : 3 : machine_learning
//! rustlang : 2 : rust
//! ```
//!
//! Lines that do not parse are logged and skipped; a bad line never aborts a
//! whole file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::bookmark::normalize_tag;
use crate::{BkmkError, Result};

/// Field separator of tag files.
pub const TAG_FILE_SEPARATOR: &str = " : ";

/// Tag → usage count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCounts {
    counts: BTreeMap<String, usize>,
}

impl TagCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a tag count file.
    pub fn parse_str(content: &str) -> Self {
        let mut counts = Self::new();
        for (index, line) in content.lines().enumerate() {
            match parse_line(line, index + 1) {
                Ok(Some((tag, count, _))) => counts.set(&tag, count),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping tag count line: {}", e),
            }
        }
        counts
    }

    /// Reads and parses a tag count file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::parse_str(&read(path.as_ref())?))
    }

    /// Increments a tag's count. Blank tags are ignored.
    pub fn inc(&mut self, tag: &str) {
        if let Some(tag) = normalize_tag(tag) {
            *self.counts.entry(tag).or_default() += 1;
        }
    }

    /// Sets a tag's count. Blank tags are ignored.
    pub fn set(&mut self, tag: &str, count: usize) {
        if let Some(tag) = normalize_tag(tag) {
            self.counts.insert(tag, count);
        }
    }

    /// Count for a tag, zero if unknown.
    pub fn get(&self, tag: &str) -> usize {
        normalize_tag(tag).and_then(|t| self.counts.get(&t).copied()).unwrap_or(0)
    }

    pub fn contains(&self, tag: &str) -> bool {
        normalize_tag(tag).is_some_and(|t| self.counts.contains_key(&t))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(tag, count)| (tag.as_str(), *count))
    }

    /// Adds another file's counts to this one.
    pub fn merge(&mut self, other: &TagCounts) {
        for (tag, count) in &other.counts {
            *self.counts.entry(tag.clone()).or_default() += count;
        }
    }

    /// Tags present in `other` but not here, with `other`'s counts.
    pub fn difference(&self, other: &TagCounts) -> TagCounts {
        let counts = other
            .counts
            .iter()
            .filter(|(tag, _)| !self.counts.contains_key(*tag))
            .map(|(tag, count)| (tag.clone(), *count))
            .collect();
        TagCounts { counts }
    }
}

impl fmt::Display for TagCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> =
            self.counts.iter().map(|(tag, count)| format!("{}{}{}", tag, TAG_FILE_SEPARATOR, count)).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Tag counts plus replacement tags for some of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionFile {
    counts: TagCounts,
    mapping: BTreeMap<String, Vec<String>>,
}

impl SubstitutionFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a substitution file.
    pub fn parse_str(content: &str) -> Self {
        let mut file = Self::new();
        for (index, line) in content.lines().enumerate() {
            match parse_line(line, index + 1) {
                Ok(Some((tag, count, subs))) => {
                    file.counts.set(&tag, count);
                    if !subs.is_empty() {
                        file.mapping.insert(tag, subs);
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping substitution line: {}", e),
            }
        }
        file
    }

    /// Reads and parses a substitution file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::parse_str(&read(path.as_ref())?))
    }

    /// Sets the replacements for a tag.
    pub fn set_sub<I, S>(&mut self, tag: &str, replacements: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(tag) = normalize_tag(tag) else {
            return;
        };
        let subs: Vec<String> = replacements.into_iter().filter_map(|s| normalize_tag(s.as_ref())).collect();
        if !subs.is_empty() {
            self.mapping.insert(tag, subs);
        }
    }

    pub fn has_sub(&self, tag: &str) -> bool {
        self.mapping.contains_key(tag)
    }

    /// Replacement tags for `tag`, or `tag` itself if it has none.
    pub fn substitute(&self, tag: &str) -> Vec<String> {
        match self.mapping.get(tag) {
            Some(subs) => subs.clone(),
            None => vec![tag.to_string()],
        }
    }

    pub fn counts(&self) -> &TagCounts {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Merges another substitution file into this one.
    ///
    /// # Errors
    ///
    /// Returns [`BkmkError::SubstitutionConflict`] if both files map the same
    /// tag to different replacements.
    pub fn merge(&mut self, other: &SubstitutionFile) -> Result<()> {
        for (tag, subs) in &other.mapping {
            match self.mapping.get(tag) {
                Some(existing) if existing != subs => return Err(BkmkError::SubstitutionConflict(tag.clone())),
                Some(_) => {}
                None => {
                    self.mapping.insert(tag.clone(), subs.clone());
                }
            }
        }
        self.counts.merge(&other.counts);
        Ok(())
    }
}

impl fmt::Display for SubstitutionFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .counts
            .iter()
            .map(|(tag, count)| {
                let mut fields = vec![tag.to_string(), count.to_string()];
                if let Some(subs) = self.mapping.get(tag) {
                    fields.extend(subs.iter().cloned());
                }
                fields.join(TAG_FILE_SEPARATOR)
            })
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

fn read(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(BkmkError::FileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Parses `tag : count [: sub ...]`. Blank lines and `#` comments give `None`.
fn parse_line(line: &str, line_number: usize) -> Result<Option<(String, usize, Vec<String>)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split(TAG_FILE_SEPARATOR.trim()).map(str::trim);
    let tag = fields.next().and_then(normalize_tag).ok_or_else(|| BkmkError::TagFileError {
        line: line_number,
        message: format!("missing tag in '{}'", line),
    })?;

    let count = match fields.next() {
        Some(raw) => raw.parse::<usize>().map_err(|e| BkmkError::TagFileError {
            line: line_number,
            message: format!("bad count '{}': {}", raw, e),
        })?,
        None => {
            return Err(BkmkError::TagFileError { line: line_number, message: format!("missing count in '{}'", line) });
        }
    };

    let subs = fields.filter_map(normalize_tag).collect();

    Ok(Some((tag, count, subs)))
}
