//! Plain-text line formats.
//!
//! Two formats are read here:
//!
//! ```text
//! # text: name ||| :tag:tag: ||| url
//! Rust ||| :lang:rust: ||| https://www.rust-lang.org
//! Somewhere ||| :untagged: ||| https://example.com
//!
//! # lines: url : tag : tag
//! https://www.rust-lang.org : lang : rust
//! ```
//!
//! In the text format a tag list holding only the untagged sentinel means
//! "no tags". Inside the tag field `\` escapes the next character, so tags
//! may contain `:`, `|` or `\`, and a real tag spelled like the sentinel is
//! written `\untagged`. Fields are split from the right, so names may
//! contain `|||`.

use super::Importer;
use crate::Result;
use crate::bookmark::{LINE_SEPARATOR, RawRecord};

/// Field separator of the text format.
pub const FIELD_SEPARATOR: &str = "|||";

/// Delimiter around and between tags in the text format.
pub const TAG_DELIMITER: char = ':';

/// Escape character of the text format's tag field.
pub const TAG_ESCAPE: char = '\\';

/// Escapes one tag for the text format's tag field.
pub(crate) fn escape_tag(tag: &str, untagged_label: &str) -> String {
    let mut escaped = String::with_capacity(tag.len() + 1);
    if tag == untagged_label {
        escaped.push(TAG_ESCAPE);
    }
    for c in tag.chars() {
        if matches!(c, TAG_DELIMITER | TAG_ESCAPE | '|') {
            escaped.push(TAG_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// A tag read back from the tag field, and whether it held any escape.
#[derive(Default)]
struct FieldTag {
    text: String,
    escaped: bool,
}

fn split_tag_field(field: &str) -> Vec<FieldTag> {
    let mut tags = Vec::new();
    let mut current = FieldTag::default();
    let mut chars = field.chars();

    while let Some(c) = chars.next() {
        match c {
            TAG_ESCAPE => {
                current.escaped = true;
                if let Some(next) = chars.next() {
                    current.text.push(next);
                }
            }
            TAG_DELIMITER => tags.push(std::mem::take(&mut current)),
            c => current.text.push(c),
        }
    }
    tags.push(current);

    tags.retain(|t| !t.text.trim().is_empty());
    tags
}

/// Importer for `name ||| :tags: ||| url` files.
#[derive(Debug, Clone)]
pub struct TextImporter {
    untagged_label: String,
}

impl TextImporter {
    pub fn new(untagged_label: &str) -> Self {
        Self { untagged_label: untagged_label.to_string() }
    }

    fn parse_line(&self, line: &str) -> RawRecord {
        let mut fields = line.rsplitn(3, FIELD_SEPARATOR).map(str::trim);
        let (Some(url), Some(tags), Some(name)) = (fields.next(), fields.next(), fields.next()) else {
            tracing::warn!(line, "Expected name, tags and url in text bookmark line");
            return RawRecord::new(Some(line.to_string()), None, Vec::new());
        };

        let tags = split_tag_field(tags);
        let sentinel = |t: &FieldTag| !t.escaped && t.text.trim() == self.untagged_label;
        let tags: Vec<String> = if tags.len() == 1 && sentinel(&tags[0]) {
            Vec::new()
        } else {
            tags.into_iter().map(|t| t.text.trim().to_string()).collect()
        };

        let url = if url.is_empty() { None } else { Some(url.to_string()) };
        RawRecord::new(Some(name.to_string()), url, tags)
    }
}

impl Default for TextImporter {
    fn default() -> Self {
        Self::new(crate::config::UNTAGGED)
    }
}

impl Importer for TextImporter {
    fn import(&self, input: &str) -> Result<Vec<RawRecord>> {
        Ok(input.lines().filter(|line| is_content(line)).map(|line| self.parse_line(line)).collect())
    }
}

/// Importer for `url : tag : tag` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinesImporter;

impl Importer for LinesImporter {
    fn import(&self, input: &str) -> Result<Vec<RawRecord>> {
        let records = input
            .lines()
            .filter(|line| is_content(line))
            .map(|line| {
                let mut parts = line.split(LINE_SEPARATOR).map(str::trim);
                let url = parts.next().filter(|u| !u.is_empty()).map(String::from);
                let tags = parts.filter(|t| !t.is_empty()).map(String::from).collect();
                RawRecord::new(None, url, tags)
            })
            .collect();

        Ok(records)
    }
}

fn is_content(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_line() {
        let records = TextImporter::default().import("Rust ||| :lang:rust: ||| https://www.rust-lang.org").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("Rust"));
        assert_eq!(records[0].tags, vec!["lang", "rust"]);
        assert_eq!(records[0].url.as_deref(), Some("https://www.rust-lang.org"));
    }

    #[test]
    fn test_text_untagged_sentinel() {
        let records = TextImporter::default().import("X ||| :untagged: ||| http://x.com").unwrap();
        assert!(records[0].tags.is_empty());

        let records = TextImporter::new("inbox").import("X ||| :untagged:inbox: ||| http://x.com").unwrap();
        assert_eq!(records[0].tags, vec!["untagged", "inbox"]);
    }

    #[test]
    fn test_text_escaped_tags() {
        let records = TextImporter::default().import(r"X ||| :lang\:rust:a\|b:\\: ||| http://x.com").unwrap();
        assert_eq!(records[0].tags, vec!["lang:rust", "a|b", "\\"]);

        let records = TextImporter::default().import(r"X ||| :\untagged: ||| http://x.com").unwrap();
        assert_eq!(records[0].tags, vec!["untagged"]);
    }

    #[test]
    fn test_text_name_with_field_separator() {
        let records = TextImporter::default().import("Foo ||| Bar ||| :x: ||| https://a.com").unwrap();
        assert_eq!(records[0].name.as_deref(), Some("Foo ||| Bar"));
        assert_eq!(records[0].tags, vec!["x"]);
        assert_eq!(records[0].url.as_deref(), Some("https://a.com"));
    }

    #[test]
    fn test_text_bad_field_count() {
        let records = TextImporter::default().import("only a name\n\n# comment\nA ||| :a: ||| http://a.com").unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].url.is_none());
        assert!(records[1].url.is_some());
    }

    #[test]
    fn test_lines() {
        let input = "https://a.com : x : y\nhttps://b.com\n : orphan\n";
        let records = LinesImporter.import(input).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].tags, vec!["x", "y"]);
        assert!(records[1].tags.is_empty());
        assert!(records[2].url.is_none());
    }
}
