//! Firefox JSON backup import.
//!
//! A backup is a tree of containers. Only `text/x-moz-place` nodes are
//! bookmarks; their `tags` field is a separator-joined string.

use serde::Deserialize;

use super::{Importer, split_tags};
use crate::Result;
use crate::bookmark::RawRecord;

const PLACE_TYPE: &str = "text/x-moz-place";

#[derive(Debug, Deserialize)]
struct PlaceNode {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    tags: Option<String>,
    #[serde(default)]
    children: Vec<PlaceNode>,
}

/// Importer for Firefox bookmark backups.
#[derive(Debug, Clone)]
pub struct FirefoxImporter {
    separator: String,
}

impl FirefoxImporter {
    pub fn new(separator: &str) -> Self {
        Self { separator: separator.to_string() }
    }
}

impl Default for FirefoxImporter {
    fn default() -> Self {
        Self::new(",")
    }
}

impl Importer for FirefoxImporter {
    fn import(&self, input: &str) -> Result<Vec<RawRecord>> {
        let root: PlaceNode = serde_json::from_str(input)?;

        let mut records = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.kind == PLACE_TYPE {
                let tags = node.tags.as_deref().map(|raw| split_tags(raw, &self.separator)).unwrap_or_default();
                records.push(RawRecord::new(node.title, node.uri, tags));
            }
            stack.extend(node.children.into_iter().rev());
        }

        Ok(records)
    }
}
