//! Nested grouping of a trie for export.
//!
//! [`Group`] is the trie folded into a tree of tag-keyed maps. A group is
//! either a [`Group::Leaf`] (bookmarks, no sub-tags) or a [`Group::Internal`]
//! node (sub-tags, plus any bookmarks whose path ends exactly here).
//!
//! Serialized with serde, a group becomes the nested mapping
//! `{tag: {subtag: {...}, "__bookmarks": [...]}}`. Tag keys starting with
//! `__` get one more leading `_`, so no tag can land on `__bookmarks`.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::bookmark::Bookmark;
use crate::trie::{BookmarkTrie, Entry};

/// Map key under which a group's own bookmarks are serialized.
pub const BOOKMARKS_KEY: &str = "__bookmarks";

/// Grouping policy.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Merge an internal node that has exactly one child and no bookmarks
    /// with that child (default: false).
    pub collapse_chains: bool,

    /// Joins collapsed keys (default: "/").
    pub separator: String,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self { collapse_chains: false, separator: "/".to_string() }
    }
}

/// A node of the grouped view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Group<'a> {
    Leaf { bookmarks: Vec<&'a Bookmark> },
    Internal { children: BTreeMap<String, Group<'a>>, bookmarks: Vec<&'a Bookmark> },
}

impl<'a> Group<'a> {
    /// Groups the whole trie. The returned root carries untagged bookmarks.
    pub fn from_trie(trie: &'a BookmarkTrie, config: &GroupConfig) -> Self {
        Self::from_entries(&trie.get_tuple_list(), config)
    }

    /// Groups traversal entries by their tag paths.
    ///
    /// Bookmarks keep the order they have in `entries` within each group.
    pub fn from_entries(entries: &[Entry<'a>], config: &GroupConfig) -> Self {
        let mut root = Node::default();
        for entry in entries {
            let node = entry.path.segments().iter().fold(&mut root, |node, segment| {
                node.children.entry(segment.clone()).or_default()
            });
            node.bookmarks.push(entry.bookmark);
        }
        root.into_group(config)
    }

    /// Bookmarks whose path ends at this group.
    pub fn bookmarks(&self) -> &[&'a Bookmark] {
        match self {
            Group::Leaf { bookmarks } | Group::Internal { bookmarks, .. } => bookmarks,
        }
    }

    /// Sub-groups, `None` for a leaf.
    pub fn children(&self) -> Option<&BTreeMap<String, Group<'a>>> {
        match self {
            Group::Leaf { .. } => None,
            Group::Internal { children, .. } => Some(children),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Group::Leaf { .. })
    }

    /// Total bookmarks in this group and below.
    pub fn len(&self) -> usize {
        let nested: usize = self.children().map(|c| c.values().map(Group::len).sum()).unwrap_or(0);
        self.bookmarks().len() + nested
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
struct Node<'a> {
    children: BTreeMap<String, Node<'a>>,
    bookmarks: Vec<&'a Bookmark>,
}

impl<'a> Node<'a> {
    fn into_group(self, config: &GroupConfig) -> Group<'a> {
        if self.children.is_empty() {
            return Group::Leaf { bookmarks: self.bookmarks };
        }

        let children = self
            .children
            .into_iter()
            .map(|(key, child)| {
                let group = child.into_group(config);
                if config.collapse_chains { collapse(key, group, &config.separator) } else { (key, group) }
            })
            .collect();

        Group::Internal { children, bookmarks: self.bookmarks }
    }
}

/// Folds a bookmark-less single-child group into its child. Children are
/// built first, so a whole chain collapses in one step.
fn collapse<'a>(key: String, group: Group<'a>, separator: &str) -> (String, Group<'a>) {
    match group {
        Group::Internal { mut children, bookmarks } if bookmarks.is_empty() && children.len() == 1 => {
            match children.pop_first() {
                Some((child_key, child)) => (format!("{}{}{}", key, separator, child_key), child),
                None => (key, Group::Internal { children, bookmarks }),
            }
        }
        other => (key, other),
    }
}

impl Serialize for Group<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children = self.children();
        let bookmarks = self.bookmarks();
        let len = children.map_or(0, BTreeMap::len) + usize::from(!bookmarks.is_empty() || self.is_leaf());

        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(children) = children {
            for (key, child) in children {
                map.serialize_entry(&serialized_key(key), child)?;
            }
        }
        if !bookmarks.is_empty() || self.is_leaf() {
            map.serialize_entry(BOOKMARKS_KEY, bookmarks)?;
        }
        map.end()
    }
}

/// Map key of a child group. Keys starting with `__` are the only ones
/// that change, and they all come out starting with `___`.
fn serialized_key(key: &str) -> Cow<'_, str> {
    if key.starts_with("__") { Cow::Owned(format!("_{}", key)) } else { Cow::Borrowed(key) }
}
