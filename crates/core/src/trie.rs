//! Tag-path trie over bookmarks.
//!
//! The trie is keyed by tag paths: a bookmark tagged `{work, proj}` lives at
//! `root → proj → work`, since a tag path is the sorted tag set. Bookmarks
//! with no tags are attached to the root itself.
//!
//! Each bookmark is stored exactly once, in the trie's record store, keyed by
//! its URL. Trie nodes and the per-tag index only hold [`BookmarkId`]s that
//! point back into the store, so merging tags into an existing bookmark can
//! never leave diverging copies behind.
//!
//! The trie is built in one insert phase and then only read: traversal
//! ([`BookmarkTrie::entries`]), grouping ([`BookmarkTrie::group`]) and
//! querying ([`BookmarkTrie::filter_queries`]) take `&self`.
//!
//! # Example
//!
//! ```rust
//! use bkmkorg_core::{Bookmark, BookmarkTrie, InsertOutcome};
//!
//! let mut trie = BookmarkTrie::new();
//! let a = Bookmark::new("http://x.com", Some("A".into()), ["work", "proj"]).unwrap();
//! let b = Bookmark::new("http://x.com", Some("B".into()), ["proj"]).unwrap();
//!
//! assert_eq!(trie.insert(a), InsertOutcome::Inserted);
//! assert_eq!(trie.insert(b), InsertOutcome::Unchanged);
//!
//! let entries = trie.get_tuple_list();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].path.to_string(), "proj:work");
//! assert_eq!(entries[0].bookmark.name(), "A");
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::bookmark::{Bookmark, normalize_tag};
use crate::group::{Group, GroupConfig};
use crate::params::QueryParamIndex;
use crate::tagfile::TagCounts;
use crate::{BkmkError, Result};

/// Separator used when displaying a [`TagPath`].
pub const PATH_SEPARATOR: &str = ":";

/// Index of a bookmark in the trie's record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookmarkId(usize);

/// A sorted sequence of tags identifying a position in the trie.
///
/// The empty path is the root, where untagged bookmarks live.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TagPath(Vec<String>);

impl TagPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path for a tag set. `BTreeSet` iteration is already sorted.
    pub fn from_tags(tags: &BTreeSet<String>) -> Self {
        Self(tags.iter().cloned().collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Number of leading segments shared with `other`.
    pub fn common_prefix_len(&self, other: &TagPath) -> usize {
        self.0.iter().zip(other.0.iter()).take_while(|(a, b)| a == b).count()
    }

    fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(PATH_SEPARATOR))
    }
}

/// One tag-path segment of the trie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    key: String,
    children: BTreeMap<String, TrieNode>,
    bookmarks: Vec<BookmarkId>,
}

impl TrieNode {
    fn new(key: &str) -> Self {
        Self { key: key.to_string(), ..Default::default() }
    }

    /// The tag segment; empty for the root.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Child nodes, ordered by key.
    pub fn children(&self) -> &BTreeMap<String, TrieNode> {
        &self.children
    }

    /// Bookmarks whose tag path ends here, ordered by URL.
    pub fn bookmark_ids(&self) -> &[BookmarkId] {
        &self.bookmarks
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.bookmarks.is_empty()
    }
}

/// What [`BookmarkTrie::insert`] did with a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The URL was new.
    Inserted,
    /// The URL existed and the bookmark brought new tags.
    Merged,
    /// The URL existed with a superset of the tags; nothing changed.
    Unchanged,
}

/// A bookmark paired with the tag path it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    pub path: TagPath,
    pub bookmark: &'a Bookmark,
}

/// Result of [`BookmarkTrie::filter_queries`].
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// A new trie holding only the matching bookmarks.
    pub trie: BookmarkTrie,
    /// Tags carried by matching bookmarks, minus the queried tags.
    pub frontier: BTreeSet<String>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}

/// Prefix tree of bookmarks keyed by tag path.
#[derive(Debug, Clone, Default)]
pub struct BookmarkTrie {
    root: TrieNode,
    store: Vec<Bookmark>,
    by_url: HashMap<String, BookmarkId>,
    by_tag: BTreeMap<String, BTreeSet<BookmarkId>>,
    params: QueryParamIndex,
}

impl BookmarkTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct bookmarks (by URL).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Resolves an id from this trie's nodes. Ids from another trie (a
    /// query result, say) may resolve to `None` or to an unrelated bookmark.
    pub fn bookmark(&self, id: BookmarkId) -> Option<&Bookmark> {
        self.store.get(id.0)
    }

    /// Ids held by this trie's own nodes and indexes always resolve.
    fn record(&self, id: BookmarkId) -> &Bookmark {
        &self.store[id.0]
    }

    /// Looks a bookmark up by its (already normalized) URL.
    pub fn get(&self, url: &str) -> Option<&Bookmark> {
        self.by_url.get(url).map(|id| self.record(*id))
    }

    /// Bookmarks in first-inserted order.
    pub fn bookmarks(&self) -> impl Iterator<Item = &Bookmark> {
        self.store.iter()
    }

    /// Every tag present in the trie, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Query parameters seen across inserted URLs.
    pub fn query_params(&self) -> &QueryParamIndex {
        &self.params
    }

    /// Inserts a bookmark.
    ///
    /// The bookmark is attached at the node for its sorted tag path, or at
    /// the root if it has no tags. A bookmark whose URL is already present is
    /// merged: tags are unioned, the first name is kept and the stored record
    /// moves to the node for the merged path.
    pub fn insert(&mut self, bookmark: Bookmark) -> InsertOutcome {
        if let Some(&id) = self.by_url.get(bookmark.url()) {
            return self.merge_into(id, bookmark);
        }

        let id = BookmarkId(self.store.len());
        let path = TagPath::from_tags(bookmark.tags());

        self.params.record(bookmark.url());
        self.by_url.insert(bookmark.url().to_string(), id);
        for tag in bookmark.tags() {
            self.by_tag.entry(tag.clone()).or_default().insert(id);
        }
        self.store.push(bookmark);
        self.attach(id, &path);

        InsertOutcome::Inserted
    }

    fn merge_into(&mut self, id: BookmarkId, incoming: Bookmark) -> InsertOutcome {
        let old_path = TagPath::from_tags(self.store[id.0].tags());
        let new_tags: Vec<String> =
            incoming.tags().iter().filter(|t| !self.store[id.0].tags().contains(*t)).cloned().collect();

        if !self.store[id.0].absorb_tags(new_tags.iter().cloned()) {
            return InsertOutcome::Unchanged;
        }

        tracing::debug!(url = incoming.url(), added = ?new_tags, "Merging tags into existing bookmark");

        for tag in new_tags {
            self.by_tag.entry(tag).or_default().insert(id);
        }

        detach(&mut self.root, old_path.segments(), id);
        let new_path = TagPath::from_tags(self.store[id.0].tags());
        self.attach(id, &new_path);

        InsertOutcome::Merged
    }

    fn attach(&mut self, id: BookmarkId, path: &TagPath) {
        let mut node = &mut self.root;
        for segment in path.segments() {
            node = node.children.entry(segment.clone()).or_insert_with(|| TrieNode::new(segment));
        }

        let store = &self.store;
        let url = store[id.0].url();
        if let Err(pos) = node.bookmarks.binary_search_by(|other| store[other.0].url().cmp(url)) {
            node.bookmarks.insert(pos, id);
        }
    }

    /// Depth-first, tag-sorted `(tag path, bookmark)` pairs.
    ///
    /// A node's own bookmarks (sorted by URL) come before its children.
    /// Untagged bookmarks come first, under the root path. Each call starts
    /// a fresh traversal.
    pub fn entries(&self) -> Entries<'_> {
        Entries { trie: self, stack: vec![(&self.root, TagPath::root())], current: None }
    }

    /// Collects [`entries`](Self::entries).
    pub fn get_tuple_list(&self) -> Vec<Entry<'_>> {
        self.entries().collect()
    }

    /// Returns a copy holding only bookmarks that carry every tag in `query`,
    /// together with the frontier of tags co-occurring with the query.
    ///
    /// The trie itself is not modified. Query tags are normalized the same
    /// way bookmark tags are.
    ///
    /// # Errors
    ///
    /// Returns [`BkmkError::EmptyQueryResult`] if none of the query tags exist
    /// in the trie. Tags that exist but never occur together give an empty,
    /// successful result.
    pub fn filter_queries(&self, query: &BTreeSet<String>) -> Result<QueryResult> {
        let tags: BTreeSet<String> = query.iter().filter_map(|t| normalize_tag(t)).collect();
        let postings: Vec<&BTreeSet<BookmarkId>> = tags.iter().filter_map(|t| self.by_tag.get(t)).collect();

        if postings.is_empty() {
            return Err(BkmkError::EmptyQueryResult { tags: tags.into_iter().collect() });
        }

        let mut matched: BTreeSet<BookmarkId> = if postings.len() == tags.len() {
            postings[0].clone()
        } else {
            BTreeSet::new()
        };
        for posting in postings.iter().skip(1) {
            matched.retain(|id| posting.contains(id));
        }

        let mut result = QueryResult::default();
        for id in matched {
            let bookmark = self.record(id);
            result.frontier.extend(bookmark.tags().iter().filter(|t| !tags.contains(*t)).cloned());
            result.trie.insert(bookmark.clone());
        }

        tracing::debug!(query = ?tags, matched = result.len(), frontier = result.frontier.len(), "Filtered trie");

        Ok(result)
    }

    /// Nested grouping of the trie by tag path.
    pub fn group(&self, config: &GroupConfig) -> Group<'_> {
        Group::from_trie(self, config)
    }

    /// Number of bookmarks carrying each tag.
    pub fn tag_counts(&self) -> TagCounts {
        let mut counts = TagCounts::new();
        for (tag, ids) in &self.by_tag {
            counts.set(tag, ids.len());
        }
        counts
    }

    /// Bookmarks in `other` whose URL is not in this trie, sorted by URL.
    pub fn difference<'o>(&self, other: &'o BookmarkTrie) -> Vec<&'o Bookmark> {
        let mut missing: Vec<&Bookmark> = other.bookmarks().filter(|b| !self.by_url.contains_key(b.url())).collect();
        missing.sort_by(|a, b| a.url().cmp(b.url()));
        missing
    }
}

impl FromIterator<Bookmark> for BookmarkTrie {
    fn from_iter<I: IntoIterator<Item = Bookmark>>(iter: I) -> Self {
        let mut trie = BookmarkTrie::new();
        trie.extend(iter);
        trie
    }
}

impl Extend<Bookmark> for BookmarkTrie {
    fn extend<I: IntoIterator<Item = Bookmark>>(&mut self, iter: I) {
        for bookmark in iter {
            self.insert(bookmark);
        }
    }
}

/// Removes `id` from the node at `path` and prunes branches left empty.
fn detach(node: &mut TrieNode, path: &[String], id: BookmarkId) {
    match path.split_first() {
        None => node.bookmarks.retain(|other| *other != id),
        Some((head, rest)) => {
            if let Some(child) = node.children.get_mut(head) {
                detach(child, rest, id);
                if child.is_empty() {
                    node.children.remove(head);
                }
            }
        }
    }
}

/// Iterator returned by [`BookmarkTrie::entries`].
pub struct Entries<'a> {
    trie: &'a BookmarkTrie,
    stack: Vec<(&'a TrieNode, TagPath)>,
    current: Option<(TagPath, std::slice::Iter<'a, BookmarkId>)>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let trie = self.trie;
        loop {
            if let Some((path, ids)) = self.current.as_mut()
                && let Some(id) = ids.next()
            {
                return Some(Entry { path: path.clone(), bookmark: trie.record(*id) });
            }

            let (node, path) = self.stack.pop()?;
            for (key, child) in node.children.iter().rev() {
                self.stack.push((child, path.child(key)));
            }
            self.current = Some((path, node.bookmarks.iter()));
        }
    }
}
