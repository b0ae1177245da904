//! Org-mode outline output.
//!
//! Tag path segments become nested headlines, one `*` per depth. A headline
//! is only written when the path diverges from the previous entry's, so
//! bookmarks sharing a path share its headlines:
//!
//! ```org
//! * lang
//! - [[https://go.dev][Go]]
//! ** rust
//! - [[https://www.rust-lang.org][Rust]]
//! ```

use super::Exporter;
use crate::Result;
use crate::config::ExportConfig;
use crate::trie::Entry;

/// Org outline formatter.
pub struct OrgExporter {
    config: ExportConfig,
}

impl OrgExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }
}

impl Exporter for OrgExporter {
    fn export(&self, entries: &[Entry<'_>]) -> Result<String> {
        let mut output = String::new();
        let mut previous: Option<(bool, Vec<&str>)> = None;

        for entry in entries {
            let root = entry.path.is_root();
            let segments: Vec<&str> = if root {
                vec![self.config.untagged_label.as_str()]
            } else {
                entry.path.segments().iter().map(String::as_str).collect()
            };

            // The untagged headline never stands in for a tag of the same name.
            let prev = previous.as_ref().filter(|(prev_root, _)| *prev_root == root).map(|(_, prev)| prev);
            let shared = prev.map_or(0, |prev| prev.iter().zip(&segments).take_while(|(a, b)| a == b).count());
            let unchanged = prev.is_some_and(|prev| prev.len() == segments.len() && shared == prev.len());

            if !unchanged {
                for (depth, segment) in segments.iter().enumerate().skip(shared) {
                    output.push_str(&format!("{} {}\n", "*".repeat(depth + 1), segment));
                }
            }

            output.push_str(&format!("- [[{}][{}]]\n", entry.bookmark.url(), org_escape(entry.bookmark.name())));
            previous = Some((root, segments));
        }

        Ok(output)
    }
}

/// Brackets would end an org link description early.
fn org_escape(name: &str) -> String {
    name.replace('[', "(").replace(']', ")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bookmark, BookmarkTrie};

    fn bookmark(url: &str, name: &str, tags: &[&str]) -> Bookmark {
        Bookmark::new(url, Some(name.to_string()), tags.iter().copied()).unwrap()
    }

    #[test]
    fn test_shared_headlines() {
        let trie: BookmarkTrie = [
            bookmark("https://www.rust-lang.org", "Rust", &["lang", "rust"]),
            bookmark("https://go.dev", "Go", &["lang"]),
            bookmark("https://crates.io", "Crates", &["lang", "rust"]),
            bookmark("https://example.com", "Example", &[]),
            bookmark("https://tokio.rs", "Tokio", &["async"]),
        ]
        .into_iter()
        .collect();

        let output = OrgExporter::new(ExportConfig::default()).export(&trie.get_tuple_list()).unwrap();
        assert_eq!(
            output,
            "* untagged\n\
             - [[https://example.com][Example]]\n\
             * async\n\
             - [[https://tokio.rs][Tokio]]\n\
             * lang\n\
             - [[https://go.dev][Go]]\n\
             ** rust\n\
             - [[https://crates.io][Crates]]\n\
             - [[https://www.rust-lang.org][Rust]]\n"
        );
    }

    #[test]
    fn test_sibling_branch_reuses_parent() {
        let trie: BookmarkTrie =
            [bookmark("http://a.com", "A", &["x", "y"]), bookmark("http://b.com", "B", &["x", "z"])]
                .into_iter()
                .collect();

        let output = OrgExporter::new(ExportConfig::default()).export(&trie.get_tuple_list()).unwrap();
        assert_eq!(output, "* x\n** y\n- [[http://a.com][A]]\n** z\n- [[http://b.com][B]]\n");
    }

    #[test]
    fn test_brackets_in_name() {
        let trie: BookmarkTrie = [bookmark("http://a.com", "[draft] A", &["x"])].into_iter().collect();
        let output = OrgExporter::new(ExportConfig::default()).export(&trie.get_tuple_list()).unwrap();
        assert!(output.contains("- [[http://a.com][(draft) A]]"));
    }

    #[test]
    fn test_tag_named_like_untagged_label_gets_own_headline() {
        let trie: BookmarkTrie =
            [bookmark("http://a.com", "A", &[]), bookmark("http://b.com", "B", &["untagged"])].into_iter().collect();
        let output = OrgExporter::new(ExportConfig::default()).export(&trie.get_tuple_list()).unwrap();
        assert_eq!(output, "* untagged\n- [[http://a.com][A]]\n* untagged\n- [[http://b.com][B]]\n");
    }

    #[test]
    fn test_multiline_name_stays_on_link_line() {
        let trie: BookmarkTrie = [bookmark("http://a.com", "Article\n    and notes", &["x"])].into_iter().collect();
        let output = OrgExporter::new(ExportConfig::default()).export(&trie.get_tuple_list()).unwrap();
        assert_eq!(output, "* x\n- [[http://a.com][Article and notes]]\n");
    }
}
