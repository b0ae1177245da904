//! Netscape bookmark HTML output.
//!
//! Browsers import this format natively. Each top-level tag becomes one
//! folder holding every bookmark whose tag path starts with it; untagged
//! bookmarks go in a folder named after the untagged label. Full tag sets
//! are kept in the `TAGS` attribute.

use std::collections::BTreeMap;

use super::Exporter;
use crate::Result;
use crate::config::ExportConfig;
use crate::trie::Entry;

const DOCTYPE: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>";
const META: &str = r#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">"#;

/// Netscape bookmark file formatter.
pub struct NetscapeExporter {
    config: ExportConfig,
}

impl NetscapeExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }
}

impl Exporter for NetscapeExporter {
    fn export(&self, entries: &[Entry<'_>]) -> Result<String> {
        let mut folders: BTreeMap<&str, Vec<&Entry<'_>>> = BTreeMap::new();
        for entry in entries {
            let folder = entry.path.first().unwrap_or(self.config.untagged_label.as_str());
            folders.entry(folder).or_default().push(entry);
        }

        let title = escape_html(&self.config.title);
        let mut output = String::new();
        output.push_str(DOCTYPE);
        output.push('\n');
        output.push_str(META);
        output.push('\n');
        output.push_str(&format!("<TITLE>{}</TITLE>\n<H1>{}</H1>\n<DL><p>\n", title, title));

        for (folder, entries) in folders {
            output.push_str(&format!("    <DT><H3>{}</H3>\n    <DL><p>\n", escape_html(folder)));
            for entry in entries {
                let tags: Vec<&str> = entry.bookmark.tags().iter().map(String::as_str).collect();
                output.push_str(&format!(
                    "        <DT><A HREF=\"{}\" TAGS=\"{}\">{}</A>\n",
                    escape_html(entry.bookmark.url()),
                    escape_html(&tags.join(",")),
                    escape_html(entry.bookmark.name())
                ));
            }
            output.push_str("    </DL><p>\n");
        }

        output.push_str("</DL><p>\n");
        Ok(output)
    }
}

/// Escapes text for HTML content and double-quoted attributes.
fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bookmark, BookmarkTrie};

    fn sample() -> BookmarkTrie {
        [
            Bookmark::new("https://www.rust-lang.org", Some("Rust".to_string()), ["rust", "lang"]).unwrap(),
            Bookmark::new("https://go.dev", Some("Go".to_string()), ["lang"]).unwrap(),
            Bookmark::new("https://a.com/?x=1&y=2", Some("<A>".to_string()), Vec::<String>::new()).unwrap(),
            Bookmark::new("https://zig.dev", Some("Zig".to_string()), ["zig"]).unwrap(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_folders_sorted_by_name() {
        let output = NetscapeExporter::new(ExportConfig::default()).export(&sample().get_tuple_list()).unwrap();

        let lang = output.find("<H3>lang</H3>").unwrap();
        let untagged = output.find("<H3>untagged</H3>").unwrap();
        let zig = output.find("<H3>zig</H3>").unwrap();
        assert!(lang < untagged && untagged < zig);
        assert!(output.starts_with(DOCTYPE));
    }

    #[test]
    fn test_links_carry_all_tags() {
        let output = NetscapeExporter::new(ExportConfig::default()).export(&sample().get_tuple_list()).unwrap();
        assert!(output.contains(r#"<DT><A HREF="https://www.rust-lang.org" TAGS="lang,rust">Rust</A>"#));
        assert!(output.contains(r#"<DT><A HREF="https://a.com/?x=1&amp;y=2" TAGS="">&lt;A&gt;</A>"#));
    }

    #[cfg(feature = "netscape")]
    #[test]
    fn test_reimport() {
        use crate::import::{Importer, NetscapeImporter};

        let trie = sample();
        let output = NetscapeExporter::new(ExportConfig::default()).export(&trie.get_tuple_list()).unwrap();
        let records = NetscapeImporter::default().import(&output).unwrap();
        let again: BookmarkTrie = records.into_iter().map(|r| r.into_bookmark().unwrap()).collect();

        for bookmark in trie.bookmarks() {
            assert_eq!(again.get(bookmark.url()), Some(bookmark));
        }
    }
}
