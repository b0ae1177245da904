use super::Exporter;
use crate::Result;
use crate::bookmark::Bookmark;
use crate::trie::Entry;

/// `url : tag : tag` lines, sorted by URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinesExporter;

impl Exporter for LinesExporter {
    fn export(&self, entries: &[Entry<'_>]) -> Result<String> {
        let mut bookmarks: Vec<&Bookmark> = entries.iter().map(|e| e.bookmark).collect();
        bookmarks.sort_by(|a, b| a.url().cmp(b.url()));
        bookmarks.dedup_by(|a, b| a.url() == b.url());

        let mut output = String::new();
        for bookmark in bookmarks {
            output.push_str(&bookmark.to_string());
            output.push('\n');
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookmarkTrie;

    #[test]
    fn test_sorted_by_url() {
        let trie: BookmarkTrie = [
            Bookmark::new("http://b.com", None, ["a"]).unwrap(),
            Bookmark::new("http://a.com", None, ["z", "y"]).unwrap(),
            Bookmark::new("http://c.com", None, Vec::<String>::new()).unwrap(),
        ]
        .into_iter()
        .collect();

        let output = LinesExporter.export(&trie.get_tuple_list()).unwrap();
        assert_eq!(output, "http://a.com : y : z\nhttp://b.com : a\nhttp://c.com\n");
    }
}
