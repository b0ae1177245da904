use super::Exporter;
use crate::Result;
use crate::config::ExportConfig;
use crate::group::Group;
use crate::trie::Entry;

/// JSON formatter: the nested tag grouping of the entries.
///
/// ```json
/// {"__bookmarks": [...], "lang": {"rust": {"__bookmarks": [...]}}}
/// ```
pub struct JsonExporter {
    config: ExportConfig,
}

impl JsonExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, entries: &[Entry<'_>]) -> Result<String> {
        let group = Group::from_entries(entries, &self.config.group);

        if self.config.pretty { Ok(serde_json::to_string_pretty(&group)?) } else { Ok(serde_json::to_string(&group)?) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::BOOKMARKS_KEY;
    use crate::{Bookmark, BookmarkTrie};

    fn sample() -> BookmarkTrie {
        [
            Bookmark::new("http://a.com", Some("A".to_string()), ["lang", "rust"]).unwrap(),
            Bookmark::new("http://b.com", Some("B".to_string()), ["lang"]).unwrap(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_export_grouped() {
        let trie = sample();
        let output = JsonExporter::new(ExportConfig::default()).export(&trie.get_tuple_list()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["lang"][BOOKMARKS_KEY][0]["name"], "B");
        assert_eq!(value["lang"]["rust"][BOOKMARKS_KEY][0]["tags"], serde_json::json!(["lang", "rust"]));
        assert!(value.get(BOOKMARKS_KEY).is_none());
    }

    #[test]
    fn test_export_pretty() {
        let trie = sample();
        let config = ExportConfig::builder().pretty(true).build();
        let output = JsonExporter::new(config).export(&trie.get_tuple_list()).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_export_empty() {
        let output = JsonExporter::new(ExportConfig::default()).export(&[]).unwrap();
        assert_eq!(output, r#"{"__bookmarks":[]}"#);
    }
}
