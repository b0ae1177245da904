use super::Exporter;
use crate::Result;
use crate::config::ExportConfig;
use crate::import::text::{FIELD_SEPARATOR, TAG_DELIMITER, escape_tag};
use crate::trie::Entry;

/// Plain text formatter: `name ||| :tag:tag: ||| url`, one bookmark per line.
///
/// Untagged bookmarks are written with the untagged label as their only tag,
/// which the text importer reads back as an empty tag set. Real tags are
/// escaped so that they never read back as the label or split apart.
pub struct TextExporter {
    config: ExportConfig,
}

impl TextExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }
}

impl Exporter for TextExporter {
    fn export(&self, entries: &[Entry<'_>]) -> Result<String> {
        let label = self.config.untagged_label.as_str();
        let delimiter = TAG_DELIMITER.to_string();
        let mut output = String::new();

        for entry in entries {
            let tags = if entry.bookmark.is_untagged() {
                label.to_string()
            } else {
                entry.bookmark.tags().iter().map(|t| escape_tag(t, label)).collect::<Vec<_>>().join(&delimiter)
            };
            output.push_str(&format!(
                "{} {} {}{}{} {} {}\n",
                entry.bookmark.name(),
                FIELD_SEPARATOR,
                TAG_DELIMITER,
                tags,
                TAG_DELIMITER,
                FIELD_SEPARATOR,
                entry.bookmark.url()
            ));
        }

        Ok(output)
    }
}
