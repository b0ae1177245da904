//! Output formats for traversal entries.
//!
//! Every exporter consumes the `(tag path, bookmark)` pairs produced by
//! [`BookmarkTrie::entries`](crate::BookmarkTrie::entries), so the output
//! order is the trie's depth-first, tag-sorted order.

pub mod json;
pub mod lines;
pub mod netscape;
pub mod org;
pub mod text;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

pub use json::JsonExporter;
pub use lines::LinesExporter;
pub use netscape::NetscapeExporter;
pub use org::OrgExporter;
pub use text::TextExporter;

use crate::config::ExportConfig;
use crate::trie::Entry;
use crate::{BkmkError, Result};

/// A renderer for one output format.
pub trait Exporter {
    /// Renders entries to a string.
    fn export(&self, entries: &[Entry<'_>]) -> Result<String>;

    /// Renders entries into a writer.
    fn write_to(&self, entries: &[Entry<'_>], writer: &mut dyn Write) -> Result<()> {
        writer.write_all(self.export(entries)?.as_bytes())?;
        Ok(())
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Netscape,
    Org,
    Text,
    Json,
    Lines,
}

impl ExportFormat {
    pub fn exporter(&self, config: &ExportConfig) -> Box<dyn Exporter> {
        match self {
            Self::Netscape => Box::new(NetscapeExporter::new(config.clone())),
            Self::Org => Box::new(OrgExporter::new(config.clone())),
            Self::Text => Box::new(TextExporter::new(config.clone())),
            Self::Json => Box::new(JsonExporter::new(config.clone())),
            Self::Lines => Box::new(LinesExporter),
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Netscape => "html",
            Self::Org => "org",
            Self::Text => "txt",
            Self::Json => "json",
            Self::Lines => "bookmarks",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = BkmkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "netscape" | "html" => Ok(Self::Netscape),
            "org" => Ok(Self::Org),
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "lines" | "bookmarks" => Ok(Self::Lines),
            other => Err(BkmkError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Netscape => "netscape",
            Self::Org => "org",
            Self::Text => "text",
            Self::Json => "json",
            Self::Lines => "lines",
        };
        write!(f, "{}", name)
    }
}
