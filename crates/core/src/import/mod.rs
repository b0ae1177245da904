//! Importers turning bookmark files into [`RawRecord`]s.
//!
//! Importers do no validation: a record without a URL is still returned and
//! left for the [`Pipeline`](crate::Pipeline) to drop and count.

#[cfg(feature = "netscape")]
pub mod netscape;

pub mod firefox;
pub mod text;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[cfg(feature = "netscape")]
pub use netscape::NetscapeImporter;

pub use firefox::FirefoxImporter;
pub use text::{LinesImporter, TextImporter};

use crate::bookmark::RawRecord;
use crate::config::ImportConfig;
use crate::{BkmkError, Result};

/// A parser for one bookmark file format.
pub trait Importer {
    /// Parses the full contents of a file.
    fn import(&self, input: &str) -> Result<Vec<RawRecord>>;
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// Netscape bookmark HTML, as exported by every browser.
    Netscape,
    /// Firefox JSON backup.
    Firefox,
    /// `name ||| :tag:tag: ||| url` lines.
    Text,
    /// `url : tag : tag` lines.
    Lines,
}

impl ImportFormat {
    /// Detects a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "html" | "htm" => Some(Self::Netscape),
            "json" => Some(Self::Firefox),
            "txt" => Some(Self::Text),
            "bookmarks" => Some(Self::Lines),
            _ => None,
        }
    }

    /// An importer for this format, configured from `config`.
    pub fn importer(&self, config: &ImportConfig) -> Result<Box<dyn Importer>> {
        match self {
            #[cfg(feature = "netscape")]
            Self::Netscape => Ok(Box::new(NetscapeImporter::new(&config.tag_separator))),
            #[cfg(not(feature = "netscape"))]
            Self::Netscape => {
                Err(BkmkError::UnsupportedFormat("netscape import requires the `netscape` feature".to_string()))
            }
            Self::Firefox => Ok(Box::new(FirefoxImporter::new(&config.tag_separator))),
            Self::Text => Ok(Box::new(TextImporter::new(&config.untagged_label))),
            Self::Lines => Ok(Box::new(LinesImporter)),
        }
    }
}

impl FromStr for ImportFormat {
    type Err = BkmkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "netscape" | "html" => Ok(Self::Netscape),
            "firefox" | "json" => Ok(Self::Firefox),
            "text" | "txt" => Ok(Self::Text),
            "lines" | "bookmarks" => Ok(Self::Lines),
            other => Err(BkmkError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Netscape => "netscape",
            Self::Firefox => "firefox",
            Self::Text => "text",
            Self::Lines => "lines",
        };
        write!(f, "{}", name)
    }
}

/// Reads and parses a bookmark file.
///
/// The format is taken from `format` or, failing that, from the file
/// extension.
///
/// # Errors
///
/// Returns [`BkmkError::FileNotFound`] for missing files and
/// [`BkmkError::UnsupportedFormat`] when no format can be determined.
pub fn import_file(path: &Path, format: Option<ImportFormat>, config: &ImportConfig) -> Result<Vec<RawRecord>> {
    if !path.exists() {
        return Err(BkmkError::FileNotFound(path.to_path_buf()));
    }

    let format = format
        .or_else(|| ImportFormat::from_path(path))
        .ok_or_else(|| BkmkError::UnsupportedFormat(path.display().to_string()))?;

    let content = std::fs::read_to_string(path)?;
    format.importer(config)?.import(&content)
}

/// Splits a tag list on `separator`, dropping empty pieces.
pub(crate) fn split_tags(raw: &str, separator: &str) -> Vec<String> {
    raw.split(separator).map(str::trim).filter(|t| !t.is_empty()).map(String::from).collect()
}
