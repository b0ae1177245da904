//! Error types for bkmkorg operations.
//!
//! This module defines the main error type [`BkmkError`] which represents
//! everything that can go wrong while importing, indexing, querying and
//! exporting bookmarks.
//!
//! Not every variant is fatal. A [`BkmkError::MalformedRecord`] is produced
//! for a single record and the batch keeps going; a
//! [`BkmkError::EmptyQueryResult`] is a reportable outcome of a tag query.
//!
//! # Example
//!
//! ```rust
//! use bkmkorg_core::{BkmkError, Bookmark};
//!
//! match Bookmark::new("", None, Vec::<String>::new()) {
//!     Err(BkmkError::MalformedRecord(reason)) => println!("dropped: {}", reason),
//!     Err(e) => println!("Error: {}", e),
//!     Ok(bookmark) => println!("{}", bookmark),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bookmark processing.
#[derive(Error, Debug)]
pub enum BkmkError {
    /// A record could not be turned into a bookmark.
    ///
    /// Usually a missing or blank URL. The pipeline drops the record,
    /// logs a warning and counts it in the batch report.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// None of the queried tags exist in the trie.
    ///
    /// A query whose tags exist but never co-occur is *not* this error;
    /// it returns an empty result instead.
    #[error("No bookmarks carry any of the queried tags: {}", .tags.join(", "))]
    EmptyQueryResult { tags: Vec<String> },

    /// JSON parsing or serialization errors.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read and write errors.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Input format could not be determined or is not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A tag or substitution file line could not be parsed.
    #[error("Tag file error at line {line}: {message}")]
    TagFileError { line: usize, message: String },

    /// Two substitution files map the same tag differently.
    #[error("Substitution conflict for tag '{0}'")]
    SubstitutionConflict(String),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for BkmkError.
///
/// This is a convenience alias for `std::result::Result<T, BkmkError>`.
pub type Result<T> = std::result::Result<T, BkmkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BkmkError::MalformedRecord("missing url".to_string());
        assert!(err.to_string().contains("Malformed record"));
        assert!(err.to_string().contains("missing url"));
    }

    #[test]
    fn test_empty_query_error_lists_tags() {
        let err = BkmkError::EmptyQueryResult { tags: vec!["rust".to_string(), "zig".to_string()] };
        assert!(err.to_string().contains("rust, zig"));
    }

    #[test]
    fn test_tag_file_error() {
        let err = BkmkError::TagFileError { line: 7, message: "bad count".to_string() };
        assert!(err.to_string().contains('7'));
        assert!(err.to_string().contains("bad count"));
    }
}
