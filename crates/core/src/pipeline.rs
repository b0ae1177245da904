//! Batch ingestion of raw records into a trie.
//!
//! A [`Pipeline`] owns the trie during the insert phase. Records from any
//! number of importers are fed through [`Pipeline::ingest`]; each one is URL
//! normalized, has its tags substituted and is inserted. A record that cannot
//! become a bookmark is logged and counted, never fatal.
//!
//! [`Pipeline::finish`] ends the insert phase and hands back the trie, which
//! from then on is only read.
//!
//! # Example
//!
//! ```rust
//! use bkmkorg_core::{ImportConfig, Pipeline, RawRecord};
//!
//! let mut pipeline = Pipeline::new(ImportConfig::default());
//! pipeline.ingest([
//!     RawRecord::new(Some("A".into()), Some("http://x.com/".into()), vec!["work".into()]),
//!     RawRecord::new(Some("B".into()), Some("http://x.com".into()), vec!["proj".into()]),
//!     RawRecord::new(Some("Lost".into()), None, vec![]),
//! ]);
//!
//! let (trie, report) = pipeline.finish();
//! assert_eq!(trie.len(), 1);
//! assert_eq!(report.merged, 1);
//! assert_eq!(report.malformed, 1);
//! ```

use std::fmt;
use std::path::Path;

use crate::Result;
use crate::bookmark::{Bookmark, RawRecord};
use crate::config::ImportConfig;
use crate::import::{self, ImportFormat};
use crate::normalize::UrlNormalizer;
use crate::trie::{BookmarkTrie, InsertOutcome};

/// Counts of what happened to each record of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Records seen.
    pub records: usize,
    /// Records with a new URL.
    pub inserted: usize,
    /// Records that added tags to an existing URL.
    pub merged: usize,
    /// Records already fully covered by an existing URL.
    pub unchanged: usize,
    /// Records dropped for lack of a usable URL.
    pub malformed: usize,
    /// Valid records without tags.
    pub untagged: usize,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records: {} inserted, {} merged, {} unchanged, {} malformed ({} untagged)",
            self.records, self.inserted, self.merged, self.unchanged, self.malformed, self.untagged
        )
    }
}

/// Insert-phase owner of a [`BookmarkTrie`].
#[derive(Debug)]
pub struct Pipeline {
    config: ImportConfig,
    normalizer: UrlNormalizer,
    trie: BookmarkTrie,
    report: BatchReport,
}

impl Pipeline {
    pub fn new(config: ImportConfig) -> Self {
        let normalizer = UrlNormalizer::new(config.normalize.clone());
        Self { config, normalizer, trie: BookmarkTrie::new(), report: BatchReport::default() }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Running totals for everything ingested so far.
    pub fn report(&self) -> &BatchReport {
        &self.report
    }

    /// Ingests a batch of records.
    pub fn ingest<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = RawRecord>,
    {
        for record in records {
            if let Err(e) = self.ingest_one(record) {
                tracing::warn!("Dropping record: {}", e);
            }
        }
    }

    /// Ingests a single record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BkmkError::MalformedRecord`] if the record has no
    /// usable URL. The record is counted as malformed either way.
    pub fn ingest_one(&mut self, record: RawRecord) -> Result<InsertOutcome> {
        self.report.records += 1;

        let bookmark = match self.prepare(record) {
            Ok(bookmark) => bookmark,
            Err(e) => {
                self.report.malformed += 1;
                return Err(e);
            }
        };

        if bookmark.is_untagged() {
            tracing::warn!(url = bookmark.url(), "Bookmark has no tags");
            self.report.untagged += 1;
        }

        let outcome = self.trie.insert(bookmark);
        match outcome {
            InsertOutcome::Inserted => self.report.inserted += 1,
            InsertOutcome::Merged => self.report.merged += 1,
            InsertOutcome::Unchanged => self.report.unchanged += 1,
        }

        Ok(outcome)
    }

    /// Reads, parses and ingests a file, detecting its format from the
    /// extension unless `format` is given.
    pub fn ingest_file(&mut self, path: &Path, format: Option<ImportFormat>) -> Result<()> {
        let records = import::import_file(path, format, &self.config)?;
        tracing::debug!(path = %path.display(), records = records.len(), "Parsed bookmark file");
        self.ingest(records);
        Ok(())
    }

    fn prepare(&self, mut record: RawRecord) -> Result<Bookmark> {
        record.url = record.url.map(|url| self.normalizer.normalize(&url));
        let mut bookmark = record.into_bookmark()?;

        if let Some(subs) = &self.config.substitutions {
            bookmark.map_tags(|tag| subs.substitute(tag));
        }

        Ok(bookmark)
    }

    /// Ends the insert phase.
    pub fn finish(self) -> (BookmarkTrie, BatchReport) {
        tracing::info!("{}", self.report);
        (self.trie, self.report)
    }
}
