pub mod bookmark;
pub mod config;
pub mod error;
pub mod formatters;
pub mod group;
pub mod import;
pub mod loader;
pub mod normalize;
pub mod params;
pub mod pipeline;
pub mod tagfile;
pub mod trie;

pub use bookmark::{Bookmark, RawRecord, normalize_tag};
pub use config::{ExportConfig, ExportConfigBuilder, ImportConfig, ImportConfigBuilder};
pub use error::{BkmkError, Result};
pub use formatters::{ExportFormat, Exporter, JsonExporter, LinesExporter, NetscapeExporter, OrgExporter, TextExporter};
pub use group::{Group, GroupConfig};
#[cfg(feature = "netscape")]
pub use import::NetscapeImporter;
pub use import::{FirefoxImporter, ImportFormat, Importer, LinesImporter, TextImporter, import_file};
pub use loader::SubstitutionLoader;
pub use normalize::{NormalizeConfig, NormalizeConfigBuilder, UrlNormalizer};
pub use params::{ParamUsage, QueryParamIndex};
pub use pipeline::{BatchReport, Pipeline};
pub use tagfile::{SubstitutionFile, TagCounts};
pub use trie::{BookmarkId, BookmarkTrie, Entries, Entry, InsertOutcome, QueryResult, TagPath, TrieNode};
