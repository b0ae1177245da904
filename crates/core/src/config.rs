//! Pipeline stage configuration.
//!
//! Each stage gets its own explicit configuration: [`ImportConfig`] for
//! turning raw records into bookmarks and [`ExportConfig`] for rendering.
//!
//! # Example
//!
//! ```rust
//! use bkmkorg_core::{ExportConfig, ImportConfig};
//!
//! let import = ImportConfig::builder()
//!     .drop_query_params(["utm_source", "utm_medium"])
//!     .tag_separator(";")
//!     .build();
//!
//! let export = ExportConfig::builder().untagged_label("inbox").pretty(true).build();
//! assert_eq!(export.untagged_label, "inbox");
//! ```

use crate::group::GroupConfig;
use crate::normalize::NormalizeConfig;
use crate::tagfile::SubstitutionFile;

/// Default sentinel for bookmarks without tags.
pub const UNTAGGED: &str = "untagged";

/// Configuration for the import stage.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// URL normalization applied before deduplication.
    pub normalize: NormalizeConfig,

    /// Separator of the Netscape `TAGS` attribute and Firefox `tags` field (default: ",").
    pub tag_separator: String,

    /// Tag substitutions applied to every record (default: none).
    pub substitutions: Option<SubstitutionFile>,

    /// Tag that plain-text input uses for "no tags" (default: "untagged").
    pub untagged_label: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeConfig::default(),
            tag_separator: ",".to_string(),
            substitutions: None,
            untagged_label: UNTAGGED.to_string(),
        }
    }
}

impl ImportConfig {
    pub fn builder() -> ImportConfigBuilder {
        ImportConfigBuilder::new()
    }
}

/// Builder for [`ImportConfig`].
pub struct ImportConfigBuilder {
    config: ImportConfig,
}

impl ImportConfigBuilder {
    pub fn new() -> Self {
        Self { config: ImportConfig::default() }
    }

    /// Replaces the whole normalization policy.
    pub fn normalize(mut self, value: NormalizeConfig) -> Self {
        self.config.normalize = value;
        self
    }

    /// Sets whether a trailing slash is stripped before deduplication.
    pub fn strip_trailing_slash(mut self, value: bool) -> Self {
        self.config.normalize.strip_trailing_slash = value;
        self
    }

    /// Adds query parameters to remove before deduplication.
    pub fn drop_query_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.normalize.drop_query_params.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets the tag separator.
    pub fn tag_separator(mut self, value: impl Into<String>) -> Self {
        self.config.tag_separator = value.into();
        self
    }

    /// Sets the tag substitutions.
    pub fn substitutions(mut self, value: SubstitutionFile) -> Self {
        self.config.substitutions = Some(value);
        self
    }

    /// Sets the untagged sentinel recognized in plain-text input.
    pub fn untagged_label(mut self, value: impl Into<String>) -> Self {
        self.config.untagged_label = value.into();
        self
    }

    pub fn build(self) -> ImportConfig {
        self.config
    }
}

impl Default for ImportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the export stage.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Group name for bookmarks without tags (default: "untagged").
    pub untagged_label: String,

    /// Document title of Netscape HTML output (default: "Bookmarks").
    pub title: String,

    /// Pretty-print JSON output (default: false).
    pub pretty: bool,

    /// Grouping policy of JSON output.
    pub group: GroupConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            untagged_label: UNTAGGED.to_string(),
            title: "Bookmarks".to_string(),
            pretty: false,
            group: GroupConfig::default(),
        }
    }
}

impl ExportConfig {
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::new()
    }
}

/// Builder for [`ExportConfig`].
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn new() -> Self {
        Self { config: ExportConfig::default() }
    }

    /// Sets the untagged group name.
    pub fn untagged_label(mut self, value: impl Into<String>) -> Self {
        self.config.untagged_label = value.into();
        self
    }

    /// Sets the Netscape document title.
    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.config.title = value.into();
        self
    }

    /// Sets whether JSON output is pretty-printed.
    pub fn pretty(mut self, value: bool) -> Self {
        self.config.pretty = value;
        self
    }

    /// Sets whether single-child chains are collapsed in grouped output.
    pub fn collapse_chains(mut self, value: bool) -> Self {
        self.config.group.collapse_chains = value;
        self
    }

    pub fn build(self) -> ExportConfig {
        self.config
    }
}

impl Default for ExportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
