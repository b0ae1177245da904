//! URL normalization applied before deduplication.
//!
//! Two bookmarks are duplicates when their normalized URLs are equal. What
//! "normalized" means is a policy, not a fixed rule: [`NormalizeConfig`]
//! controls trailing-slash stripping, query parameter removal and fragment
//! removal.
//!
//! # Example
//!
//! ```rust
//! use bkmkorg_core::normalize::{NormalizeConfig, UrlNormalizer};
//!
//! let config = NormalizeConfig::builder().drop_query_param("utm_source").build();
//! let normalizer = UrlNormalizer::new(config);
//!
//! assert_eq!(normalizer.normalize("https://example.com/post/?utm_source=feed"), "https://example.com/post");
//! assert_eq!(normalizer.normalize("https://example.com/a?id=3&utm_source=x"), "https://example.com/a?id=3");
//! ```

use std::collections::BTreeSet;

use url::Url;

/// URL normalization policy.
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Remove one trailing `/` when the URL has no query or fragment (default: true).
    pub strip_trailing_slash: bool,

    /// Query parameter names to remove (default: none).
    pub drop_query_params: BTreeSet<String>,

    /// Remove the `#fragment` part (default: false).
    pub drop_fragment: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self { strip_trailing_slash: true, drop_query_params: BTreeSet::new(), drop_fragment: false }
    }
}

impl NormalizeConfig {
    pub fn builder() -> NormalizeConfigBuilder {
        NormalizeConfigBuilder::new()
    }
}

/// Builder for [`NormalizeConfig`].
pub struct NormalizeConfigBuilder {
    config: NormalizeConfig,
}

impl NormalizeConfigBuilder {
    pub fn new() -> Self {
        Self { config: NormalizeConfig::default() }
    }

    /// Sets whether a trailing slash is stripped.
    pub fn strip_trailing_slash(mut self, value: bool) -> Self {
        self.config.strip_trailing_slash = value;
        self
    }

    /// Adds a query parameter to remove.
    pub fn drop_query_param(mut self, name: impl Into<String>) -> Self {
        self.config.drop_query_params.insert(name.into());
        self
    }

    /// Adds several query parameters to remove.
    pub fn drop_query_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.drop_query_params.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets whether fragments are removed.
    pub fn drop_fragment(mut self, value: bool) -> Self {
        self.config.drop_fragment = value;
        self
    }

    pub fn build(self) -> NormalizeConfig {
        self.config
    }
}

impl Default for NormalizeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies a [`NormalizeConfig`] to URLs.
#[derive(Debug, Clone, Default)]
pub struct UrlNormalizer {
    config: NormalizeConfig,
}

impl UrlNormalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Normalizes a URL.
    ///
    /// Input the `url` crate cannot parse (relative paths, bare words) is
    /// trimmed and slash-stripped but otherwise left alone.
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();

        let Ok(mut url) = Url::parse(trimmed) else {
            return self.strip_slash(trimmed).to_string();
        };

        if !self.config.drop_query_params.is_empty() && url.query().is_some() {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| !self.config.drop_query_params.contains(key.as_ref()))
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();

            if kept.is_empty() {
                url.set_query(None);
            } else {
                url.query_pairs_mut().clear().extend_pairs(kept);
            }
        }

        if self.config.drop_fragment {
            url.set_fragment(None);
        }

        let has_suffix = url.query().is_some() || url.fragment().is_some();
        let serialized = String::from(url);

        if has_suffix { serialized } else { self.strip_slash(&serialized).to_string() }
    }

    fn strip_slash<'a>(&self, url: &'a str) -> &'a str {
        if self.config.strip_trailing_slash { url.strip_suffix('/').unwrap_or(url) } else { url }
    }
}
