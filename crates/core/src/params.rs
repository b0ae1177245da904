//! Query parameter census.
//!
//! Tracking parameters (`utm_*`, `ref`, session ids) make otherwise identical
//! links look distinct. [`QueryParamIndex`] records which parameter names
//! occur across a collection so they can be reviewed and added to
//! [`NormalizeConfig::drop_query_params`](crate::normalize::NormalizeConfig).

use std::collections::BTreeMap;

use url::Url;

/// What is known about one query parameter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamUsage {
    /// Number of recorded URLs carrying the parameter.
    pub count: usize,
    /// First URL seen with the parameter.
    pub example: String,
    /// `example` with only this parameter removed.
    pub filtered: String,
}

/// Index of query parameter names seen across inserted URLs.
#[derive(Debug, Clone, Default)]
pub struct QueryParamIndex {
    params: BTreeMap<String, ParamUsage>,
}

impl QueryParamIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the query parameters of `url`. Unparseable URLs are ignored.
    pub fn record(&mut self, url: &str) {
        let Ok(parsed) = Url::parse(url) else {
            return;
        };

        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        let mut seen = Vec::with_capacity(pairs.len());

        for (key, _) in &pairs {
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);

            self.params
                .entry(key.clone())
                .and_modify(|usage| usage.count += 1)
                .or_insert_with(|| ParamUsage {
                    count: 1,
                    example: url.to_string(),
                    filtered: without_param(&parsed, &pairs, key),
                });
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamUsage> {
        self.params.get(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter names with their usage, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamUsage)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Renders the index as org-mode, one second-level headline per parameter
    /// with links to the original and the filtered URL.
    pub fn org_report(&self) -> String {
        self.params
            .iter()
            .map(|(key, usage)| {
                format!(
                    "** ({}) {}\n  [[{}][original]]\n  [[{}][filtered]]",
                    usage.count, key, usage.example, usage.filtered
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn without_param(url: &Url, pairs: &[(String, String)], key: &str) -> String {
    let mut filtered = url.clone();
    let kept: Vec<&(String, String)> = pairs.iter().filter(|(k, _)| k != key).collect();

    if kept.is_empty() {
        filtered.set_query(None);
    } else {
        filtered.query_pairs_mut().clear().extend_pairs(kept);
    }

    filtered.into()
}
