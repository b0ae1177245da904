//! Netscape bookmark HTML import.
//!
//! Every `<a>` element is a bookmark: `HREF` is the URL, the `TAGS`
//! attribute holds separator-joined tags and the element text is the name.
//! Folder structure (`<H3>`) is ignored; tags are the only grouping kept.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{Importer, split_tags};
use crate::Result;
use crate::bookmark::RawRecord;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Importer for Netscape bookmark files.
#[derive(Debug, Clone)]
pub struct NetscapeImporter {
    separator: String,
}

impl NetscapeImporter {
    pub fn new(separator: &str) -> Self {
        Self { separator: separator.to_string() }
    }
}

impl Default for NetscapeImporter {
    fn default() -> Self {
        Self::new(",")
    }
}

impl Importer for NetscapeImporter {
    fn import(&self, input: &str) -> Result<Vec<RawRecord>> {
        let document = Html::parse_document(input);

        let records = document
            .select(&ANCHOR)
            .map(|anchor| {
                let element = anchor.value();
                let name = anchor.text().collect::<String>();
                let url = element.attr("href").map(String::from);
                let tags = element.attr("tags").map(|raw| split_tags(raw, &self.separator)).unwrap_or_default();
                RawRecord::new(Some(name), url, tags)
            })
            .collect();

        Ok(records)
    }
}
