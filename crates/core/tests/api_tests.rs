//! Library API integration tests
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use bkmkorg_core::*;

fn get_fixture_path(name: &str) -> PathBuf {
    PathBuf::from(format!("../../tests/fixtures/{}", name))
}

fn load(names: &[&str]) -> (BookmarkTrie, BatchReport) {
    let mut pipeline = Pipeline::new(ImportConfig::default());
    for name in names {
        pipeline.ingest_file(&get_fixture_path(name), None).expect("should import");
    }
    pipeline.finish()
}

fn all_fixtures() -> (BookmarkTrie, BatchReport) {
    load(&["bookmarks.html", "firefox.json", "bookmarks.txt", "extra.bookmarks"])
}

#[test]
fn test_import_fixtures_report() {
    let (trie, report) = all_fixtures();

    assert_eq!(report.records, 13);
    assert_eq!(report.malformed, 1);
    assert_eq!(report.merged, 2);
    assert_eq!(report.inserted, 10);
    assert_eq!(trie.len(), 10);
}

#[test]
fn test_every_valid_record_is_reachable() {
    let config = ImportConfig::default();
    let normalizer = UrlNormalizer::new(config.normalize.clone());
    let (trie, _) = all_fixtures();

    let mut expected: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for name in ["bookmarks.html", "firefox.json", "bookmarks.txt", "extra.bookmarks"] {
        for record in import_file(&get_fixture_path(name), None, &config).unwrap() {
            if let Ok(bookmark) = record.into_bookmark() {
                expected
                    .entry(normalizer.normalize(bookmark.url()))
                    .or_default()
                    .extend(bookmark.tags().iter().cloned());
            }
        }
    }

    let entries = trie.get_tuple_list();
    assert_eq!(entries.len(), expected.len());
    for entry in &entries {
        let tags = &expected[entry.bookmark.url()];
        assert_eq!(entry.bookmark.tags(), tags);
        assert_eq!(entry.path, TagPath::from_tags(tags));
    }
}

#[test]
fn test_text_export_round_trip() {
    let (trie, _) = all_fixtures();
    let text = TextExporter::new(ExportConfig::default()).export(&trie.get_tuple_list()).unwrap();

    let mut pipeline = Pipeline::new(ImportConfig::default());
    pipeline.ingest(TextImporter::default().import(&text).unwrap());
    let (again, report) = pipeline.finish();

    assert_eq!(report.malformed, 0);
    assert_eq!(again.len(), trie.len());
    for bookmark in trie.bookmarks() {
        assert_eq!(again.get(bookmark.url()), Some(bookmark));
    }
}

#[test]
fn test_shuffled_input_exports_identically() {
    let config = ImportConfig::default();
    let mut records = Vec::new();
    for name in ["bookmarks.html", "firefox.json", "bookmarks.txt", "extra.bookmarks"] {
        records.extend(import_file(&get_fixture_path(name), None, &config).unwrap());
    }

    // Names are first-seen-wins, so only paths, URLs and tags are compared.
    let export = |records: Vec<RawRecord>| {
        let mut pipeline = Pipeline::new(ImportConfig::default());
        pipeline.ingest(records);
        let (trie, _) = pipeline.finish();
        let entries = trie.get_tuple_list();
        let paths: Vec<(String, String)> =
            entries.iter().map(|e| (e.path.to_string(), e.bookmark.url().to_string())).collect();
        let lines = LinesExporter.export(&entries).unwrap();
        (paths, lines)
    };

    let forward = export(records.clone());
    let mut reversed = records.clone();
    reversed.reverse();
    let mut rotated = records;
    rotated.rotate_left(5);

    assert_eq!(forward, export(reversed));
    assert_eq!(forward, export(rotated));
}

#[test]
fn test_untagged_live_at_root() {
    let (trie, report) = all_fixtures();
    assert_eq!(report.untagged, 2);

    let root: Vec<&str> =
        trie.root().bookmark_ids().iter().filter_map(|id| trie.bookmark(*id)).map(Bookmark::url).collect();
    assert_eq!(root, ["https://example.org", "https://news.ycombinator.com"]);

    let org = OrgExporter::new(ExportConfig::default()).export(&trie.get_tuple_list()).unwrap();
    assert!(org.starts_with("* untagged\n- [[https://example.org][Example]]\n"));
}

#[test]
fn test_query_frontier_and_isolation() {
    let (trie, _) = all_fixtures();
    let query: BTreeSet<String> = ["rust".to_string()].into();

    let result = trie.filter_queries(&query).unwrap();
    let urls: BTreeSet<&str> = result.trie.bookmarks().map(Bookmark::url).collect();
    assert_eq!(
        urls,
        BTreeSet::from(["https://crates.io", "https://doc.rust-lang.org/book", "https://tokio.rs", "https://www.rust-lang.org"])
    );
    assert_eq!(result.frontier, BTreeSet::from(["async", "docs", "lang", "web"].map(String::from)));
    assert_eq!(trie.len(), 10);
}

#[test]
fn test_substitutions_from_loader() {
    let subs = SubstitutionLoader::with_dirs(Some(get_fixture_path("subs")), None).load().unwrap();
    let config = ImportConfig::builder().substitutions(subs).build();

    let mut pipeline = Pipeline::new(config);
    pipeline.ingest_file(&get_fixture_path("firefox.json"), None).unwrap();
    let (trie, _) = pipeline.finish();

    assert!(trie.contains_tag("machine_learning"));
    assert!(!trie.contains_tag("ml"));
}

#[test]
fn test_group_matches_json_export() {
    let (trie, _) = all_fixtures();
    let config = ExportConfig::default();

    let from_group = serde_json::to_value(trie.group(&config.group)).unwrap();
    let exported = JsonExporter::new(config).export(&trie.get_tuple_list()).unwrap();
    let from_export: serde_json::Value = serde_json::from_str(&exported).unwrap();

    assert_eq!(from_group, from_export);
    assert_eq!(trie.group(&GroupConfig::default()).len(), trie.len());
}

#[test]
fn test_tag_counts_file_round_trip() {
    let (trie, _) = all_fixtures();
    let counts = trie.tag_counts();
    assert_eq!(counts.get("rust"), 4);
    assert_eq!(counts.get("lang"), 3);

    let parsed = TagCounts::parse_str(&counts.to_string());
    assert_eq!(parsed, counts);
}
