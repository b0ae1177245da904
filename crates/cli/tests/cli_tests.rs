//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("bkmkorg")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

/// A subcommand isolated from the user's substitution directory.
fn subcommand(name: &str) -> assert_cmd::Command {
    let mut cmd = cmd();
    cmd.args([name, "--no-standard-substitutions"]);
    cmd
}

#[test]
fn test_cli_export_org_by_default() {
    subcommand("export")
        .arg(get_fixture_path("bookmarks.html"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("* untagged\n- [[https://news.ycombinator.com][Hacker News]]\n"))
        .stdout(predicate::str::contains("* lang\n- [[https://go.dev][Go]]\n** rust\n- [[https://www.rust-lang.org][Rust]]\n"))
        .stdout(predicate::str::contains("* docs\n** rust\n- [[https://doc.rust-lang.org/book][The Book]]\n"));
}

#[test]
fn test_cli_reports_malformed_records() {
    subcommand("export")
        .arg(get_fixture_path("bookmarks.html"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Dropped 1 malformed records"));
}

#[test]
fn test_cli_prints_batch_summary() {
    subcommand("export")
        .arg(get_fixture_path("bookmarks.html"))
        .assert()
        .success()
        .stderr(predicate::str::contains("6 records: 5 inserted, 0 merged, 0 unchanged, 1 malformed (1 untagged)"));
}

#[test]
fn test_cli_export_json() {
    let output = subcommand("export")
        .args(["-f", "json", &get_fixture_path("bookmarks.html")])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["lang"]["rust"]["__bookmarks"][0]["url"], "https://www.rust-lang.org");
    assert_eq!(value["__bookmarks"][0]["name"], "Hacker News");
}

#[test]
fn test_cli_export_json_collapsed() {
    let output = subcommand("export")
        .args(["-f", "json", "--collapse", &get_fixture_path("bookmarks.html")])
        .output()
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["docs/rust"]["__bookmarks"][0]["name"], "The Book");
}

#[test]
fn test_cli_merges_all_inputs() {
    subcommand("export")
        .args([
            "-f",
            "lines",
            &get_fixture_path("bookmarks.html"),
            &get_fixture_path("firefox.json"),
            &get_fixture_path("bookmarks.txt"),
            &get_fixture_path("extra.bookmarks"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://www.rust-lang.org : lang : rust : web\n"))
        .stdout(predicate::str::contains("https://go.dev : google : lang\n"))
        .stdout(predicate::str::contains("https://example.org\n"))
        .stdout(predicate::function(|out: &str| out.lines().count() == 10));
}

#[test]
fn test_cli_output_file_detects_format() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out.html");

    subcommand("export")
        .args(["-o", output_path.to_str().unwrap(), &get_fixture_path("bookmarks.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Output written to"));

    let content = std::fs::read_to_string(&output_path).unwrap();
    assert!(content.starts_with("<!DOCTYPE NETSCAPE-Bookmark-file-1>"));
    assert!(content.contains("<DT><H3>untagged</H3>"));
    assert!(content.contains(r#"TAGS="lang,rust">Rust</A>"#));
}

#[test]
fn test_cli_stdin_input() {
    subcommand("export")
        .args(["-i", "text", "-f", "lines", "-"])
        .write_stdin("A ||| :x: ||| http://a.com\nB ||| :untagged: ||| http://b.com\n")
        .assert()
        .success()
        .stdout("http://a.com : x\nhttp://b.com\n");
}

#[test]
fn test_cli_stdin_requires_format() {
    subcommand("export")
        .arg("-")
        .write_stdin("A ||| :x: ||| http://a.com\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input-format"));
}

#[test]
fn test_cli_query() {
    subcommand("query")
        .args(["-t", "rust", "-f", "lines", &get_fixture_path("bookmarks.html")])
        .assert()
        .success()
        .stdout("https://doc.rust-lang.org/book : docs : rust\nhttps://www.rust-lang.org : lang : rust\n")
        .stderr(predicate::str::contains("docs lang"));
}

#[test]
fn test_cli_query_intersection() {
    subcommand("query")
        .args(["-t", "rust", "-t", "lang", "-f", "lines", &get_fixture_path("bookmarks.html")])
        .assert()
        .success()
        .stdout("https://www.rust-lang.org : lang : rust\n");
}

#[test]
fn test_cli_query_unknown_tag() {
    subcommand("query")
        .args(["-t", "haskell", "-f", "lines", &get_fixture_path("bookmarks.html")])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("None of the queried tags exist: haskell"));
}

#[test]
fn test_cli_tags() {
    subcommand("tags")
        .arg(get_fixture_path("bookmarks.html"))
        .assert()
        .success()
        .stdout("docs : 1\nlang : 2\nreading : 1\nrust : 2\n");
}

#[test]
fn test_cli_params() {
    subcommand("params")
        .arg(get_fixture_path("bookmarks.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("** (1) utm_source"))
        .stdout(predicate::str::contains("** (1) id"));
}

#[test]
fn test_cli_diff() {
    subcommand("diff")
        .args([
            "-f",
            "lines",
            &get_fixture_path("bookmarks.html"),
            &get_fixture_path("firefox.json"),
        ])
        .assert()
        .success()
        .stdout("https://pytorch.org : ml : python\nhttps://tokio.rs : async : rust\n");
}

#[test]
fn test_cli_substitutions_dir() {
    subcommand("export")
        .args([
            "-f",
            "lines",
            "--substitutions",
            &get_fixture_path("subs"),
            &get_fixture_path("firefox.json"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://pytorch.org : machine_learning : python\n"));
}

#[test]
fn test_cli_drop_param() {
    subcommand("export")
        .args(["-f", "lines", "--drop-param", "utm_source", &get_fixture_path("bookmarks.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://example.com/article?id=7 : reading\n"));
}

#[test]
fn test_cli_invalid_file() {
    subcommand("export")
        .arg("/nonexistent/bookmarks.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_cli_invalid_format() {
    subcommand("export")
        .args(["-f", "yaml", &get_fixture_path("bookmarks.html")])
        .assert()
        .failure();
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Organize bookmarks by tag"));
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("bkmkorg"));
}
