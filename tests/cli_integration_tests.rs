//! Runs the tagcheck binary against documents on disk
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn tagcheck(dir: &Path, args: &[&str]) -> Output {
    let bin_path = std::env::var("CARGO_BIN_EXE_tagcheck")
        .unwrap_or_else(|_| "target/debug/tagcheck".to_string());

    Command::new(bin_path)
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run tagcheck")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).expect("write fixture");
}

#[test]
fn test_clean_document_exits_zero() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "Page.tsx",
        "export const Page = () => (\n  <div>\n    <Avatar src={url} />\n    <span>hi</span>\n  </div>\n);\n",
    );

    let output = tagcheck(dir.path(), &["Page.tsx"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_defects_reported_and_exit_nonzero() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "Page.tsx",
        "<section>\n  <div>\n    <span>\n  </div>\n</section>\n<footer>\n",
    );

    let output = tagcheck(dir.path(), &["Page.tsx"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Mismatch: <span> from line 3 closed by </div> at line 4\n\
         Mismatch: <div> from line 2 closed by </section> at line 5\n\
         Unclosed tags:\n\
         <footer> at line 6\n\
         <section> at line 1\n"
    );
}

#[test]
fn test_missing_document_is_fault() {
    let dir = TempDir::new().unwrap();
    write(&dir, "ok.html", "</div>\n");

    let output = tagcheck(dir.path(), &["ok.html", "missing.html"]);
    assert_eq!(output.status.code(), Some(2));
    // no partial diagnostics for the readable file
    assert_eq!(stdout(&output), "");
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.html"));
}

#[test]
fn test_inline_tags() {
    let dir = TempDir::new().unwrap();
    write(&dir, "doc.xml", "<item>\n<entry></item>\n");

    let output = tagcheck(dir.path(), &["--tags", "item,entry", "doc.xml"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Mismatch: <entry> from line 2 closed by </item> at line 2\nUnclosed tags:\n<item> at line 1\n"
    );
}

#[test]
fn test_empty_vocabulary_is_fault() {
    let dir = TempDir::new().unwrap();
    write(&dir, "doc.html", "<div>\n");
    write(
        &dir,
        "empty.toml",
        "[vocabulary]\nname = \"empty\"\ntags = []\n",
    );

    let output = tagcheck(dir.path(), &["--vocabulary-file", "empty.toml", "doc.html"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("has no tags"));
}

#[test]
fn test_project_config_is_picked_up() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".tagcheck.toml", "vocabulary = \"html\"\ntags = [\"Card\"]\n");
    write(&dir, "doc.html", "<article>\n<Card>\n</article>\n");

    let output = tagcheck(dir.path(), &["doc.html"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Mismatch: <Card> from line 2 closed by </article> at line 3\nUnclosed tags:\n<article> at line 1\n"
    );
}

#[test]
fn test_workspace_vocabulary_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".tagcheck/vocabularies")).unwrap();
    write(
        &dir,
        ".tagcheck/vocabularies/widgets.toml",
        "[vocabulary]\nname = \"widgets\"\ntags = [\"Panel\", \"Row\"]\n",
    );
    write(&dir, "doc.tsx", "<Panel>\n<Row>\n</Row>\n</Panel>\n</Row>\n");

    let output = tagcheck(dir.path(), &["--vocabulary", "widgets", "doc.tsx"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Unexpected closing tag </Row> at line 5\n");
}

#[test]
fn test_multiple_documents_prefixed_with_path() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.html", "<div></div>\n");
    write(&dir, "b.html", "<p>\n");

    let output = tagcheck(dir.path(), &["--vocabulary", "html", "a.html", "b.html"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "b.html:\nUnclosed tags:\n<p> at line 1\n");
}

#[test]
fn test_json_format() {
    let dir = TempDir::new().unwrap();
    write(&dir, "doc.html", "</span>\n");

    let output = tagcheck(dir.path(), &["--format", "json", "doc.html"]);
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("valid json");
    assert_eq!(value["diagnostics"][0]["kind"], "unexpected_close");
    assert_eq!(value["diagnostics"][0]["name"], "span");
    assert_eq!(value["diagnostics"][0]["line"], 1);
}

#[test]
fn test_list_vocabularies() {
    let dir = TempDir::new().unwrap();
    let output = tagcheck(dir.path(), &["--list-vocabularies"]);
    assert_eq!(output.status.code(), Some(0));

    let listing = stdout(&output);
    assert!(listing.lines().any(|l| l.starts_with("html\t")));
    assert!(listing.lines().any(|l| l.starts_with("react-html\t")));
}
