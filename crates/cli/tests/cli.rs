// ABOUTME: Integration tests for the tidymail CLI binary.
// ABOUTME: Tests file and stdin input, mode flags, options files, JSON output, and failure exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn tidymail_cmd() -> Command {
    Command::cargo_bin("tidymail").unwrap()
}

const EMAIL: &str = r#"<div class="wrap" style="padding:0">
<p id="intro">Hello <b>World</b></p>
<!-- footer -->
<span></span>
<img src="https://t.example.com/open.gif" class="tracking-pixel">
</div>"#;

#[test]
fn cleans_html_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("email.html");
    fs::write(&html_path, EMAIL).unwrap();

    tidymail_cmd()
        .arg(&html_path)
        .assert()
        .success()
        .stdout(predicate::eq("<div>\n<p>Hello <b>World</b>\n</p>\n</div>\n"));
}

#[test]
fn cleans_html_from_stdin() {
    tidymail_cmd()
        .write_stdin(r#"<p class="x">a</p><p>b</p>"#)
        .assert()
        .success()
        .stdout(predicate::eq("<p>a</p>\n<p>b</p>\n"));
}

#[test]
fn text_flag_extracts_text() {
    tidymail_cmd()
        .arg("--text")
        .arg("-")
        .write_stdin(EMAIL)
        .assert()
        .success()
        .stdout(predicate::eq("Hello World\n"));
}

#[test]
fn keep_flags_disable_removal() {
    tidymail_cmd()
        .arg("--keep-comments")
        .arg("--preserve-structure")
        .write_stdin(EMAIL)
        .assert()
        .success()
        .stdout(predicate::str::contains("<!-- footer -->"))
        .stdout(predicate::str::contains(r#"<p id="intro">"#))
        .stdout(predicate::str::contains("class").not());
}

#[test]
fn options_file_is_applied() {
    let temp_dir = TempDir::new().unwrap();
    let opts_path = temp_dir.path().join("opts.json");
    fs::write(&opts_path, r#"{"removeEmptyElements": false}"#).unwrap();

    tidymail_cmd()
        .arg("--options")
        .arg(&opts_path)
        .write_stdin("<span></span><p>x</p>")
        .assert()
        .success()
        .stdout(predicate::str::contains("<span>\n</span>"));
}

#[test]
fn invalid_options_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let opts_path = temp_dir.path().join("opts.json");
    fs::write(&opts_path, "{nope").unwrap();

    tidymail_cmd()
        .arg("--options")
        .arg(&opts_path)
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid options"));
}

#[test]
fn json_output_for_multiple_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let good = temp_dir.path().join("good.html");
    fs::write(&good, "<p style=\"x\">ok</p>").unwrap();
    let missing = temp_dir.path().join("missing.html");

    let output = tidymail_cmd()
        .arg("--json")
        .arg(&good)
        .arg(&missing)
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["ok"], true);
    assert_eq!(items[0]["output"], "<p>ok</p>");
    assert_eq!(items[1]["ok"], false);
    assert!(items[1]["error"].as_str().unwrap().contains("missing.html"));
}

#[test]
fn writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("out.html");

    tidymail_cmd()
        .arg("-o")
        .arg(&out_path)
        .write_stdin("<p class=\"x\">a</p>")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&out_path).unwrap(), "<p>a</p>");
}
