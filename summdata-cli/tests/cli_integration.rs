//! Integration tests for the summdata CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn summdata() -> Command {
    let mut cmd = Command::cargo_bin("summdata").unwrap();
    cmd.env_remove("SUMMDATA_CONFIG");
    cmd
}

#[test]
fn test_build_to_stdout() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "src.txt", "First paragraph.\n\nSecond paragraph.\n");

    summdata()
        .arg("build")
        .arg("-s")
        .arg(&source)
        .arg("--quiet")
        .assert()
        .success()
        .stdout("{\"src\":\"First paragraph.\"}\n{\"src\":\"Second paragraph.\"}\n");
}

#[test]
fn test_build_paired_tokenized_to_file() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "src.txt", "One. Two!\nThree?\n");
    let target = write(&dir, "tgt.txt", "Summary A\nSummary B\n");
    let output = dir.path().join("out.jsonl");

    summdata()
        .args(["build", "-q", "--tokenizer", "whitespace"])
        .args(["--source-transforms", "strip,split-sentences"])
        .arg("-s")
        .arg(&source)
        .arg("-t")
        .arg(&target)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"src":[["One."],["Two!"]],"tgt":[["Summary","A"]]}"#,
            r#"{"src":[["Three?"]],"tgt":[["Summary","B"]]}"#,
        ]
    );
}

#[test]
fn test_build_mismatched_corpora_fails() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "src.txt", "a\nb\nc\n");
    let target = write(&dir, "tgt.txt", "x\ny\n");

    summdata()
        .arg("build")
        .arg("-q")
        .arg("-s")
        .arg(&source)
        .arg("-t")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Processing error: source has 3 lines but target has 2",
        ));
}

#[test]
fn test_build_per_corpus_filtering_exports_aligned_prefix() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "src.txt", "s1\ns2\n");
    let target = write(&dir, "tgt.txt", "t1\n\n");

    summdata()
        .arg("build")
        .arg("-s")
        .arg(&source)
        .arg("-t")
        .arg(&target)
        .assert()
        .success()
        .stdout("{\"src\":\"s1\",\"tgt\":\"t1\"}\n")
        .stderr(predicate::str::contains("aligned prefix"));
}

#[test]
fn test_build_aligned_flag_drops_pairs() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "src.txt", "s1\n\ns3\n");
    let target = write(&dir, "tgt.txt", "t1\nt2\nt3\n");

    summdata()
        .args(["build", "-q", "--aligned"])
        .arg("-s")
        .arg(&source)
        .arg("-t")
        .arg(&target)
        .assert()
        .success()
        .stdout(
            "{\"src\":\"s1\",\"tgt\":\"t1\"}\n{\"src\":\"s3\",\"tgt\":\"t3\"}\n",
        );
}

#[test]
fn test_build_top_n_and_shorten() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "src.txt", "1\n2\n3\n4\n5\n");
    let output = dir.path().join("out.jsonl");

    summdata()
        .args(["build", "-q", "--top-n", "4", "--shorten", "2", "-j", "2"])
        .arg("-s")
        .arg(&source)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, "{\"src\":\"1\"}\n{\"src\":\"2\"}\n");
}

#[test]
fn test_build_with_config_file() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "src.txt", "  HELLO World  \n");
    let config = write(
        &dir,
        "summdata.toml",
        "[pipeline]\nsource_transforms = [\"strip\", \"lowercase\"]\n",
    );

    summdata()
        .arg("build")
        .arg("-q")
        .arg("-s")
        .arg(&source)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("{\"src\":\"hello world\"}\n");
}

#[test]
fn test_build_unknown_transform() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "src.txt", "a\n");

    summdata()
        .args(["build", "-q", "--source-transforms", "reverse"])
        .arg("-s")
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown transform `reverse`"));
}

#[test]
fn test_missing_source_file() {
    summdata()
        .args(["build", "-q", "-s", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found: nonexistent.txt"));
}

#[test]
fn test_stream_keeps_empty_lines() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "src.txt", "a\n\nc\n");

    summdata()
        .arg("stream")
        .arg("-q")
        .arg("-s")
        .arg(&source)
        .assert()
        .success()
        .stdout("{\"src\":\"a\"}\n{\"src\":\"\"}\n{\"src\":\"c\"}\n");
}

#[test]
fn test_stream_stops_at_shorter_corpus() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "src.txt", "s1\ns2\ns3\n");
    let target = write(&dir, "tgt.txt", "t1\n");

    summdata()
        .arg("stream")
        .arg("-s")
        .arg(&source)
        .arg("-t")
        .arg(&target)
        .assert()
        .success()
        .stdout("{\"src\":\"s1\",\"tgt\":\"t1\"}\n")
        .stderr(predicate::str::contains("target ended first"));
}

#[test]
fn test_stream_reports_error_after_shorter_corpus_ends() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("src.txt");
    fs::write(&source, b"s1\n\xff\xfe\n").unwrap();
    let target = write(&dir, "tgt.txt", "t1\n");

    summdata()
        .arg("stream")
        .arg("-q")
        .arg("-s")
        .arg(&source)
        .arg("-t")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to preprocess source line"))
        .stderr(predicate::str::contains("Processing error"));
}

#[test]
fn test_inspect_reports_counts() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "data.jsonl",
        "{\"src\":[[\"a\"]],\"tgt\":[[\"b\"]]}\n{\"src\":[[\"c\"]],\"tgt\":[[\"d\"]]}\n",
    );

    summdata()
        .arg("inspect")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Records:     2"))
        .stdout(predicate::str::contains("With target: 2"))
        .stdout(predicate::str::contains("Tokenized:   2"));
}

#[test]
fn test_inspect_invalid_jsonl() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bad.jsonl", "{\"src\":\"ok\"}\nnot json\n");

    summdata()
        .arg("inspect")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid record at line 2"));
}

#[test]
fn test_list_transforms() {
    summdata()
        .args(["list", "transforms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strip"))
        .stdout(predicate::str::contains("split-sentences"))
        .stdout(predicate::str::contains("dehyphenate"));
}

#[test]
fn test_list_tokenizers() {
    summdata()
        .args(["list", "tokenizers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("whitespace"));
}

#[test]
fn test_generate_config_to_stdout() {
    summdata()
        .arg("generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[pipeline]"))
        .stdout(predicate::str::contains("[performance]"));
}

#[test]
fn test_help_lists_commands() {
    summdata()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("stream"))
        .stdout(predicate::str::contains("inspect"));
}
