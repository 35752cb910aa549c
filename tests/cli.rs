//! Tests for the `grayscrub` binary.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const CLEAN: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" data-color-mode="cmyk" data-raster-color-model="grayscale" data-raster-resolution="350">
  <g id="art"><path d="M10 10 L50 10 L50 50 Z" fill="#333"/></g>
</svg>"##;

const OPEN: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" data-color-mode="cmyk" data-raster-color-model="grayscale" data-raster-resolution="350">
  <g id="art"><path d="M10 10 L50 10 L50 50" fill="#333" stroke="#000"/></g>
</svg>"##;

fn grayscrub() -> Command {
    Command::new(env!("CARGO_BIN_EXE_grayscrub"))
}

fn write_input(dir: &TempDir, svg: &str) -> std::path::PathBuf {
    let path = dir.path().join("input.svg");
    fs::write(&path, svg).unwrap();
    path
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_clean_document_exits_zero() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, CLEAN);

    let output = grayscrub().arg(&input).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("No problems left"));
}

#[test]
fn test_report_mode_fails_on_findings() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, OPEN);

    let output = grayscrub().arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Found 1 filled open paths"));
    assert_eq!(fs::read_to_string(&input).unwrap(), OPEN);
}

#[test]
fn test_fix_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, OPEN);
    let fixed = dir.path().join("fixed.svg");

    let output = grayscrub()
        .arg(&input)
        .args(["--fix", "--yes", "--compact", "-o"])
        .arg(&fixed)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("1 paths split into fill and stroke"));

    let svg = fs::read_to_string(&fixed).unwrap();
    assert!(svg.contains(r#"d="M10 10 L50 10 L50 50 Z""#));
    assert!(svg.contains(r#"d="M10 10 L50 10 L50 50""#));
}

#[test]
fn test_fix_from_stdin_to_stdout() {
    let mut child = grayscrub()
        .args(["--fix", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(OPEN.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let svg = String::from_utf8(output.stdout).unwrap();
    assert!(svg.contains(r#"fill="none""#));
    assert!(svg.contains(" Z\""));
}

#[test]
fn test_declined_fix_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        &CLEAN.replace(r#"<g id="art">"#, r#"<g id="art"><path d="M1 1"/>"#),
    );

    let output = grayscrub()
        .arg(&input)
        .args(["--fix", "--no"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unresolved stray point"));
}

#[test]
fn test_yes_and_no_conflict() {
    let output = grayscrub().args(["--yes", "--no", "-"]).output().unwrap();
    assert!(!output.status.success());
}
