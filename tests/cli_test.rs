use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_html2pptx"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_slide(dir: &std::path::Path, name: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, "<html><body><h1>Slide</h1></body></html>")
        .expect("Failed to write HTML file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_conflicting_sources_exit_code() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let slide = write_slide(temp_dir.path(), "a.html");

    let output = run_command(&[
        "--html-dir",
        temp_dir.path().to_str().unwrap(),
        "--html",
        &slide,
        "--validate",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not both"), "stderr: {}", stderr(&output));
}

#[test]
fn test_unsupported_layout_names_token() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let slide = write_slide(temp_dir.path(), "a.html");

    let output = run_command(&["--html", &slide, "--layout", "square", "--validate"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("square"), "stderr: {}", stderr(&output));
}

#[test]
fn test_empty_directory_prints_usage() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let output = run_command(&["--html_dir", temp_dir.path().to_str().unwrap(), "--validate"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage:"), "stderr: {}", stderr(&output));
}

#[test]
fn test_missing_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("nope");

    let output = run_command(&["--html-dir", missing.to_str().unwrap(), "--validate"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("HTML directory not found"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_missing_output_without_validate() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let slide = write_slide(temp_dir.path(), "a.html");

    let output = run_command(&["--html", &slide]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("Missing --output"),
        "stderr: {}",
        stderr(&output)
    );
}

#[test]
fn test_repeated_and_comma_separated_html_reach_layout_check() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let a = write_slide(temp_dir.path(), "a.html");
    let b = write_slide(temp_dir.path(), "b.html");
    let c = write_slide(temp_dir.path(), "c.html");
    let list = format!(" {}, {}", a, b);

    let output = run_command(&[
        "--html",
        &list,
        "--html",
        &c,
        "--layout",
        "square",
        "--validate",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("square"), "stderr: {}", stderr(&output));
}

#[test]
fn test_blank_comma_list_has_no_inputs() {
    let output = run_command(&["--html", " , ", "--validate"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage:"), "stderr: {}", stderr(&output));
}
