//! Tests for the `marksheet` binary's exit codes and status lines

use std::path::Path;
use std::process::{Command, Output};

fn marksheet(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_marksheet"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run marksheet")
}

fn full_args<'a>(output: &'a str, mark1: &'a str) -> Vec<&'a str> {
    vec![
        "Jane Roe",
        "R-42",
        "31-12-1999",
        "Spring 2025",
        "2025",
        "Physics",
        "Optics",
        mark1,
        "A",
        "Mechanics",
        "84",
        "B",
        "Thermodynamics",
        "77",
        "C",
        "Electronics",
        "66",
        "D",
        "Lab",
        "58",
        "E",
        "7.5",
        "XYZ Institute",
        output,
    ]
}

fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[test]
fn test_wrong_argument_count_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = marksheet(dir.path(), &["one", "two", "three"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Error: Expected 24 arguments, got 3");
    assert!(lines[1].starts_with("Usage: "));
    assert!(is_empty_dir(dir.path()));
}

#[test]
fn test_demo_mode_writes_test_marksheet() {
    let dir = tempfile::tempdir().unwrap();
    let output = marksheet(dir.path(), &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Running in test mode...",
            "PDF generated successfully: test_marksheet.pdf"
        ]
    );
    assert!(dir.path().join("test_marksheet.pdf").exists());
}

#[test]
fn test_full_arguments_render_to_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("jane.pdf");
    let output_str = output_path.to_string_lossy().into_owned();

    let output = marksheet(dir.path(), &full_args(&output_str, "91"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        format!("PDF generated successfully: {output_str}")
    );
    let bytes = std::fs::read(&output_path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_non_integer_mark_fails_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = marksheet(dir.path(), &full_args("jane.pdf", "ninety"));

    assert!(!output.status.success());
    assert!(is_empty_dir(dir.path()));
}

#[test]
fn test_unwritable_output_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("missing").join("jane.pdf");
    let output_str = output_path.to_string_lossy().into_owned();

    let output = marksheet(dir.path(), &full_args(&output_str, "91"));

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Error generating PDF: "));
    assert!(!output_path.exists());
}

#[test]
fn test_flag_like_single_argument_prints_usage() {
    for flag in ["--help", "-h", "-V", "--version"] {
        let dir = tempfile::tempdir().unwrap();
        let output = marksheet(dir.path(), &[flag]);

        assert_eq!(output.status.code(), Some(1), "{flag}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(
            stdout.lines().next(),
            Some("Error: Expected 24 arguments, got 1"),
            "{flag}"
        );
        assert!(is_empty_dir(dir.path()));
    }
}

#[test]
fn test_hyphen_leading_fields_render() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("hyphen.pdf");
    let output_str = output_path.to_string_lossy().into_owned();

    let mut args = full_args(&output_str, "91");
    args[0] = "-h";
    args[3] = "--version";

    let output = marksheet(dir.path(), &args);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        format!("PDF generated successfully: {output_str}")
    );
    assert!(output_path.exists());
}
