// e2e/error_reporting.rs — Parse errors as the user sees them.
//
// Every error is reported on stderr as `optdemo: <message>`, nothing is
// printed on stdout, and the exit status is 1.

use std::path::PathBuf;
use std::process::{Command, Output};

fn optdemo_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_optdemo") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("optdemo");
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(optdemo_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run optdemo")
}

/// Runs `args`, expects failure, and returns the stderr lines.
fn errors(args: &[&str]) -> Vec<String> {
    let out = run(args);
    assert_eq!(out.status.code(), Some(1), "args: {args:?}");
    assert!(out.stdout.is_empty(), "args: {args:?}");
    String::from_utf8_lossy(&out.stderr)
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_unknown_options() {
    assert_eq!(errors(&["--bogus"]), ["optdemo: unknown option: --bogus"]);
    assert_eq!(errors(&["-vzv"]), ["optdemo: unknown option: -z"]);
}

#[test]
fn test_all_errors_are_reported() {
    assert_eq!(
        errors(&["-z", "file", "--bad=1"]),
        ["optdemo: unknown option: -z", "optdemo: unknown option: --bad"]
    );
}

#[test]
fn test_missing_argument() {
    assert_eq!(errors(&["-n"]), ["optdemo: option -n requires an argument"]);
    assert_eq!(
        errors(&["--output", "--verbose"]),
        ["optdemo: option --output requires an argument"]
    );
}

#[test]
fn test_unexpected_argument() {
    assert_eq!(
        errors(&["--toggle=1"]),
        ["optdemo: option --toggle doesn't allow an argument"]
    );
}

#[test]
fn test_out_of_range_number() {
    assert_eq!(
        errors(&["-n", "101"]),
        ["optdemo: option -n: 101 is out of range (expected 0 to 100)"]
    );
}

#[test]
fn test_invalid_number() {
    assert_eq!(
        errors(&["--number=ten"]),
        ["optdemo: option --number: invalid integer 'ten'"]
    );
}

#[test]
fn test_empty_output_name() {
    assert_eq!(
        errors(&["--output="]),
        ["optdemo: option --output: argument length 0 is out of range (expected 1 to 255)"]
    );
}

#[test]
fn test_too_many_tags() {
    assert_eq!(
        errors(&["-t", "a,b,c,d"]),
        ["optdemo: option -t: 4 list items given, expected 1 to 3"]
    );
}
