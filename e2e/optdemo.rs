// e2e/optdemo.rs — Black-box tests of the `optdemo` binary.
//
// Runs the binary with std::process::Command and checks the `key=value`
// report on stdout and the exit status.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Locate the `optdemo` binary produced by Cargo.
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

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

/// Value of `key=` in the report.
fn field(report: &str, key: &str) -> Option<String> {
    let prefix = format!("{key}=");
    report
        .lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()).map(str::to_owned))
}

fn operands(report: &str) -> Vec<String> {
    report
        .lines()
        .filter_map(|line| line.strip_prefix("operand="))
        .map(str::to_owned)
        .collect()
}

// ── 1. Defaults ──────────────────────────────────────────────────────────────

#[test]
fn test_no_arguments_prints_defaults() {
    let out = run(&[]);
    assert!(out.status.success());
    let report = stdout(&out);
    assert_eq!(
        report,
        "verbose=0\nnumber=\noutput=\ninclude=\ntags=\ntag_count=0\nratio=\ncolor=\n\
         toggle=false\nx=true\nexec=\nargc=1\n"
    );
}

// ── 2. Every action kind ─────────────────────────────────────────────────────

#[test]
fn test_every_option_kind() {
    let out = run(&[
        "-vv", "-n", "42", "-o", "out.txt", "-I", "a", "-Ib", "-t", "x,y:z", "-r", "0.5", "-c",
        "-x", "-X", "file1", "--", "-f",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let report = stdout(&out);
    assert_eq!(field(&report, "verbose").as_deref(), Some("2"));
    assert_eq!(field(&report, "number").as_deref(), Some("42"));
    assert_eq!(field(&report, "output").as_deref(), Some("out.txt"));
    assert_eq!(field(&report, "include").as_deref(), Some("a,b"));
    assert_eq!(field(&report, "tags").as_deref(), Some("x,y,z"));
    assert_eq!(field(&report, "tag_count").as_deref(), Some("3"));
    assert_eq!(field(&report, "ratio").as_deref(), Some("0.5"));
    assert_eq!(field(&report, "color").as_deref(), Some("always"));
    assert_eq!(field(&report, "toggle").as_deref(), Some("true"));
    assert_eq!(field(&report, "x").as_deref(), Some("false"));
    assert_eq!(field(&report, "argc").as_deref(), Some("3"));
    assert_eq!(operands(&report), ["file1", "-f"]);
}

#[test]
fn test_quiet_decrements_verbosity() {
    let out = run(&["-v", "--quiet", "-qq"]);
    assert_eq!(field(&stdout(&out), "verbose").as_deref(), Some("-2"));
}

#[test]
fn test_color_with_value() {
    let out = run(&["--color=never"]);
    assert!(out.status.success());
    assert_eq!(field(&stdout(&out), "color").as_deref(), Some("never"));
}

#[test]
fn test_color_takes_the_next_token() {
    let out = run(&["--color", "never", "file"]);
    assert!(out.status.success());
    let report = stdout(&out);
    assert_eq!(field(&report, "color").as_deref(), Some("never"));
    assert_eq!(operands(&report), ["file"]);

    let out = run(&["-c", "-x"]);
    assert!(out.status.success());
    let report = stdout(&out);
    assert_eq!(field(&report, "color").as_deref(), Some("always"));
    assert_eq!(field(&report, "toggle").as_deref(), Some("true"));
}

#[test]
fn test_exec_collects_until_semicolon() {
    let out = run(&["--exec", "ls", "-l", "--all", ";", "after"]);
    assert!(out.status.success());
    let report = stdout(&out);
    assert_eq!(field(&report, "exec").as_deref(), Some("ls -l --all"));
    assert_eq!(operands(&report), ["after"]);
}

#[test]
fn test_tags_accumulate() {
    let out = run(&["--tags=a", "-t", "b:c"]);
    let report = stdout(&out);
    assert_eq!(field(&report, "tags").as_deref(), Some("a,b,c"));
    assert_eq!(field(&report, "tag_count").as_deref(), Some("3"));
}

// ── 3. Early exits ───────────────────────────────────────────────────────────

#[test]
fn test_version() {
    let out = run(&["--version", "ignored"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), format!("optdemo {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help() {
    let out = run(&["-h"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("Usage: optdemo [OPTION]... [OPERAND]...\n"));
    assert!(text.contains("  -n, --number INT"));
    assert!(text.contains("  -c, --color[=WHEN]"));
    assert!(text.contains("      --exec CMD..."));
    assert!(text.contains("Arguments following this are not treated as options."));
    assert!(!text.contains("verbose=0"));
}

#[test]
fn test_invalid_color_exits_with_callback_code() {
    let out = run(&["--color=purple"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid color choice 'purple'"));
}
