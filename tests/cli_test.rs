// mallow - Command-line integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Runs the `mallow` binary as a child process.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn mallow() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mallow"));
    cmd.env_remove("RUST_LOG").env_remove("MALLOW_MAX_DEPTH");
    cmd
}

fn run_repl(input: &str) -> Output {
    let mut child = mallow()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn mallow");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for mallow")
}

fn script(name: &str, contents: &str) -> PathBuf {
    let file = format!("mallow-{}-{}.mal", name, std::process::id());
    let path = std::env::temp_dir().join(file);
    fs::write(&path, contents).expect("write script");
    path
}

#[test]
fn test_version() {
    let out = mallow().arg("--version").output().expect("run mallow");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("Mallow v"));
}

#[test]
fn test_file_error_goes_to_stderr() {
    let path = script("fails", "(println \"before\")\n(undefined-fn 1)\n");
    let out = mallow().arg(&path).output().expect("run mallow");
    let _ = fs::remove_file(&path);

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stdout, "before\n");
    assert!(stderr.starts_with("Error: "), "stderr: {}", stderr);
    assert!(stderr.contains("undefined-fn"), "stderr: {}", stderr);
}

#[test]
fn test_file_with_argv() {
    let path = script("argv", "(prn *ARGV*)\n");
    let out = mallow()
        .arg(&path)
        .args(["a", "b"])
        .output()
        .expect("run mallow");
    let _ = fs::remove_file(&path);

    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "(\"a\" \"b\")\n");
}

#[test]
fn test_repl_errors_go_to_stderr_and_loop_continues() {
    let out = run_repl("(+ 1 1)\n(nope)\n(+ 2 2)\n");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stdout.contains('2') && stdout.contains('4'), "stdout: {}", stdout);
    assert!(!stdout.contains("Error"), "stdout: {}", stdout);
    assert!(stderr.contains("Error: 'nope' not found"), "stderr: {}", stderr);
}

#[test]
fn test_repl_survives_self_referencing_atom() {
    let out = run_repl("(def! a (atom nil))\n(reset! a a)\n(+ 40 2)\n");
    assert!(out.status.success(), "status: {:?}", out.status);

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("(atom (atom ...))"), "stdout: {}", stdout);
    assert!(stdout.contains("42"), "stdout: {}", stdout);
}
