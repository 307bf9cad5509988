#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Build a `gitlet` invocation running inside `dir`.
pub fn gitlet(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Run a `gitlet` invocation and capture its stdout.
pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = gitlet(dir, args).output().expect("Failed to run gitlet");
    String::from_utf8(output.stdout).expect("Command output was not UTF-8")
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("Failed to write file");
}

pub fn read_file(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).expect("Failed to read file")
}

/// Write, stage and commit one file.
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    write_file(dir, name, content);
    gitlet(dir, &["add", name]).assert().success();
    gitlet(dir, &["commit", message]).assert().success();
}

/// The current HEAD commit id, scraped from the first log entry.
pub fn head_commit_id(dir: &Path) -> String {
    stdout_of(dir, &["log"])
        .lines()
        .find_map(|line| line.strip_prefix("commit "))
        .expect("log printed no commit")
        .to_string()
}

/// Number of commits the current branch's log prints.
pub fn log_length(dir: &Path) -> usize {
    stdout_of(dir, &["log"])
        .lines()
        .filter(|line| line.starts_with("commit "))
        .count()
}

#[fixture]
pub fn repo_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repo(repo_dir: TempDir) -> TempDir {
    gitlet(repo_dir.path(), &["init"]).assert().success();
    repo_dir
}
