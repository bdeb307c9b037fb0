use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_jot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with one commit tracking `a.txt` and `b.txt`
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    write_file(FileSpec::new(
        init_repository_dir.path().join("a.txt"),
        "alpha\n".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("b.txt"),
        "beta\n".to_string(),
    ));

    run_jot_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_jot_command(init_repository_dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    jot_commit(init_repository_dir.path(), "base commit")
        .assert()
        .success();

    init_repository_dir
}

pub fn run_jot_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("jot").expect("Failed to find jot binary");
    cmd.env("NO_PAGER", "1");
    cmd.env("NO_COLOR", "1");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn jot_commit(dir: &Path, message: &str) -> Command {
    run_jot_command(dir, &["commit", "-m", message])
}

/// Extract the abbreviated commit id from a `commit` invocation's
/// `[<short-id>] <message>` report
pub fn commit_and_capture_short_id(dir: &Path, message: &str) -> String {
    let output = jot_commit(dir, message)
        .output()
        .expect("Failed to run commit");
    assert!(output.status.success(), "commit failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).expect("Non-UTF8 commit output");
    stdout
        .trim_start()
        .strip_prefix('[')
        .and_then(|rest| rest.split(']').next())
        .expect("Malformed commit report")
        .to_string()
}

/// Collect the full commit ids printed by `log`-style output, in order
pub fn commit_ids_in_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(|id| id.to_string())
        .collect()
}
