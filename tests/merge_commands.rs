use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;
use common::command::{
    commit_ids_in_output, committed_repository_dir, jot_commit, run_jot_command,
};
use common::file::{FileSpec, read_file, write_file};

/// Test merging with simple divergent branches
///
/// History:
///       A (base)
///      / \
///     B   C
///     |   |
///   master  feature
///
/// B edits a.txt, C edits b.txt: no overlap, so the merge combines both
/// without conflicts and records a merge commit with two parents.
#[rstest]
fn merge_combines_disjoint_edits(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    // Commit B on master: edit a.txt
    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "alpha\nmaster change\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "master changes").assert().success();

    // Commit C on feature: edit b.txt
    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("b.txt"),
        "beta\nfeature change\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "feature changes").assert().success();

    // Merge feature into master
    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict.").not());

    assert_eq!(
        read_file(&dir.path().join("a.txt")),
        "alpha\nmaster change\n"
    );
    assert_eq!(
        read_file(&dir.path().join("b.txt")),
        "beta\nfeature change\n"
    );

    let output = run_jot_command(dir.path(), &["log"])
        .output()
        .expect("Failed to run log");
    let stdout = String::from_utf8(output.stdout).expect("Non-UTF8 log output");
    assert!(stdout.contains("Merged feature into master."));
    assert!(stdout.contains("Merge: "), "merge commit lists both parents");
}

/// Both branches change the same file differently from the split point: the
/// merge still commits, with the conflicted file rewritten between markers.
#[rstest]
fn merge_marks_conflicting_edits(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "B".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "master edit").assert().success();

    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "C".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "feature edit").assert().success();

    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    // conflict body is byte-exact
    assert_eq!(
        read_file(&dir.path().join("a.txt")),
        "<<<<<<< HEAD\nB=======\nC>>>>>>>\n"
    );

    // the merge commit exists despite the conflict, with feature's tip as
    // second parent
    let output = run_jot_command(dir.path(), &["log"])
        .output()
        .expect("Failed to run log");
    let stdout = String::from_utf8(output.stdout).expect("Non-UTF8 log output");
    assert!(stdout.contains("Merged feature into master."));
    assert!(stdout.contains("Merge: "));
}

/// One side deletes, the other edits: still a conflict, with the deleted
/// side contributing empty content.
#[rstest]
fn merge_conflicts_on_edit_versus_delete(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "edited on master\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "master edits a").assert().success();

    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "feature deletes a")
        .assert()
        .success();

    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    assert_eq!(
        read_file(&dir.path().join("a.txt")),
        "<<<<<<< HEAD\nedited on master\n=======\n>>>>>>>\n"
    );
}

/// The other branch deleted a file the current branch left untouched: the
/// merge removes it.
#[rstest]
fn merge_takes_the_other_sides_deletion(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["rm", "b.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "feature deletes b")
        .assert()
        .success();

    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    // diverge master so the merge is not a fast-forward
    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "master went on\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "master edit").assert().success();

    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .success();

    assert!(!dir.path().join("b.txt").exists());
}

/// Merging a direct descendant only moves the branch pointer: no merge
/// commit is created.
#[rstest]
fn merge_fast_forwards_a_direct_descendant(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "ahead\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "feature ahead").assert().success();

    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch fast-forwarded."));

    assert_eq!(read_file(&dir.path().join("a.txt")), "ahead\n");

    // same tip on both branches, no merge commit anywhere
    let output = run_jot_command(dir.path(), &["log"])
        .output()
        .expect("Failed to run log");
    let stdout = String::from_utf8(output.stdout).expect("Non-UTF8 log output");
    assert!(stdout.contains("feature ahead"));
    assert!(!stdout.contains("Merge: "));
    assert_eq!(commit_ids_in_output(&stdout).len(), 3);
}

#[rstest]
fn merging_an_ancestor_is_a_noop(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "ahead\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "feature ahead").assert().success();

    run_jot_command(dir.path(), &["merge", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Given branch is an ancestor of the current branch.",
        ));

    // nothing changed on feature
    assert_eq!(read_file(&dir.path().join("a.txt")), "ahead\n");
}

#[rstest]
fn merge_preconditions_are_enforced(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["merge", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot merge branch master with itself"));

    run_jot_command(dir.path(), &["merge", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch ghost does not exist"));

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("pending.txt"),
        "staged\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "pending.txt"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("you have uncommitted changes"));
}

#[rstest]
fn merge_refuses_to_overwrite_an_untracked_file(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("new.txt"),
        "feature version\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "new.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "feature adds new.txt")
        .assert()
        .success();

    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("new.txt"),
        "untracked local version\n".to_string(),
    ));

    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("untracked file in the way"));

    assert_eq!(
        read_file(&dir.path().join("new.txt")),
        "untracked local version\n"
    );
}

/// Files created only on the other branch are checked out and included in
/// the merge commit.
#[rstest]
fn merge_adopts_files_unique_to_the_other_branch(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_jot_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_jot_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("only-feature.txt"),
        "from feature\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "only-feature.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "feature only file")
        .assert()
        .success();

    run_jot_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "master went on\n".to_string(),
    ));
    run_jot_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jot_commit(dir.path(), "master edit").assert().success();

    run_jot_command(dir.path(), &["merge", "feature"])
        .assert()
        .success();

    assert_eq!(
        read_file(&dir.path().join("only-feature.txt")),
        "from feature\n"
    );
    assert_eq!(read_file(&dir.path().join("a.txt")), "master went on\n");
}
