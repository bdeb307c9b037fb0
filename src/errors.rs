//! Error taxonomy for repository operations
//!
//! Every user-visible failure mode has a variant here. Operations return
//! `anyhow::Result`, raising these so callers (and tests) can downcast to
//! the precise case while commands keep bit-style terse messages.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("a jot repository already exists in {0}")]
    AlreadyInitialized(PathBuf),

    #[error("not a jot repository (no .jot directory found)")]
    NotInitialized,

    #[error("file does not exist: {0}")]
    FileMissing(PathBuf),

    #[error("no reason to remove the file: {0}")]
    NothingToRemove(PathBuf),

    #[error("no changes added to the commit")]
    NoChanges,

    #[error("please enter a commit message")]
    EmptyMessage,

    #[error("no commit with id {0} exists")]
    NoSuchCommit(String),

    #[error("branch {0} does not exist")]
    NoSuchBranch(String),

    #[error("branch {0} already exists")]
    BranchExists(String),

    #[error("cannot remove the current branch {0}")]
    CannotDeleteActiveBranch(String),

    #[error("cannot merge branch {0} with itself")]
    SelfMerge(String),

    #[error("you have uncommitted changes")]
    UncommittedChanges,

    #[error("there is an untracked file in the way: {0}; delete it, or add and commit it first")]
    UntrackedFileConflict(PathBuf),

    #[error("file does not exist in that commit: {0}")]
    FileNotInCommit(PathBuf),
}
