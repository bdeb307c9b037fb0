//! Commit-addressed working-tree switchover
//!
//! Switching to a commit runs in three steps:
//!
//! 1. Conflict pre-check: every working-directory file that is untracked by
//!    the current commit, not staged for addition, and tracked by the target
//!    would be overwritten — the whole file set is checked before anything
//!    is written, and the first such file aborts the switch.
//! 2. Write phase: every file tracked by the target is written out.
//! 3. Delete phase: every file tracked by the current commit but absent from
//!    the target is deleted.
//!
//! The pre-check is the only protection; the write and delete phases are
//! best-effort with no rollback.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::{Commit, TrackedFiles};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(new)]
pub struct Switchover<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
}

impl Switchover<'_> {
    /// Overwrite one working-directory file with the blob content a commit
    /// tracks it with
    pub fn restore_file(&self, commit: &Commit, path: &Path) -> anyhow::Result<()> {
        let blob_oid = commit
            .tracked_oid(path)
            .ok_or_else(|| RepoError::FileNotInCommit(path.to_path_buf()))?;

        let blob = self.database.load_blob(blob_oid)?;
        self.workspace.write_file(path, blob.content())
    }

    /// Fail with `UntrackedFileConflict` when any working-directory file
    /// untracked by `current` (and not staged for addition) would be
    /// overwritten by `target_files`
    pub fn check_untracked_conflicts(
        &self,
        current: &Commit,
        target_files: &TrackedFiles,
        staged_additions: &BTreeMap<PathBuf, ObjectId>,
    ) -> anyhow::Result<()> {
        for path in self.workspace.list_files()? {
            if !current.tracks(&path)
                && !staged_additions.contains_key(&path)
                && target_files.contains_key(&path)
            {
                return Err(RepoError::UntrackedFileConflict(path).into());
            }
        }

        Ok(())
    }

    /// Write every file `target` tracks, then delete every file `current`
    /// tracks that `target` does not
    pub fn materialize(&self, target: &Commit, current: &Commit) -> anyhow::Result<()> {
        for path in target.tracked_files().keys() {
            self.restore_file(target, path)?;
        }

        for path in current.tracked_files().keys() {
            if !target.tracks(path) {
                self.workspace.delete_file(path)?;
            }
        }

        Ok(())
    }

    /// Full switch: conflict pre-check over the whole file set, then the
    /// write and delete phases
    pub fn switch_to_commit(
        &self,
        target: &Commit,
        current: &Commit,
        staged_additions: &BTreeMap<PathBuf, ObjectId>,
    ) -> anyhow::Result<()> {
        self.check_untracked_conflicts(current, target.tracked_files(), staged_additions)?;
        self.materialize(target, current)
    }
}
