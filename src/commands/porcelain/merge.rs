use crate::areas::repository::Repository;
use crate::artifacts::checkout::switchover::Switchover;
use crate::artifacts::history::ancestry::AncestryFinder;
use crate::artifacts::merge::resolution::{PathResolution, classify, conflict_markers};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn merge(&mut self, other_branch: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head_branch = self.refs().read_head()?;
        let (head_oid, current) = self.head_commit()?;
        let other_oid = self.refs().read_branch(other_branch)?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        // Preconditions, in order; any failure aborts with no mutation. The
        // untracked-file check runs against the other tip's tracked set, so
        // an unknown branch trivially passes it and still surfaces below.
        let other_files = match &other_oid {
            Some(oid) => self.database().load_commit(oid)?.tracked_files().clone(),
            None => TrackedFiles::new(),
        };
        Switchover::new(self.database(), self.workspace()).check_untracked_conflicts(
            &current,
            &other_files,
            staging.additions(),
        )?;

        if !staging.is_empty() {
            return Err(RepoError::UncommittedChanges.into());
        }

        let other_oid =
            other_oid.ok_or_else(|| RepoError::NoSuchBranch(other_branch.to_string()))?;

        if other_branch == head_branch {
            return Err(RepoError::SelfMerge(other_branch.to_string()).into());
        }

        let other = self.database().load_commit(&other_oid)?;

        let split_oid = {
            let database = self.database();
            let finder = AncestryFinder::new(|oid: &ObjectId| {
                database
                    .load_commit(oid)
                    .map(|commit| commit.parents().cloned().collect::<Vec<_>>())
            });
            finder
                .split_point(&head_oid, &other_oid)?
                .context("the branch tips share no common history")?
        };

        if split_oid == other_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if split_oid == head_oid {
            // fast-forward: only the branch pointer moves, no merge commit
            Switchover::new(self.database(), self.workspace()).materialize(&other, &current)?;
            self.refs().advance_head(&other_oid)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.database().load_commit(&split_oid)?;
        let mut conflict_encountered = false;

        for (path, base_oid) in split.tracked_files() {
            let cur = current.tracked_oid(path);
            let oth = other.tracked_oid(path);

            match classify(base_oid, cur, oth) {
                PathResolution::TakeOther(blob_oid) => {
                    staging.stage_addition(path, blob_oid, cur);
                }
                PathResolution::RemoveFile => {
                    staging.stage_removal(path, true)?;
                    self.workspace().delete_file(path)?;
                }
                PathResolution::KeepCurrent => {}
                PathResolution::Conflict {
                    current: cur_oid,
                    other: oth_oid,
                } => {
                    conflict_encountered = true;

                    // a side that deleted the file contributes empty content
                    let cur_content = match cur_oid {
                        Some(oid) => self.database().load_blob(&oid)?.content().to_string(),
                        None => String::new(),
                    };
                    let oth_content = match oth_oid {
                        Some(oid) => self.database().load_blob(&oid)?.content().to_string(),
                        None => String::new(),
                    };

                    let merged = conflict_markers(&cur_content, &oth_content);
                    self.workspace().write_file(path, &merged)?;
                    let blob_oid = self.database().store(Blob::new(merged))?;
                    staging.stage_addition(path, blob_oid, cur);
                }
            }
        }

        // Files absent from both the split point and the current tip exist
        // only on the other branch: check them out and stage them.
        let switchover = Switchover::new(self.database(), self.workspace());
        for (path, blob_oid) in other.tracked_files() {
            if !split.tracks(path) && !current.tracks(path) {
                switchover.restore_file(&other, path)?;
                staging.stage_addition(path, blob_oid.clone(), None);
            }
        }

        staging.write_updates()?;
        drop(staging);

        let message = format!("Merged {} into {}.", other_branch, head_branch);
        let merge_oid = self.write_commit(message, Some(other_oid))?;

        // materialize the merge result the same way a branch switch would,
        // without re-running the conflict pre-check
        let result = self.database().load_commit(&merge_oid)?;
        Switchover::new(self.database(), self.workspace()).materialize(&result, &current)?;

        if conflict_encountered {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }
}
