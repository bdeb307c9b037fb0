//! Staging area
//!
//! Tracks the pending changes relative to the active commit as two tables:
//! additions (path → blob fingerprint) and removals (paths). A path never
//! sits in both tables after a successful operation. Both tables are loaded
//! from disk, mutated in memory, and fully rewritten by every operation, and
//! both are cleared after every commit and branch checkout.

use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Pending additions file under the state directory
const ADDITIONS_FILE: &str = "stage_add";
/// Pending removals file under the state directory
const REMOVALS_FILE: &str = "stage_rm";

#[derive(Debug, Clone)]
pub struct StagingArea {
    /// Path to the additions table file
    additions_path: Box<Path>,
    /// Path to the removals table file
    removals_path: Box<Path>,
    /// Files to add or modify in the next commit
    additions: BTreeMap<PathBuf, ObjectId>,
    /// Files to remove in the next commit
    removals: BTreeSet<PathBuf>,
}

impl StagingArea {
    /// Create an empty staging area persisted under the given state directory
    pub fn new(state_path: &Path) -> Self {
        StagingArea {
            additions_path: state_path.join(ADDITIONS_FILE).into_boxed_path(),
            removals_path: state_path.join(REMOVALS_FILE).into_boxed_path(),
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
        }
    }

    /// Load both tables from disk
    ///
    /// Missing files are treated as empty tables.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();

        if self.additions_path.exists() {
            let content = std::fs::read_to_string(&self.additions_path)
                .context("failed to read staged additions")?;
            for line in content.lines().filter(|line| !line.is_empty()) {
                let (oid, path) = line
                    .split_once(' ')
                    .context("malformed staged addition entry")?;
                self.additions
                    .insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
            }
        }

        if self.removals_path.exists() {
            let content = std::fs::read_to_string(&self.removals_path)
                .context("failed to read staged removals")?;
            for line in content.lines().filter(|line| !line.is_empty()) {
                self.removals.insert(PathBuf::from(line));
            }
        }

        Ok(())
    }

    /// Rewrite both tables to disk
    pub fn write_updates(&self) -> anyhow::Result<()> {
        let additions = self
            .additions
            .iter()
            .map(|(path, oid)| format!("{} {}\n", oid.as_ref(), path.display()))
            .collect::<String>();
        std::fs::write(&self.additions_path, additions)
            .context("failed to write staged additions")?;

        let removals = self
            .removals
            .iter()
            .map(|path| format!("{}\n", path.display()))
            .collect::<String>();
        std::fs::write(&self.removals_path, removals).context("failed to write staged removals")?;

        Ok(())
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    /// Record a pending addition for `path`.
    ///
    /// When the active commit already tracks the path with exactly this blob
    /// (a no-op edit), any pending addition or removal is cleared instead.
    pub fn stage_addition(
        &mut self,
        path: &Path,
        blob_oid: ObjectId,
        tracked_oid: Option<&ObjectId>,
    ) {
        if tracked_oid == Some(&blob_oid) {
            self.additions.remove(path);
            self.removals.remove(path);
        } else {
            self.additions.insert(path.to_path_buf(), blob_oid);
            self.removals.remove(path);
        }
    }

    /// Record a pending removal for `path`.
    ///
    /// A path that is neither staged for addition nor tracked by the active
    /// commit fails with `NothingToRemove`. A staged addition is unstaged; a
    /// tracked path is recorded for removal.
    ///
    /// # Returns
    ///
    /// true when the path was tracked and the caller must delete the working
    /// file
    pub fn stage_removal(&mut self, path: &Path, tracked: bool) -> anyhow::Result<bool> {
        if !self.additions.contains_key(path) && !tracked {
            return Err(RepoError::NothingToRemove(path.to_path_buf()).into());
        }

        self.additions.remove(path);

        if tracked {
            self.removals.insert(path.to_path_buf());
        }

        Ok(tracked)
    }

    /// Produce the tracked-files snapshot for the next commit and clear both
    /// tables.
    ///
    /// Fails with `NoChanges` when nothing is staged. Otherwise the active
    /// commit's snapshot is cloned, additions overwrite it and removals
    /// delete from it.
    pub fn commit_snapshot(&mut self, active_tracked: &TrackedFiles) -> anyhow::Result<TrackedFiles> {
        if self.is_empty() {
            return Err(RepoError::NoChanges.into());
        }

        let mut tracked_files = active_tracked.clone();
        for (path, oid) in &self.additions {
            tracked_files.insert(path.clone(), oid.clone());
        }
        for path in &self.removals {
            tracked_files.remove(path);
        }

        self.clear();

        Ok(tracked_files)
    }
}
