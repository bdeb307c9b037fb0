//! Reference management (branch table, active branch)
//!
//! Branches are a single table mapping branch name → commit fingerprint,
//! persisted as a whole: every operation loads the table, mutates it in
//! memory, and rewrites it. The active branch is a separate one-line record
//! (HEAD) holding a name that is always present in the table, so HEAD always
//! resolves to a valid commit.
//!
//! ## File Format
//!
//! - `branches`: one `<fingerprint> <name>` line per branch
//! - `HEAD`: the active branch name

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

/// Branch table file under the state directory
const BRANCHES_FILE: &str = "branches";
/// Active branch record under the state directory
const HEAD_FILE: &str = "HEAD";

/// Branch name → commit fingerprint table
pub type BranchTable = BTreeMap<String, ObjectId>;

#[derive(Debug)]
pub struct Refs {
    /// Path to the state directory (typically `.jot`)
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    /// Load the whole branch table from disk
    pub fn load_branches(&self) -> anyhow::Result<BranchTable> {
        let branches_path = self.path.join(BRANCHES_FILE);
        let mut branches = BranchTable::new();

        if !branches_path.exists() {
            return Ok(branches);
        }

        let content =
            std::fs::read_to_string(&branches_path).context("failed to read branch table")?;
        for line in content.lines().filter(|line| !line.is_empty()) {
            let (oid, name) = line.split_once(' ').context("malformed branch entry")?;
            branches.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
        }

        Ok(branches)
    }

    /// Rewrite the whole branch table to disk
    pub fn store_branches(&self, branches: &BranchTable) -> anyhow::Result<()> {
        let content = branches
            .iter()
            .map(|(name, oid)| format!("{} {}\n", oid.as_ref(), name))
            .collect::<String>();

        std::fs::write(self.path.join(BRANCHES_FILE), content)
            .context("failed to write branch table")
    }

    /// Read the active branch name
    pub fn read_head(&self) -> anyhow::Result<String> {
        let content = std::fs::read_to_string(self.path.join(HEAD_FILE))
            .context("failed to read HEAD record")?;

        Ok(content.trim().to_string())
    }

    /// Set the active branch name (does not move any branch pointer)
    pub fn write_head(&self, branch_name: &str) -> anyhow::Result<()> {
        std::fs::write(self.path.join(HEAD_FILE), branch_name)
            .context("failed to write HEAD record")
    }

    /// Resolve the active branch to its commit fingerprint
    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        let head = self.read_head()?;
        self.load_branches()?
            .get(&head)
            .cloned()
            .with_context(|| format!("HEAD points at unknown branch {}", head))
    }

    /// Look up a branch's commit fingerprint
    pub fn read_branch(&self, branch_name: &str) -> anyhow::Result<Option<ObjectId>> {
        Ok(self.load_branches()?.get(branch_name).cloned())
    }

    /// Create a branch pointing at the current HEAD commit
    pub fn create_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let mut branches = self.load_branches()?;

        if branches.contains_key(branch_name) {
            return Err(RepoError::BranchExists(branch_name.to_string()).into());
        }

        let head_oid = self.head_oid()?;
        branches.insert(branch_name.to_string(), head_oid);
        self.store_branches(&branches)
    }

    /// Delete a branch (never the active one)
    pub fn delete_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let mut branches = self.load_branches()?;

        if !branches.contains_key(branch_name) {
            return Err(RepoError::NoSuchBranch(branch_name.to_string()).into());
        }
        if branch_name == self.read_head()? {
            return Err(RepoError::CannotDeleteActiveBranch(branch_name.to_string()).into());
        }

        branches.remove(branch_name);
        self.store_branches(&branches)
    }

    /// Switch the active branch pointer to an existing branch
    pub fn switch_active(&self, branch_name: &str) -> anyhow::Result<()> {
        if self.read_branch(branch_name)?.is_none() {
            return Err(RepoError::NoSuchBranch(branch_name.to_string()).into());
        }

        self.write_head(branch_name)
    }

    /// Move the active branch's mapping to a new commit (commit/merge/reset)
    pub fn advance_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let head = self.read_head()?;
        let mut branches = self.load_branches()?;
        branches.insert(head, oid.clone());
        self.store_branches(&branches)
    }
}
