use crate::areas::repository::Repository;
use crate::artifacts::checkout::switchover::Switchover;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// `checkout -- <path>`: restore one file from the active commit
    pub fn checkout_file(&mut self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (_, head_commit) = self.head_commit()?;
        Switchover::new(self.database(), self.workspace())
            .restore_file(&head_commit, Path::new(path))
    }

    /// `checkout <commit-id> -- <path>`: restore one file from an arbitrary
    /// commit, accepting abbreviated ids
    pub fn checkout_file_at(&mut self, commit_id: &str, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (_, commit) = self.resolve_commit(commit_id)?;
        Switchover::new(self.database(), self.workspace()).restore_file(&commit, Path::new(path))
    }

    /// `checkout <branch>`: switch the working tree and HEAD to a branch
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self
            .refs()
            .read_branch(branch_name)?
            .ok_or_else(|| RepoError::NoSuchBranch(branch_name.to_string()))?;

        if branch_name == self.refs().read_head()? {
            writeln!(self.writer(), "No need to checkout the current branch.")?;
            return Ok(());
        }

        let target = self.database().load_commit(&target_oid)?;
        let (_, current) = self.head_commit()?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        Switchover::new(self.database(), self.workspace()).switch_to_commit(
            &target,
            &current,
            staging.additions(),
        )?;

        self.refs().switch_active(branch_name)?;

        staging.clear();
        staging.write_updates()?;

        Ok(())
    }

    /// Resolve a possibly-abbreviated commit id to a stored commit
    pub(crate) fn resolve_commit(&self, commit_id: &str) -> anyhow::Result<(ObjectId, Commit)> {
        let resolved = self.database().resolve_short_id(commit_id)?;

        let oid = ObjectId::try_parse(resolved)
            .map_err(|_| RepoError::NoSuchCommit(commit_id.to_string()))?;
        let commit = self
            .database()
            .try_load_commit(&oid)?
            .ok_or_else(|| RepoError::NoSuchCommit(commit_id.to_string()))?;

        Ok((oid, commit))
    }
}
