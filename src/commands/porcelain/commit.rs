use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let message = message.trim();
        if message.is_empty() {
            return Err(RepoError::EmptyMessage.into());
        }

        let commit_oid = self.write_commit(message.to_string(), None)?;

        writeln!(
            self.writer(),
            "[{}] {}",
            commit_oid.to_short_oid(),
            message.lines().next().unwrap_or("")
        )?;

        Ok(())
    }

    /// Record the staged snapshot as a new commit on the active branch.
    ///
    /// Produces the tracked-files snapshot from the staging area (failing
    /// with `NoChanges` when nothing is staged), stores the commit, advances
    /// the active branch pointer, and persists the cleared staging area.
    pub(crate) fn write_commit(
        &self,
        message: String,
        parent2: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let (head_oid, head_commit) = self.head_commit()?;

        let mut staging = self.staging();
        staging.rehydrate()?;
        let tracked_files = staging.commit_snapshot(head_commit.tracked_files())?;

        let commit = Commit::new(
            message,
            chrono::Local::now().fixed_offset(),
            tracked_files,
            Some(head_oid),
            parent2,
        );
        let commit_oid = self.database().store(commit)?;

        self.refs().advance_head(&commit_oid)?;
        staging.write_updates()?;

        Ok(commit_oid)
    }
}
