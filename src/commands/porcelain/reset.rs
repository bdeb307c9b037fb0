use crate::areas::repository::Repository;
use crate::artifacts::checkout::switchover::Switchover;

impl Repository {
    /// Move the active branch pointer to an arbitrary commit and force the
    /// working tree to match it
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (target_oid, target) = self.resolve_commit(commit_id)?;
        let (_, current) = self.head_commit()?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        Switchover::new(self.database(), self.workspace()).switch_to_commit(
            &target,
            &current,
            staging.additions(),
        )?;

        self.refs().advance_head(&target_oid)?;

        staging.clear();
        staging.write_updates()?;

        Ok(())
    }
}
