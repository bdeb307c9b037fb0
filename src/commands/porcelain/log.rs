use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Linear history of the active branch, newest first
    ///
    /// Follows primary-parent links only, so merge commits contribute a
    /// single line of history; the walk ends at the parentless bootstrap
    /// commit.
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (mut commit_oid, mut commit) = self.head_commit()?;

        loop {
            self.show_commit(&commit_oid, &commit)?;

            match commit.parent1() {
                Some(parent_oid) => {
                    commit_oid = parent_oid.clone();
                    commit = self.database().load_commit(&commit_oid)?;
                }
                None => break,
            }
        }

        Ok(())
    }

    /// Every commit in the object store, in no specified order
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for (commit_oid, commit) in self.database().commits()? {
            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    pub(crate) fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "commit {}", commit_oid)?;
        if let (Some(parent1), Some(parent2)) = (commit.parent1(), commit.parent2()) {
            writeln!(
                self.writer(),
                "Merge: {} {}",
                parent1.to_short_oid(),
                parent2.to_short_oid()
            )?;
        }
        writeln!(self.writer(), "Date: {}", commit.readable_timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
