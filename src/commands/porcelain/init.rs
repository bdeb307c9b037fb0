use crate::areas::refs::BranchTable;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepoError;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepoError::AlreadyInitialized(self.path().to_path_buf()).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .jot/objects directory")?;

        let bootstrap_oid = self
            .database()
            .store(Commit::bootstrap())
            .context("Failed to store the bootstrap commit")?;

        let mut branches = BranchTable::new();
        branches.insert(DEFAULT_BRANCH.to_string(), bootstrap_oid);
        self.refs()
            .store_branches(&branches)
            .context("Failed to create the branch table")?;
        self.refs()
            .write_head(DEFAULT_BRANCH)
            .context("Failed to create the initial HEAD record")?;

        self.staging()
            .write_updates()
            .context("Failed to create the staging area files")?;

        write!(
            self.writer(),
            "Initialized empty jot repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
