use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::errors::RepoError;
use std::path::PathBuf;

impl Repository {
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = PathBuf::from(path);
        if !self.workspace().file_exists(&path) {
            return Err(RepoError::FileMissing(path).into());
        }

        // store the blob for the current content before staging it
        let data = self.workspace().read_file(&path)?;
        let blob_oid = self.database().store(Blob::new(data))?;

        let (_, head_commit) = self.head_commit()?;

        let mut staging = self.staging();
        staging.rehydrate()?;
        staging.stage_addition(&path, blob_oid, head_commit.tracked_oid(&path));
        staging.write_updates()?;

        Ok(())
    }
}
