use crate::areas::repository::Repository;
use std::path::PathBuf;

impl Repository {
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = PathBuf::from(path);
        let (_, head_commit) = self.head_commit()?;

        let mut staging = self.staging();
        staging.rehydrate()?;
        let delete_working_file = staging.stage_removal(&path, head_commit.tracks(&path))?;
        staging.write_updates()?;
        drop(staging);

        // remove the file from the working directory if the user has not
        // already done so
        if delete_working_file {
            self.workspace().delete_file(&path)?;
        }

        Ok(())
    }
}
