use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the fingerprint of every commit whose message matches exactly
    pub fn find(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut commits_found = 0;
        for (commit_oid, commit) in self.database().commits()? {
            if commit.message() == message {
                writeln!(self.writer(), "{}", commit_oid)?;
                commits_found += 1;
            }
        }

        if commits_found == 0 {
            writeln!(self.writer(), "Found no commit with that message.")?;
        }

        Ok(())
    }
}
