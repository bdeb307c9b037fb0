use crate::areas::repository::Repository;

impl Repository {
    /// Create a branch pointing at the current HEAD commit
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        self.refs().create_branch(branch_name)
    }

    /// Delete a branch (never the active one); its commits stay in the store
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        self.refs().delete_branch(branch_name)
    }
}
