use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn status(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let active_branch = self.refs().read_head()?;
        let branches = self.refs().load_branches()?;

        writeln!(self.writer(), "=== Branches ===")?;
        writeln!(self.writer(), "*{}", active_branch.green())?;
        for branch_name in branches.keys() {
            if branch_name != &active_branch {
                writeln!(self.writer(), "{}", branch_name)?;
            }
        }
        writeln!(self.writer())?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        writeln!(self.writer(), "=== Staged Files ===")?;
        for path in staging.additions().keys() {
            writeln!(self.writer(), "{}", path.display())?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Removed Files ===")?;
        for path in staging.removals() {
            writeln!(self.writer(), "{}", path.display())?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
