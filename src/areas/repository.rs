use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the repository state directory
pub const STATE_DIR: &str = ".jot";

/// Repository handle
///
/// Explicit handle over all state areas, constructed from a root path and
/// passed to every operation.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    staging: RefCell<StagingArea>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let state_path = path.join(STATE_DIR);

        let staging = StagingArea::new(&state_path);
        let database = Database::new(state_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(state_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            staging: RefCell::new(staging),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state_path(&self) -> PathBuf {
        self.path.join(STATE_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn staging(&'_ self) -> RefMut<'_, StagingArea> {
        self.staging.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn is_initialized(&self) -> bool {
        self.state_path().is_dir()
    }

    pub(crate) fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            return Err(RepoError::NotInitialized.into());
        }

        Ok(())
    }

    /// Resolve HEAD to the active branch's tip commit
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.head_oid()?;
        let commit = self.database.load_commit(&head_oid)?;

        Ok((head_oid, commit))
    }
}
