//! Commit object
//!
//! Commits are immutable snapshot records. They contain:
//! - A commit message
//! - A timestamp (the bootstrap commit is pinned to the Unix epoch)
//! - The complete tracked-file snapshot (path → blob fingerprint)
//! - Up to two parent commit IDs (the second only for merge commits)
//!
//! Both parents are constructor-time fields, so a commit's fingerprint is
//! stable for the whole lifetime of the record.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! timestamp <unix-seconds> <timezone>
//! parent <parent-sha>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Message of the commit every repository is bootstrapped with
pub const BOOTSTRAP_MESSAGE: &str = "initial commit";

/// Snapshot of the working directory tracked at a commit
pub type TrackedFiles = BTreeMap<PathBuf, ObjectId>;

/// Commit object
///
/// Represents a complete snapshot of the tracked working-directory content,
/// not a diff against the parent.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Commit message (non-empty except for the bootstrap commit)
    message: String,
    /// Commit timestamp
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// Tracked files mapped by path, ordered by path
    tracked_files: TrackedFiles,
    /// Primary parent (None only for the bootstrap commit)
    parent1: Option<ObjectId>,
    /// Secondary parent (present only for merge commits)
    parent2: Option<ObjectId>,
}

impl Commit {
    /// Create a new commit
    ///
    /// # Arguments
    ///
    /// * `message` - Commit message
    /// * `timestamp` - Commit timestamp
    /// * `tracked_files` - Complete path → blob fingerprint snapshot
    /// * `parent1` - Primary parent (None only for the bootstrap commit)
    /// * `parent2` - Secondary parent (merge commits only)
    pub fn new(
        message: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        tracked_files: TrackedFiles,
        parent1: Option<ObjectId>,
        parent2: Option<ObjectId>,
    ) -> Self {
        Commit {
            message,
            timestamp,
            tracked_files,
            parent1,
            parent2,
        }
    }

    /// Create the bootstrap commit
    ///
    /// Empty snapshot, no parents, timestamp pinned to the epoch so it sorts
    /// first in any global ordering.
    pub fn bootstrap() -> Self {
        Commit {
            message: BOOTSTRAP_MESSAGE.to_string(),
            timestamp: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
            tracked_files: TrackedFiles::new(),
            parent1: None,
            parent2: None,
        }
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    /// Get the full commit message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn tracked_files(&self) -> &TrackedFiles {
        &self.tracked_files
    }

    /// Look up the blob fingerprint a path is tracked with
    pub fn tracked_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.tracked_files.get(path)
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.tracked_files.contains_key(path)
    }

    pub fn parent1(&self) -> Option<&ObjectId> {
        self.parent1.as_ref()
    }

    pub fn parent2(&self) -> Option<&ObjectId> {
        self.parent2.as_ref()
    }

    /// Iterate over the present parents, primary first
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent1.iter().chain(self.parent2.iter())
    }

    /// Whether this is the parentless bootstrap commit
    pub fn is_bootstrap(&self) -> bool {
        self.parent1.is_none()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        object_content.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for parent in self.parents() {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        for (path, oid) in &self.tracked_files {
            object_content.push(format!("file {} {}", oid.as_ref(), path.display()));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut content_bytes = Vec::new();
        content_bytes.write_all(object_content.as_bytes())?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let timestamp_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = timestamp_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = chrono::DateTime::parse_from_str(timestamp, "%s %z")
            .context("Invalid commit object: unparseable timestamp")?;

        let mut parents = Vec::new();
        let mut tracked_files = TrackedFiles::new();

        for line in lines.by_ref() {
            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                anyhow::ensure!(
                    entry.len() > OBJECT_ID_LENGTH + 1,
                    "Invalid commit object: malformed file line"
                );
                let (oid, path) = entry.split_at(OBJECT_ID_LENGTH);
                let oid = ObjectId::try_parse(oid.to_string())?;
                tracked_files.insert(PathBuf::from(&path[1..]), oid);
            } else if line.is_empty() {
                break;
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        anyhow::ensure!(parents.len() <= 2, "Invalid commit object: too many parents");
        let mut parents = parents.into_iter();
        let (parent1, parent2) = (parents.next(), parents.next());

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(message, timestamp, tracked_files, parent1, parent2))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
