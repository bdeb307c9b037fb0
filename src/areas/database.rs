//! Content-addressed object database
//!
//! Stores blobs and commits under their SHA-1 fingerprint in
//! `.jot/objects/<first-2-chars>/<remaining-38-chars>`. Object files are
//! zlib-compressed and written atomically (temp file + rename). The store is
//! append-only: objects are never rewritten or collected, and storing an
//! already-present object is a no-op.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist an object under its fingerprint and return the fingerprint.
    ///
    /// Idempotent: an object that already exists on disk is left untouched.
    pub fn store(&self, object: impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());
        let object_content = object.serialize()?;

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object_content)?;
        }

        Ok(object_id)
    }

    /// Load a blob by fingerprint
    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Blob::deserialize(object_reader),
            other => Err(anyhow::anyhow!(
                "object {} is a {}, not a blob",
                object_id,
                other
            )),
        }
    }

    /// Load a commit by fingerprint, failing when the object is missing or
    /// not a commit
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        self.try_load_commit(object_id)?
            .ok_or_else(|| anyhow::anyhow!("commit object not found: {}", object_id))
    }

    /// Load a commit by fingerprint, returning None when no commit object is
    /// stored under it
    pub fn try_load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.exists() {
            return Ok(None);
        }

        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Enumerate every stored object fingerprint, in no specified order
    pub fn object_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut object_ids = Vec::new();

        if !self.path.exists() {
            return Ok(object_ids);
        }

        for dir_entry in std::fs::read_dir(&self.path)? {
            let dir_entry = dir_entry?;
            if !dir_entry.path().is_dir() {
                continue;
            }
            let dir_name = dir_entry.file_name().to_string_lossy().to_string();

            for file_entry in std::fs::read_dir(dir_entry.path())? {
                let file_entry = file_entry?;
                let file_name = file_entry.file_name().to_string_lossy().to_string();

                // skip temp files left over from interrupted writes
                if let Ok(oid) = ObjectId::try_parse(format!("{}{}", dir_name, file_name)) {
                    object_ids.push(oid);
                }
            }
        }

        Ok(object_ids)
    }

    /// Enumerate every stored commit with its fingerprint, in no specified
    /// order
    pub fn commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let mut commits = Vec::new();

        for object_id in self.object_ids()? {
            if let Some(commit) = self.try_load_commit(&object_id)? {
                commits.push((object_id, commit));
            }
        }

        Ok(commits)
    }

    /// Resolve an abbreviated commit id to a full fingerprint.
    ///
    /// Linear scan over the stored commit fingerprints; the first one
    /// starting with the prefix wins, and ambiguous prefixes are not
    /// disambiguated. When nothing matches, the prefix is returned unchanged
    /// for the caller's lookup to fail on.
    pub fn resolve_short_id(&self, prefix: &str) -> anyhow::Result<String> {
        for object_id in self.object_ids()? {
            if object_id.as_ref().starts_with(prefix)
                && self.try_load_commit(&object_id)?.is_some()
            {
                return Ok(object_id.as_ref().to_string());
            }
        }

        Ok(prefix.to_string())
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_path = self.path.join(object_id.to_path());
        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        let object_content = Self::decompress(object_content.into())?;

        Ok(object_content)
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn temp_database() -> (assert_fs::TempDir, Database) {
        let dir = assert_fs::TempDir::new().expect("Failed to create temp dir");
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        (dir, database)
    }

    #[test]
    fn storing_a_commit_is_idempotent() {
        let (_dir, database) = temp_database();

        let first = database.store(Commit::bootstrap()).unwrap();
        let second = database.store(Commit::bootstrap()).unwrap();

        assert_eq!(first, second);
        assert_eq!(database.object_ids().unwrap().len(), 1);
    }

    #[test]
    fn loading_a_missing_commit_reports_not_found() {
        let (_dir, database) = temp_database();
        let oid = ObjectId::try_parse("a".repeat(40)).unwrap();

        assert!(database.try_load_commit(&oid).unwrap().is_none());
        assert!(database.load_commit(&oid).is_err());
    }

    #[test]
    fn short_id_resolution_falls_back_to_the_prefix() {
        let (_dir, database) = temp_database();

        let oid = database.store(Commit::bootstrap()).unwrap();
        let prefix = oid.to_short_oid();

        assert_eq!(
            database.resolve_short_id(&prefix).unwrap(),
            oid.as_ref().to_string()
        );
        assert_eq!(database.resolve_short_id("ffffffff").unwrap(), "ffffffff");
    }

    #[test]
    fn blob_fingerprints_do_not_resolve_as_commits() {
        let (_dir, database) = temp_database();

        let blob_oid = database.store(Blob::new("content".to_string())).unwrap();

        assert!(database.try_load_commit(&blob_oid).unwrap().is_none());
        assert_eq!(
            database.resolve_short_id(&blob_oid.to_short_oid()).unwrap(),
            blob_oid.to_short_oid()
        );
    }

    proptest! {
        #[test]
        fn blob_round_trips_through_the_store(content in ".*") {
            let (_dir, database) = temp_database();

            let blob = Blob::new(content.clone());
            let oid = database.store(blob).unwrap();

            let loaded = database.load_blob(&oid).unwrap();
            prop_assert_eq!(loaded.content(), content.as_str());
        }
    }
}
