//! Content-addressable object store
//!
//! One file per object under `.grit/objects/`, named by the full 40-hex SHA-1
//! of its serialized form. The layout is flat. Objects are immutable: a hash
//! that already exists is never rewritten, and nothing is ever deleted.
//!
//! Writes go through a temp file in the same directory followed by a rename,
//! so a crashed write never leaves a half-written object under its final name.

use crate::artifacts::errors::ObjectNotFound;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectKind, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct ObjectStore {
    /// Path to the objects directory (typically `.grit/objects`)
    path: Box<Path>,
}

impl ObjectStore {
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist an object and return its hash. Idempotent: storing content that
    /// already exists is a no-op.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    /// Persist already-serialized bytes under a known hash. Used when copying
    /// objects between repositories, where the hash is taken on trust.
    pub fn store_raw(&self, object_id: &ObjectId, content: Bytes) -> anyhow::Result<()> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            self.write_object(object_path, content)?;
        }

        Ok(())
    }

    pub fn load_raw(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        match std::fs::read(&object_path) {
            Ok(content) => Ok(Bytes::from(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ObjectNotFound(object_id.clone()).into())
            }
            Err(err) => Err(err).context(format!(
                "Unable to read object file {}",
                object_path.display()
            )),
        }
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).exists()
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let (kind, reader) = self.load_kinded(object_id)?;
        anyhow::ensure!(
            kind == ObjectKind::Blob,
            "Object {object_id} is a {kind}, expected a blob"
        );

        Blob::deserialize(reader)
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let (kind, reader) = self.load_kinded(object_id)?;
        anyhow::ensure!(
            kind == ObjectKind::Commit,
            "Object {object_id} is a {kind}, expected a commit"
        );

        Commit::deserialize(reader)
    }

    /// Find all stored objects whose hash starts with `prefix`. Used to
    /// resolve abbreviated commit ids; more than one match means the prefix is
    /// ambiguous.
    pub fn find_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();

        if !self.path.exists() {
            return Ok(matches);
        }

        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            // temp files and anything else non-hex fail to parse and are skipped
            if file_name.starts_with(prefix)
                && let Ok(object_id) = ObjectId::try_parse(file_name.to_string())
            {
                matches.push(object_id);
            }
        }

        matches.sort();
        Ok(matches)
    }

    fn load_kinded(&self, object_id: &ObjectId) -> anyhow::Result<(ObjectKind, impl std::io::BufRead)> {
        let content = self.load_raw(object_id)?;
        let mut reader = Cursor::new(content);

        let kind = ObjectKind::parse_object_kind(&mut reader)?;
        Ok((kind, reader))
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.path).context(format!(
            "Unable to create objects directory {}",
            self.path.display()
        ))?;
        let temp_object_path = self.path.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
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

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
