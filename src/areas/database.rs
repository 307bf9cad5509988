//! Object store
//!
//! Content-addressable storage for blobs and commits. Records live under
//! `.gitlet/blobs/<id>` and `.gitlet/commits/<id>` with the full 40-hex id
//! as the filename. The store is append-only: a second write of an existing
//! id is a no-op, and there is no deletion API.

use crate::artifacts::graph::SlimCommit;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

const BLOBS_DIR: &str = "blobs";
const COMMITS_DIR: &str = "commits";

/// Blob and commit storage rooted at a `.gitlet` directory.
#[derive(Debug, new)]
pub struct Database {
    /// Path to the repository's `.gitlet` root
    path: Box<Path>,
}

impl Database {
    pub fn blobs_path(&self) -> PathBuf {
        self.path.join(BLOBS_DIR)
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join(COMMITS_DIR)
    }

    fn dir_for(&self, object_type: ObjectType) -> anyhow::Result<PathBuf> {
        match object_type {
            ObjectType::Blob => Ok(self.blobs_path()),
            ObjectType::Commit => Ok(self.commits_path()),
            other => Err(anyhow::anyhow!(
                "{} records are not kept in the object store",
                other.as_str()
            )),
        }
    }

    /// Store a record under its own id. Idempotent: an id that is already
    /// present is left untouched.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let oid = object.object_id()?;
        let object_path = self.dir_for(object.object_type())?.join(oid.as_ref());

        if !object_path.exists() {
            std::fs::create_dir_all(object_path.parent().context("Invalid object path")?)
                .with_context(|| {
                    format!("Unable to create object directory for {}", oid)
                })?;
            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(oid)
    }

    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let (object_type, reader) = self.open_record(self.blobs_path().join(oid.as_ref()))?;
        if object_type != ObjectType::Blob {
            anyhow::bail!("Object {} is not a blob", oid);
        }

        Blob::deserialize(reader)
    }

    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, reader) = self.open_record(self.commits_path().join(oid.as_ref()))?;
        if object_type != ObjectType::Commit {
            anyhow::bail!("Object {} is not a commit", oid);
        }

        Commit::deserialize(reader)
    }

    /// Load the parent-link view of a commit for graph traversal.
    pub fn slim_commit(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit> {
        let commit = self.load_commit(oid)?;
        let parents = commit
            .parent()
            .into_iter()
            .chain(commit.parent2())
            .cloned()
            .collect();

        Ok(SlimCommit {
            oid: oid.clone(),
            parents,
        })
    }

    pub fn contains_commit(&self, oid: &ObjectId) -> bool {
        self.commits_path().join(oid.as_ref()).is_file()
    }

    /// Resolve a possibly abbreviated commit id.
    ///
    /// A token shorter than a full id is a prefix lookup that returns the
    /// first match in directory-listing order; a full-length token is an
    /// exact lookup; anything longer matches nothing.
    pub fn resolve_prefix(&self, token: &str) -> anyhow::Result<Option<ObjectId>> {
        if token.len() > OBJECT_ID_LENGTH {
            return Ok(None);
        }

        if token.len() == OBJECT_ID_LENGTH {
            return match ObjectId::try_parse(token.to_string()) {
                Ok(oid) if self.contains_commit(&oid) => Ok(Some(oid)),
                _ => Ok(None),
            };
        }

        for entry in std::fs::read_dir(self.commits_path())
            .context("Unable to list the commit directory")?
        {
            let name = entry?.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(token) {
                return Ok(Some(ObjectId::try_parse(name.into_owned())?));
            }
        }

        Ok(None)
    }

    /// Every commit id in the store, in directory-listing order.
    pub fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut oids = Vec::new();

        for entry in std::fs::read_dir(self.commits_path())
            .context("Unable to list the commit directory")?
        {
            let name = entry?.file_name();
            oids.push(ObjectId::try_parse(name.to_string_lossy().into_owned())?);
        }

        Ok(oids)
    }

    fn open_record(&self, path: PathBuf) -> anyhow::Result<(ObjectType, impl std::io::BufRead)> {
        let content = std::fs::read(&path)
            .with_context(|| format!("Unable to read object file {}", path.display()))?;
        let mut reader = Cursor::new(Bytes::from(content));

        let object_type = ObjectType::parse_header(&mut reader)?;
        Ok((object_type, reader))
    }

    fn write_object(&self, object_path: PathBuf, content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path.parent().context("Invalid object path")?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("Unable to open object file {}", temp_object_path.display())
            })?;
        file.write_all(&content).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
