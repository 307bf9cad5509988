//! Remote record
//!
//! A remote is a purely local alias: a name mapped to the path of another
//! repository's `.gitlet` root. Because every area type is parameterized by
//! its root path, a remote can hand out the same database/refs/workspace
//! views over the mirrored repository.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::repository::INDEX_FILE;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object::{self, Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;
use std::path::PathBuf;

/// Required tail of every remote path operand.
pub const GITLET_SUFFIX: &str = "/.gitlet";

/// Named pointer to another repository's `.gitlet` root.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Remote {
    name: String,
    path: String,
}

impl Remote {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The mirrored repository's `.gitlet` root.
    pub fn gitlet_path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }

    /// The mirrored repository's working directory (the parent of `.gitlet`).
    pub fn work_dir(&self) -> PathBuf {
        self.gitlet_path()
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    }

    pub fn repository_exists(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    pub fn database(&self) -> Database {
        Database::new(self.gitlet_path().into_boxed_path())
    }

    pub fn refs(&self) -> Refs {
        Refs::new(self.gitlet_path().into_boxed_path())
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::new(self.work_dir().into_boxed_path())
    }

    pub fn index(&self) -> Index {
        Index::new(self.gitlet_path().join(INDEX_FILE).into_boxed_path())
    }
}

impl Packable for Remote {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = format!("{}\n{}", self.name, self.path);
        object::frame(ObjectType::Remote, content.as_bytes())
    }
}

impl Unpackable for Remote {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader.bytes().collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (name, path) = content
            .split_once('\n')
            .context("Invalid remote record: missing path")?;

        Ok(Remote::new(name.to_string(), path.to_string()))
    }
}

impl Object for Remote {
    fn object_type(&self) -> ObjectType {
        ObjectType::Remote
    }
}
