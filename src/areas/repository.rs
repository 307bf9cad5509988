//! Repository facade
//!
//! `Repository` threads the repository root through every area (database,
//! index, refs, workspace) and owns the output writer. It is the receiver
//! for every command implementation under `crate::commands`; the areas stay
//! path-parameterized so the remote commands can instantiate them over a
//! mirrored repository as well.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::abort::Abort;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::remote::Remote;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Repository directory name
pub const GITLET_DIR: &str = ".gitlet";

/// Index file name
pub const INDEX_FILE: &str = "index";

/// Remote records directory name
pub const REMOTES_DIR: &str = "remotes";

/// A repository rooted at a working directory.
pub struct Repository {
    /// Working-directory root
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Object store
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// Branch refs and HEAD
    refs: Refs,
    /// Staging area
    index: RefCell<Index>,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> Self {
        let gitlet_path = path.join(GITLET_DIR);

        Repository {
            database: Database::new(gitlet_path.clone().into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(gitlet_path.clone().into_boxed_path()),
            index: RefCell::new(Index::new(
                gitlet_path.join(INDEX_FILE).into_boxed_path(),
            )),
            writer: RefCell::new(writer),
            path: path.into_boxed_path(),
        }
    }

    pub fn gitlet_path(&self) -> PathBuf {
        self.path.join(GITLET_DIR)
    }

    pub fn remotes_path(&self) -> PathBuf {
        self.gitlet_path().join(REMOTES_DIR)
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
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

    pub fn index(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    pub fn current_branch(&self) -> anyhow::Result<String> {
        self.refs.read_head()
    }

    pub fn head_commit_id(&self) -> anyhow::Result<ObjectId> {
        let branch = self.current_branch()?;
        self.refs
            .read_branch(&branch)?
            .with_context(|| format!("HEAD names a missing branch {}", branch))
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let oid = self.head_commit_id()?;
        self.database.load_commit(&oid)
    }

    /// Resolve a commit token (full id or prefix) or abort with the
    /// user-facing error.
    pub fn resolve_commit(&self, token: &str) -> anyhow::Result<(ObjectId, Commit)> {
        match self.database.resolve_prefix(token)? {
            Some(oid) => {
                let commit = self.database.load_commit(&oid)?;
                Ok((oid, commit))
            }
            None => Err(Abort::NoSuchCommit.into()),
        }
    }

    pub fn load_remote(&self, name: &str) -> anyhow::Result<Option<Remote>> {
        let remote_path = self.remotes_path().join(name);
        if !remote_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read(&remote_path)
            .with_context(|| format!("Unable to read remote record {}", name))?;
        let mut reader = Cursor::new(content);

        let object_type = ObjectType::parse_header(&mut reader)?;
        if object_type != ObjectType::Remote {
            anyhow::bail!("Corrupt remote record {}", name);
        }

        Ok(Some(Remote::deserialize(reader)?))
    }

    pub fn save_remote(&self, remote: &Remote) -> anyhow::Result<()> {
        let remote_path = self.remotes_path().join(remote.name());
        std::fs::write(&remote_path, remote.serialize()?)
            .with_context(|| format!("Unable to write remote record {}", remote.name()))
    }

    pub fn delete_remote(&self, name: &str) -> anyhow::Result<()> {
        std::fs::remove_file(self.remotes_path().join(name))
            .with_context(|| format!("Unable to delete remote record {}", name))
    }
}
