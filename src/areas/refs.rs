//! Branch refs and the HEAD pointer
//!
//! A branch is a file under `.gitlet/refs/` whose content is a 40-hex commit
//! id. Remote-tracking branches use two-segment names (`remote/branch`) and
//! live in a matching nested directory. HEAD is a file holding the path-like
//! name of the current branch's ref file (`refs/<branch>`); it always names
//! a branch, never a commit.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Branch every repository starts on.
pub const DEFAULT_BRANCH: &str = "master";

const HEAD_FILE: &str = "HEAD";
const REFS_DIR: &str = "refs";

/// Ref storage rooted at a `.gitlet` directory.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository's `.gitlet` root
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_FILE)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join(REFS_DIR)
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.refs_path().join(name)
    }

    /// Read the name of the branch HEAD points at.
    pub fn read_head(&self) -> anyhow::Result<String> {
        let content = std::fs::read_to_string(self.head_path())
            .context("Unable to read the HEAD file")?;

        content
            .trim()
            .strip_prefix("refs/")
            .map(str::to_string)
            .context("Malformed HEAD file")
    }

    /// Point HEAD at an existing branch.
    pub fn write_head(&self, branch: &str) -> anyhow::Result<()> {
        if !self.branch_exists(branch) {
            anyhow::bail!("branch {} does not exist", branch);
        }

        self.write_ref_file(&self.head_path(), &format!("refs/{}", branch))
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.branch_path(name).is_file()
    }

    pub fn read_branch(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);
        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("Unable to read ref file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Point a branch at a commit, creating the ref file (and any nested
    /// namespace directories) if needed.
    pub fn write_branch(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);
        std::fs::create_dir_all(branch_path.parent().with_context(|| {
            format!("Invalid branch path {:?}", branch_path)
        })?)?;

        self.write_ref_file(&branch_path, oid.as_ref())
    }

    pub fn delete_branch(&self, name: &str) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("Unable to delete branch file at {:?}", branch_path))?;
        self.prune_empty_parent_dirs(&branch_path)?;

        Ok(())
    }

    /// All branch names, namespaced ones in `remote/branch` form, sorted
    /// lexicographically.
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let refs_path = self.refs_path();
        let mut branches = WalkDir::new(&refs_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&refs_path).ok()?;
                Some(relative_path.to_string_lossy().into_owned())
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn write_ref_file(&self, path: &Path, content: &str) -> anyhow::Result<()> {
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Unable to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(content.as_bytes())?;

        Ok(())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if parent != self.refs_path().as_path() && parent.read_dir()?.next().is_none() {
                std::fs::remove_dir(parent)
                    .with_context(|| format!("Unable to remove empty ref directory {:?}", parent))?;
                self.prune_empty_parent_dirs(parent)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).expect("valid test id")
    }

    fn refs_in(dir: &TempDir) -> Refs {
        Refs::new(dir.path().to_path_buf().into_boxed_path())
    }

    #[test]
    fn test_branch_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let refs = refs_in(&dir);

        refs.write_branch("master", &oid('a')).expect("writable");
        assert_eq!(refs.read_branch("master").expect("readable"), Some(oid('a')));
        assert!(refs.read_branch("dev").expect("readable").is_none());
    }

    #[test]
    fn test_head_names_an_existing_branch_only() {
        let dir = TempDir::new().expect("temp dir");
        let refs = refs_in(&dir);

        assert!(refs.write_head("master").is_err());

        refs.write_branch("master", &oid('a')).expect("writable");
        refs.write_head("master").expect("writable");
        assert_eq!(refs.read_head().expect("readable"), "master");
    }

    #[test]
    fn test_namespaced_branches_nest_and_list_flat() {
        let dir = TempDir::new().expect("temp dir");
        let refs = refs_in(&dir);

        refs.write_branch("origin/master", &oid('a')).expect("writable");
        refs.write_branch("master", &oid('b')).expect("writable");

        assert!(dir.path().join("refs/origin/master").is_file());
        assert_eq!(
            refs.list_branches().expect("listable"),
            vec!["master".to_string(), "origin/master".to_string()]
        );
    }

    #[test]
    fn test_deleting_a_namespaced_branch_prunes_its_directory() {
        let dir = TempDir::new().expect("temp dir");
        let refs = refs_in(&dir);

        refs.write_branch("origin/master", &oid('a')).expect("writable");
        refs.delete_branch("origin/master").expect("deletable");

        assert!(!dir.path().join("refs/origin").exists());
        assert!(dir.path().join("refs").exists());
    }
}
