//! Staging area
//!
//! The index mediates working-directory to commit transitions through two
//! collections: names staged for addition (mapped to the blob id captured at
//! staging time) and names staged for removal. The two are disjoint at all
//! times; the staging operations below enforce that by lifting a name from
//! the opposite side before recording it.
//!
//! The whole index persists as a single `index <size>\0` record at
//! `.gitlet/index`, one `add <blob-id> <name>` or `rm <name>` line per entry.

use crate::artifacts::objects::object::{self, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use file_guard::Lock;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Read, Write};
use std::ops::DerefMut;
use std::path::Path;

/// Pending additions and removals for the next commit.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.gitlet/index`)
    path: Box<Path>,
    /// Names staged for addition, mapped to their staged blob id
    add_map: BTreeMap<String, ObjectId>,
    /// Names staged for removal
    rm_set: BTreeSet<String>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            add_map: BTreeMap::new(),
            rm_set: BTreeSet::new(),
        }
    }

    /// Reload the staging area from disk. A missing or empty file is an
    /// empty index.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.add_map.clear();
        self.rm_set.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path)
            .context("Unable to open the index file")?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut content = Vec::new();
        lock.deref_mut().read_to_end(&mut content)?;

        let mut reader = Cursor::new(content);
        let object_type = ObjectType::parse_header(&mut reader)?;
        if object_type != ObjectType::Index {
            anyhow::bail!("Corrupt index file: wrong record type");
        }

        self.parse_entries(reader)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let content = self.serialize()?;

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .context("Unable to open the index file")?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(&content)?;

        Ok(())
    }

    /// Stage a name for addition, lifting any pending removal of it.
    pub fn stage_add(&mut self, name: &str, oid: ObjectId) {
        self.rm_set.remove(name);
        self.add_map.insert(name.to_string(), oid);
    }

    pub fn unstage_add(&mut self, name: &str) {
        self.add_map.remove(name);
    }

    /// Stage a name for removal, lifting any pending addition of it.
    pub fn stage_remove(&mut self, name: &str) {
        self.add_map.remove(name);
        self.rm_set.insert(name.to_string());
    }

    pub fn lift_removal(&mut self, name: &str) {
        self.rm_set.remove(name);
    }

    pub fn clear(&mut self) {
        self.add_map.clear();
        self.rm_set.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.add_map.is_empty() && self.rm_set.is_empty()
    }

    pub fn is_staged_for_add(&self, name: &str) -> bool {
        self.add_map.contains_key(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.rm_set.contains(name)
    }

    pub fn add_map(&self) -> &BTreeMap<String, ObjectId> {
        &self.add_map
    }

    pub fn rm_set(&self) -> &BTreeSet<String> {
        &self.rm_set
    }

    fn parse_entries(&mut self, reader: impl std::io::BufRead) -> anyhow::Result<()> {
        let content = reader.bytes().collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        for line in content.lines() {
            if let Some(entry) = line.strip_prefix("add ") {
                let (oid, name) = entry
                    .split_once(' ')
                    .context("Corrupt index file: malformed add entry")?;
                self.add_map
                    .insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else if let Some(name) = line.strip_prefix("rm ") {
                self.rm_set.insert(name.to_string());
            } else {
                anyhow::bail!("Corrupt index file: unknown entry {:?}", line);
            }
        }

        Ok(())
    }
}

impl Packable for Index {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = Vec::new();

        for (name, oid) in &self.add_map {
            lines.push(format!("add {} {}", oid.as_ref(), name));
        }
        for name in &self.rm_set {
            lines.push(format!("rm {}", name));
        }

        object::frame(ObjectType::Index, lines.join("\n").as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use proptest::prelude::*;

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).expect("valid test id")
    }

    fn index_in(dir: &TempDir) -> Index {
        Index::new(dir.path().join("index").into_boxed_path())
    }

    #[test]
    fn test_staging_lifts_the_name_from_the_other_side() {
        let dir = TempDir::new().expect("temp dir");
        let mut index = index_in(&dir);

        index.stage_remove("a.txt");
        index.stage_add("a.txt", oid('a'));
        assert!(index.is_staged_for_add("a.txt"));
        assert!(!index.is_staged_for_removal("a.txt"));

        index.stage_remove("a.txt");
        assert!(!index.is_staged_for_add("a.txt"));
        assert!(index.is_staged_for_removal("a.txt"));
    }

    #[test]
    fn test_save_and_rehydrate_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let mut index = index_in(&dir);

        index.stage_add("a.txt", oid('a'));
        index.stage_add("with space.txt", oid('b'));
        index.stage_remove("old.txt");
        index.save().expect("savable");

        let mut reloaded = index_in(&dir);
        reloaded.rehydrate().expect("loadable");

        assert_eq!(reloaded.add_map(), index.add_map());
        assert_eq!(reloaded.rm_set(), index.rm_set());
    }

    #[test]
    fn test_rehydrate_without_a_file_is_empty() {
        let dir = TempDir::new().expect("temp dir");
        let mut index = index_in(&dir);

        index.stage_add("a.txt", oid('a'));
        index.rehydrate().expect("loadable");

        assert!(index.is_empty());
    }

    proptest! {
        /// `add_map` and `rm_set` stay disjoint under any operation sequence.
        #[test]
        fn test_staging_operations_keep_the_sides_disjoint(
            ops in proptest::collection::vec((0..4u8, "[a-c]"), 0..30)
        ) {
            let dir = TempDir::new().expect("temp dir");
            let mut index = index_in(&dir);

            for (op, name) in &ops {
                match op {
                    0 => index.stage_add(name, oid('a')),
                    1 => index.stage_remove(name),
                    2 => index.unstage_add(name),
                    _ => index.lift_removal(name),
                }

                let staged: Vec<_> = index.add_map().keys().collect();
                prop_assert!(staged.iter().all(|name| !index.is_staged_for_removal(name)));
            }
        }
    }
}
