//! Commit object
//!
//! A commit is an immutable snapshot: a log message, a timestamp, up to two
//! parent ids (the second only for merges), and a sorted mapping of file
//! names to blob ids.
//!
//! ## Format
//!
//! On disk (after the `commit <size>\0` header), in fixed order:
//!
//! ```text
//! parent <id>            (absent for the initial commit)
//! parent2 <id>           (merge commits only)
//! timestamp <unix-secs>
//! file <blob-id> <name>  (one per entry, sorted by name)
//!
//! <log message>
//! ```
//!
//! The encoding is part of the identity contract: the initial commit has a
//! fixed message, the epoch timestamp, and an empty file map, so its id is
//! the same in every fresh repository.

use crate::artifacts::objects::object::{self, Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Message carried by the deterministic root commit of every repository.
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

const DISPLAY_ZONE_HOURS: i32 = 8;

/// The fixed GMT-8 zone all timestamps are displayed in.
pub fn display_zone() -> FixedOffset {
    FixedOffset::west_opt(DISPLAY_ZONE_HOURS * 3600).expect("fixed display offset")
}

/// The current instant, pinned to the display zone.
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&display_zone())
}

fn from_unix_seconds(seconds: i64) -> anyhow::Result<DateTime<FixedOffset>> {
    DateTime::from_timestamp(seconds, 0)
        .map(|instant| instant.with_timezone(&display_zone()))
        .with_context(|| format!("Invalid commit timestamp {}", seconds))
}

/// One node of the commit graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    parent: Option<ObjectId>,
    parent2: Option<ObjectId>,
    file_map: BTreeMap<String, ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        parent: Option<ObjectId>,
        parent2: Option<ObjectId>,
        file_map: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parent,
            parent2,
            file_map,
        }
    }

    /// The deterministic root commit: no parents, no files, epoch timestamp.
    pub fn initial() -> Self {
        let epoch = DateTime::from_timestamp(0, 0)
            .expect("epoch timestamp")
            .with_timezone(&display_zone());

        Commit::new(
            INITIAL_COMMIT_MESSAGE.to_string(),
            epoch,
            None,
            None,
            BTreeMap::new(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn parent2(&self) -> Option<&ObjectId> {
        self.parent2.as_ref()
    }

    pub fn file_map(&self) -> &BTreeMap<String, ObjectId> {
        &self.file_map
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.file_map.contains_key(name)
    }

    pub fn blob_id(&self, name: &str) -> Option<&ObjectId> {
        self.file_map.get(name)
    }

    /// Format the timestamp for log output, e.g.
    /// "Wed Dec 31 16:00:00 1969 -0800".
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut fields = vec![];

        if let Some(parent) = &self.parent {
            fields.push(format!("parent {}", parent.as_ref()));
        }
        if let Some(parent2) = &self.parent2 {
            fields.push(format!("parent2 {}", parent2.as_ref()));
        }
        fields.push(format!("timestamp {}", self.timestamp.timestamp()));
        for (name, blob_id) in &self.file_map {
            fields.push(format!("file {} {}", blob_id.as_ref(), name));
        }

        let content = format!("{}\n\n{}", fields.join("\n"), self.message);
        object::frame(ObjectType::Commit, content.as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader.bytes().collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (fields, message) = content
            .split_once("\n\n")
            .context("Invalid commit record: missing message separator")?;

        let mut parent = None;
        let mut parent2 = None;
        let mut timestamp = None;
        let mut file_map = BTreeMap::new();

        for line in fields.lines() {
            if let Some(id) = line.strip_prefix("parent2 ") {
                parent2 = Some(ObjectId::try_parse(id.to_string())?);
            } else if let Some(id) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(id.to_string())?);
            } else if let Some(seconds) = line.strip_prefix("timestamp ") {
                let seconds = seconds
                    .parse::<i64>()
                    .context("Invalid commit record: malformed timestamp")?;
                timestamp = Some(from_unix_seconds(seconds)?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (blob_id, name) = entry
                    .split_once(' ')
                    .context("Invalid commit record: malformed file entry")?;
                file_map.insert(name.to_string(), ObjectId::try_parse(blob_id.to_string())?);
            } else {
                anyhow::bail!("Invalid commit record: unknown field {:?}", line);
            }
        }

        let timestamp = timestamp.context("Invalid commit record: missing timestamp")?;

        Ok(Commit::new(
            message.to_string(),
            timestamp,
            parent,
            parent2,
            file_map,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
