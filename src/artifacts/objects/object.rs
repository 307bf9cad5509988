//! Core object traits
//!
//! All persisted records implement the same pair of codec traits:
//! - `Packable`: encode to the canonical `<type> <size>\0<content>` framing
//! - `Unpackable`: decode from a reader positioned after the header
//!
//! The encoding is canonical on purpose: equal values encode to equal bytes,
//! and commit identity is the digest of the encoded record. Changing any
//! field order or separator is a format break.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Write};

/// Trait for encoding records to their canonical byte form.
pub trait Packable {
    /// Serialize the record to bytes (including header).
    fn serialize(&self) -> Result<Bytes>;
}

/// Trait for decoding records from their canonical byte form.
pub trait Unpackable {
    /// Deserialize the record from a reader (header already consumed).
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// A record addressable by digest in the object store.
pub trait Object: Packable {
    /// Get the record's type tag.
    fn object_type(&self) -> ObjectType;

    /// Compute the object id as the SHA-1 digest of the encoded record.
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        digest(&content)
    }
}

/// Hash a byte slice into an object id.
pub fn digest(content: &[u8]) -> Result<ObjectId> {
    let mut hasher = Sha1::new();
    hasher.update(content);

    let oid = hasher.finalize();
    ObjectId::try_parse(format!("{oid:x}"))
}

/// Build the framed record `<type> <size>\0<content>`.
pub fn frame(object_type: ObjectType, content: &[u8]) -> Result<Bytes> {
    let mut record = Vec::new();
    let header = format!("{} {}\0", object_type.as_str(), content.len());
    record.write_all(header.as_bytes())?;
    record.write_all(content)?;

    Ok(Bytes::from(record))
}
