//! Blob object
//!
//! A blob holds one file's content and nothing else. Unlike every other
//! record, a blob's id is the digest of the raw content, not of the framed
//! record, so the id can be computed straight from a working file.

use crate::artifacts::objects::object::{self, Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Immutable file content keyed by its own digest.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: String,
}

impl Blob {
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        object::frame(ObjectType::Blob, self.content.as_bytes())
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let content = reader.bytes().collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        Ok(Self::new(content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    // Blob ids hash the raw content, not the framed record.
    fn object_id(&self) -> anyhow::Result<ObjectId> {
        object::digest(self.content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_blob_id_depends_only_on_content() {
        let blob = Blob::new("hello\n".to_string());
        let same = Blob::new("hello\n".to_string());
        let other = Blob::new("goodbye\n".to_string());

        assert_eq!(
            blob.object_id().expect("hashable"),
            same.object_id().expect("hashable")
        );
        assert_ne!(
            blob.object_id().expect("hashable"),
            other.object_id().expect("hashable")
        );
    }

    #[test]
    fn test_blob_round_trips_through_encoding() {
        let blob = Blob::new("some file content".to_string());
        let encoded = blob.serialize().expect("encodable");

        let mut reader = Cursor::new(encoded);
        ObjectType::parse_header(&mut reader).expect("valid header");
        let decoded = Blob::deserialize(reader).expect("decodable");

        assert_eq!(decoded, blob);
    }
}
