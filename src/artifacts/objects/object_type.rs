//! Record type tags
//!
//! Every on-disk record starts with a `<type> <size>\0` header. The type tag
//! tells the reader which decoder to apply.

use anyhow::Context;
use std::io::BufRead;

/// Kind of an encoded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
    Index,
    Remote,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
            ObjectType::Index => "index",
            ObjectType::Remote => "remote",
        }
    }

    pub fn try_parse(token: &str) -> anyhow::Result<Self> {
        match token {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            "index" => Ok(ObjectType::Index),
            "remote" => Ok(ObjectType::Remote),
            _ => Err(anyhow::anyhow!("Unknown object type: {}", token)),
        }
    }

    /// Consume the `<type> <size>\0` header off the front of a record and
    /// return the type tag. The reader is left at the record content.
    pub fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<Self> {
        let mut header = Vec::new();
        reader
            .read_until(0, &mut header)
            .context("Unable to read object header")?;

        if header.pop() != Some(0) {
            anyhow::bail!("Malformed object header: missing NUL terminator");
        }

        let header = String::from_utf8(header).context("Malformed object header")?;
        let (kind, _size) = header
            .split_once(' ')
            .context("Malformed object header: missing size")?;

        Self::try_parse(kind)
    }
}
