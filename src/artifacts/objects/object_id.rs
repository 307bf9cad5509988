//! Object identifier (SHA-1 hash)
//!
//! Object ids are 40-character hexadecimal strings. Blobs are named by the
//! digest of their content, commits by the digest of their encoded record,
//! and both are stored under their full id in the object store.

use crate::artifacts::objects::OBJECT_ID_LENGTH;

/// A validated 40-hex object id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object id from a string.
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Get the abbreviated form used in log merge lines.
    ///
    /// # Returns
    ///
    /// First 7 characters of the id
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    proptest! {
        #[test]
        fn test_valid_hex_of_full_length_parses(id in "[0-9a-f]{40}") {
            assert!(ObjectId::try_parse(id).is_ok());
        }

        #[test]
        fn test_wrong_length_is_rejected(id in "[0-9a-f]{0,39}") {
            assert!(ObjectId::try_parse(id).is_err());
        }

        #[test]
        fn test_non_hex_characters_are_rejected(id in "[g-z]{40}") {
            assert!(ObjectId::try_parse(id).is_err());
        }
    }

    #[test]
    fn test_short_oid_is_seven_characters() {
        let oid = ObjectId::try_parse("0123456789abcdef0123456789abcdef01234567".to_string())
            .expect("valid id");
        assert_eq!(oid.to_short_oid(), "0123456");
    }
}
