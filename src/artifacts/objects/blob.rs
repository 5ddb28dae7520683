//! Blob object
//!
//! Blobs store file content. They contain only the raw file data, without any
//! metadata like filename (that lives in commit snapshots).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, ObjectKind, Packable};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};

/// Blob object representing one file's content at one point in time
///
/// Each unique file content is stored as a blob, identified by its SHA-1 hash.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: String,
}

impl Blob {
    /// Get the file content as a string
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content_bytes = self.content.as_bytes();

        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_kind().as_str(), content_bytes.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(content_bytes)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        let content = String::from_utf8(content)?;
        Ok(Self::new(content))
    }
}

impl Object for Blob {
    fn object_kind(&self) -> ObjectKind {
        ObjectKind::Blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;
    use std::io::Cursor;

    proptest! {
        #[test]
        fn serialization_round_trips(content in ".*") {
            let blob = Blob::new(content.clone());
            let bytes = blob.serialize().unwrap();

            let mut reader = Cursor::new(bytes);
            let kind = ObjectKind::parse_object_kind(&mut reader).unwrap();
            assert_eq!(kind, ObjectKind::Blob);

            let parsed = Blob::deserialize(reader).unwrap();
            assert_eq!(parsed.content(), content);
        }

        #[test]
        fn identical_content_hashes_identically(content in ".*") {
            let first = Blob::new(content.clone()).object_id().unwrap();
            let second = Blob::new(content).object_id().unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn different_content_yields_different_ids() {
        let one = Blob::new("one".to_string()).object_id().unwrap();
        let two = Blob::new("two".to_string()).object_id().unwrap();
        assert_ne!(one, two);
    }
}
