//! Object types and operations
//!
//! All repository content is stored as objects identified by SHA-1 hashes.
//! There are two kinds:
//!
//! - **Blob**: one file's content (raw bytes)
//! - **Commit**: a full path -> blob snapshot with parentage and metadata
//!
//! Both implement serialization/deserialization for the object format:
//! `<kind> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
