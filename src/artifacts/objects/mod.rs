//! Object types and operations
//!
//! All repository content is stored as objects identified by SHA-1
//! fingerprints. There are two types:
//!
//! - **Blob**: raw file content
//! - **Commit**: a snapshot record (message, timestamp, tracked files,
//!   up to two parent links)
//!
//! Both serialize to the object format `<type> <size>\0<content>`, and an
//! object's fingerprint is the SHA-1 of that serialized form.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
