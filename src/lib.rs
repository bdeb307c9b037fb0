//! jot — a minimal snapshot version-control engine
//!
//! The crate is organized the way the repository state is layered:
//!
//! - `areas`: the persistent state areas (object database, staging area,
//!   refs, workspace) and the `Repository` handle tying them together
//! - `artifacts`: data structures and algorithms (objects, history
//!   traversal, checkout, merge resolution)
//! - `commands`: the user-facing operations, implemented as methods on
//!   `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
