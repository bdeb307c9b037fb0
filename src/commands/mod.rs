//! Command implementations
//!
//! User-facing operations, implemented as methods on `Repository` with one
//! file per command. Every mutating command reads the active branch, resolves
//! it to a commit, consults the staging area, and writes the updated state
//! back.

pub mod porcelain;
