//! Working-tree switching
//!
//! - `switchover`: materializes a commit's tracked files into the working
//!   directory, with the untracked-file conflict pre-check

pub mod switchover;
