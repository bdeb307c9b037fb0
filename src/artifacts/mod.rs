//! Data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `checkout`: working-tree switching and untracked-file conflict detection
//! - `core`: shared utilities (pager wrapper)
//! - `history`: commit DAG traversal (ancestor sets, split-point search)
//! - `merge`: three-way merge classification and conflict rendering
//! - `objects`: object types (blob, commit)

pub mod checkout;
pub mod core;
pub mod history;
pub mod merge;
pub mod objects;
