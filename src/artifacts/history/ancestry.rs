//! Ancestor traversal over the commit DAG
//!
//! This module implements the two graph operations merging needs: the full
//! ancestor set of a commit, and the split point (merge base) of two branch
//! tips.
//!
//! ## Algorithm
//!
//! `split_point` is a first-common-ancestor search, not a generalized
//! lowest-common-ancestor solver:
//!
//! 1. Enumerate every ancestor of the first tip into a set, breadth-first.
//! 2. Walk the second tip's ancestors breadth-first in discovery order and
//!    return the first one that is a member of the set.
//!
//! In histories with multiple merge bases (criss-cross merges) this yields
//! *a* common ancestor — whichever BFS discovers first — which is the
//! documented behavior for this system's linear-history-biased usage.
//! Both traversals keep a visited set, so histories containing cycles
//! still terminate.
//!
//! ## Debug Logging
//!
//! Build with the `debug_merge` feature to trace the traversal order:
//! ```toml
//! # In Cargo.toml
//! [features]
//! debug_merge = []
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Macro for debug logging that is enabled with the debug_merge feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

/// Finds ancestors and split points in the commit DAG
///
/// Takes a generic function that loads the parent fingerprints of any given
/// commit, making it flexible enough to work with different storage backends
/// (object database, in-memory test store).
#[derive(Debug, Clone)]
pub struct AncestryFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    /// Function to load the parent commit IDs of any given commit
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> AncestryFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    /// Creates a new finder with the given parent loader function
    ///
    /// The loader must return an empty vector for root commits.
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        Self { parent_loader }
    }

    /// Enumerate every fingerprint reachable from `tip` via parent links,
    /// including `tip` itself
    pub fn ancestors_of(&self, tip: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::new();
        let mut fringe = VecDeque::from([tip.clone()]);

        while let Some(commit_id) = fringe.pop_front() {
            if !visited.insert(commit_id.clone()) {
                continue;
            }

            debug_log!("visiting ancestor {}", &commit_id);

            for parent_id in (self.parent_loader)(&commit_id)? {
                if !visited.contains(&parent_id) {
                    fringe.push_back(parent_id);
                }
            }
        }

        Ok(visited)
    }

    /// Find the split point of two branch tips
    ///
    /// Walks `theirs`' ancestors breadth-first in discovery order and returns
    /// the first one that is also an ancestor of `ours`. Returns None only
    /// when the tips share no history at all.
    pub fn split_point(
        &self,
        ours: &ObjectId,
        theirs: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let our_ancestors = self.ancestors_of(ours)?;

        let mut visited = HashSet::new();
        let mut fringe = VecDeque::from([theirs.clone()]);

        while let Some(commit_id) = fringe.pop_front() {
            if !visited.insert(commit_id.clone()) {
                continue;
            }

            if our_ancestors.contains(&commit_id) {
                debug_log!("split point found: {}", &commit_id);
                return Ok(Some(commit_id));
            }

            for parent_id in (self.parent_loader)(&commit_id)? {
                if !visited.contains(&parent_id) {
                    fringe.push_back(parent_id);
                }
            }
        }

        Ok(None)
    }
}
