//! Three-way merge outcome classification
//!
//! For every path present in the split-point snapshot, the blob fingerprints
//! at the split point (`base`), the current branch tip (`current`) and the
//! other branch tip (`other`) determine the outcome:
//!
//! - only the other side changed (or deleted) the file → take its version
//! - only the current side changed it → keep ours, no action
//! - both changed it the same way → no action
//! - both changed it differently → conflict
//!
//! A missing fingerprint means the side deleted the file; two absent sides
//! compare equal.

use crate::artifacts::objects::object_id::ObjectId;

/// Outcome of classifying one split-point path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolution {
    /// Other branch changed the file, current did not: stage other's version
    TakeOther(ObjectId),
    /// Other branch deleted the file, current did not change it: stage a
    /// removal
    RemoveFile,
    /// Current's version survives unchanged, nothing to stage
    KeepCurrent,
    /// Both sides changed the file in different ways
    Conflict {
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

/// Classify a path present in the split-point snapshot
pub fn classify(
    base: &ObjectId,
    current: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> PathResolution {
    let current_changed = current != Some(base);
    let other_changed = other != Some(base);

    match (current_changed, other_changed) {
        (false, true) => match other {
            Some(other) => PathResolution::TakeOther(other.clone()),
            None => PathResolution::RemoveFile,
        },
        (true, true) if current != other => PathResolution::Conflict {
            current: current.cloned(),
            other: other.cloned(),
        },
        _ => PathResolution::KeepCurrent,
    }
}

/// Render a conflicted file body from the two sides' contents
///
/// Deleted sides contribute empty content.
pub fn conflict_markers(current: &str, other: &str) -> String {
    format!("<<<<<<< HEAD\n{current}=======\n{other}>>>>>>>\n")
}
