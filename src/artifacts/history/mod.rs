//! Commit DAG traversal
//!
//! - `ancestry`: breadth-first ancestor enumeration and the split-point
//!   (first common ancestor) search used as the three-way-merge base

pub mod ancestry;
