//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`BodymapError`] covers the failure modes of
//! bone-tree construction and hierarchy queries:
//! - Malformed input skeletons (missing/duplicate root, bad parent links)
//! - Out-of-range bone indices passed to traversal queries
//!
//! A role that cannot be matched during auto-mapping is *not* an error:
//! it degrades to an explicitly-unassigned mapping entry instead.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, BodymapError>`.

use thiserror::Error;

/// The main error type for the bodymap crate.
///
/// Structural variants are fatal to an auto-mapping pass: no partial
/// mapping is published when one is raised. `InvalidBoneIndex` signals
/// caller misuse of a traversal query and is not expected in normal
/// operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BodymapError {
    // ========================================================================
    // Structural skeleton errors
    // ========================================================================
    /// No bone in the skeleton has a parent index of -1.
    #[error("skeleton has no root bone (expected exactly one bone with parent index -1)")]
    MissingRoot,

    /// More than one bone claims to be the root.
    #[error("skeleton has multiple root bones (indices {first} and {second})")]
    MultipleRoots {
        /// Index of the first root encountered
        first: usize,
        /// Index of the second root encountered
        second: usize,
    },

    /// A bone's parent index points outside the valid range.
    ///
    /// Parents must appear earlier in the bone list than their children,
    /// so any parent index not in `-1..index` is rejected at build time.
    #[error("bone '{name}' (index {index}) has invalid parent index {parent_index}")]
    ParentOutOfRange {
        /// Name of the offending bone
        name: String,
        /// Position of the offending bone in the flat list
        index: usize,
        /// The rejected parent index
        parent_index: i32,
    },

    // ========================================================================
    // Query errors
    // ========================================================================
    /// A traversal query was called with an out-of-range bone index.
    #[error("bone index {index} out of range (bone count: {count})")]
    InvalidBoneIndex {
        /// The rejected index
        index: usize,
        /// Number of bones in the indexed list
        count: usize,
    },
}

/// Alias for `Result<T, BodymapError>`.
pub type Result<T> = std::result::Result<T, BodymapError>;
