//! Bone hierarchy module
//!
//! Indexed representation of a mesh skeleton and read-only queries over it:
//! - `MeshSkeleton`: flat (name, parent index, rest transform) input list
//! - `IndexedBoneList`: validated tree with child links and optional
//!   name-sorted view
//! - Chain queries: depth to root, longest descendant chain, child-count
//!   shortlisting
//! - `MeshPose`: per-bone pose array written by the retargeting applier

pub mod indexed;
pub mod chain;
pub mod mesh;

pub use indexed::{IndexedBone, IndexedBoneList};
pub use mesh::{BonePose, MeshBoneDesc, MeshPose, MeshSkeleton};
