//! Retargeting module
//!
//! Takes a populated role → bone map and drives a target mesh pose from
//! tracked skeleton frames:
//! - `RetargetProfile`: per-target configuration and the derived
//!   parent-before-child cached bone list
//! - Basis correction: aligning the tracked basis with the mesh rest
//!   basis, including mirrored rigs
//! - `PoseApplier`: the allocation-free per-frame pose write

pub mod basis;
pub mod profile;
pub mod apply;

pub use basis::{calculate_elbow_length, estimate_auto_map_rotation, mirror_rotation};
pub use profile::{CachedBoneLink, RetargetProfile};
pub use apply::PoseApplier;
