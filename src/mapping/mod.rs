//! Role mapping module
//!
//! Pairs abstract anatomical bone roles with bones of a concrete mesh
//! skeleton:
//! - `BoneRole` / `RigTarget`: the role space auto-mapping populates
//! - `SearchNameSet`: per-role candidate substrings for fuzzy matching
//! - `AutoRigMapper`: orchestrates name matching and chain analysis into
//!   a complete role → bone-name map

pub mod roles;
pub mod names;
pub mod auto;

pub use roles::{BoneRole, Finger, FingerJoint, RigTarget, RoleBoneMap, Side};
pub use names::{select_bones, select_first_bone, SearchNameSet};
pub use auto::{AutoMapConfig, AutoRigMapper};
