#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod errors;
pub mod skeleton;
pub mod mapping;
pub mod tracking;
pub mod retarget;

pub use errors::{BodymapError, Result};
pub use skeleton::{BonePose, IndexedBone, IndexedBoneList, MeshBoneDesc, MeshPose, MeshSkeleton};
pub use mapping::{
    AutoMapConfig, AutoRigMapper, BoneRole, Finger, FingerJoint, RigTarget, RoleBoneMap,
    SearchNameSet, Side,
};
pub use tracking::{TrackedBone, TrackedFrame};
pub use retarget::{CachedBoneLink, PoseApplier, RetargetProfile};
