//! Tracked-skeleton input types.
//!
//! A tracked frame is published by value by the device wrapper once per
//! animation update; this crate only ever reads it. Bone transforms are
//! keyed by the same role enumeration the mapping produces, and each
//! bone carries the tag set its tracking source reported.

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

use crate::mapping::BoneRole;

/// One tracked bone sample: world position, rotation and source tags.
#[derive(Debug, Clone, Default)]
pub struct TrackedBone {
    pub position: Vec3,
    pub rotation: Quat,
    pub tags: Vec<String>,
}

impl TrackedBone {
    #[must_use]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(ToString::to_string).collect();
        self
    }
}

/// One frame of tracked skeleton data.
#[derive(Debug, Clone, Default)]
pub struct TrackedFrame {
    pub bones: FxHashMap<BoneRole, TrackedBone>,
    /// Tags reported for the whole tracked skeleton this frame.
    pub tags: Vec<String>,
}

impl TrackedFrame {
    #[inline]
    #[must_use]
    pub fn bone(&self, role: BoneRole) -> Option<&TrackedBone> {
        self.bones.get(&role)
    }

    pub fn set_bone(&mut self, role: BoneRole, bone: TrackedBone) {
        self.bones.insert(role, bone);
    }
}
