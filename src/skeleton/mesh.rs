use glam::{Affine3A, Quat, Vec3};

/// A single bone as provided by a mesh skeleton: name, parent link and
/// rest-pose world transform.
///
/// The parent index is -1 for the root bone. Parents must appear earlier
/// in the list than their children; [`IndexedBoneList::from_skeleton`]
/// validates this once at build time.
///
/// [`IndexedBoneList::from_skeleton`]: crate::skeleton::IndexedBoneList::from_skeleton
#[derive(Debug, Clone)]
pub struct MeshBoneDesc {
    pub name: String,
    pub parent_index: i32,
    /// Rest-pose world transform. Consumed by basis correction and elbow
    /// measurement; identity is acceptable when only name mapping is needed.
    pub rest_world: Affine3A,
}

impl MeshBoneDesc {
    #[must_use]
    pub fn new(name: &str, parent_index: i32) -> Self {
        Self {
            name: name.to_string(),
            parent_index,
            rest_world: Affine3A::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_rest_world(mut self, rest_world: Affine3A) -> Self {
        self.rest_world = rest_world;
        self
    }
}

/// Ordered bone list from the mesh skeleton provider.
#[derive(Debug, Clone, Default)]
pub struct MeshSkeleton {
    pub bones: Vec<MeshBoneDesc>,
}

impl MeshSkeleton {
    #[must_use]
    pub fn new(bones: Vec<MeshBoneDesc>) -> Self {
        Self { bones }
    }

    /// Finds the index of a bone by exact name.
    #[must_use]
    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    /// Rest-pose world position of a bone.
    #[inline]
    #[must_use]
    pub fn rest_position(&self, index: usize) -> Option<Vec3> {
        self.bones.get(index).map(|b| b.rest_world.translation.into())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

/// Pose of a single mesh bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonePose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for BonePose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Per-bone pose array the retargeting applier writes into.
///
/// Indexed by mesh bone order. Bones the applier skips keep whatever pose
/// they already hold, so initializing from the rest pose gives skipped
/// bones their reference pose rather than a zeroed one.
#[derive(Debug, Clone, Default)]
pub struct MeshPose {
    bones: Vec<BonePose>,
}

impl MeshPose {
    /// Builds a pose holding each bone's rest-pose position and rotation.
    #[must_use]
    pub fn from_rest(skeleton: &MeshSkeleton) -> Self {
        let bones = skeleton
            .bones
            .iter()
            .map(|b| {
                let (_, rotation, position) = b.rest_world.to_scale_rotation_translation();
                BonePose { position, rotation }
            })
            .collect();
        Self { bones }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BonePose> {
        self.bones.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut BonePose> {
        self.bones.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[BonePose] {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}
