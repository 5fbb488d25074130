use std::fmt::Write as _;

use glam::{Affine3A, Quat, Vec3};
use log::warn;

use crate::errors::Result;
use crate::mapping::{AutoRigMapper, BoneRole, RigTarget, RoleBoneMap};
use crate::retarget::basis;
use crate::skeleton::MeshSkeleton;
use crate::tracking::{TrackedBone, TrackedFrame};

/// One entry of the derived parent-before-child bone list: a resolved
/// mesh bone paired with the tracked role that drives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedBoneLink {
    pub mesh_bone_index: usize,
    pub role: BoneRole,
}

/// Per-target retargeting configuration.
///
/// Holds the role → bone-name map plus the basis data needed to drive
/// the target mesh, and caches the resolved bone list in
/// parent-before-child order. The cache is derived state: it must be
/// rebuilt with [`sync_cached_list`] whenever the map or the mesh
/// skeleton changes.
///
/// [`sync_cached_list`]: RetargetProfile::sync_cached_list
#[derive(Debug, Clone)]
pub struct RetargetProfile {
    /// Whether the mesh should deform to match tracked data at all.
    pub deform_mesh: bool,
    /// Tags the tracking source must report for this profile to consume
    /// its data. Empty means no filtering.
    pub tracking_tag_filter: Vec<String>,
    /// Offset rotation applied before the tracked rotation.
    pub pre_base_rotation: Quat,
    /// Transform applied to tracked positions. Consider this an offset.
    pub offset_transform: Affine3A,
    /// Matching list of tracked roles mapped to mesh bone names.
    pub bone_map: RoleBoneMap,
    /// Rest-pose wrist-to-elbow distance of the mapped rig.
    pub elbow_length: f32,
    /// Whether the mapped rig rests under a mirrored scale.
    pub flipped_by_scale: bool,
    /// Auto-calculated rotation correcting the model basis.
    pub auto_correct_rotation: Quat,

    // Derived parent-before-child bone list; rebuilt by sync_cached_list.
    cached_links: Vec<CachedBoneLink>,
}

impl Default for RetargetProfile {
    fn default() -> Self {
        Self {
            deform_mesh: true,
            tracking_tag_filter: Vec::new(),
            pre_base_rotation: Quat::IDENTITY,
            offset_transform: Affine3A::IDENTITY,
            bone_map: RoleBoneMap::default(),
            elbow_length: 0.0,
            flipped_by_scale: false,
            auto_correct_rotation: Quat::IDENTITY,
            cached_links: Vec::new(),
        }
    }
}

impl RetargetProfile {
    /// Runs auto-mapping against a mesh skeleton and builds a ready
    /// profile: role map, basis correction, elbow length and synced
    /// bone cache.
    ///
    /// Fails only on a structurally malformed skeleton.
    pub fn from_auto_map(
        mapper: &AutoRigMapper,
        skeleton: &MeshSkeleton,
        rig: RigTarget,
    ) -> Result<Self> {
        let bone_map = mapper.auto_map(skeleton, rig)?;

        let mut profile = Self {
            bone_map,
            ..Self::default()
        };

        let side = rig.sides()[0];
        profile.elbow_length = basis::calculate_elbow_length(&profile.bone_map, skeleton, side);

        if mapper.config.detect_hand_rotation {
            let mut correction =
                basis::estimate_auto_map_rotation(&profile.bone_map, skeleton, rig);
            profile.flipped_by_scale =
                basis::rest_scale_is_mirrored(&profile.bone_map, skeleton, side);
            if profile.flipped_by_scale {
                correction = basis::mirror_rotation(correction);
            }
            profile.auto_correct_rotation = correction;
        }

        profile.sync_cached_list(skeleton);
        Ok(profile)
    }

    /// Rebuilds the cached bone list from the role map against a mesh
    /// skeleton.
    ///
    /// Resolved links are ordered by mesh bone index; the indexer
    /// guarantees parents precede children in that order, which keeps
    /// the per-frame write parent-before-child. Map entries naming a
    /// bone the skeleton does not contain are skipped with a warning.
    pub fn sync_cached_list(&mut self, skeleton: &MeshSkeleton) {
        self.cached_links.clear();
        for (role, name) in self.bone_map.assigned() {
            if let Some(mesh_bone_index) = skeleton.bone_index(name) {
                self.cached_links.push(CachedBoneLink {
                    mesh_bone_index,
                    role,
                });
            } else {
                warn!("mapped bone '{name}' for {role} not present in mesh skeleton");
            }
        }
        self.cached_links.sort_by_key(|link| link.mesh_bone_index);
    }

    /// The derived parent-before-child bone list.
    #[inline]
    #[must_use]
    pub fn cached_links(&self) -> &[CachedBoneLink] {
        &self.cached_links
    }

    /// Manually links a role to a mesh bone, overriding auto-mapping.
    /// Invalidates the cache; call [`sync_cached_list`] afterwards.
    ///
    /// [`sync_cached_list`]: RetargetProfile::sync_cached_list
    pub fn link_bone(&mut self, role: BoneRole, mesh_bone: &str) {
        self.bone_map.assign(role, mesh_bone);
        self.cached_links.clear();
    }

    /// Removes a role's link. Useful when auto-rigging gets most of the
    /// way there but one bone needs to be dropped. Invalidates the
    /// cache.
    pub fn unlink_bone(&mut self, role: BoneRole) {
        self.bone_map.mark_unassigned(role);
        self.cached_links.clear();
    }

    /// Whether a tracked bone carries every tag this profile requires.
    #[must_use]
    pub fn bone_has_valid_tags(&self, bone: &TrackedBone) -> bool {
        self.tracking_tag_filter
            .iter()
            .all(|required| bone.tags.iter().any(|tag| tag == required))
    }

    /// Whether the tracked skeleton as a whole carries every required
    /// tag.
    #[must_use]
    pub fn skeleton_has_valid_tags(&self, frame: &TrackedFrame) -> bool {
        self.tracking_tag_filter
            .iter()
            .all(|required| frame.tags.iter().any(|tag| tag == required))
    }

    /// Adjusts a tracked rotation by this profile's basis: correction,
    /// then pre-base rotation, then the input.
    #[inline]
    #[must_use]
    pub fn adjust_rotation_by_basis(&self, rotation: Quat) -> Quat {
        self.auto_correct_rotation * self.pre_base_rotation * rotation
    }

    /// Adjusts a tracked position by this profile's offset transform.
    #[inline]
    #[must_use]
    pub fn adjust_position_by_basis(&self, position: Vec3) -> Vec3 {
        self.offset_transform.transform_point3(position)
    }

    /// Human-readable report of the current mapping, for diagnostics.
    #[must_use]
    pub fn summary(&self) -> String {
        let assigned = self.bone_map.assigned().count();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{assigned}/{} roles assigned, elbow length {:.3}, flipped: {}",
            self.bone_map.len(),
            self.elbow_length,
            self.flipped_by_scale,
        );
        let _ = writeln!(out, "auto correct rotation: {:?}", self.auto_correct_rotation);
        for role in self.bone_map.roles_sorted() {
            match self.bone_map.get(role) {
                Some(name) => {
                    let _ = writeln!(out, "  {role} -> {name}");
                }
                None => {
                    let _ = writeln!(out, "  {role} -> <unassigned>");
                }
            }
        }
        out
    }
}
