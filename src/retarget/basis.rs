//! Basis correction between the tracked skeleton and a mesh rig.
//!
//! Tracked rotation data arrives in the source skeleton's coordinate
//! convention; an arbitrary mesh rig rests in its own. The corrective
//! rotation computed here reconciles the two by comparing a canonical
//! reference direction (wrist toward the middle-finger knuckle) against
//! the rig's rest pose.

use glam::{Quat, Vec3};
use log::debug;

use crate::mapping::{BoneRole, Finger, FingerJoint, RigTarget, RoleBoneMap, Side};
use crate::skeleton::MeshSkeleton;

/// Knuckle direction of the tracked skeleton's hand basis. The right
/// hand mirrors the left along X.
#[inline]
#[must_use]
pub fn expected_knuckle_axis(side: Side) -> Vec3 {
    match side {
        Side::Left => Vec3::X,
        Side::Right => Vec3::NEG_X,
    }
}

/// Estimates the corrective rotation for an auto-mapped rig.
///
/// Derives the rig's rest knuckle direction from the resolved wrist and
/// middle-finger-root positions and rotates the canonical axis onto it.
/// Falls back to identity when fewer than two reference bones resolve,
/// or when they rest at the same position.
#[must_use]
pub fn estimate_auto_map_rotation(
    map: &RoleBoneMap,
    skeleton: &MeshSkeleton,
    rig: RigTarget,
) -> Quat {
    let side = rig.sides()[0];
    let wrist = resolve_rest_position(map, skeleton, BoneRole::Wrist(side));
    let knuckle = resolve_rest_position(
        map,
        skeleton,
        BoneRole::Finger(side, Finger::Middle, FingerJoint::Proximal),
    );

    let (Some(wrist), Some(knuckle)) = (wrist, knuckle) else {
        debug!("insufficient resolved bones for rotation estimate, using identity");
        return Quat::IDENTITY;
    };

    let direction = knuckle - wrist;
    if direction.length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }

    Quat::from_rotation_arc(expected_knuckle_axis(side), direction.normalize())
}

/// Rest-pose distance between the resolved wrist and elbow bones.
/// Returns 0 when either is unresolved.
#[must_use]
pub fn calculate_elbow_length(map: &RoleBoneMap, skeleton: &MeshSkeleton, side: Side) -> f32 {
    let wrist = resolve_rest_position(map, skeleton, BoneRole::Wrist(side));
    let elbow = resolve_rest_position(map, skeleton, BoneRole::Elbow(side));
    match (wrist, elbow) {
        (Some(wrist), Some(elbow)) => wrist.distance(elbow),
        _ => 0.0,
    }
}

/// Whether the resolved wrist rests under a mirrored (negative
/// determinant) transform, as mirrored left/right meshes do.
#[must_use]
pub fn rest_scale_is_mirrored(map: &RoleBoneMap, skeleton: &MeshSkeleton, side: Side) -> bool {
    map.get(BoneRole::Wrist(side))
        .and_then(|name| skeleton.bone_index(name))
        .and_then(|index| skeleton.bones.get(index))
        .is_some_and(|bone| bone.rest_world.matrix3.determinant() < 0.0)
}

/// Reflects a rotation across the YZ plane (the X mirror axis): the
/// correction for a mirrored rig is the mirror image of the unmirrored
/// one.
#[inline]
#[must_use]
pub fn mirror_rotation(rotation: Quat) -> Quat {
    Quat::from_xyzw(rotation.x, -rotation.y, -rotation.z, rotation.w)
}

fn resolve_rest_position(
    map: &RoleBoneMap,
    skeleton: &MeshSkeleton,
    role: BoneRole,
) -> Option<Vec3> {
    let name = map.get(role)?;
    let index = skeleton.bone_index(name)?;
    skeleton.rest_position(index)
}
