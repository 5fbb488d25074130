//! Retargeting Tests
//!
//! Tests for:
//! - Basis correction estimation, identity fallback and mirrored rigs
//! - Elbow length measurement
//! - RetargetProfile cache sync, manual link/unlink and summary
//! - PoseApplier frame application, tag filtering and freeze toggle

use std::f32::consts::FRAC_PI_2;

use glam::{Affine3A, Quat, Vec3};

use bodymap::mapping::{AutoRigMapper, BoneRole, Finger, FingerJoint, RigTarget, Side};
use bodymap::retarget::{basis, PoseApplier, RetargetProfile};
use bodymap::skeleton::{MeshBoneDesc, MeshPose, MeshSkeleton};
use bodymap::tracking::{TrackedBone, TrackedFrame};

const EPSILON: f32 = 1e-5;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

fn approx_quat(a: Quat, b: Quat) -> bool {
    a.angle_between(b) < 1e-4
}

fn bone_at(name: &str, parent: i32, position: Vec3) -> MeshBoneDesc {
    MeshBoneDesc::new(name, parent).with_rest_world(Affine3A::from_translation(position))
}

/// Left hand resting with its knuckles along +Z and the elbow 30 units
/// behind the wrist.
fn posed_left_hand(wrist_scale: Vec3) -> MeshSkeleton {
    let wrist_rest = Affine3A::from_scale_rotation_translation(
        wrist_scale,
        Quat::IDENTITY,
        Vec3::ZERO,
    );
    let mut bones = vec![
        bone_at("Root", -1, Vec3::ZERO),
        bone_at("LeftUpperArm", 0, Vec3::new(0.0, 0.0, -30.0)),
        MeshBoneDesc::new("LeftWrist", 1).with_rest_world(wrist_rest),
    ];
    for (f, finger) in ["Thumb", "Index", "Middle", "Ring", "Pinky"].iter().enumerate() {
        let x = f as f32 - 2.0;
        let root_index = bones.len() as i32;
        bones.push(bone_at(&format!("Left{finger}1"), 2, Vec3::new(x, 0.0, 10.0)));
        bones.push(bone_at(&format!("Left{finger}2"), root_index, Vec3::new(x, 0.0, 14.0)));
        bones.push(bone_at(
            &format!("Left{finger}3"),
            root_index + 1,
            Vec3::new(x, 0.0, 17.0),
        ));
    }
    MeshSkeleton::new(bones)
}

fn mapped_profile(skeleton: &MeshSkeleton) -> RetargetProfile {
    RetargetProfile::from_auto_map(&AutoRigMapper::default(), skeleton, RigTarget::HandLeft)
        .unwrap()
}

// ============================================================================
// Basis correction
// ============================================================================

#[test]
fn correction_aligns_canonical_axis_with_rest_knuckle_direction() {
    let skeleton = posed_left_hand(Vec3::ONE);
    let profile = mapped_profile(&skeleton);

    // Middle knuckle rests at +Z of the wrist, so the correction must
    // carry the canonical +X knuckle axis onto +Z.
    let rotated = profile.auto_correct_rotation * Vec3::X;
    assert!(
        approx_vec(rotated, Vec3::Z),
        "correction moved X to {rotated:?}"
    );
    assert!(!profile.flipped_by_scale);
}

#[test]
fn correction_falls_back_to_identity_when_unresolved() {
    // No middle finger: only one reference point resolves.
    let skeleton = MeshSkeleton::new(vec![
        bone_at("Root", -1, Vec3::ZERO),
        bone_at("LeftWrist", 0, Vec3::ZERO),
    ]);
    let profile = mapped_profile(&skeleton);
    assert_eq!(profile.auto_correct_rotation, Quat::IDENTITY);
}

#[test]
fn mirrored_rig_reflects_the_correction() {
    let plain = mapped_profile(&posed_left_hand(Vec3::ONE));
    let mirrored = mapped_profile(&posed_left_hand(Vec3::new(-1.0, 1.0, 1.0)));

    assert!(mirrored.flipped_by_scale);
    assert!(approx_quat(
        mirrored.auto_correct_rotation,
        basis::mirror_rotation(plain.auto_correct_rotation),
    ));
}

#[test]
fn mirror_rotation_is_an_involution() {
    let rotation = Quat::from_euler(glam::EulerRot::XYZ, 0.3, -1.1, 0.7);
    let back = basis::mirror_rotation(basis::mirror_rotation(rotation));
    assert!(approx_quat(rotation, back));
}

#[test]
fn elbow_length_measures_rest_distance() {
    let profile = mapped_profile(&posed_left_hand(Vec3::ONE));
    assert!((profile.elbow_length - 30.0).abs() < EPSILON);
}

#[test]
fn elbow_length_is_zero_when_unresolved() {
    // No arm bone to resolve an elbow from.
    let skeleton = MeshSkeleton::new(vec![
        bone_at("Root", -1, Vec3::ZERO),
        bone_at("LeftWrist", 0, Vec3::ZERO),
    ]);
    let profile = mapped_profile(&skeleton);
    assert_eq!(profile.elbow_length, 0.0);
}

// ============================================================================
// Profile cache & manual overrides
// ============================================================================

#[test]
fn cached_links_are_parent_before_child() {
    let skeleton = posed_left_hand(Vec3::ONE);
    let profile = mapped_profile(&skeleton);

    let links = profile.cached_links();
    assert!(!links.is_empty());
    for pair in links.windows(2) {
        assert!(
            pair[0].mesh_bone_index < pair[1].mesh_bone_index,
            "cache not in parent-before-child order"
        );
    }
}

#[test]
fn link_and_unlink_override_the_map_and_invalidate_the_cache() {
    let skeleton = posed_left_hand(Vec3::ONE);
    let mut profile = mapped_profile(&skeleton);
    let tip = BoneRole::Finger(Side::Left, Finger::Pinky, FingerJoint::Distal);

    profile.unlink_bone(tip);
    assert!(profile.cached_links().is_empty());
    assert!(!profile.bone_map.is_assigned(tip));

    profile.link_bone(tip, "LeftPinky3");
    profile.sync_cached_list(&skeleton);
    assert_eq!(profile.bone_map.get(tip), Some("LeftPinky3"));
    assert!(profile
        .cached_links()
        .iter()
        .any(|link| link.role == tip));
}

#[test]
fn sync_skips_names_missing_from_the_skeleton() {
    let skeleton = posed_left_hand(Vec3::ONE);
    let mut profile = mapped_profile(&skeleton);

    profile.link_bone(BoneRole::Wrist(Side::Left), "NoSuchBone");
    profile.sync_cached_list(&skeleton);
    assert!(profile
        .cached_links()
        .iter()
        .all(|link| link.role != BoneRole::Wrist(Side::Left)));
}

#[test]
fn summary_reports_assignments_and_gaps() {
    let skeleton = posed_left_hand(Vec3::ONE);
    let mut profile = mapped_profile(&skeleton);
    profile.unlink_bone(BoneRole::Elbow(Side::Left));

    let summary = profile.summary();
    assert!(summary.contains("left wrist -> LeftWrist"));
    assert!(summary.contains("left elbow -> <unassigned>"));
    assert!(summary.contains("left middle proximal -> LeftMiddle1"));
}

// ============================================================================
// Per-frame application
// ============================================================================

fn wrist_frame(position: Vec3, rotation: Quat) -> TrackedFrame {
    let mut frame = TrackedFrame::default();
    frame.set_bone(BoneRole::Wrist(Side::Left), TrackedBone::new(position, rotation));
    frame
}

#[test]
fn advance_writes_adjusted_rotation_and_position() {
    let skeleton = posed_left_hand(Vec3::ONE);
    let mut profile = mapped_profile(&skeleton);
    profile.pre_base_rotation = Quat::from_rotation_y(FRAC_PI_2);
    profile.offset_transform = Affine3A::from_translation(Vec3::new(10.0, 0.0, 0.0));

    let tracked_rotation = Quat::from_rotation_x(FRAC_PI_2);
    let frame = wrist_frame(Vec3::new(1.0, 2.0, 3.0), tracked_rotation);

    let mut pose = MeshPose::from_rest(&skeleton);
    PoseApplier::new().advance(&profile, &frame, &mut pose);

    let wrist_index = skeleton.bone_index("LeftWrist").unwrap();
    let wrist_pose = pose.get(wrist_index).unwrap();
    let expected_rotation =
        profile.auto_correct_rotation * profile.pre_base_rotation * tracked_rotation;
    assert!(approx_quat(wrist_pose.rotation, expected_rotation));
    assert!(approx_vec(wrist_pose.position, Vec3::new(11.0, 2.0, 3.0)));
}

#[test]
fn bones_absent_from_the_frame_keep_their_pose() {
    let skeleton = posed_left_hand(Vec3::ONE);
    let profile = mapped_profile(&skeleton);

    let frame = wrist_frame(Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY);
    let mut pose = MeshPose::from_rest(&skeleton);
    let thumb_index = skeleton.bone_index("LeftThumb1").unwrap();
    let before = *pose.get(thumb_index).unwrap();

    PoseApplier::new().advance(&profile, &frame, &mut pose);
    assert_eq!(*pose.get(thumb_index).unwrap(), before);
}

#[test]
fn missing_tracking_tag_preserves_the_prior_pose() {
    let skeleton = posed_left_hand(Vec3::ONE);
    let mut profile = mapped_profile(&skeleton);
    profile.tracking_tag_filter = vec!["Hands".to_string()];

    let wrist_index = skeleton.bone_index("LeftWrist").unwrap();
    let mut pose = MeshPose::from_rest(&skeleton);
    let rest = *pose.get(wrist_index).unwrap();

    // Untagged bone: skipped, prior pose preserved
    let mut frame = wrist_frame(Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY);
    frame.tags = vec!["Hands".to_string()];
    PoseApplier::new().advance(&profile, &frame, &mut pose);
    assert_eq!(*pose.get(wrist_index).unwrap(), rest);

    // Tagged bone: written
    frame.set_bone(
        BoneRole::Wrist(Side::Left),
        TrackedBone::new(Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY).with_tags(&["Hands"]),
    );
    PoseApplier::new().advance(&profile, &frame, &mut pose);
    assert!(approx_vec(pose.get(wrist_index).unwrap().position, Vec3::new(5.0, 0.0, 0.0)));
}

#[test]
fn untagged_skeleton_skips_the_whole_frame() {
    let skeleton = posed_left_hand(Vec3::ONE);
    let mut profile = mapped_profile(&skeleton);
    profile.tracking_tag_filter = vec!["Hands".to_string()];

    let frame = wrist_frame(Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY);
    let mut pose = MeshPose::from_rest(&skeleton);
    let before = pose.clone();

    PoseApplier::new().advance(&profile, &frame, &mut pose);
    assert_eq!(pose.bones(), before.bones());
}

#[test]
fn frozen_applier_leaves_the_pose_untouched() {
    let skeleton = posed_left_hand(Vec3::ONE);
    let profile = mapped_profile(&skeleton);

    let frame = wrist_frame(Vec3::new(5.0, 0.0, 0.0), Quat::IDENTITY);
    let mut pose = MeshPose::from_rest(&skeleton);
    let before = pose.clone();

    let applier = PoseApplier { frozen: true };
    applier.advance(&profile, &frame, &mut pose);
    assert_eq!(pose.bones(), before.bones());

    let mut disabled_profile = profile;
    disabled_profile.deform_mesh = false;
    PoseApplier::new().advance(&disabled_profile, &frame, &mut pose);
    assert_eq!(pose.bones(), before.bones());
}
