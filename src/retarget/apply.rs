use crate::retarget::profile::RetargetProfile;
use crate::skeleton::MeshPose;
use crate::tracking::TrackedFrame;

/// Per-frame mapped pose application.
///
/// Runs on the animation-evaluation path: no allocation, no logging, no
/// fallible returns. Bones missing from the frame or failing the tag
/// filter keep their existing pose for that frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseApplier {
    /// Freeze the output at its current state. Useful for debugging a
    /// retargeting setup.
    pub frozen: bool,
}

impl PoseApplier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one tracked frame onto the target pose.
    ///
    /// Walks the profile's cached bone list in parent-before-child
    /// order, writing the basis-adjusted rotation and offset position of
    /// each resolved bone.
    pub fn advance(&self, profile: &RetargetProfile, frame: &TrackedFrame, pose: &mut MeshPose) {
        if self.frozen || !profile.deform_mesh || !profile.skeleton_has_valid_tags(frame) {
            return;
        }

        for link in profile.cached_links() {
            let Some(tracked) = frame.bone(link.role) else {
                continue;
            };
            if !profile.bone_has_valid_tags(tracked) {
                continue;
            }
            let Some(slot) = pose.get_mut(link.mesh_bone_index) else {
                continue;
            };
            slot.rotation = profile.adjust_rotation_by_basis(tracked.rotation);
            slot.position = profile.adjust_position_by_basis(tracked.position);
        }
    }
}
