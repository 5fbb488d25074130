use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::mapping::names::{self, SearchNameSet};
use crate::mapping::roles::{BoneRole, Finger, FingerJoint, RigTarget, RoleBoneMap, Side};
use crate::skeleton::{IndexedBoneList, MeshSkeleton};

/// A human hand root typically has one child per finger.
const WRIST_CHILD_COUNT: usize = 5;

/// Auto-mapping configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoMapConfig {
    /// Candidate substrings per anatomical role.
    pub search_names: SearchNameSet,
    /// Walk 4 finger bones (metacarpal included) instead of 3.
    pub include_metacarpals: bool,
    /// Scan bone names alphabetically instead of in tree order.
    pub use_sorted_names: bool,
    /// Estimate the basis correction rotation after mapping.
    pub detect_hand_rotation: bool,
}

impl Default for AutoMapConfig {
    fn default() -> Self {
        Self {
            search_names: SearchNameSet::default(),
            include_metacarpals: false,
            use_sorted_names: false,
            detect_hand_rotation: true,
        }
    }
}

impl AutoMapConfig {
    /// Number of joints assigned per finger chain (3, or 4 with
    /// metacarpals).
    #[inline]
    #[must_use]
    pub fn bones_per_finger(&self) -> usize {
        if self.include_metacarpals { 4 } else { 3 }
    }
}

/// Internal role → tree-index mapping built during a single pass.
type RoleIndexMap = FxHashMap<BoneRole, Option<usize>>;

/// Populates a role → bone map for a rig target by combining name
/// matching with bone-tree chain analysis.
///
/// A single deterministic pass: re-running replaces all prior
/// assignments, it does not merge. A role that cannot be matched yields
/// an explicitly-unassigned entry; only a malformed input skeleton is
/// fatal.
#[derive(Debug, Clone, Default)]
pub struct AutoRigMapper {
    pub config: AutoMapConfig,
}

impl AutoRigMapper {
    #[must_use]
    pub fn new(config: AutoMapConfig) -> Self {
        Self { config }
    }

    /// Runs auto-detection against a mesh skeleton.
    ///
    /// Fails only on a structurally malformed skeleton; in that case no
    /// partial mapping is returned.
    pub fn auto_map(&self, skeleton: &MeshSkeleton, rig: RigTarget) -> Result<RoleBoneMap> {
        let list = IndexedBoneList::from_skeleton(skeleton, self.config.use_sorted_names)?;

        let mut mapping = RoleIndexMap::default();
        for &side in rig.sides() {
            self.map_hand(&list, side, rig, &mut mapping);
        }

        let resolved = mapping.values().filter(|idx| idx.is_some()).count();
        debug!(
            "auto-map for {rig:?}: {resolved}/{} roles resolved",
            mapping.len()
        );

        Ok(Self::finalize(&list, &mapping))
    }

    fn map_hand(
        &self,
        list: &IndexedBoneList,
        side: Side,
        rig: RigTarget,
        mapping: &mut RoleIndexMap,
    ) {
        let search = &self.config.search_names;

        let wrist = self
            .select_side_bone(list, &search.wrist_names, side, rig)
            .or_else(|| self.wrist_by_child_count(list, side, rig));
        if wrist.is_none() {
            warn!("no wrist candidate found for {side:?} hand");
        }
        mapping.insert(BoneRole::Wrist(side), wrist);

        for finger in Finger::ALL {
            match self.select_side_bone(list, search.finger_names(finger), side, rig) {
                Some(root) => self.add_finger(list, side, finger, root, mapping),
                None => {
                    warn!("no {finger:?} bone found for {side:?} hand, leaving joints unassigned");
                    self.add_empty_finger(side, finger, mapping);
                }
            }
        }

        mapping.insert(
            BoneRole::Elbow(side),
            self.select_side_bone(list, &search.arm_names, side, rig),
        );
    }

    /// Assigns successive joint roles walking down the first-child chain
    /// from the finger root. A chain shorter than the configured joint
    /// count leaves the remaining joints unassigned.
    fn add_finger(
        &self,
        list: &IndexedBoneList,
        side: Side,
        finger: Finger,
        root: usize,
        mapping: &mut RoleIndexMap,
    ) {
        let mut current = Some(root);
        for &joint in FingerJoint::chain(self.config.bones_per_finger()) {
            mapping.insert(BoneRole::Finger(side, finger, joint), current);
            current = current.and_then(|index| list.first_child(index));
        }
    }

    /// Placeholder entries for every joint of an unmatched finger, so
    /// downstream consumers see a complete role set.
    fn add_empty_finger(&self, side: Side, finger: Finger, mapping: &mut RoleIndexMap) {
        for &joint in FingerJoint::chain(self.config.bones_per_finger()) {
            mapping.insert(BoneRole::Finger(side, finger, joint), None);
        }
    }

    /// Child-count fallback when wrist name search comes up empty.
    fn wrist_by_child_count(
        &self,
        list: &IndexedBoneList,
        side: Side,
        rig: RigTarget,
    ) -> Option<usize> {
        let candidates = list.find_bones_with_child_count(WRIST_CHILD_COUNT);
        if candidates.is_empty() {
            return None;
        }
        debug!(
            "wrist name search empty, falling back to child-count heuristic ({} candidates)",
            candidates.len()
        );

        let side_names = self.config.search_names.side_names(side);
        candidates
            .iter()
            .copied()
            .find(|&index| names::name_matches(&list.bones()[index].name, side_names))
            .or_else(|| {
                // On a two-handed rig an unqualified candidate is ambiguous.
                (rig != RigTarget::BothHands).then_some(candidates[0])
            })
    }

    /// Picks a bone for one side of the rig from the candidate matches.
    ///
    /// On a two-handed rig the bone name must carry the side token; on a
    /// single-hand rig a side-qualified match is preferred, then any
    /// match not naming the opposite side, then the first match. This
    /// precedence is a tunable policy, not a correctness guarantee.
    fn select_side_bone(
        &self,
        list: &IndexedBoneList,
        candidates: &[String],
        side: Side,
        rig: RigTarget,
    ) -> Option<usize> {
        let matches = names::select_bones(list, candidates, self.config.use_sorted_names);
        if matches.is_empty() {
            return None;
        }

        let side_names = self.config.search_names.side_names(side);
        let name_of = |index: usize| list.bones()[index].name.as_str();

        let side_match = matches
            .iter()
            .copied()
            .find(|&index| names::name_matches(name_of(index), side_names));

        if rig == RigTarget::BothHands {
            return side_match;
        }

        let opposite_names = self.config.search_names.side_names(side.opposite());
        side_match
            .or_else(|| {
                matches
                    .iter()
                    .copied()
                    .find(|&index| !names::name_matches(name_of(index), opposite_names))
            })
            .or(Some(matches[0]))
    }

    fn finalize(list: &IndexedBoneList, mapping: &RoleIndexMap) -> RoleBoneMap {
        let mut map = RoleBoneMap::default();
        for (&role, &index) in mapping {
            match index {
                Some(index) => map.assign(role, list.bones()[index].name.clone()),
                None => map.mark_unassigned(role),
            }
        }
        map
    }
}
