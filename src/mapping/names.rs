//! Fuzzy bone-name matching.
//!
//! Matching is plain case-insensitive substring containment against a
//! user-overridable candidate list per anatomical role. Ambiguous rigs
//! (a bone name matching several roles) are resolved by the caller's
//! selection order, not flagged here.

use serde::{Deserialize, Serialize};

use crate::mapping::roles::{Finger, Side};
use crate::skeleton::IndexedBoneList;

/// Candidate substrings per anatomical role.
///
/// Defaults cover the common naming conventions of humanoid hand rigs;
/// override any list to adapt to an unusual skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchNameSet {
    pub arm_names: Vec<String>,
    pub wrist_names: Vec<String>,
    pub thumb_names: Vec<String>,
    pub index_names: Vec<String>,
    pub middle_names: Vec<String>,
    pub ring_names: Vec<String>,
    pub pinky_names: Vec<String>,
    /// Side tokens used to disambiguate two-handed rigs.
    pub left_names: Vec<String>,
    pub right_names: Vec<String>,
}

impl Default for SearchNameSet {
    fn default() -> Self {
        let names = |list: &[&str]| list.iter().map(ToString::to_string).collect();
        Self {
            arm_names: names(&["elbow", "upperArm"]),
            wrist_names: names(&["wrist", "hand", "palm"]),
            thumb_names: names(&["thumb"]),
            index_names: names(&["index"]),
            middle_names: names(&["middle"]),
            ring_names: names(&["ring"]),
            pinky_names: names(&["pinky", "little"]),
            left_names: names(&["left", "_l", "l_"]),
            right_names: names(&["right", "_r", "r_"]),
        }
    }
}

impl SearchNameSet {
    #[must_use]
    pub fn finger_names(&self, finger: Finger) -> &[String] {
        match finger {
            Finger::Thumb => &self.thumb_names,
            Finger::Index => &self.index_names,
            Finger::Middle => &self.middle_names,
            Finger::Ring => &self.ring_names,
            Finger::Pinky => &self.pinky_names,
        }
    }

    #[must_use]
    pub fn side_names(&self, side: Side) -> &[String] {
        match side {
            Side::Left => &self.left_names,
            Side::Right => &self.right_names,
        }
    }
}

/// Whether `name` contains any candidate substring, case-insensitively.
#[must_use]
pub fn name_matches(name: &str, candidates: &[String]) -> bool {
    let name = name.to_ascii_lowercase();
    candidates
        .iter()
        .any(|candidate| name.contains(&candidate.to_ascii_lowercase()))
}

/// Tree indices of all bones matching any candidate substring.
///
/// Scan order follows the configured ordering: tree order, or the
/// name-sorted view when `use_sorted` is set and the list was built with
/// sorting. Returned indices always refer to tree positions.
#[must_use]
pub fn select_bones(list: &IndexedBoneList, candidates: &[String], use_sorted: bool) -> Vec<usize> {
    let scan: &[_] = match (use_sorted, list.sorted_bones()) {
        (true, Some(sorted)) => sorted,
        _ => list.bones(),
    };
    scan.iter()
        .filter(|bone| name_matches(&bone.name, candidates))
        .map(|bone| bone.index)
        .collect()
}

/// First matching bone in the configured scan order, or `None` when no
/// bone matches. Callers must handle the unmatched case.
#[must_use]
pub fn select_first_bone(
    list: &IndexedBoneList,
    candidates: &[String],
    use_sorted: bool,
) -> Option<usize> {
    let scan: &[_] = match (use_sorted, list.sorted_bones()) {
        (true, Some(sorted)) => sorted,
        _ => list.bones(),
    };
    scan.iter()
        .find(|bone| name_matches(&bone.name, candidates))
        .map(|bone| bone.index)
}
