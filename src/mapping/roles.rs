use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Hand side a role belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The five fingers, thumb first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];
}

/// Joints along a finger chain, proximal to distal.
///
/// The metacarpal is the optional extra joint some rigs include before
/// the first visible knuckle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FingerJoint {
    Metacarpal,
    Proximal,
    Intermediate,
    Distal,
}

impl FingerJoint {
    /// The joint sequence assigned when walking a finger chain.
    ///
    /// 4 bones per finger includes the metacarpal; any other count maps
    /// the standard 3-joint chain.
    #[must_use]
    pub fn chain(bones_per_finger: usize) -> &'static [FingerJoint] {
        if bones_per_finger == 4 {
            &[
                FingerJoint::Metacarpal,
                FingerJoint::Proximal,
                FingerJoint::Intermediate,
                FingerJoint::Distal,
            ]
        } else {
            &[
                FingerJoint::Proximal,
                FingerJoint::Intermediate,
                FingerJoint::Distal,
            ]
        }
    }
}

/// Abstract anatomical bone role, independent of any mesh's bone naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BoneRole {
    Elbow(Side),
    Wrist(Side),
    Finger(Side, Finger, FingerJoint),
}

impl BoneRole {
    /// Full role set auto-mapping populates for one hand.
    #[must_use]
    pub fn hand_roles(side: Side, bones_per_finger: usize) -> Vec<BoneRole> {
        let mut roles = vec![BoneRole::Elbow(side), BoneRole::Wrist(side)];
        for finger in Finger::ALL {
            for &joint in FingerJoint::chain(bones_per_finger) {
                roles.push(BoneRole::Finger(side, finger, joint));
            }
        }
        roles
    }
}

impl fmt::Display for BoneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |s: &Side| match s {
            Side::Left => "left",
            Side::Right => "right",
        };
        match self {
            BoneRole::Elbow(s) => write!(f, "{} elbow", side(s)),
            BoneRole::Wrist(s) => write!(f, "{} wrist", side(s)),
            BoneRole::Finger(s, finger, joint) => {
                let finger = match finger {
                    Finger::Thumb => "thumb",
                    Finger::Index => "index",
                    Finger::Middle => "middle",
                    Finger::Ring => "ring",
                    Finger::Pinky => "pinky",
                };
                let joint = match joint {
                    FingerJoint::Metacarpal => "metacarpal",
                    FingerJoint::Proximal => "proximal",
                    FingerJoint::Intermediate => "intermediate",
                    FingerJoint::Distal => "distal",
                };
                write!(f, "{} {finger} {joint}", side(s))
            }
        }
    }
}

/// Anatomical template auto-mapping populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RigTarget {
    #[default]
    HandLeft,
    HandRight,
    BothHands,
}

impl RigTarget {
    /// Hand sides covered by this rig target.
    #[must_use]
    pub fn sides(self) -> &'static [Side] {
        match self {
            RigTarget::HandLeft => &[Side::Left],
            RigTarget::HandRight => &[Side::Right],
            RigTarget::BothHands => &[Side::Left, Side::Right],
        }
    }
}

/// Finalized role → mesh bone name map produced by auto-mapping.
///
/// Roles that could not be matched are present with an explicitly empty
/// assignment rather than missing, so consumers always see the complete
/// role set for the rig target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleBoneMap {
    entries: FxHashMap<BoneRole, Option<String>>,
}

impl RoleBoneMap {
    /// An all-unassigned map covering every role of a rig target.
    #[must_use]
    pub fn empty_for(rig: RigTarget, bones_per_finger: usize) -> Self {
        let mut map = Self::default();
        for &side in rig.sides() {
            for role in BoneRole::hand_roles(side, bones_per_finger) {
                map.mark_unassigned(role);
            }
        }
        map
    }

    pub fn assign(&mut self, role: BoneRole, name: impl Into<String>) {
        self.entries.insert(role, Some(name.into()));
    }

    /// Records a role as present but unresolved.
    pub fn mark_unassigned(&mut self, role: BoneRole) {
        self.entries.insert(role, None);
    }

    /// The assigned bone name for a role, if resolved.
    #[must_use]
    pub fn get(&self, role: BoneRole) -> Option<&str> {
        self.entries.get(&role).and_then(|name| name.as_deref())
    }

    /// Whether the role appears in the map at all (assigned or not).
    #[must_use]
    pub fn contains(&self, role: BoneRole) -> bool {
        self.entries.contains_key(&role)
    }

    #[must_use]
    pub fn is_assigned(&self, role: BoneRole) -> bool {
        self.get(role).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoneRole, Option<&str>)> {
        self.entries.iter().map(|(role, name)| (*role, name.as_deref()))
    }

    /// Resolved (role, bone name) pairs.
    pub fn assigned(&self) -> impl Iterator<Item = (BoneRole, &str)> {
        self.entries
            .iter()
            .filter_map(|(role, name)| name.as_deref().map(|n| (*role, n)))
    }

    /// All roles in a stable order, for diagnostics output.
    #[must_use]
    pub fn roles_sorted(&self) -> Vec<BoneRole> {
        let mut roles: Vec<BoneRole> = self.entries.keys().copied().collect();
        roles.sort_unstable();
        roles
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
