//! Read-only chain queries over an [`IndexedBoneList`].
//!
//! Used by auto-mapping to classify hierarchy depth, estimate finger
//! length in bone-hops, and shortlist wrist candidates by child count.
//! All queries are deterministic and safe to call repeatedly.

use crate::errors::{BodymapError, Result};
use crate::skeleton::indexed::{IndexedBoneList, ROOT_PARENT};

impl IndexedBoneList {
    /// Counts the hops from `start` up the parent links to the root.
    ///
    /// Returns 0 for the root itself. Fails with `InvalidBoneIndex` when
    /// `start` is out of range; build-time validation guarantees the walk
    /// itself terminates.
    pub fn traverse_depth(&self, start: usize) -> Result<usize> {
        let bones = self.bones();
        if start >= bones.len() {
            return Err(BodymapError::InvalidBoneIndex {
                index: start,
                count: bones.len(),
            });
        }

        let mut hops = 0;
        let mut current = start;
        while bones[current].parent_index != ROOT_PARENT {
            current = bones[current].parent_index as usize;
            hops += 1;
        }
        Ok(hops)
    }

    /// Length of the longest chain from `bone` down to a leaf, in hops.
    ///
    /// A leaf yields 0. Fails with `InvalidBoneIndex` when `bone` is out
    /// of range.
    pub fn longest_descendant_chain(&self, bone: usize) -> Result<usize> {
        if bone >= self.len() {
            return Err(BodymapError::InvalidBoneIndex {
                index: bone,
                count: self.len(),
            });
        }
        Ok(self.descend(bone))
    }

    fn descend(&self, bone: usize) -> usize {
        self.bones()[bone]
            .children
            .iter()
            .map(|&child| 1 + self.descend(child))
            .max()
            .unwrap_or(0)
    }

    /// Indices of all bones whose direct-child count equals `target`.
    ///
    /// The wrist of a typical hand rig has exactly 5 children (one per
    /// finger root), which makes this a useful shortlist when name
    /// matching comes up empty.
    #[must_use]
    pub fn find_bones_with_child_count(&self, target: usize) -> Vec<usize> {
        self.bones()
            .iter()
            .filter(|bone| bone.children.len() == target)
            .map(|bone| bone.index)
            .collect()
    }

    /// First child of `bone` in tree order, if any.
    #[inline]
    #[must_use]
    pub fn first_child(&self, bone: usize) -> Option<usize> {
        self.get(bone).and_then(|b| b.children.first().copied())
    }
}
