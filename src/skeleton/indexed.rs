use smallvec::SmallVec;

use crate::errors::{BodymapError, Result};
use crate::skeleton::mesh::MeshSkeleton;

/// Parent index value marking the root bone.
pub const ROOT_PARENT: i32 = -1;

/// A single bone in the indexed tree.
///
/// `index` is the bone's position in the original flat list and stays
/// valid in the name-sorted view, so parent/child navigation always goes
/// through tree indices regardless of which ordering a bone was found in.
#[derive(Debug, Clone)]
pub struct IndexedBone {
    pub name: String,
    pub parent_index: i32,
    pub index: usize,
    /// Direct children, in tree order.
    pub children: SmallVec<[usize; 4]>,
}

impl IndexedBone {
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_index == ROOT_PARENT
    }

    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Validated tree representation of a flat mesh skeleton.
///
/// Built once per auto-mapping run and read-only thereafter. Holds the
/// bones in tree order plus an optional stable name-sorted copy of the
/// same bones; entries in the sorted copy keep their original tree
/// indices.
#[derive(Debug, Clone)]
pub struct IndexedBoneList {
    bones: Vec<IndexedBone>,
    sorted_bones: Option<Vec<IndexedBone>>,
    root_index: usize,
}

impl IndexedBoneList {
    /// Builds the indexed tree from a flat skeleton.
    ///
    /// Validates structure in a single pass: exactly one bone must have
    /// parent index -1, and every other bone's parent index must point to
    /// an earlier entry in the list. Any violation fails the build with a
    /// structural error and nothing is returned.
    pub fn from_skeleton(skeleton: &MeshSkeleton, sort_by_name: bool) -> Result<Self> {
        let count = skeleton.bones.len();
        let mut bones: Vec<IndexedBone> = Vec::with_capacity(count);
        let mut root_index: Option<usize> = None;

        for (index, desc) in skeleton.bones.iter().enumerate() {
            if desc.parent_index == ROOT_PARENT {
                if let Some(first) = root_index {
                    return Err(BodymapError::MultipleRoots {
                        first,
                        second: index,
                    });
                }
                root_index = Some(index);
            } else if desc.parent_index < 0 || desc.parent_index as usize >= index {
                return Err(BodymapError::ParentOutOfRange {
                    name: desc.name.clone(),
                    index,
                    parent_index: desc.parent_index,
                });
            }

            bones.push(IndexedBone {
                name: desc.name.clone(),
                parent_index: desc.parent_index,
                index,
                children: SmallVec::new(),
            });
        }

        let Some(root_index) = root_index else {
            return Err(BodymapError::MissingRoot);
        };

        // Parent links are validated above, so child wiring cannot fail.
        for index in 0..count {
            let parent = bones[index].parent_index;
            if parent != ROOT_PARENT {
                bones[parent as usize].children.push(index);
            }
        }

        let sorted_bones = sort_by_name.then(|| {
            let mut sorted = bones.clone();
            sorted.sort_by(|a, b| {
                a.name
                    .to_ascii_lowercase()
                    .cmp(&b.name.to_ascii_lowercase())
            });
            sorted
        });

        Ok(Self {
            bones,
            sorted_bones,
            root_index,
        })
    }

    /// Bones in tree order.
    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[IndexedBone] {
        &self.bones
    }

    /// Bones in name-sorted order, if the list was built with sorting.
    #[inline]
    #[must_use]
    pub fn sorted_bones(&self) -> Option<&[IndexedBone]> {
        self.sorted_bones.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn root_index(&self) -> usize {
        self.root_index
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&IndexedBone> {
        self.bones.get(index)
    }

    /// Maps a position in the sorted view back to the tree index.
    #[must_use]
    pub fn tree_index_from_sorted(&self, sorted_pos: usize) -> Option<usize> {
        self.sorted_bones
            .as_ref()
            .and_then(|sorted| sorted.get(sorted_pos))
            .map(|bone| bone.index)
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
