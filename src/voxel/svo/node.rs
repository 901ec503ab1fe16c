//! Sparse Voxel Octree node

use glam::Vec3;

/// Index of a node in the octree arena
pub type NodeId = u32;

/// One cube cell of the subdivision.
///
/// Children are arena indices rather than owning pointers; the slot position
/// is the octant code (bit 0=x, bit 1=y, bit 2=z). A cell either has no
/// children or all eight — insertion allocates the full octant set before
/// descending.
#[derive(Clone, Debug)]
pub struct SvoNode {
    /// True only for cells subdivided to max depth that hold a color
    pub is_leaf: bool,
    /// Octant-indexed children; `None` marks an unallocated slot
    pub children: [Option<NodeId>; 8],
    /// Normalized RGB, meaningful only when `is_leaf`
    pub color: Vec3,
    /// Distance from the root, 0..=max_depth
    pub depth: u8,
}

impl SvoNode {
    /// Create an empty interior node at the given depth
    pub fn new(depth: u8) -> Self {
        Self {
            is_leaf: false,
            children: [None; 8],
            color: Vec3::ZERO,
            depth,
        }
    }

    /// Get child id at octant index
    pub fn child(&self, octant: u8) -> Option<NodeId> {
        debug_assert!(octant < 8);
        self.children[octant as usize]
    }

    /// Bit i set iff octant i has a child
    pub fn child_mask(&self) -> u8 {
        let mut mask = 0u8;
        for (i, child) in self.children.iter().enumerate() {
            if child.is_some() {
                mask |= 1 << i;
            }
        }
        mask
    }

    /// Count of allocated children
    pub fn child_count(&self) -> u8 {
        self.child_mask().count_ones() as u8
    }

    /// Check if any child slot is allocated
    pub fn has_children(&self) -> bool {
        self.children.iter().any(|c| c.is_some())
    }
}
