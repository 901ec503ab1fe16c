//! Sparse Voxel Octree container: storage, insertion, point location

use glam::{IVec3, Vec3};

use super::node::{NodeId, SvoNode};
use crate::core::error::Error;
use crate::core::types::Result;

/// Octant code for a point relative to a cell center (bit 0=x, bit 1=y, bit 2=z).
///
/// Shared by insertion and point location so boundary points classify into
/// the >=-side octant identically in both.
fn octant_index(point: Vec3, center: Vec3) -> u8 {
    (point.x >= center.x) as u8
        | ((point.y >= center.y) as u8) << 1
        | ((point.z >= center.z) as u8) << 2
}

/// Sparse Voxel Octree over the cube [0, size) on each axis.
///
/// Nodes live in an arena; the root is at index 0 once the first insertion
/// has happened, and an empty arena is the empty tree. Construction is
/// append-only and single-threaded; queries never mutate.
#[derive(Debug, Clone)]
pub struct Octree {
    /// All octree nodes (root at index 0 when non-empty)
    nodes: Vec<SvoNode>,
    /// World-space edge length of the root cube
    size: f32,
    /// Maximum subdivision depth
    max_depth: u8,
}

impl Octree {
    /// Create a new empty octree
    pub fn new(size: f32, max_depth: u8) -> Self {
        debug_assert!(size > 0.0);
        debug_assert!(max_depth < 32); // cell_size shifts by depth
        Self {
            nodes: Vec::new(),
            size,
            max_depth,
        }
    }

    /// Get root node, `None` for the empty tree
    pub fn root(&self) -> Option<&SvoNode> {
        self.nodes.first()
    }

    /// Get node by arena index
    pub fn node(&self, id: NodeId) -> &SvoNode {
        &self.nodes[id as usize]
    }

    /// Check if no insertion has happened yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get number of allocated nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get root cube edge length in world units
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Get maximum depth
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Cell edge length at the given depth
    pub fn cell_size(&self, depth: u8) -> f32 {
        self.size / (1u32 << depth) as f32
    }

    /// Calculate voxel size at maximum depth
    pub fn voxel_size(&self) -> f32 {
        self.cell_size(self.max_depth)
    }

    /// Insert a colored sample, subdividing down to `max_depth`.
    ///
    /// The fully-subdivided octant containing `point` becomes a leaf holding
    /// `color`. First writer wins: if the point already resolves to a leaf,
    /// the call is a no-op and the stored color is preserved. Points outside
    /// `[0, size)` on any axis are rejected.
    pub fn insert(&mut self, point: Vec3, color: Vec3) -> Result<()> {
        if point.min_element() < 0.0 || point.max_element() >= self.size {
            return Err(Error::OutOfBounds {
                point,
                size: self.size,
            });
        }

        if let Some(node) = self.locate(point) {
            if node.is_leaf {
                return Ok(());
            }
        }

        if self.nodes.is_empty() {
            self.push_node(SvoNode::new(0));
        }
        self.insert_at(0, point, IVec3::ZERO, color, 0);
        Ok(())
    }

    /// Find the deepest existing node whose cell contains `point`.
    ///
    /// Returns a non-leaf above `max_depth` when the subtree under `point`
    /// was never populated; `None` only for the empty tree.
    pub fn locate(&self, point: Vec3) -> Option<&SvoNode> {
        let mut node = self.nodes.first()?;
        let mut offset = Vec3::ZERO;
        let mut depth = 0u8;

        loop {
            let size = self.cell_size(depth);
            let center = offset + Vec3::splat(size * 0.5);
            let octant = octant_index(point, center);

            match node.child(octant) {
                Some(id) => {
                    offset += Vec3::new(
                        if octant & 1 != 0 { size * 0.5 } else { 0.0 },
                        if octant & 2 != 0 { size * 0.5 } else { 0.0 },
                        if octant & 4 != 0 { size * 0.5 } else { 0.0 },
                    );
                    node = &self.nodes[id as usize];
                    depth += 1;
                }
                None => return Some(node),
            }
        }
    }

    fn insert_at(&mut self, node_id: NodeId, point: Vec3, cell: IVec3, color: Vec3, depth: u8) {
        if depth == self.max_depth {
            let node = &mut self.nodes[node_id as usize];
            node.is_leaf = true;
            node.color = color;
            return;
        }

        // Every visited node gets its full octant set before we descend.
        let children = self.ensure_children(node_id, depth);

        let size = self.cell_size(depth);
        let center = cell.as_vec3() * size + Vec3::splat(size * 0.5);
        let octant = octant_index(point, center);

        // Integer cell origin accumulates by shift-and-or; it feeds only the
        // octant math above and is never stored on the node.
        let child_cell = IVec3::new(
            cell.x << 1 | (octant & 1) as i32,
            cell.y << 1 | ((octant >> 1) & 1) as i32,
            cell.z << 1 | ((octant >> 2) & 1) as i32,
        );

        self.insert_at(children[octant as usize], point, child_cell, color, depth + 1);
    }

    /// Allocate any missing children of `node_id`, returning all eight ids
    fn ensure_children(&mut self, node_id: NodeId, depth: u8) -> [NodeId; 8] {
        let mut ids = [0 as NodeId; 8];
        for octant in 0..8 {
            ids[octant] = match self.nodes[node_id as usize].children[octant] {
                Some(id) => id,
                None => {
                    let id = self.push_node(SvoNode::new(depth + 1));
                    self.nodes[node_id as usize].children[octant] = Some(id);
                    id
                }
            };
        }
        ids
    }

    fn push_node(&mut self, node: SvoNode) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    #[test]
    fn test_new_is_empty() {
        let octree = Octree::new(1.0, 3);
        assert!(octree.is_empty());
        assert_eq!(octree.node_count(), 0);
        assert!(octree.root().is_none());
        assert!(octree.locate(Vec3::splat(0.5)).is_none());
    }

    #[test]
    fn test_cell_sizes() {
        let octree = Octree::new(64.0, 4);
        assert_eq!(octree.cell_size(0), 64.0);
        assert_eq!(octree.cell_size(3), 8.0);
        assert_eq!(octree.voxel_size(), 4.0);
    }

    #[test]
    fn test_insert_locate_roundtrip() {
        let mut octree = Octree::new(1.0, 1);
        octree.insert(Vec3::splat(0.1), RED).unwrap();

        let leaf = octree.locate(Vec3::splat(0.1)).unwrap();
        assert!(leaf.is_leaf);
        assert_eq!(leaf.depth, 1);
        assert_eq!(leaf.color, RED);

        // Octant 7 was never populated; its child exists (eager allocation)
        // but is not a leaf.
        let other = octree.locate(Vec3::splat(0.9)).unwrap();
        assert!(!other.is_leaf);
    }

    #[test]
    fn test_first_writer_wins() {
        let mut octree = Octree::new(1.0, 2);
        octree.insert(Vec3::splat(0.1), RED).unwrap();
        octree.insert(Vec3::splat(0.1), GREEN).unwrap();

        let leaf = octree.locate(Vec3::splat(0.1)).unwrap();
        assert_eq!(leaf.color, RED);
    }

    #[test]
    fn test_repeat_insert_allocates_nothing() {
        let mut octree = Octree::new(1.0, 2);
        octree.insert(Vec3::splat(0.1), RED).unwrap();
        let count = octree.node_count();
        octree.insert(Vec3::splat(0.1), GREEN).unwrap();
        assert_eq!(octree.node_count(), count);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut octree = Octree::new(1.0, 2);
        assert!(octree.insert(Vec3::new(1.5, 0.5, 0.5), RED).is_err());
        assert!(octree.insert(Vec3::new(0.5, -0.1, 0.5), RED).is_err());
        // size itself is outside the half-open range
        assert!(octree.insert(Vec3::new(0.5, 0.5, 1.0), RED).is_err());
        assert!(octree.is_empty());
    }

    #[test]
    fn test_eager_child_allocation() {
        let mut octree = Octree::new(1.0, 2);
        octree.insert(Vec3::splat(0.1), RED).unwrap();

        // Root + 8 children + 8 grandchildren under the visited octant
        assert_eq!(octree.node_count(), 17);

        let root = octree.root().unwrap();
        assert_eq!(root.child_count(), 8);

        // The visited depth-1 node has a full octant set; its siblings none.
        let visited = octree.node(root.child(0).unwrap());
        assert_eq!(visited.child_count(), 8);
        let sibling = octree.node(root.child(7).unwrap());
        assert_eq!(sibling.child_count(), 0);
    }

    #[test]
    fn test_boundary_point_classifies_high() {
        // A coordinate exactly on the midpoint goes to the >= side, and
        // insert and locate agree on it.
        let mut octree = Octree::new(1.0, 1);
        octree.insert(Vec3::splat(0.5), RED).unwrap();

        let leaf = octree.locate(Vec3::splat(0.5)).unwrap();
        assert!(leaf.is_leaf);
        assert_eq!(leaf.color, RED);

        let low = octree.locate(Vec3::splat(0.499)).unwrap();
        assert!(!low.is_leaf);
    }

    #[test]
    fn test_deep_insert() {
        let mut octree = Octree::new(64.0, 4);
        let point = Vec3::new(10.5, 20.0, 5.0);
        octree.insert(point, GREEN).unwrap();

        let leaf = octree.locate(point).unwrap();
        assert!(leaf.is_leaf);
        assert_eq!(leaf.depth, 4);
        assert_eq!(leaf.color, GREEN);
    }

    #[test]
    fn test_distinct_leaves_keep_distinct_colors() {
        let mut octree = Octree::new(1.0, 3);
        octree.insert(Vec3::splat(0.05), RED).unwrap();
        octree.insert(Vec3::splat(0.95), GREEN).unwrap();

        assert_eq!(octree.locate(Vec3::splat(0.05)).unwrap().color, RED);
        assert_eq!(octree.locate(Vec3::splat(0.95)).unwrap().color, GREEN);
    }
}
