//! Flattened GPU-consumable record array and packed integer formats

use glam::Vec3;

use super::node::NodeId;
use super::octree::Octree;

/// Sentinel `first_child_index` for records with no children
pub const NO_CHILD: u32 = u32::MAX;

/// Exported per-node record.
///
/// Records are emitted pre-order, octants ascending, with each node's
/// present children in one contiguous run starting at `first_child_index`.
/// Consumers must treat a record as terminal whenever `child_mask == 0`,
/// independent of `is_leaf`: the format conflates "no children" and "leaf"
/// under the one sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatNode {
    /// Bit i set iff octant i is present in the source tree
    pub child_mask: u8,
    /// Index of the first record of this node's child run, or `NO_CHILD`
    pub first_child_index: u32,
    /// Packed RGB color, see [`pack_color`]
    pub color: u32,
    /// True iff the node was marked a leaf during construction
    pub is_leaf: bool,
}

impl FlatNode {
    /// Pack into the 64-bit GPU layout: color in the high byte region,
    /// child mask at bits 48..56, leaf flag at bit 47, first child index
    /// masked to 24 bits. The shift keeps only the low byte of the packed
    /// color, matching the exported format exactly.
    pub fn packed64(&self) -> u64 {
        ((self.color as u64) << 56)
            | ((self.child_mask as u64) << 48)
            | ((self.is_leaf as u64) << 47)
            | ((self.first_child_index as u64) & 0x00FF_FFFF)
    }

    /// Pack into the legacy 32-bit layout: child mask in the high byte,
    /// first child index masked to 24 bits. Color and leaf flag are omitted.
    pub fn packed32(&self) -> u32 {
        ((self.child_mask as u32) << 24) | (self.first_child_index & 0x00FF_FFFF)
    }
}

/// Pack a normalized color into a 24-bit RGB field.
///
/// Channels are truncated to integers, not scaled: a channel below 1.0
/// packs to 0, so sub-unit colors collapse to black. Consumers that want
/// visible colors must pre-scale channels to [0, 255].
pub fn pack_color(color: Vec3) -> u32 {
    let r = color.x as u8;
    let g = color.y as u8;
    let b = color.z as u8;
    (r as u32) | (g as u32) << 8 | (b as u32) << 16
}

impl Octree {
    /// Flatten the tree into the linear record array.
    ///
    /// Pre-order, depth-first, octant slots visited in ascending order; a
    /// node's record precedes its children. Must not be called concurrently
    /// with insertion.
    pub fn flatten(&self) -> Vec<FlatNode> {
        let mut flat = Vec::with_capacity(self.node_count());
        if !self.is_empty() {
            self.flatten_node(0, &mut flat);
        }
        flat
    }

    fn flatten_node(&self, id: NodeId, out: &mut Vec<FlatNode>) {
        let node = self.node(id);
        let index = out.len();
        out.push(FlatNode {
            child_mask: 0,
            first_child_index: NO_CHILD,
            color: pack_color(node.color),
            is_leaf: node.is_leaf,
        });

        let mask = node.child_mask();
        if mask != 0 {
            let first = out.len() as u32;
            for octant in 0..8 {
                if let Some(child) = node.children[octant] {
                    self.flatten_node(child, out);
                }
            }
            out[index].child_mask = mask;
            out[index].first_child_index = first;
        }
    }
}
