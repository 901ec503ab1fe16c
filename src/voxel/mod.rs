//! Voxel data structures and operations

pub mod svo;

pub use svo::{FlatNode, Intersection, Octree, SvoNode};
