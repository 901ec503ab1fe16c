//! Sparse Voxel Octree implementation

pub mod node;
pub mod octree;
pub mod flat;
pub mod raycast;

pub use node::{NodeId, SvoNode};
pub use octree::Octree;
pub use flat::{FlatNode, NO_CHILD};
pub use raycast::Intersection;
