//! Scene generation: producers of (point, color) samples
//!
//! Generators know nothing about octree internals. They emit samples into a
//! [`VoxelSink`], and the octree participates by implementing the trait with
//! its own `insert`.

pub mod config;
pub mod terrain;
pub mod sphere;

pub use config::SceneParams;
pub use sphere::{SphereParams, generate_sphere};
pub use terrain::{TerrainGenerator, TerrainParams};

use glam::Vec3;

use crate::core::types::Result;
use crate::voxel::svo::Octree;

/// Receiver of generated voxel samples
pub trait VoxelSink {
    /// Receive one sample; implementations may reject it
    fn accept(&mut self, point: Vec3, color: Vec3) -> Result<()>;
}

impl VoxelSink for Octree {
    fn accept(&mut self, point: Vec3, color: Vec3) -> Result<()> {
        self.insert(point, color)
    }
}

/// Build a complete scene octree from declarative parameters
pub fn build_scene(params: &SceneParams) -> Result<Octree> {
    let mut octree = Octree::new(params.size, params.max_depth);
    let size = octree.size();
    let voxel = octree.voxel_size();

    if let Some(terrain_params) = &params.terrain {
        let terrain = TerrainGenerator::new(terrain_params.clone());
        terrain.generate(size, voxel, &mut octree)?;
    }
    for sphere in &params.spheres {
        generate_sphere(sphere, size, &mut octree)?;
    }

    log::info!(
        "scene built: {} nodes, depth {}, {} world units",
        octree.node_count(),
        params.max_depth,
        params.size,
    );
    Ok(octree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_scene() {
        let params = SceneParams {
            size: 1.0,
            max_depth: 4,
            terrain: Some(TerrainParams::default()),
            spheres: vec![SphereParams {
                center: [0.5, 0.5, 0.5],
                radius: 0.2,
                resolution: 8,
            }],
        };

        let octree = build_scene(&params).unwrap();
        assert!(!octree.is_empty());
        assert!(octree.node_count() > 1);
        assert_eq!(octree.flatten().len(), octree.node_count());
    }

    #[test]
    fn test_octree_sink_rejects_out_of_bounds() {
        let mut octree = Octree::new(1.0, 2);
        assert!(octree.accept(Vec3::splat(2.0), Vec3::ONE).is_err());
    }
}
