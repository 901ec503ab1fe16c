//! Noise-based procedural terrain generation

use glam::Vec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::VoxelSink;
use crate::core::types::Result;

/// Parameters controlling terrain generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TerrainParams {
    pub seed: u32,
    /// Noise frequency across the ground plane, clamped to [0.1, 64]
    pub frequency: f32,
    /// FBM octaves (detail levels), clamped to [1, 16]
    pub octaves: u32,
    /// Vertical compression divisor (larger = flatter terrain)
    pub height_scale: f32,
    /// Voxel layers stacked downward from the surface per column
    pub shell_layers: u32,
    /// Ground color (normalized RGB)
    pub ground_color: [f32; 3],
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            frequency: 8.0,
            octaves: 8,
            height_scale: 16.0,
            shell_layers: 4,
            ground_color: [0.46, 0.64, 0.38],
        }
    }
}

/// Procedural terrain generator using fractal Brownian motion (FBM)
pub struct TerrainGenerator {
    params: TerrainParams,
    noise: Fbm<Perlin>,
}

impl TerrainGenerator {
    /// Create a new terrain generator with the given parameters
    pub fn new(mut params: TerrainParams) -> Self {
        params.frequency = params.frequency.clamp(0.1, 64.0);
        params.octaves = params.octaves.clamp(1, 16);

        let noise = Fbm::<Perlin>::new(params.seed).set_octaves(params.octaves as usize);

        Self { params, noise }
    }

    /// Get terrain parameters (after clamping)
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Emit shell columns across the ground plane at voxel resolution.
    ///
    /// One height sample per ground cell, `shell_layers` voxels stacked
    /// downward from the surface. Samples falling outside the cube are
    /// skipped.
    pub fn generate<S: VoxelSink>(
        &self,
        svo_size: f32,
        voxel_size: f32,
        sink: &mut S,
    ) -> Result<()> {
        let width = (svo_size / voxel_size).round() as u32;
        let fx = self.params.frequency as f64 / width as f64;
        let color = Vec3::from(self.params.ground_color);
        let mut emitted = 0u64;

        for gz in 0..width {
            for gx in 0..width {
                // Noise in [-1, 1] mapped to [0, 1], then vertically compressed
                let noise01 = (self.noise.get([gx as f64 * fx, gz as f64 * fx]) + 1.0) / 2.0;
                let surface = (noise01 * (svo_size / self.params.height_scale) as f64) as f32;

                for layer in 0..self.params.shell_layers {
                    let point = Vec3::new(
                        gx as f32 * voxel_size,
                        surface - voxel_size * layer as f32,
                        gz as f32 * voxel_size,
                    );
                    if point.y < 0.0 || point.y >= svo_size {
                        continue;
                    }
                    sink.accept(point, color)?;
                    emitted += 1;
                }
            }
        }

        log::debug!("terrain: {} samples over {}x{} columns", emitted, width, width);
        Ok(())
    }
}
