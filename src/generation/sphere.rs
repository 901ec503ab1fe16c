//! Lattice-sampled sphere generation

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::VoxelSink;
use crate::core::types::Result;

/// Parameters for a generated sphere
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SphereParams {
    /// World-space center
    pub center: [f32; 3],
    /// World-space radius
    pub radius: f32,
    /// Lattice points per axis across the bounding cube
    pub resolution: u32,
}

/// Emit lattice points strictly inside the sphere.
///
/// Colors ramp with lattice position (`(i, j, k) / resolution`), giving the
/// ball a corner-to-corner gradient. Samples outside the root cube are
/// skipped.
pub fn generate_sphere<S: VoxelSink>(
    params: &SphereParams,
    svo_size: f32,
    sink: &mut S,
) -> Result<()> {
    let center = Vec3::from(params.center);
    let n = params.resolution;
    let half = n as f32 / 2.0;
    let mut emitted = 0u64;

    for i in 0..n {
        let x = ((i as f32 - half) / half) * params.radius;
        for j in 0..n {
            let y = ((j as f32 - half) / half) * params.radius;
            for k in 0..n {
                let z = ((k as f32 - half) / half) * params.radius;
                let point = center + Vec3::new(x, y, z);

                if point.distance(center) >= params.radius {
                    continue;
                }
                if point.min_element() < 0.0 || point.max_element() >= svo_size {
                    continue;
                }

                let color = Vec3::new(i as f32, j as f32, k as f32) / n as f32;
                sink.accept(point, color)?;
                emitted += 1;
            }
        }
    }

    log::debug!("sphere: {} samples at resolution {}", emitted, n);
    Ok(())
}
