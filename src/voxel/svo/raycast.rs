//! Closest-intersection queries: a variable-cell DDA over the octree

use glam::Vec3;

use super::octree::Octree;
use crate::math::{Aabb, Ray};

/// Ray-march step budget; exhausting it is a normal no-hit
const MAX_STEPS: usize = 100;
/// Nudge applied on axes whose direction component is exactly zero
const RAY_EPSILON: f32 = 1e-5;
/// Tolerance for axis tie-breaks and the voxel-center clamp
const EPSILON: f32 = 1e-5;
/// Substituted for near-zero denominators in step-distance division
const TINY: f32 = 1e-6;
/// Push across a crossed face so the next lookup lands inside the new cell
const FACE_BIAS: f32 = 1e-4;

/// Result of a successful closest-intersection query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Unit axis vector of the struck face, oriented along the ray's
    /// travel on the crossed axis; zero when the origin already sits
    /// inside an occupied voxel
    pub normal: Vec3,
    /// World-space center of the struck voxel
    pub voxel_pos: Vec3,
    /// Stored leaf color
    pub color: Vec3,
}

fn safe_div(a: f32, b: f32) -> f32 {
    a / if b.abs() < TINY { TINY.copysign(b) } else { b }
}

/// Next grid line at the cell increment: rounded up along a positive
/// direction component, down otherwise.
fn next_grid_line(d: f32, value: f32, increment: f32) -> f32 {
    let inv = 1.0 / increment;
    if d > 0.0 {
        (value * inv).ceil() / inv
    } else {
        (value * inv).floor() / inv
    }
}

impl Octree {
    /// March a ray through the tree and return the first occupied voxel it
    /// strikes, or `None` for a miss.
    ///
    /// The step size adapts to the depth of the node each sample lands in,
    /// so the march takes root-sized strides through unpopulated space and
    /// voxel-sized ones near geometry. `direction` need not be normalized.
    /// A ray originating outside the root cube marches from its entry face;
    /// one that exits the cube, or exhausts the step budget, misses.
    pub fn closest_intersection(&self, origin: Vec3, direction: Vec3) -> Option<Intersection> {
        let mut pos = origin;
        let d = direction;

        // A sample sitting exactly on a grid plane of an axis the ray does
        // not travel would yield a zero step distance on that axis.
        if d.x == 0.0 {
            pos.x += RAY_EPSILON;
        }
        if d.y == 0.0 {
            pos.y += RAY_EPSILON;
        }
        if d.z == 0.0 {
            pos.z += RAY_EPSILON;
        }

        let bounds = Aabb::root_cube(self.size());
        let mut normal = Vec3::ZERO;

        // Clip an outside origin to the cube; the entry face supplies the
        // initial crossing normal.
        if !bounds.contains_point(pos) {
            let ray = Ray::new(pos, d);
            let hit = ray.clip_to_aabb(&bounds)?;
            let mut entry = Vec3::ZERO;
            entry[hit.entry_axis] = if d[hit.entry_axis] < 0.0 { -1.0 } else { 1.0 };
            pos = ray.at(hit.t_near) + entry * FACE_BIAS;
            normal = entry;
        }

        for _ in 0..MAX_STEPS {
            let node = self.locate(pos)?;
            let increment = self.cell_size(node.depth);

            if node.is_leaf {
                let clamped = pos.clamp(Vec3::ZERO, Vec3::splat(self.size() - EPSILON));
                let voxel_coord = (clamped / increment).floor();
                return Some(Intersection {
                    normal,
                    voxel_pos: (voxel_coord + 0.5) * increment,
                    color: node.color,
                });
            }

            if !bounds.contains_point(pos) {
                return None;
            }

            // Signed direction units to the next grid line, per axis.
            let x_dist = safe_div(next_grid_line(d.x, pos.x, increment) - pos.x, d.x).abs();
            let y_dist = safe_div(next_grid_line(d.y, pos.y, increment) - pos.y, d.y).abs();
            let z_dist = safe_div(next_grid_line(d.z, pos.z, increment) - pos.z, d.z).abs();
            let closest = x_dist.min(y_dist).min(z_dist);

            // Tie-break in x, y, z order with an epsilon-tolerant compare.
            normal = if (closest - x_dist).abs() < EPSILON {
                if d.x < 0.0 { -Vec3::X } else { Vec3::X }
            } else if (closest - y_dist).abs() < EPSILON {
                if d.y < 0.0 { -Vec3::Y } else { Vec3::Y }
            } else if d.z < 0.0 {
                -Vec3::Z
            } else {
                Vec3::Z
            };

            let step_epsilon = increment * EPSILON;
            pos += d * (closest + step_epsilon) + normal * FACE_BIAS;
        }

        None
    }
}
