//! Ray type and operations

use crate::core::types::Vec3;
use super::aabb::Aabb;

/// A ray defined by origin and direction (direction need not be normalized)
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: Vec3,
}

/// Result of clipping a ray against an AABB
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AabbHit {
    /// Ray parameter at entry (clamped to 0 when the origin is inside)
    pub t_near: f32,
    /// Ray parameter at exit
    pub t_far: f32,
    /// Axis (0=x, 1=y, 2=z) of the face the ray enters through
    pub entry_axis: usize,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
        }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-AABB clip using the slab method.
    /// Returns None when the ray misses the box or the box lies entirely behind it.
    pub fn clip_to_aabb(&self, aabb: &Aabb) -> Option<AabbHit> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let t_min = t1.min(t2);
        let t_max = t1.max(t2);

        let t_near = t_min.x.max(t_min.y).max(t_min.z);
        let t_far = t_max.x.min(t_max.y).min(t_max.z);

        if t_near <= t_far && t_far >= 0.0 {
            let entry_axis = if t_near == t_min.x {
                0
            } else if t_near == t_min.y {
                1
            } else {
                2
            };
            Some(AabbHit {
                t_near: t_near.max(0.0),
                t_far,
                entry_axis,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_clip_hit() {
        let ray = Ray::new(Vec3::new(-2.0, 0.5, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let hit = ray.clip_to_aabb(&aabb).unwrap();
        assert!((hit.t_near - 2.0).abs() < 0.001);
        assert!((hit.t_far - 3.0).abs() < 0.001);
        assert_eq!(hit.entry_axis, 0);
    }

    #[test]
    fn test_clip_miss() {
        let ray = Ray::new(Vec3::new(-2.0, 5.0, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(ray.clip_to_aabb(&aabb).is_none());
    }

    #[test]
    fn test_clip_behind() {
        // Box entirely behind the ray origin
        let ray = Ray::new(Vec3::new(2.0, 0.5, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(ray.clip_to_aabb(&aabb).is_none());
    }

    #[test]
    fn test_clip_inside() {
        let ray = Ray::new(Vec3::splat(0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let hit = ray.clip_to_aabb(&aabb).unwrap();
        assert_eq!(hit.t_near, 0.0); // inside, so t_near clamped to 0
    }

    #[test]
    fn test_clip_entry_axis_z() {
        let ray = Ray::new(Vec3::new(0.1, 0.1, -1.0), Vec3::Z);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let hit = ray.clip_to_aabb(&aabb).unwrap();
        assert_eq!(hit.entry_axis, 2);
        assert!((hit.t_near - 1.0).abs() < 0.001);
    }
}
