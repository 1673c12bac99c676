//! Colliders and trigger volumes.
//!
//! - [`BoxCollider`] – axis-aligned solid box, used for contacts and pointer picking
//! - [`SphereTrigger`] – non-solid sphere that reports entering entities
//! - [`Ground`] – marks boxes whose top face the player can stand on
//!
//! Boxes ignore the entity rotation; a rotating door keeps its closed
//! footprint for contacts.

use bevy_ecs::prelude::Component;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub half_extents: Vec3,
    pub offset: Vec3,
}

impl BoxCollider {
    /// Create a BoxCollider with given full size.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            half_extents: Vec3::new(width, height, depth).abs() * 0.5,
            offset: Vec3::ZERO,
        }
    }

    pub fn cube(size: f32) -> Self {
        Self::new(size, size, size)
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn center(&self, position: Vec3) -> Vec3 {
        position + self.offset
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    pub fn aabb(&self, position: Vec3) -> (Vec3, Vec3) {
        let c = self.center(position);
        (c - self.half_extents, c + self.half_extents)
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vec3, other: &Self, other_position: Vec3) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x
            && max_a.x > min_b.x
            && min_a.y < max_b.y
            && max_a.y > min_b.y
            && min_a.z < max_b.z
            && max_a.z > min_b.z
    }

    /// Minimum translation that moves `self` out of `other`.
    ///
    /// Returns `None` when the boxes do not overlap. The vector points from
    /// `other` toward `self` along the axis of least penetration.
    pub fn penetration(&self, position: Vec3, other: &Self, other_position: Vec3) -> Option<Vec3> {
        if !self.overlaps(position, other, other_position) {
            return None;
        }
        let delta = self.center(position) - other.center(other_position);
        let overlap = self.half_extents + other.half_extents - delta.abs();
        let sign = |v: f32| if v < 0.0 { -1.0 } else { 1.0 };
        let push = if overlap.x <= overlap.y && overlap.x <= overlap.z {
            Vec3::new(overlap.x * sign(delta.x), 0.0, 0.0)
        } else if overlap.y <= overlap.z {
            Vec3::new(0.0, overlap.y * sign(delta.y), 0.0)
        } else {
            Vec3::new(0.0, 0.0, overlap.z * sign(delta.z))
        };
        Some(push)
    }

    /// Point containment in world space.
    pub fn contains_point(&self, position: Vec3, point: Vec3) -> bool {
        let (min, max) = self.aabb(position);
        point.cmpge(min).all() && point.cmple(max).all()
    }

    /// Closest point of the box to `point`.
    pub fn closest_point(&self, position: Vec3, point: Vec3) -> Vec3 {
        let (min, max) = self.aabb(position);
        point.clamp(min, max)
    }

    /// Slab test. Returns the distance along `direction` to the first hit.
    ///
    /// `direction` does not need to be normalized; the distance is in units
    /// of `direction`. A ray starting inside the box hits at 0.
    pub fn ray_intersection(&self, position: Vec3, origin: Vec3, direction: Vec3) -> Option<f32> {
        let (min, max) = self.aabb(position);
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            if d.abs() < f32::EPSILON {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv;
            let mut t1 = (max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

/// Non-solid spherical detection volume centered on the entity.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct SphereTrigger {
    pub radius: f32,
}

impl SphereTrigger {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }

    /// Sphere vs box test.
    pub fn overlaps_box(&self, center: Vec3, collider: &BoxCollider, position: Vec3) -> bool {
        let closest = collider.closest_point(position, center);
        closest.distance_squared(center) <= self.radius * self.radius
    }
}

/// Walkable surface marker.
#[derive(Debug, Clone, Copy, Component)]
pub struct Ground;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_and_penetration_pick_shallowest_axis() {
        let floor = BoxCollider::new(10.0, 1.0, 10.0);
        let cube = BoxCollider::cube(1.0);
        let floor_pos = Vec3::new(0.0, -0.5, 0.0);
        let cube_pos = Vec3::new(0.0, 0.4, 0.0);
        assert!(cube.overlaps(cube_pos, &floor, floor_pos));
        let push = cube.penetration(cube_pos, &floor, floor_pos).unwrap();
        assert!((push.y - 0.1).abs() < 1e-5);
        assert_eq!(push.x, 0.0);
        assert!(cube.penetration(Vec3::new(0.0, 2.0, 0.0), &floor, floor_pos).is_none());
    }

    #[test]
    fn ray_hits_front_face() {
        let b = BoxCollider::cube(2.0);
        let t = b
            .ray_intersection(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Z)
            .unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!(b.ray_intersection(Vec3::new(0.0, 5.0, 5.0), Vec3::ZERO, Vec3::Z).is_none());
        assert!(b.ray_intersection(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::Z).is_none());
    }

    #[test]
    fn sphere_trigger_reaches_box_edge() {
        let trigger = SphereTrigger::new(1.5);
        let b = BoxCollider::cube(1.0);
        assert!(trigger.overlaps_box(Vec3::ZERO, &b, Vec3::new(1.9, 0.0, 0.0)));
        assert!(!trigger.overlaps_box(Vec3::ZERO, &b, Vec3::new(2.1, 0.0, 0.0)));
    }
}
