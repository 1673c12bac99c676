//! World-space pose of an entity.
//!
//! [`Transform3D`] replaces the separate position/rotation pair a 2D engine
//! would use. Forward is local `+Z`, right is local `+X`, up is world `+Y`.

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform3D {
    pub fn new(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::new(Vec3::new(x, y, z))
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotate around the vertical axis by `degrees`.
    pub fn with_yaw_degrees(mut self, degrees: f32) -> Self {
        self.rotation = Quat::from_rotation_y(degrees.to_radians());
        self
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Interpolate translation linearly and rotation spherically.
    pub fn lerp(&self, other: &Transform3D, t: f32) -> Transform3D {
        Transform3D {
            translation: self.translation.lerp(other.translation, t),
            rotation: self.rotation.slerp(other.rotation, t),
        }
    }
}
