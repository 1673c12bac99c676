//! First-person camera resource.
//!
//! The player controller writes it every frame; the host reads it to render
//! and to build pointer rays, and the throwable falls back to its forward
//! vector when it has no target.
use bevy_ecs::prelude::Resource;
use glam::Vec3;

use crate::components::player::look_direction;

#[derive(Resource, Debug, Clone, Copy)]
pub struct Camera3D {
    pub position: Vec3,
    /// Degrees, same convention as the player controller.
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Camera3D {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera3D {
    pub fn forward(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }
}
