//! First-person player components.
//!
//! - [`FirstPersonController`] – walk speed, mouse look and grounding mode
//! - [`Grounding`] – how the controller keeps the player on the floor
//! - [`SpawnPoint`] – where (and facing where) the player starts a scene
//!
//! Angles are in degrees. Yaw 0 faces `+Z` and grows toward `+X`; positive
//! pitch looks down, so mouse `dy` is subtracted from it.

use bevy_ecs::prelude::Component;
use glam::{Vec2, Vec3};

/// Pitch limit in degrees.
pub const MAX_PITCH: f32 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Grounding {
    /// Keep the player `height` above the highest ground below.
    Snap { height: f32 },
    /// Fall at standard gravity until `height` above ground, then stand.
    Gravity { height: f32 },
}

#[derive(Component, Clone, Debug)]
pub struct FirstPersonController {
    pub walk_speed: f32,
    pub mouse_sensitivity: f32,
    pub eye_height: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub grounding: Grounding,
    pub vertical_velocity: f32,
    pub grounded: bool,
}

impl Default for FirstPersonController {
    fn default() -> Self {
        FirstPersonController {
            walk_speed: 5.0,
            mouse_sensitivity: 2.0,
            eye_height: 1.6,
            yaw: 0.0,
            pitch: 0.0,
            grounding: Grounding::Snap { height: 2.0 },
            vertical_velocity: 0.0,
            grounded: false,
        }
    }
}

impl Grounding {
    pub fn height(&self) -> f32 {
        match *self {
            Grounding::Snap { height } | Grounding::Gravity { height } => height,
        }
    }
}

impl FirstPersonController {
    /// Horizontal forward for the current yaw.
    pub fn forward_flat(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(yaw.sin(), 0.0, yaw.cos())
    }

    pub fn right_flat(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        Vec3::new(yaw.cos(), 0.0, -yaw.sin())
    }

    /// Full view direction including pitch.
    pub fn look_direction(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }

    /// Apply a mouse delta: yaw += dx * sensitivity, pitch -= dy * sensitivity.
    pub fn apply_look(&mut self, delta: Vec2) {
        self.yaw = (self.yaw + delta.x * self.mouse_sensitivity).rem_euclid(360.0);
        self.pitch = (self.pitch - delta.y * self.mouse_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// World-space displacement for one frame of input (`axes.x` strafe,
    /// `axes.y` forward). Diagonals are not faster than straight moves.
    pub fn walk_displacement(&self, axes: Vec2, dt: f32) -> Vec3 {
        let dir = self.right_flat() * axes.x + self.forward_flat() * axes.y;
        dir.normalize_or_zero() * self.walk_speed * dt
    }
}

/// Unit view vector for a yaw/pitch pair in degrees.
pub fn look_direction(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    let pitch = pitch_degrees.to_radians();
    Vec3::new(yaw.sin() * pitch.cos(), -pitch.sin(), yaw.cos() * pitch.cos())
}

/// Yaw in degrees that faces from `from` toward `to` on the horizontal plane.
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    d.x.atan2(d.z).to_degrees()
}

/// Pitch in degrees that looks from `from` toward `to`.
pub fn pitch_towards(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    let flat = Vec2::new(d.x, d.z).length();
    (-d.y).atan2(flat).to_degrees()
}

#[derive(Component, Clone, Copy, Debug)]
pub struct SpawnPoint {
    pub position: Vec3,
    pub yaw_degrees: f32,
    /// Height above the ground found under `position`.
    pub height: f32,
}

impl SpawnPoint {
    pub fn new(position: Vec3, yaw_degrees: f32, height: f32) -> Self {
        SpawnPoint {
            position,
            yaw_degrees,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped_and_inverted() {
        let mut c = FirstPersonController {
            mouse_sensitivity: 10.0,
            ..Default::default()
        };
        c.apply_look(Vec2::new(0.0, 20.0));
        assert_eq!(c.pitch, -90.0);
        c.apply_look(Vec2::new(0.0, -40.0));
        assert_eq!(c.pitch, 90.0);
        c.apply_look(Vec2::new(9.0, 0.0));
        assert!((c.yaw - 90.0).abs() < 1e-4);
    }

    #[test]
    fn walking_follows_yaw() {
        let c = FirstPersonController {
            yaw: 90.0,
            ..Default::default()
        };
        let d = c.walk_displacement(Vec2::new(0.0, 1.0), 1.0);
        assert!(d.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-4));
        let diag = c.walk_displacement(Vec2::new(1.0, 1.0), 1.0);
        assert!((diag.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn aim_helpers_point_at_target() {
        let from = Vec3::new(0.0, 1.6, 0.0);
        let to = Vec3::new(3.0, 0.6, 3.0);
        let dir = look_direction(yaw_towards(from, to), pitch_towards(from, to));
        assert!(dir.abs_diff_eq((to - from).normalize(), 1e-4));
    }
}
