//! Kinematic body component with multiple named acceleration forces.
//!
//! The [`RigidBody`] component stores velocity and multiple named acceleration
//! forces for an entity. Each force can be individually enabled/disabled,
//! which is how gravity is switched on when a held object is thrown.
//!
//! The `frozen` flag disables all movement calculations, used while an
//! entity's position is controlled externally (an object held in the hand,
//! an object waiting to be reset).

use bevy_ecs::prelude::Component;
use glam::Vec3;
use rustc_hash::FxHashMap;

/// Name of the force toggled by [`RigidBody::set_gravity`].
pub const GRAVITY_FORCE: &str = "gravity";
/// Standard gravity, world units per second squared.
pub const GRAVITY: f32 = 9.81;

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vec3,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            enabled: true,
        }
    }

    pub fn with_enabled(value: Vec3, enabled: bool) -> Self {
        Self { value, enabled }
    }
}

/// Body storing velocity and named acceleration forces.
///
/// Consumed by [`movement`](crate::systems::movement::movement) to update
/// [`Transform3D`](super::transform::Transform3D), and by the contact
/// detector to compute impulses.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::new().with_mass(0.5);
/// rb.add_force_with_state(GRAVITY_FORCE, Vec3::new(0.0, -GRAVITY, 0.0), false);
/// rb.freeze();
/// // later, on release
/// rb.unfreeze();
/// rb.set_gravity(true);
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec3,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// Velocity damping factor. Applied as: velocity *= (1 - friction * delta).
    pub friction: f32,
    /// Optional maximum speed. If set, velocity magnitude is clamped to this value.
    pub max_speed: Option<f32>,
    /// Mass used for contact impulses.
    pub mass: f32,
    /// Fraction of the approach velocity kept after bouncing off a solid.
    pub restitution: f32,
    /// When true, movement and contact resolution skip this body.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self {
            velocity: Vec3::ZERO,
            forces: FxHashMap::default(),
            friction: 0.0,
            max_speed: None,
            mass: 1.0,
            restitution: 0.2,
            frozen: false,
        }
    }

    /// Create a body with a disabled gravity force, ready to be thrown.
    pub fn with_gravity_disabled() -> Self {
        let mut rb = Self::new();
        rb.add_force_with_state(GRAVITY_FORCE, Vec3::new(0.0, -GRAVITY, 0.0), false);
        rb
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec3) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Add or update a named acceleration force with specified enabled state.
    pub fn add_force_with_state(&mut self, name: &str, value: Vec3, enabled: bool) {
        self.forces.insert(
            name.to_string(),
            AccelerationForce::with_enabled(value, enabled),
        );
    }

    /// Enable or disable a specific force by name.
    /// Returns false if the force doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).map(|f| f.enabled).unwrap_or(false)
    }

    /// Toggle the gravity force, creating it on first use.
    pub fn set_gravity(&mut self, enabled: bool) {
        if !self.set_force_enabled(GRAVITY_FORCE, enabled) {
            self.add_force_with_state(GRAVITY_FORCE, Vec3::new(0.0, -GRAVITY, 0.0), enabled);
        }
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec3 {
        self.forces
            .values()
            .filter(|f| f.enabled)
            .fold(Vec3::ZERO, |acc, f| acc + f.value)
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_toggle_creates_and_switches_force() {
        let mut rb = RigidBody::new();
        assert_eq!(rb.total_acceleration(), Vec3::ZERO);
        rb.set_gravity(true);
        assert!(rb.is_force_enabled(GRAVITY_FORCE));
        assert!((rb.total_acceleration().y + GRAVITY).abs() < 1e-6);
        rb.set_gravity(false);
        assert_eq!(rb.total_acceleration(), Vec3::ZERO);
    }

    #[test]
    fn enabled_forces_are_summed() {
        let mut rb = RigidBody::new();
        rb.add_force("wind", Vec3::new(1.0, 0.0, 0.0));
        rb.add_force("thrust", Vec3::new(0.0, 0.0, 2.0));
        rb.add_force_with_state("off", Vec3::new(100.0, 0.0, 0.0), false);
        assert_eq!(rb.total_acceleration(), Vec3::new(1.0, 0.0, 2.0));
    }
}
