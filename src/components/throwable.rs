//! Grab-and-throw object with trajectory assistance.
//!
//! A [`Throwable`] cycles through
//!
//! ```text
//! AtRest -> Grabbed -> InFlight -> Resetting -> AtRest
//!                          \____________________/
//!                            (reset timer fires)
//! ```
//!
//! Holding and throwing is a single enum, so an object can never be grabbed
//! and thrown at the same time. The velocity itself lives in the entity's
//! [`RigidBody`](super::rigidbody::RigidBody).

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;

use super::material::Color;

/// Signal name of the reset [`Timer`](super::timer::Timer) on a throwable.
pub const THROWABLE_RESET_SIGNAL: &str = "throwable_reset";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrowState {
    AtRest,
    Grabbed,
    InFlight,
    Resetting,
}

#[derive(Component, Clone, Debug)]
pub struct Throwable {
    pub throw_force: f32,
    pub reset_delay: f32,
    pub enable_reset: bool,
    /// Entity the throw is aimed at (the exit door).
    pub target: Option<Entity>,
    /// Added to the target center.
    pub target_offset: Vec3,
    pub hover_distance: f32,
    /// Upward component blended into the aim direction before normalizing.
    pub arc_lift: f32,
    pub rest_position: Vec3,
    state: ThrowState,
}

impl Throwable {
    pub fn new(rest_position: Vec3) -> Self {
        Throwable {
            throw_force: 25.0,
            reset_delay: 3.0,
            enable_reset: true,
            target: None,
            target_offset: Vec3::ZERO,
            hover_distance: 0.5,
            arc_lift: 0.2,
            rest_position,
            state: ThrowState::AtRest,
        }
    }

    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_throw_force(mut self, force: f32) -> Self {
        self.throw_force = force;
        self
    }

    pub fn with_reset(mut self, enabled: bool, delay: f32) -> Self {
        self.enable_reset = enabled;
        self.reset_delay = delay;
        self
    }

    pub fn state(&self) -> ThrowState {
        self.state
    }

    pub fn is_grabbed(&self) -> bool {
        self.state == ThrowState::Grabbed
    }

    /// Released and not yet back at rest.
    pub fn is_thrown(&self) -> bool {
        matches!(self.state, ThrowState::InFlight | ThrowState::Resetting)
    }

    pub fn hover_position(&self) -> Vec3 {
        self.rest_position + Vec3::Y * self.hover_distance
    }

    /// AtRest -> Grabbed.
    pub fn grab(&mut self) -> bool {
        self.transition(ThrowState::AtRest, ThrowState::Grabbed)
    }

    /// Grabbed -> InFlight.
    pub fn release(&mut self) -> bool {
        self.transition(ThrowState::Grabbed, ThrowState::InFlight)
    }

    /// InFlight -> Resetting, after hitting the target.
    pub fn impact(&mut self) -> bool {
        self.transition(ThrowState::InFlight, ThrowState::Resetting)
    }

    /// Back to AtRest from any state. Returns the position to restore.
    pub fn reset(&mut self) -> Vec3 {
        self.state = ThrowState::AtRest;
        self.rest_position
    }

    fn transition(&mut self, from: ThrowState, to: ThrowState) -> bool {
        if self.state == from {
            self.state = to;
            true
        } else {
            false
        }
    }
}

/// Initial velocity of an assisted throw from `from` toward `target`.
///
/// The aim direction gets `arc_lift` added upward and is normalized again,
/// so the magnitude always equals `force`.
pub fn throw_velocity(from: Vec3, target: Vec3, arc_lift: f32, force: f32) -> Vec3 {
    let direction = (target - from).normalize_or_zero();
    (direction + Vec3::Y * arc_lift).normalize_or_zero() * force
}

/// Line from a held throwable to its target point. The host draws it.
#[derive(Component, Clone, Copy, Debug)]
pub struct AimIndicator {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
    pub width: f32,
    pub enabled: bool,
}

impl Default for AimIndicator {
    fn default() -> Self {
        AimIndicator {
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            color: Color::GREEN,
            width: 0.05,
            enabled: false,
        }
    }
}

impl AimIndicator {
    /// Pulsing green at world time `t`.
    pub fn pulse_color(t: f32) -> Color {
        let pulse = (t * 3.0).sin() * 0.3 + 0.7;
        Color::rgba(0.0, pulse, 0.0, 0.8)
    }
}
