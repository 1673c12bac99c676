//! Per-frame input resource.
//!
//! The host (or the autopilot in the headless binary) writes the state of
//! the devices it owns into [`InputState`] once per frame, before the update
//! schedule runs. Gameplay systems only ever read it.
//!
//! Buttons are [`BoolState`]s: call [`BoolState::update`] with the raw "is
//! down" value every frame and the edge flags follow.
use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state with edge flags.
pub struct BoolState {
    /// Whether the button is currently held.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Feed this frame's raw state.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Pointer ray (from the camera through the cursor) and its button.
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    pub ray_origin: Vec3,
    pub ray_direction: Vec3,
    pub button: BoolState,
}

impl Default for PointerState {
    fn default() -> Self {
        PointerState {
            ray_origin: Vec3::ZERO,
            ray_direction: Vec3::Z,
            button: BoolState::default(),
        }
    }
}

/// Resource capturing the per-frame input relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    /// `x` strafe right, `y` forward, each in [-1, 1].
    pub move_axes: Vec2,
    /// Mouse movement this frame.
    pub look_delta: Vec2,
    /// Toggles the cursor lock (escape key).
    pub back: BoolState,
    pub pointer: PointerState,
}

impl InputState {
    /// Clear per-frame deltas. Buttons keep their held state.
    pub fn clear_motion(&mut self) {
        self.move_axes = Vec2::ZERO;
        self.look_delta = Vec2::ZERO;
    }
}

/// Whether the cursor is captured for mouse look. Unlocked means the
/// pointer can click, hover and grab.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CursorState {
    pub locked: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        CursorState { locked: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_fire_for_one_frame() {
        let mut b = BoolState::default();
        b.update(true);
        assert!(b.active && b.just_pressed && !b.just_released);
        b.update(true);
        assert!(b.active && !b.just_pressed);
        b.update(false);
        assert!(!b.active && b.just_released);
        b.update(false);
        assert!(!b.just_released);
    }

    #[test]
    fn cursor_starts_locked() {
        assert!(CursorState::default().locked);
        let input = InputState::default();
        assert_eq!(input.move_axes, Vec2::ZERO);
        assert!(!input.pointer.button.active);
    }
}
