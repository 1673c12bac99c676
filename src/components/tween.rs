//! Tween component for animated pose interpolation.
//!
//! [`TweenPose`] animates an entity's [`Transform3D`](super::transform::Transform3D)
//! from one pose to another over a fixed duration. When it finishes the final
//! pose is written exactly, the component is removed and a
//! [`TweenFinishedEvent`](crate::events::tween::TweenFinishedEvent) is
//! triggered on the entity. See [`crate::systems::tween`] for the update system.

use bevy_ecs::prelude::Component;

use super::transform::Transform3D;

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Hermite `3t² - 2t³`. Doors use this.
    SmoothStep,
}

/// Animates an entity's pose between two transforms.
#[derive(Component, Clone, Debug)]
pub struct TweenPose {
    /// Starting pose.
    pub from: Transform3D,
    /// Ending pose.
    pub to: Transform3D,
    /// Duration in seconds.
    pub duration: f32,
    /// Easing function to use.
    pub easing: Easing,
    /// Current time within the tween.
    pub time: f32,
    /// Whether the tween is currently playing.
    pub playing: bool,
}

impl TweenPose {
    pub fn new(from: Transform3D, to: Transform3D, duration: f32) -> Self {
        TweenPose {
            from,
            to,
            duration,
            easing: Easing::Linear,
            time: 0.0,
            playing: true,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Normalized progress in [0, 1]. A zero duration counts as finished.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.time / self.duration).clamp(0.0, 1.0)
        }
    }
}
