//! Time-to-live component for automatic entity despawning.
//!
//! The [`Ttl`] component counts down time each frame. When the remaining time
//! reaches zero the entity is despawned. There is no callback; door hit
//! effects use it as a "fire and forget" marker.
//!
//! # Related
//!
//! - [`crate::systems::ttl::ttl_system`] – system that updates and despawns entities
//! - [`crate::components::timer::Timer`] – for delayed signals instead of despawn

use bevy_ecs::prelude::Component;

/// Time-to-live component that automatically despawns entities after a duration.
///
/// The countdown respects [`WorldTime::time_scale`](crate::resources::worldtime::WorldTime).
#[derive(Component)]
pub struct Ttl {
    /// Remaining time in seconds before despawn.
    pub remaining: f32,
}

impl Ttl {
    /// Create a new Ttl with the given duration in seconds.
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}
