//! Contact and trigger notifications.
//!
//! The contact detector emits [`CollisionEvent`] when two solid boxes start
//! touching (enter only, never per frame while they stay in contact). The
//! trigger detector emits [`TriggerEnterEvent`] when an entity enters a
//! [`SphereTrigger`](crate::components::collider::SphereTrigger).
//!
//! Both are global events; the observers in [`crate::systems`] match on the
//! entity fields.
use bevy_ecs::prelude::*;
use glam::Vec3;

/// Event fired when two entities with BoxCollider start overlapping.
///
/// No ordering guarantees are provided for `a` and `b`; observers check both.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
    /// Magnitude of the contact impulse (relative speed times reduced mass).
    pub impulse: f32,
    /// Magnitude of the relative velocity along the contact.
    pub relative_speed: f32,
    /// Approximate contact point in world space.
    pub point: Vec3,
}

impl CollisionEvent {
    /// The other participant, if `entity` is one of them.
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.a == entity {
            Some(self.b)
        } else if self.b == entity {
            Some(self.a)
        } else {
            None
        }
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct TriggerEnterEvent {
    pub trigger: Entity,
    pub other: Entity,
}
