//! Tween completion event.
use bevy_ecs::prelude::*;

/// Triggered when a [`TweenPose`](crate::components::tween::TweenPose)
/// reaches its end. The final pose is already written.
#[derive(Event, Debug, Clone, Copy)]
pub struct TweenFinishedEvent {
    pub entity: Entity,
}
