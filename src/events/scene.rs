//! Scene lifecycle event.
use bevy_ecs::prelude::*;

/// Triggered after a scene's entities are spawned.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneLoadedEvent {
    pub name: String,
}
