//! Player intent events derived from [`InputState`](crate::resources::input::InputState).
//!
//! The pointer system turns clicks into [`InteractEvent`], [`GrabEvent`] and
//! [`ReleaseEvent`]; the interaction observer also raises [`InteractEvent`]
//! when the player walks into an interactable's proximity trigger.
use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionSource {
    Click,
    Proximity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct InteractEvent {
    pub entity: Entity,
    pub source: InteractionSource,
}

/// Pointer pressed on a throwable.
#[derive(Event, Debug, Clone, Copy)]
pub struct GrabEvent {
    pub entity: Entity,
}

/// Pointer released while holding a throwable.
#[derive(Event, Debug, Clone, Copy)]
pub struct ReleaseEvent {
    pub entity: Entity,
}

/// Put the player back on the scene's spawn point.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RespawnEvent {}
