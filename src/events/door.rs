//! Door events.
//!
//! - [`DoorImpactEvent`] – something hit the door with a force
//! - [`DoorCommandEvent`] – external open / close / toggle request
//! - [`DoorStateChangedEvent`] – a transition started or finished
use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::door::{DoorCommand, DoorState};

#[derive(Event, Debug, Clone, Copy)]
pub struct DoorImpactEvent {
    pub door: Entity,
    pub force: f32,
    pub point: Vec3,
    /// The hitting entity, when known. A throwable source notifies the escape room.
    pub source: Option<Entity>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct DoorCommandEvent {
    pub door: Entity,
    pub command: DoorCommand,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorStateChangedEvent {
    pub door: Entity,
    pub state: DoorState,
}
