//! Escape-room notifications.
//!
//! [`EscapeEvent`] is what interactables, doors and scene setup send to the
//! escape room manager; [`EscapeStageChangedEvent`] is what it sends back out
//! whenever the stage moves.
use bevy_ecs::prelude::*;

use crate::resources::escaperoom::EscapeStage;

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum EscapeEvent {
    /// Paint buttons, hide reveals, lock the exit and show instructions.
    Setup,
    ButtonPressed(String),
    SecondClueRead,
    CrystalTouched,
    CrystalHitDoor,
    DoorTouched,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeStageChangedEvent {
    pub from: EscapeStage,
    pub to: EscapeStage,
}
