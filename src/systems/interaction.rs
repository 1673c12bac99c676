//! Interaction dispatch.
//!
//! Clicks (from the pointer system) and proximity entries (from the trigger
//! detector) both end up as an [`InteractEvent`]. The observer here applies
//! the cooldown and forwards the matching [`EscapeEvent`].
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::group::Group;
use crate::components::interaction::{Interactable, InteractionKind};
use crate::events::collision::TriggerEnterEvent;
use crate::events::escape::EscapeEvent;
use crate::events::input::{InteractEvent, InteractionSource};
use crate::resources::escaperoom::EscapeRoom;
use crate::resources::worldtime::WorldTime;

pub const PLAYER_GROUP: &str = "player";

/// The player walking into an interactable's trigger interacts with it.
pub fn observe_proximity(
    trigger: On<TriggerEnterEvent>,
    interactables: Query<(), With<Interactable>>,
    groups: Query<&Group>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    if !interactables.contains(event.trigger) {
        return;
    }
    let is_player = groups
        .get(event.other)
        .is_ok_and(|g| g.contains(PLAYER_GROUP));
    if is_player {
        commands.trigger(InteractEvent {
            entity: event.trigger,
            source: InteractionSource::Proximity,
        });
    }
}

pub fn escape_event_for(kind: &InteractionKind) -> EscapeEvent {
    match kind {
        InteractionKind::Button(id) => EscapeEvent::ButtonPressed(id.clone()),
        InteractionKind::Clue => EscapeEvent::SecondClueRead,
        InteractionKind::Crystal => EscapeEvent::CrystalTouched,
        InteractionKind::Door => EscapeEvent::DoorTouched,
    }
}

pub fn observe_interact(
    trigger: On<InteractEvent>,
    mut interactables: Query<&mut Interactable>,
    time: Res<WorldTime>,
    room: Option<Res<EscapeRoom>>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    let Ok(mut interactable) = interactables.get_mut(event.entity) else {
        return;
    };
    if !interactable.try_interact(time.elapsed) {
        debug!("{:?} is cooling down", event.entity);
        return;
    }
    if room.is_none() {
        warn!(
            "Interaction with {:?} but no escape room is loaded",
            event.entity
        );
        return;
    }
    info!("Interact {:?} ({:?})", interactable.kind, event.source);
    commands.trigger(escape_event_for(&interactable.kind));
}
