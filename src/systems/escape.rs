//! Escape room manager.
//!
//! [`observe_escape_event`] is the only place that moves the
//! [`EscapeStage`]. It paints buttons, reveals the clue board and crystal,
//! and keeps the optional [`Hud`] texts current.
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::dynamictext::DynamicText;
use crate::components::material::{Color, Glow, Hidden, Material};
use crate::components::puzzle::{PressOutcome, PuzzleButton};
use crate::events::escape::{EscapeEvent, EscapeStageChangedEvent};
use crate::resources::escaperoom::{EscapeRoom, EscapeStage, Hud};
use crate::resources::worldsignals::{COUNTER_WRONG_PRESSES, FLAG_ESCAPED, WorldSignals};

pub const CLUE_TEXT: &str = "Well done! The siblings' order is true,\n\
Find the crystal among the tools of wisdom here.\n\n\
Throw it at the wall of the first rhyme you read\n\
And you will soon be freed.";

const CRYSTAL_GLOW_RANGE: f32 = 10.0;

fn set_hud(hud: &mut Option<ResMut<Hud>>, riddle: Option<String>, status: impl Into<String>) {
    if let Some(hud) = hud.as_mut() {
        if let Some(riddle) = riddle {
            hud.riddle = riddle;
        }
        hud.status = status.into();
    }
}

fn change_stage(room: &mut EscapeRoom, to: EscapeStage, commands: &mut Commands) {
    if let Some(from) = room.set_stage(to) {
        info!("Escape stage {:?} -> {:?}", from, to);
        commands.trigger(EscapeStageChangedEvent { from, to });
    }
}

fn paint_buttons(
    room: &EscapeRoom,
    buttons: &Query<&PuzzleButton>,
    materials: &mut Query<&mut Material>,
) {
    for (id, &entity) in room.buttons.iter() {
        let Ok(button) = buttons.get(entity) else {
            warn!("Button {} has no puzzle data", id);
            continue;
        };
        if let Ok(mut material) = materials.get_mut(entity) {
            material.color = button.base_color;
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn observe_escape_event(
    trigger: On<EscapeEvent>,
    room: Option<ResMut<EscapeRoom>>,
    mut hud: Option<ResMut<Hud>>,
    buttons: Query<&PuzzleButton>,
    mut materials: Query<&mut Material>,
    mut texts: Query<&mut DynamicText>,
    glows: Query<&Glow>,
    mut signals: ResMut<WorldSignals>,
    mut commands: Commands,
) {
    let event = trigger.event().clone();
    let Some(mut room) = room else {
        warn!("{:?} without an escape room", event);
        return;
    };

    match event {
        EscapeEvent::Setup => {
            paint_buttons(&room, &buttons, &mut materials);
            for (name, reference) in [
                ("clue board", room.clue_board),
                ("clue text", room.clue_text),
                ("crystal", room.crystal),
            ] {
                match reference {
                    Some(entity) => {
                        commands.entity(entity).insert(Hidden);
                    }
                    None => warn!("Escape room has no {}", name),
                }
            }
            match room.exit_door.map(|door| materials.get_mut(door)) {
                Some(Ok(mut material)) => material.color = Color::RED,
                Some(Err(_)) => warn!("Exit door has no material"),
                None => warn!("Escape room has no exit door"),
            }
            room.sequence.reset();
            let hint = room.sequence.order_hint();
            set_hud(
                &mut hud,
                Some(format!(
                    "Welcome to the Escape Room!\n\nFirst, press the sibling buttons in the correct order:\n{}",
                    hint
                )),
                format!("Press buttons in order: {}", hint),
            );
            info!("Escape room set up, order {}", hint);
            change_stage(&mut room, EscapeStage::ButtonPuzzleInProgress, &mut commands);
        }
        EscapeEvent::ButtonPressed(id) => {
            if room.stage() != EscapeStage::ButtonPuzzleInProgress {
                return;
            }
            match room.sequence.press(&id) {
                PressOutcome::Advanced { next } => {
                    info!("Correct! Button: {}", id);
                    if let Some(Ok(mut material)) = room.button(&id).map(|b| materials.get_mut(b))
                    {
                        material.color = Color::WHITE;
                    }
                    set_hud(&mut hud, None, format!("Correct! Next: {}", next));
                }
                PressOutcome::Completed => {
                    if let Some(Ok(mut material)) = room.button(&id).map(|b| materials.get_mut(b))
                    {
                        material.color = Color::WHITE;
                    }
                    complete_puzzle(&mut room, &mut hud, &mut texts, &mut commands);
                }
                PressOutcome::Reset => {
                    info!("Wrong order ({}), resetting", id);
                    signals.increment(COUNTER_WRONG_PRESSES);
                    paint_buttons(&room, &buttons, &mut materials);
                    set_hud(
                        &mut hud,
                        None,
                        format!("Wrong order! Try again: {}", room.sequence.order_hint()),
                    );
                }
                PressOutcome::Ignored => {}
            }
        }
        EscapeEvent::SecondClueRead => {
            if !room.puzzle_complete() {
                set_hud(&mut hud, None, "Complete the button puzzle first!");
                return;
            }
            info!("Second clue read");
            set_hud(
                &mut hud,
                Some("You've read the clue!\n\nClick and drag the crystal to throw it at the door!".into()),
                "Throw the crystal at the door to escape!",
            );
        }
        EscapeEvent::CrystalTouched => {
            if !room.crystal_ready() {
                set_hud(&mut hud, None, "Complete the first puzzle!");
                return;
            }
            set_hud(
                &mut hud,
                Some("Crystal is ready to throw!\n\nClick and drag to aim, release to throw!".into()),
                "Throw the crystal at the door!",
            );
        }
        EscapeEvent::CrystalHitDoor => {
            if room.stage() < EscapeStage::CrystalAvailable {
                set_hud(&mut hud, None, "Something's not right...");
                return;
            }
            if room.stage() != EscapeStage::CrystalAvailable {
                return;
            }
            info!("Crystal hit the door");
            set_hud(
                &mut hud,
                Some("🎉 PERFECT THROW! 🎉\n\nThe door is opening!\nYou have successfully escaped!".into()),
                "ESCAPE ROOM COMPLETE! WELL DONE!",
            );
            if let Some(crystal) = room.crystal {
                let range = glows
                    .get(crystal)
                    .map(|g| g.range)
                    .unwrap_or(CRYSTAL_GLOW_RANGE);
                commands
                    .entity(crystal)
                    .insert(Glow::new(Color::GREEN, 5.0, range));
            }
            change_stage(&mut room, EscapeStage::DoorHit, &mut commands);
        }
        EscapeEvent::DoorTouched => {
            if room.stage() != EscapeStage::DoorHit {
                if room.stage() < EscapeStage::DoorHit {
                    set_hud(&mut hud, None, "Throw the crystal at the door first!");
                }
                return;
            }
            info!("Door touched, player escapes");
            set_hud(
                &mut hud,
                Some("🎉 YOU ESCAPED! CONGRATULATIONS! 🎉".into()),
                "FREEDOM ACHIEVED!",
            );
            signals.set_flag(FLAG_ESCAPED);
            change_stage(&mut room, EscapeStage::Escaped, &mut commands);
        }
    }
}

fn complete_puzzle(
    room: &mut EscapeRoom,
    hud: &mut Option<ResMut<Hud>>,
    texts: &mut Query<&mut DynamicText>,
    commands: &mut Commands,
) {
    info!("Button puzzle complete");
    change_stage(room, EscapeStage::ButtonPuzzleComplete, commands);
    set_hud(
        hud,
        Some("Excellent! Button puzzle complete!\n\nThe crystal has appeared in the bookshelf!\nThrow it at the door to escape!".into()),
        "Crystal is now visible! Throw it at the door!",
    );

    for reference in [room.clue_board, room.clue_text].into_iter().flatten() {
        commands.entity(reference).remove::<Hidden>();
    }
    match room.clue_text.map(|e| texts.get_mut(e)) {
        Some(Ok(mut text)) => text.set_content(CLUE_TEXT),
        Some(Err(_)) => warn!("Clue text object has no text"),
        None => warn!("Escape room has no clue text"),
    }

    let Some(crystal) = room.crystal else {
        warn!("No crystal to reveal, stage stays at ButtonPuzzleComplete");
        return;
    };
    commands
        .entity(crystal)
        .remove::<Hidden>()
        .insert(Glow::new(Color::CYAN, 2.0, CRYSTAL_GLOW_RANGE));
    change_stage(room, EscapeStage::CrystalAvailable, commands);
}
