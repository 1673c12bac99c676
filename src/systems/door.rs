//! Door observers.
//!
//! Everything that moves a [`Door`] goes through [`start_transition`]:
//! impacts (from solid contacts or the detection volume), external
//! commands and the auto-close timer. A transition inserts a smoothstep
//! [`TweenPose`]; when the tween reports completion the door settles in its
//! new state and, if it is now open, arms the auto-close [`Timer`].
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::door::{
    DOOR_AUTOCLOSE_SIGNAL, Door, DoorAction, DoorDetector, HitEffect, ImpactResponse,
};
use crate::components::group::Group;
use crate::components::rigidbody::RigidBody;
use crate::components::sceneentity::SceneEntity;
use crate::components::throwable::{ThrowState, Throwable};
use crate::components::timer::Timer;
use crate::components::transform::Transform3D;
use crate::components::ttl::Ttl;
use crate::components::tween::{Easing, TweenPose};
use crate::events::audio::AudioCmd;
use crate::events::collision::{CollisionEvent, TriggerEnterEvent};
use crate::events::door::{DoorCommandEvent, DoorImpactEvent, DoorStateChangedEvent};
use crate::events::escape::EscapeEvent;
use crate::events::timer::TimerEvent;
use crate::events::tween::TweenFinishedEvent;
use crate::resources::worldsignals::{COUNTER_DOOR_OPENINGS, WorldSignals};

/// Seconds a hit effect marker lives.
pub const HIT_EFFECT_TTL: f32 = 0.5;

/// Group names that mark an object as a ball for door contacts.
const BALL_GROUPS: [&str; 2] = ["crystal", "ball"];

fn is_ball(throwable: bool, group: Option<&Group>) -> bool {
    throwable || group.is_some_and(|g| g.contains_any(&BALL_GROUPS))
}

/// Begin opening or closing `entity`. Returns false when the door refuses
/// (already animating or already in the requested state).
///
/// Any pending auto-close timer is cancelled.
pub fn start_transition(
    entity: Entity,
    door: &mut Door,
    current: &Transform3D,
    action: DoorAction,
    commands: &mut Commands,
    audio: &mut MessageWriter<AudioCmd>,
    signals: &mut WorldSignals,
) -> bool {
    let Some((from, to)) = door.begin(action, current) else {
        return false;
    };
    let duration = door.animation_duration();
    commands
        .entity(entity)
        .remove::<Timer>()
        .insert(TweenPose::new(from, to, duration).with_easing(Easing::SmoothStep));

    let sound = match action {
        DoorAction::Open => door.open_sound.clone(),
        DoorAction::Close => door.close_sound.clone(),
    };
    if let Some(id) = sound {
        audio.write(AudioCmd::PlayFx { id });
    }
    if action == DoorAction::Open {
        signals.increment(COUNTER_DOOR_OPENINGS);
    }
    info!("Door {:?} {:?} ({:.2}s)", entity, door.state(), duration);
    commands.trigger(DoorStateChangedEvent {
        door: entity,
        state: door.state(),
    });
    true
}

#[allow(clippy::too_many_arguments)]
pub fn observe_door_impact(
    trigger: On<DoorImpactEvent>,
    mut doors: Query<(&mut Door, &Transform3D)>,
    throwables: Query<(), With<Throwable>>,
    mut signals: ResMut<WorldSignals>,
    mut audio: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    let Ok((mut door, transform)) = doors.get_mut(event.door) else {
        warn!("Impact on {:?}, which is not a door", event.door);
        return;
    };
    info!(
        "Door {:?} hit with force {:.2} at {:?}",
        event.door, event.force, event.point
    );

    if door.hit_effect {
        commands.spawn((
            Transform3D::new(event.point),
            HitEffect { door: event.door },
            Ttl::new(HIT_EFFECT_TTL),
            SceneEntity::new("hit_effect"),
        ));
    }

    match door.response_to_impact(event.force) {
        ImpactResponse::TooWeak => {
            info!(
                "Impact too weak: need {:.2}, got {:.2}",
                door.minimum_force, event.force
            );
        }
        ImpactResponse::Ignored => {
            debug!("Door {:?} ignores impact while {:?}", event.door, door.state());
        }
        ImpactResponse::Start(action) => {
            let started = start_transition(
                event.door,
                &mut door,
                transform,
                action,
                &mut commands,
                &mut audio,
                &mut signals,
            );
            let by_throwable = event.source.is_some_and(|s| throwables.contains(s));
            if started && action == DoorAction::Open && by_throwable {
                commands.trigger(EscapeEvent::CrystalHitDoor);
            }
        }
    }
}

pub fn observe_door_command(
    trigger: On<DoorCommandEvent>,
    mut doors: Query<(&mut Door, &Transform3D)>,
    mut signals: ResMut<WorldSignals>,
    mut audio: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    let Ok((mut door, transform)) = doors.get_mut(event.door) else {
        warn!("Door command for {:?}, which is not a door", event.door);
        return;
    };
    let Some(action) = door.action_for_command(event.command) else {
        debug!(
            "Door {:?} ignores {:?} while {:?}",
            event.door,
            event.command,
            door.state()
        );
        return;
    };
    start_transition(
        event.door,
        &mut door,
        transform,
        action,
        &mut commands,
        &mut audio,
        &mut signals,
    );
}

/// Settle a door when its tween completes.
pub fn observe_door_tween_finished(
    trigger: On<TweenFinishedEvent>,
    mut doors: Query<&mut Door>,
    mut commands: Commands,
) {
    let entity = trigger.event().entity;
    let Ok(mut door) = doors.get_mut(entity) else {
        return;
    };
    let state = door.finish();
    info!("Door {:?} is now {:?}", entity, state);
    commands.trigger(DoorStateChangedEvent {
        door: entity,
        state,
    });
    if door.is_open() && door.arms_auto_close() {
        commands
            .entity(entity)
            .insert(Timer::new(door.close_delay, DOOR_AUTOCLOSE_SIGNAL));
    }
}

pub fn observe_door_autoclose(
    trigger: On<TimerEvent>,
    mut doors: Query<(&mut Door, &Transform3D)>,
    mut signals: ResMut<WorldSignals>,
    mut audio: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.signal != DOOR_AUTOCLOSE_SIGNAL {
        return;
    }
    let Ok((mut door, transform)) = doors.get_mut(event.entity) else {
        return;
    };
    if !door.is_open() || door.is_animating() {
        return;
    }
    start_transition(
        event.entity,
        &mut door,
        transform,
        DoorAction::Close,
        &mut commands,
        &mut audio,
        &mut signals,
    );
}

/// Solid contacts between a door and a ball become impacts.
pub fn observe_door_contact(
    trigger: On<CollisionEvent>,
    doors: Query<&Door>,
    others: Query<(Has<Throwable>, Option<&Group>)>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    for (door_entity, other) in [(event.a, event.b), (event.b, event.a)] {
        let Ok(door) = doors.get(door_entity) else {
            continue;
        };
        let ball = others
            .get(other)
            .is_ok_and(|(throwable, group)| is_ball(throwable, group));
        if !ball {
            debug!("Door {:?} touched by {:?}, not a ball", door_entity, other);
            continue;
        }
        let force = if door.assist_impacts {
            door.impact_force(event.relative_speed)
        } else {
            event.impulse
        };
        commands.trigger(DoorImpactEvent {
            door: door_entity,
            force,
            point: event.point,
            source: Some(other),
        });
    }
}

/// A throwable in flight entering a door's detection volume counts as a hit.
pub fn observe_door_detection(
    trigger: On<TriggerEnterEvent>,
    detectors: Query<&DoorDetector>,
    doors: Query<&Door>,
    throwables: Query<(&Throwable, &RigidBody, &Transform3D)>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    let Ok(detector) = detectors.get(event.trigger) else {
        return;
    };
    let Ok((throwable, body, transform)) = throwables.get(event.other) else {
        return;
    };
    if throwable.state() != ThrowState::InFlight {
        return;
    }
    let Ok(door) = doors.get(detector.door) else {
        warn!("Detector {:?} points at a missing door", event.trigger);
        return;
    };
    let force = door.impact_force(body.velocity.length());
    debug!("Throwable {:?} entered door detection", event.other);
    commands.trigger(DoorImpactEvent {
        door: detector.door,
        force,
        point: transform.translation,
        source: Some(event.other),
    });
}
