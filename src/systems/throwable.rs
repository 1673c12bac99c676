//! Throwable observers and the per-frame hold system.
//!
//! Grab freezes the body and shows the aim line; release computes the
//! assisted throw; hitting the target (or anything door-like) stops the
//! object until its reset timer puts it back where it started.
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{info, warn};

use crate::components::collider::BoxCollider;
use crate::components::group::Group;
use crate::components::rigidbody::RigidBody;
use crate::components::throwable::{
    AimIndicator, THROWABLE_RESET_SIGNAL, Throwable, throw_velocity,
};
use crate::components::timer::Timer;
use crate::components::transform::Transform3D;
use crate::events::collision::CollisionEvent;
use crate::events::input::{GrabEvent, ReleaseEvent};
use crate::events::timer::TimerEvent;
use crate::resources::camera::Camera3D;
use crate::resources::worldsignals::{COUNTER_THROWS, WorldSignals};
use crate::resources::worldtime::WorldTime;

/// Group names a thrown object stops on, besides its target.
const STOP_GROUPS: [&str; 2] = ["door", "gate"];

type TargetQuery<'w, 's> = Query<
    'w,
    's,
    (&'static Transform3D, Option<&'static BoxCollider>),
    Without<Throwable>,
>;

/// Aim point: the target's collider center, or its position, plus the offset.
pub fn target_point(throwable: &Throwable, targets: &TargetQuery) -> Option<Vec3> {
    let target = throwable.target?;
    let (transform, collider) = targets.get(target).ok()?;
    let center = match collider {
        Some(collider) => collider.center(transform.translation),
        None => transform.translation,
    };
    Some(center + throwable.target_offset)
}

pub fn observe_grab(
    trigger: On<GrabEvent>,
    mut throwables: Query<(&mut Throwable, &mut RigidBody, Option<&mut AimIndicator>)>,
) {
    let entity = trigger.event().entity;
    let Ok((mut throwable, mut body, aim)) = throwables.get_mut(entity) else {
        return;
    };
    if !throwable.grab() {
        return;
    }
    body.stop();
    body.freeze();
    if let Some(mut aim) = aim {
        aim.enabled = true;
    }
    info!("Grabbed {:?}", entity);
}

/// Keep held objects hovering and their aim line pointed at the target.
pub fn throwable_hold_system(
    time: Res<WorldTime>,
    mut held: Query<(&mut Transform3D, &Throwable, Option<&mut AimIndicator>)>,
    targets: TargetQuery,
) {
    for (mut transform, throwable, aim) in held.iter_mut() {
        if !throwable.is_grabbed() {
            continue;
        }
        transform.translation = throwable.hover_position();
        if let Some(mut aim) = aim {
            aim.start = transform.translation;
            aim.end = target_point(throwable, &targets).unwrap_or(transform.translation);
            aim.color = AimIndicator::pulse_color(time.elapsed);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn observe_release(
    trigger: On<ReleaseEvent>,
    mut throwables: Query<(
        &mut Throwable,
        &mut RigidBody,
        &Transform3D,
        Option<&mut AimIndicator>,
    )>,
    targets: TargetQuery,
    camera: Res<Camera3D>,
    mut signals: ResMut<WorldSignals>,
    mut commands: Commands,
) {
    let entity = trigger.event().entity;
    let Ok((mut throwable, mut body, transform, aim)) = throwables.get_mut(entity) else {
        return;
    };
    if !throwable.release() {
        return;
    }
    let from = transform.translation;
    let velocity = match target_point(&throwable, &targets) {
        Some(target) => throw_velocity(from, target, throwable.arc_lift, throwable.throw_force),
        None => {
            warn!("Throwable {:?} has no target, throwing forward", entity);
            camera.forward() * throwable.throw_force
        }
    };
    body.unfreeze();
    body.set_gravity(true);
    body.set_velocity(velocity);
    if let Some(mut aim) = aim {
        aim.enabled = false;
    }
    if throwable.enable_reset {
        commands
            .entity(entity)
            .insert(Timer::new(throwable.reset_delay, THROWABLE_RESET_SIGNAL));
    }
    let throws = signals.increment(COUNTER_THROWS);
    info!("Threw {:?} at {:?} (throw #{})", entity, velocity, throws);
}

/// Stop a thrown object on its target or on anything door-like.
pub fn observe_throwable_contact(
    trigger: On<CollisionEvent>,
    mut throwables: Query<(&mut Throwable, &mut RigidBody, Has<Timer>)>,
    groups: Query<&Group>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    for (entity, other) in [(event.a, event.b), (event.b, event.a)] {
        let Ok((mut throwable, mut body, has_timer)) = throwables.get_mut(entity) else {
            continue;
        };
        let on_target = throwable.target == Some(other)
            || groups
                .get(other)
                .is_ok_and(|g| g.contains_any(&STOP_GROUPS));
        if !on_target || !throwable.impact() {
            continue;
        }
        body.stop();
        body.freeze();
        if !has_timer {
            commands
                .entity(entity)
                .insert(Timer::new(throwable.reset_delay, THROWABLE_RESET_SIGNAL));
        }
        info!("{:?} hit {:?}", entity, other);
    }
}

pub fn observe_throwable_reset(
    trigger: On<TimerEvent>,
    mut throwables: Query<(
        &mut Throwable,
        &mut RigidBody,
        &mut Transform3D,
        Option<&mut AimIndicator>,
    )>,
) {
    let event = trigger.event();
    if event.signal != THROWABLE_RESET_SIGNAL {
        return;
    }
    let Ok((mut throwable, mut body, mut transform, aim)) = throwables.get_mut(event.entity)
    else {
        return;
    };
    transform.translation = throwable.reset();
    body.stop();
    body.set_gravity(false);
    body.freeze();
    if let Some(mut aim) = aim {
        aim.enabled = false;
    }
    info!("{:?} back at rest", event.entity);
}
