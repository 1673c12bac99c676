//! Time update systems.
//!
//! - [`update_world_time`] advances the shared [`WorldTime`] resource once
//!   per frame, applying `time_scale` to the provided delta.
//! - [`update_timers`] advances every [`Timer`] and fires the finished ones.
use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame += 1;
}

/// Advance timers; a finished timer is removed and a [`TimerEvent`] is
/// triggered for its entity.
pub fn update_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
    mut commands: Commands,
) {
    for (entity, mut timer) in query.iter_mut() {
        timer.elapsed += world_time.delta;
        if timer.is_finished() {
            commands.entity(entity).remove::<Timer>();
            commands.trigger(TimerEvent {
                entity,
                signal: timer.signal.clone(),
            });
        }
    }
}
