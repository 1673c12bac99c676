//! Timer expiration events.
//!
//! When a [`Timer`](crate::components::timer::Timer) component reaches its
//! duration, the timer is removed and a [`TimerEvent`] is triggered. Door
//! auto-close, throwable reset and scene transition delays are all timers;
//! their observers match on `signal` and ignore the rest.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<TimerEvent>, mut doors: Query<&mut Door>| {
//!     if trigger.event().signal != DOOR_AUTOCLOSE_SIGNAL {
//!         return;
//!     }
//!     // close the door
//! });
//! ```
//!
//! # Related
//!
//! - [`crate::components::timer::Timer`] – the timer component
//! - [`crate::systems::time::update_timers`] – the system that emits these events

use bevy_ecs::prelude::*;

/// Event emitted when a timer expires.
///
/// The `entity` field identifies the entity that owned the timer, and
/// `signal` contains the signal name from the timer component.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity whose timer expired.
    pub entity: Entity,
    /// The signal name configured on the timer.
    pub signal: String,
}
