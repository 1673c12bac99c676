//! Scene transition triggers.
//!
//! The first time an entity of the player group enters a
//! [`SceneTransition`] trigger, a one-shot [`Timer`] is armed on it; when the
//! timer fires the next scene is requested from the [`SceneDirector`].
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::group::Group;
use crate::components::scenetransition::{SCENE_TRANSITION_SIGNAL, SceneTransition};
use crate::components::timer::Timer;
use crate::events::collision::TriggerEnterEvent;
use crate::events::timer::TimerEvent;
use crate::resources::scenestore::SceneDirector;

pub fn observe_scene_trigger(
    trigger: On<TriggerEnterEvent>,
    mut transitions: Query<&mut SceneTransition>,
    groups: Query<&Group>,
    mut commands: Commands,
) {
    let event = *trigger.event();
    let Ok(mut transition) = transitions.get_mut(event.trigger) else {
        return;
    };
    if transition.triggered {
        debug!("Scene trigger {:?} already used", event.trigger);
        return;
    }
    let is_player = groups
        .get(event.other)
        .is_ok_and(|g| g.contains(&transition.player_group));
    if !is_player {
        return;
    }
    transition.triggered = true;
    info!(
        "Entering {} in {:.1}s",
        transition.next_scene, transition.delay
    );
    commands
        .entity(event.trigger)
        .insert(Timer::new(transition.delay, SCENE_TRANSITION_SIGNAL));
}

pub fn observe_scene_transition_timer(
    trigger: On<TimerEvent>,
    transitions: Query<&SceneTransition>,
    mut director: ResMut<SceneDirector>,
) {
    let event = trigger.event();
    if event.signal != SCENE_TRANSITION_SIGNAL {
        return;
    }
    if let Ok(transition) = transitions.get(event.entity) {
        director.request(transition.next_scene.clone());
    }
}
