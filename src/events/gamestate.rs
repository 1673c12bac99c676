//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers
//! [`observe_gamestate_change_event`], which applies the transition to
//! [`GameState`] and runs the hook registered for the new state in
//! [`SystemsStore`] (`"setup"`, `"enter_play"`, `"quit_game"`).
//!
//! Keeping the intent separate from the hooks avoids borrowing conflicts
//! between the requesting system and the world-mutating setup code.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// - Reads the intention from [`NextGameState`]; does nothing when it is
///   [`Unchanged`].
/// - Copies the new value into [`GameState`], clears the request and runs the
///   enter hook of the new state.
/// - Missing resources or hooks are logged and skipped.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    next_game_state: Option<ResMut<NextGameState>>,
    game_state: Option<ResMut<GameState>>,
    systems_store: Option<Res<SystemsStore>>,
) {
    let (Some(mut next_game_state), Some(mut game_state)) = (next_game_state, game_state) else {
        warn!("NextGameState or GameState missing in observe_gamestate_change_event");
        return;
    };

    match next_game_state.get().clone() {
        Pending(new_state) => {
            info!(
                "Transitioning from {:?} to {:?}",
                game_state.get(),
                new_state
            );
            debug!("Exited {:?} state", game_state.get());
            game_state.set(new_state.clone());
            next_game_state.reset();
            match systems_store.as_deref() {
                Some(store) => on_state_enter(&new_state, &mut commands, store),
                None => warn!("SystemsStore missing, no enter hook for {:?}", new_state),
            }
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

/// Hook name registered in [`SystemsStore`] for a state, if any.
pub fn enter_hook_name(state: &GameStates) -> Option<&'static str> {
    match state {
        GameStates::None => None,
        GameStates::Setup => Some("setup"),
        GameStates::Playing => Some("enter_play"),
        GameStates::Quitting => Some("quit_game"),
    }
}

/// Internal: run the state-specific "enter" system for the given state.
fn on_state_enter(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    let Some(name) = enter_hook_name(state) else {
        debug!("Entered {:?} state", state);
        return;
    };
    match systems_store.get(name) {
        Some(id) => {
            commands.run_system(*id);
        }
        None => warn!("System '{}' not found in SystemsStore", name),
    }
}
