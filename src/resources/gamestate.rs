//! High-level game state resources.
//!
//! These resources track the authoritative current state of the game and any
//! pending transition requested by systems. See
//! [`crate::events::gamestate::observe_gamestate_change_event`] for how a
//! transition is applied and hooks are invoked.

use bevy_ecs::prelude::Resource;

/// Discrete high-level states the game can be in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    Setup,
    Playing,
    Quitting,
}

/// Representation of a requested next state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// Authoritative current game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn get(&self) -> &GameStates {
        &self.current
    }
    /// Update the current state immediately, without running hooks.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
    pub fn is_playing(&self) -> bool {
        self.current == GameStates::Playing
    }
}

/// Intent to change to a new game state.
///
/// [`crate::systems::gamestate::check_pending_state`] turns a pending value
/// into a [`GameStateChangedEvent`](crate::events::gamestate::GameStateChangedEvent).
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn get(&self) -> &NextGameStates {
        &self.next
    }
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }
    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}
