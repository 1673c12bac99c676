//! Global signal storage resource.
//!
//! The [`WorldSignals`] resource is a world-wide blackboard for values that
//! do not belong to any entity: the loaded scene name, the `escaped` and
//! `quit_game` flags, and a few counters the headless binary reports.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::{FxHashMap, FxHashSet};

/// Set when the player walks out through the opened exit.
pub const FLAG_ESCAPED: &str = "escaped";
/// Set to ask the main loop to stop.
pub const FLAG_QUIT_GAME: &str = "quit_game";
/// Name of the loaded scene.
pub const STRING_SCENE: &str = "scene";
pub const COUNTER_THROWS: &str = "throws";
pub const COUNTER_DOOR_OPENINGS: &str = "door_openings";
pub const COUNTER_WRONG_PRESSES: &str = "wrong_presses";

/// Global signal storage for cross-system communication.
#[derive(Debug, Clone, Default, Resource)]
pub struct WorldSignals {
    /// Integer counters addressed by string keys.
    pub integers: FxHashMap<String, i32>,
    /// String signals addressed by string keys.
    pub strings: FxHashMap<String, String>,
    /// Presence-only boolean flags; a key being present means "true".
    pub flags: FxHashSet<String>,
    /// Entities of interest, addressed by name.
    pub entities: FxHashMap<String, Entity>,
}

impl WorldSignals {
    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.integers.get(key).copied()
    }
    /// Add one to a counter, starting from zero.
    pub fn increment(&mut self, key: &str) -> i32 {
        let value = self.integers.entry(key.to_string()).or_insert(0);
        *value += 1;
        *value
    }
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }
    pub fn get_string(&self, key: &str) -> Option<&String> {
        self.strings.get(key)
    }
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
    pub fn get_entity(&self, key: &str) -> Option<&Entity> {
        self.entities.get(key)
    }
    pub fn set_entity(&mut self, key: impl Into<String>, entity: Entity) {
        self.entities.insert(key.into(), entity);
    }
    pub fn clear_entities(&mut self) {
        self.entities.clear();
    }
}
