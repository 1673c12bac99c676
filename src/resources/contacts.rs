//! Bookkeeping for enter-only contact and trigger events.
use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashSet;

/// Pairs currently touching. Collision and trigger events fire only when a
/// pair is not already in here; pairs that separate are dropped.
#[derive(Resource, Debug, Default)]
pub struct ContactTracker {
    /// Solid contacts, stored with the lower entity first.
    pub contacts: FxHashSet<(Entity, Entity)>,
    /// (trigger, other) overlaps.
    pub overlaps: FxHashSet<(Entity, Entity)>,
}

impl ContactTracker {
    pub fn ordered(a: Entity, b: Entity) -> (Entity, Entity) {
        if a < b { (a, b) } else { (b, a) }
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
        self.overlaps.clear();
    }
}
