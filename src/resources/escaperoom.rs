//! Escape room manager state.
//!
//! [`EscapeRoom`] is inserted when a scene with an escape definition loads
//! and removed when the scene is torn down. It owns the button sequence, the
//! current [`EscapeStage`] and references to the scene objects the manager
//! paints, reveals or lights. Every reference is optional; a missing one is
//! skipped with a warning by [`crate::systems::escape`].

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

use crate::components::puzzle::ButtonSequence;

/// Progress through the room. Ordered: later stages compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum EscapeStage {
    #[default]
    NotStarted,
    ButtonPuzzleInProgress,
    ButtonPuzzleComplete,
    CrystalAvailable,
    DoorHit,
    Escaped,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct EscapeRoom {
    pub sequence: ButtonSequence,
    stage: EscapeStage,
    /// Button entities by identifier ("Lucy", "Edmund"...).
    pub buttons: FxHashMap<String, Entity>,
    pub clue_board: Option<Entity>,
    pub clue_text: Option<Entity>,
    pub crystal: Option<Entity>,
    pub exit_door: Option<Entity>,
}

impl EscapeRoom {
    pub fn new(sequence: ButtonSequence) -> Self {
        EscapeRoom {
            sequence,
            ..Default::default()
        }
    }

    pub fn stage(&self) -> EscapeStage {
        self.stage
    }

    /// Move to `to`. Returns the previous stage when it actually changed.
    pub fn set_stage(&mut self, to: EscapeStage) -> Option<EscapeStage> {
        if self.stage == to {
            return None;
        }
        let from = self.stage;
        self.stage = to;
        Some(from)
    }

    pub fn button(&self, id: &str) -> Option<Entity> {
        self.buttons.get(id).copied()
    }

    /// The button puzzle is solved (any stage past it).
    pub fn puzzle_complete(&self) -> bool {
        self.stage >= EscapeStage::ButtonPuzzleComplete
    }

    /// The crystal is out and can open the door.
    pub fn crystal_ready(&self) -> bool {
        self.stage >= EscapeStage::CrystalAvailable
    }
}

/// Optional on-screen text: a riddle panel and a one-line status.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    pub riddle: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(EscapeStage::NotStarted < EscapeStage::ButtonPuzzleInProgress);
        assert!(EscapeStage::CrystalAvailable < EscapeStage::DoorHit);
        assert!(EscapeStage::DoorHit < EscapeStage::Escaped);
    }

    #[test]
    fn set_stage_reports_changes_only() {
        let mut room = EscapeRoom::default();
        assert_eq!(
            room.set_stage(EscapeStage::ButtonPuzzleInProgress),
            Some(EscapeStage::NotStarted)
        );
        assert_eq!(room.set_stage(EscapeStage::ButtonPuzzleInProgress), None);
        assert!(!room.puzzle_complete());
        room.set_stage(EscapeStage::CrystalAvailable);
        assert!(room.puzzle_complete() && room.crystal_ready());
    }
}
