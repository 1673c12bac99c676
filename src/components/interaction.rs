//! Clickable / walk-in interactables.
//!
//! An [`Interactable`] reacts to a pointer click or to the player entering
//! its proximity [`SphereTrigger`](super::collider::SphereTrigger). The
//! cooldown is checked before anything else and is consumed even when the
//! interaction ends up doing nothing.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum InteractionKind {
    Button(String),
    /// The revealed clue board.
    Clue,
    Crystal,
    Door,
}

#[derive(Component, Clone, Debug)]
pub struct Interactable {
    pub kind: InteractionKind,
    /// Seconds during which further interactions are ignored.
    pub cooldown: f32,
    last_interaction: Option<f32>,
}

impl Interactable {
    pub fn new(kind: InteractionKind) -> Self {
        Interactable {
            kind,
            cooldown: 1.0,
            last_interaction: None,
        }
    }

    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Record an interaction at `now` (world seconds). Returns false while
    /// the cooldown is running; a first interaction is always accepted.
    pub fn try_interact(&mut self, now: f32) -> bool {
        if let Some(last) = self.last_interaction {
            if now - last < self.cooldown {
                return false;
            }
        }
        self.last_interaction = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_suppresses_double_press() {
        let mut i = Interactable::new(InteractionKind::Button("Lucy".into()));
        assert!(i.try_interact(0.0));
        assert!(!i.try_interact(0.5));
        assert!(!i.try_interact(0.99));
        assert!(i.try_interact(1.0));
    }

    #[test]
    fn kinds_use_tagged_json() {
        let button: InteractionKind =
            serde_json::from_str(r#"{ "type": "button", "id": "Susan" }"#).unwrap();
        assert_eq!(button, InteractionKind::Button("Susan".into()));
        let clue: InteractionKind = serde_json::from_str(r#"{ "type": "clue" }"#).unwrap();
        assert_eq!(clue, InteractionKind::Clue);
    }
}
