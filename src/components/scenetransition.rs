use bevy_ecs::prelude::Component;

/// Trigger volume that loads `next_scene` once an entity of `player_group`
/// walks into it. One-shot: once `triggered` is set later entries are ignored.
#[derive(Component, Clone, Debug)]
pub struct SceneTransition {
    pub next_scene: String,
    pub player_group: String,
    /// Seconds between entering and switching.
    pub delay: f32,
    pub triggered: bool,
}

impl SceneTransition {
    pub fn new(next_scene: impl Into<String>) -> Self {
        SceneTransition {
            next_scene: next_scene.into(),
            player_group: "player".to_string(),
            delay: 0.5,
            triggered: false,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }
}

/// Signal of the delay [`Timer`](super::timer::Timer) on a fired transition.
pub const SCENE_TRANSITION_SIGNAL: &str = "scene_transition";
