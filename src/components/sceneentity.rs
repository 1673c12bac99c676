use bevy_ecs::prelude::Component;

/// Entity that belongs to the loaded scene. Switching scenes despawns every
/// entity carrying it. The name comes from the scene definition and is how
/// gameplay code and the autopilot look objects up.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct SceneEntity {
    pub name: String,
}

impl SceneEntity {
    pub fn new(name: impl Into<String>) -> Self {
        SceneEntity { name: name.into() }
    }
}
