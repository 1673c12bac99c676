//! Scene definitions and the scene director.
//!
//! A scene is plain data ([`SceneDef`]): a list of named objects plus an
//! optional escape room description. The built-in scenes live in
//! [`crate::game::builtin_scenes`]; a JSON file with the same shape can add
//! scenes or replace built-ins by name.
//!
//! # JSON format
//!
//! ```json
//! [
//!   {
//!     "name": "forest",
//!     "objects": [
//!       { "name": "ground", "position": [0, -0.5, 0], "size": [60, 1, 60],
//!         "kind": { "type": "ground" } },
//!       { "name": "tunnel", "position": [0, 1, 12],
//!         "kind": { "type": "scene_trigger", "next_scene": "escape_room" } }
//!     ]
//!   }
//! ]
//! ```
//!
//! [`SceneDirector`] holds the name of the loaded scene and the one requested
//! next; [`crate::systems::scene::scene_switch_system`] performs the switch.

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::interaction::InteractionKind;
use crate::components::material::Color;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    /// Static solid box.
    Solid,
    /// Solid box the player can stand on.
    Ground,
    Door {
        /// Overrides `[door] slide` from the config.
        #[serde(default)]
        slide: Option<bool>,
    },
    Button {
        id: String,
    },
    Throwable {
        /// Name of the object to aim at.
        #[serde(default)]
        target: Option<String>,
    },
    /// Board that can be hidden and revealed.
    Board,
    Text {
        content: String,
        #[serde(default = "default_font_size")]
        font_size: f32,
    },
    SceneTrigger {
        next_scene: String,
    },
    PlayerSpawn,
}

fn default_font_size() -> f32 {
    0.3
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ObjectDef {
    pub name: String,
    pub position: [f32; 3],
    /// Degrees around the vertical axis.
    #[serde(default)]
    pub yaw: f32,
    /// Full size of the box collider. No collider when absent.
    #[serde(default)]
    pub size: Option<[f32; 3]>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub interaction: Option<InteractionKind>,
    #[serde(default)]
    pub hidden: bool,
    pub kind: ObjectKind,
}

impl ObjectDef {
    pub fn new(name: impl Into<String>, position: [f32; 3], kind: ObjectKind) -> Self {
        ObjectDef {
            name: name.into(),
            position,
            yaw: 0.0,
            size: None,
            color: None,
            group: None,
            interaction: None,
            hidden: false,
            kind,
        }
    }

    pub fn with_size(mut self, size: [f32; 3]) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_interaction(mut self, kind: InteractionKind) -> Self {
        self.interaction = Some(kind);
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Escape room wiring. Names refer to objects of the same scene.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EscapeDef {
    pub order: Vec<String>,
    #[serde(default)]
    pub clue_board: Option<String>,
    #[serde(default)]
    pub clue_text: Option<String>,
    #[serde(default)]
    pub crystal: Option<String>,
    #[serde(default)]
    pub exit_door: Option<String>,
    /// Insert a HUD resource with riddle and status lines.
    #[serde(default = "default_true")]
    pub hud: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneDef {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
    #[serde(default)]
    pub escape: Option<EscapeDef>,
}

impl SceneDef {
    pub fn object(&self, name: &str) -> Option<&ObjectDef> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Reasons the escape room of this scene cannot be solved. Empty when
    /// the scene has no escape room.
    pub fn escape_problems(&self) -> Vec<String> {
        let Some(escape) = &self.escape else {
            return Vec::new();
        };
        if escape.order.is_empty() {
            return vec!["button order is empty, the puzzle can never be solved".to_string()];
        }
        escape
            .order
            .iter()
            .filter(|id| {
                !self
                    .objects
                    .iter()
                    .any(|o| matches!(&o.kind, ObjectKind::Button { id: b } if b == *id))
            })
            .map(|id| format!("no button for '{}'", id))
            .collect()
    }
}

/// All known scenes by name.
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneStore {
    scenes: FxHashMap<String, SceneDef>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scenes(scenes: impl IntoIterator<Item = SceneDef>) -> Self {
        let mut store = Self::new();
        for scene in scenes {
            store.insert(scene);
        }
        store
    }

    /// Add or replace a scene.
    pub fn insert(&mut self, scene: SceneDef) {
        self.scenes.insert(scene.name.clone(), scene);
    }

    pub fn get(&self, name: &str) -> Option<&SceneDef> {
        self.scenes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Scene names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Merge scenes from a JSON array. Returns how many were read.
    pub fn merge_json(&mut self, text: &str) -> Result<usize, String> {
        let scenes: Vec<SceneDef> =
            serde_json::from_str(text).map_err(|e| format!("Failed to parse scenes: {}", e))?;
        let count = scenes.len();
        for scene in scenes {
            self.insert(scene);
        }
        Ok(count)
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<usize, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene file {:?}: {}", path, e))?;
        let count = self.merge_json(&text)?;
        info!("Loaded {} scene(s) from {:?}", count, path);
        Ok(count)
    }

    /// All scenes as a pretty JSON array, sorted by name.
    pub fn to_json(&self) -> Result<String, String> {
        let scenes: Vec<&SceneDef> = self
            .names()
            .into_iter()
            .filter_map(|n| self.scenes.get(n))
            .collect();
        serde_json::to_string_pretty(&scenes).map_err(|e| format!("Failed to write scenes: {}", e))
    }
}

/// Loaded scene and pending switch request.
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneDirector {
    current: Option<String>,
    pending: Option<String>,
}

impl SceneDirector {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Ask for `name` to be loaded at the start of the next frame.
    pub fn request(&mut self, name: impl Into<String>) {
        self.pending = Some(name.into());
    }

    pub fn take_pending(&mut self) -> Option<String> {
        self.pending.take()
    }

    pub fn set_current(&mut self, name: impl Into<String>) {
        self.current = Some(name.into());
    }
}
