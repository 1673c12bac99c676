//! Game configuration resource.
//!
//! Manages gameplay tuning loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration. Missing
//! keys keep their defaults; saving writes every key.
//!
//! # Configuration File Format
//!
//! ```ini
//! [session]
//! fixed_dt = 0.016666668
//! max_frames = 7200
//! start_scene = forest
//!
//! [door]
//! minimum_force = 5
//! open_angle = 90
//! open_speed = 2
//! slide = false
//! slide_distance = 3
//! can_close = true
//! close_delay = 5
//! detection_radius = 5
//! assist_impacts = true
//! hit_effect = true
//! open_sound = door_open
//! close_sound = door_close
//!
//! [throwable]
//! throw_force = 25
//! reset_delay = 3
//! enable_reset = true
//! hover_distance = 0.5
//! arc_lift = 0.2
//!
//! [player]
//! walk_speed = 5
//! mouse_sensitivity = 2
//! player_height = 2
//! eye_height = 1.6
//! use_gravity = false
//!
//! [interaction]
//! cooldown = 1
//! radius = 1.5
//!
//! [transition]
//! delay = 0.5
//! radius = 2
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;
const DEFAULT_MAX_FRAMES: u64 = 7200;
const DEFAULT_START_SCENE: &str = "forest";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Simulation step of the headless loop, seconds.
    pub fixed_dt: f32,
    /// Frame cap of the headless loop.
    pub max_frames: u64,
    pub start_scene: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoorSettings {
    pub minimum_force: f32,
    pub open_angle: f32,
    pub open_speed: f32,
    /// Slide along +X instead of rotating.
    pub slide: bool,
    pub slide_distance: f32,
    pub can_close: bool,
    pub close_delay: f32,
    pub detection_radius: f32,
    pub assist_impacts: bool,
    pub hit_effect: bool,
    /// Empty means no sound.
    pub open_sound: String,
    pub close_sound: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowableSettings {
    pub throw_force: f32,
    pub reset_delay: f32,
    pub enable_reset: bool,
    pub hover_distance: f32,
    pub arc_lift: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    pub walk_speed: f32,
    pub mouse_sensitivity: f32,
    /// Height above ground kept by snap grounding and spawn points.
    pub player_height: f32,
    pub eye_height: f32,
    /// Gravity grounding instead of ground snap.
    pub use_gravity: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionSettings {
    pub cooldown: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSettings {
    pub delay: f32,
    pub radius: f32,
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub session: SessionSettings,
    pub door: DoorSettings,
    pub throwable: ThrowableSettings,
    pub player: PlayerSettings,
    pub interaction: InteractionSettings,
    pub transition: TransitionSettings,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    if let Some(value) = config.getfloat(section, key).ok().flatten() {
        *target = value as f32;
    }
}

fn read_bool(config: &Ini, section: &str, key: &str, target: &mut bool) {
    if let Some(value) = config.getbool(section, key).ok().flatten() {
        *target = value;
    }
}

fn read_string(config: &Ini, section: &str, key: &str, target: &mut String) {
    if let Some(value) = config.get(section, key) {
        *target = value.trim().to_string();
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            session: SessionSettings {
                fixed_dt: DEFAULT_FIXED_DT,
                max_frames: DEFAULT_MAX_FRAMES,
                start_scene: DEFAULT_START_SCENE.to_string(),
            },
            door: DoorSettings {
                minimum_force: 5.0,
                open_angle: 90.0,
                open_speed: 2.0,
                slide: false,
                slide_distance: 3.0,
                can_close: true,
                close_delay: 5.0,
                detection_radius: 5.0,
                assist_impacts: true,
                hit_effect: true,
                open_sound: "door_open".to_string(),
                close_sound: "door_close".to_string(),
            },
            throwable: ThrowableSettings {
                throw_force: 25.0,
                reset_delay: 3.0,
                enable_reset: true,
                hover_distance: 0.5,
                arc_lift: 0.2,
            },
            player: PlayerSettings {
                walk_speed: 5.0,
                mouse_sensitivity: 2.0,
                player_height: 2.0,
                eye_height: 1.6,
                use_gravity: false,
            },
            interaction: InteractionSettings {
                cooldown: 1.0,
                radius: 1.5,
            },
            transition: TransitionSettings {
                delay: 0.5,
                radius: 2.0,
            },
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        info!("Loaded config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [session] section
        read_f32(config, "session", "fixed_dt", &mut self.session.fixed_dt);
        if let Some(frames) = config.getuint("session", "max_frames").ok().flatten() {
            self.session.max_frames = frames;
        }
        read_string(config, "session", "start_scene", &mut self.session.start_scene);

        // [door] section
        let door = &mut self.door;
        read_f32(config, "door", "minimum_force", &mut door.minimum_force);
        read_f32(config, "door", "open_angle", &mut door.open_angle);
        read_f32(config, "door", "open_speed", &mut door.open_speed);
        read_bool(config, "door", "slide", &mut door.slide);
        read_f32(config, "door", "slide_distance", &mut door.slide_distance);
        read_bool(config, "door", "can_close", &mut door.can_close);
        read_f32(config, "door", "close_delay", &mut door.close_delay);
        read_f32(config, "door", "detection_radius", &mut door.detection_radius);
        read_bool(config, "door", "assist_impacts", &mut door.assist_impacts);
        read_bool(config, "door", "hit_effect", &mut door.hit_effect);
        read_string(config, "door", "open_sound", &mut door.open_sound);
        read_string(config, "door", "close_sound", &mut door.close_sound);

        // [throwable] section
        let throwable = &mut self.throwable;
        read_f32(config, "throwable", "throw_force", &mut throwable.throw_force);
        read_f32(config, "throwable", "reset_delay", &mut throwable.reset_delay);
        read_bool(config, "throwable", "enable_reset", &mut throwable.enable_reset);
        read_f32(config, "throwable", "hover_distance", &mut throwable.hover_distance);
        read_f32(config, "throwable", "arc_lift", &mut throwable.arc_lift);

        // [player] section
        let player = &mut self.player;
        read_f32(config, "player", "walk_speed", &mut player.walk_speed);
        read_f32(config, "player", "mouse_sensitivity", &mut player.mouse_sensitivity);
        read_f32(config, "player", "player_height", &mut player.player_height);
        read_f32(config, "player", "eye_height", &mut player.eye_height);
        read_bool(config, "player", "use_gravity", &mut player.use_gravity);

        // [interaction] section
        read_f32(config, "interaction", "cooldown", &mut self.interaction.cooldown);
        read_f32(config, "interaction", "radius", &mut self.interaction.radius);

        // [transition] section
        read_f32(config, "transition", "delay", &mut self.transition.delay);
        read_f32(config, "transition", "radius", &mut self.transition.radius);
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("session", "fixed_dt", self.session.fixed_dt.to_string());
        set("session", "max_frames", self.session.max_frames.to_string());
        set("session", "start_scene", self.session.start_scene.clone());

        let door = &self.door;
        set("door", "minimum_force", door.minimum_force.to_string());
        set("door", "open_angle", door.open_angle.to_string());
        set("door", "open_speed", door.open_speed.to_string());
        set("door", "slide", door.slide.to_string());
        set("door", "slide_distance", door.slide_distance.to_string());
        set("door", "can_close", door.can_close.to_string());
        set("door", "close_delay", door.close_delay.to_string());
        set("door", "detection_radius", door.detection_radius.to_string());
        set("door", "assist_impacts", door.assist_impacts.to_string());
        set("door", "hit_effect", door.hit_effect.to_string());
        set("door", "open_sound", door.open_sound.clone());
        set("door", "close_sound", door.close_sound.clone());

        let throwable = &self.throwable;
        set("throwable", "throw_force", throwable.throw_force.to_string());
        set("throwable", "reset_delay", throwable.reset_delay.to_string());
        set("throwable", "enable_reset", throwable.enable_reset.to_string());
        set("throwable", "hover_distance", throwable.hover_distance.to_string());
        set("throwable", "arc_lift", throwable.arc_lift.to_string());

        let player = &self.player;
        set("player", "walk_speed", player.walk_speed.to_string());
        set("player", "mouse_sensitivity", player.mouse_sensitivity.to_string());
        set("player", "player_height", player.player_height.to_string());
        set("player", "eye_height", player.eye_height.to_string());
        set("player", "use_gravity", player.use_gravity.to_string());

        set("interaction", "cooldown", self.interaction.cooldown.to_string());
        set("interaction", "radius", self.interaction.radius.to_string());

        set("transition", "delay", self.transition.delay.to_string());
        set("transition", "radius", self.transition.radius.to_string());

        config
    }

    /// Render the configuration as INI text.
    pub fn to_ini_string(&self) -> String {
        self.to_ini().writes()
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Sound id for the door opening, `None` when unset.
    pub fn door_open_sound(&self) -> Option<String> {
        non_empty(&self.door.open_sound)
    }

    pub fn door_close_sound(&self) -> Option<String> {
        non_empty(&self.door.close_sound)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let mut cfg = GameConfig::new();
        cfg.load_from_str("[door]\nminimum_force = 8\n\n[player]\nuse_gravity = true\n")
            .unwrap();
        assert_eq!(cfg.door.minimum_force, 8.0);
        assert!(cfg.player.use_gravity);
        assert_eq!(cfg.door.open_angle, 90.0);
        assert_eq!(cfg.throwable.throw_force, 25.0);
        assert_eq!(cfg.session.start_scene, "forest");
    }

    #[test]
    fn values_round_trip_through_ini() {
        let mut cfg = GameConfig::new();
        cfg.door.close_delay = 2.5;
        cfg.door.close_sound = "slam".to_string();
        cfg.throwable.enable_reset = false;
        cfg.session.max_frames = 42;
        cfg.session.start_scene = "escape_room".to_string();
        cfg.transition.radius = 3.25;

        let text = cfg.to_ini_string();
        let mut loaded = GameConfig::new();
        loaded.load_from_str(&text).unwrap();
        assert_eq!(loaded.door.close_delay, 2.5);
        assert!(!loaded.throwable.enable_reset);
        assert_eq!(loaded.session.max_frames, 42);
        assert_eq!(loaded.session.start_scene, "escape_room");
        assert_eq!(loaded.transition.radius, 3.25);
        assert_eq!(loaded.door_close_sound(), Some("slam".to_string()));
        assert_eq!(loaded.door_open_sound(), Some("door_open".to_string()));
    }

    #[test]
    fn empty_sound_id_means_silent() {
        let mut cfg = GameConfig::new();
        cfg.door.open_sound.clear();
        assert_eq!(cfg.door_open_sound(), None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut cfg = GameConfig::with_path("/nonexistent/escaperoom/config.ini");
        assert!(cfg.load_from_file().is_err());
    }
}
