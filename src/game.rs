//! World assembly and the built-in scenes.
//!
//! - [`init_world`] inserts every resource, registers observers and the game
//!   state hooks, and requests the `Setup` state.
//! - [`build_update_schedule`] returns the chained per-frame schedule.
//! - [`run_frame`] advances time and runs one frame.
//! - [`setup`], [`enter_play`] and [`quit_game`] are the state hooks.
//! - [`builtin_scenes`] describes the forest and the escape room.
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;

use crate::components::collider::BoxCollider;
use crate::components::group::Group;
use crate::components::interaction::InteractionKind;
use crate::components::material::Color;
use crate::components::player::{FirstPersonController, Grounding};
use crate::components::transform::Transform3D;
use crate::events::audio::AudioCmd;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::resources::autopilot::Autopilot;
use crate::resources::camera::Camera3D;
use crate::resources::contacts::ContactTracker;
use crate::resources::escaperoom::EscapeRoom;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::{CursorState, InputState};
use crate::resources::scenestore::{
    EscapeDef, ObjectDef, ObjectKind, SceneDef, SceneDirector, SceneStore,
};
use crate::resources::systemsstore::SystemsStore;
use crate::resources::worldsignals::{
    COUNTER_DOOR_OPENINGS, COUNTER_THROWS, COUNTER_WRONG_PRESSES, FLAG_ESCAPED, FLAG_QUIT_GAME,
    WorldSignals,
};
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{log_audio_cmds, update_audio_cmds};
use crate::systems::autopilot::autopilot_system;
use crate::systems::collision::{collision_detector, trigger_detector};
use crate::systems::door::{
    observe_door_autoclose, observe_door_command, observe_door_contact, observe_door_detection,
    observe_door_impact, observe_door_tween_finished,
};
use crate::systems::escape::observe_escape_event;
use crate::systems::gamestate::{check_pending_state, state_is_playing};
use crate::systems::input::cursor_toggle_system;
use crate::systems::interaction::{PLAYER_GROUP, observe_interact, observe_proximity};
use crate::systems::movement::movement;
use crate::systems::player::{observe_respawn, player_controller_system, spawn_point_system};
use crate::systems::pointer::pointer_system;
use crate::systems::scene::scene_switch_system;
use crate::systems::scenetransition::{observe_scene_transition_timer, observe_scene_trigger};
use crate::systems::throwable::{
    observe_grab, observe_release, observe_throwable_contact, observe_throwable_reset,
    throwable_hold_system,
};
use crate::systems::time::{update_timers, update_world_time};
use crate::systems::ttl::ttl_system;
use crate::systems::tween::tween_pose_system;

/// Sequence ids paired with the button objects of the built-in escape room,
/// in the expected order.
pub const BUTTON_OBJECTS: [(&str, &str); 4] = [
    ("Lucy", "button_red"),
    ("Edmund", "button_blue"),
    ("Susan", "button_green"),
    ("Peter", "button_yellow"),
];

const PLAYER_WIDTH: f32 = 0.6;

/// Build a world ready to run [`build_update_schedule`].
pub fn init_world(config: GameConfig, scenes: SceneStore) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(WorldSignals::default());
    world.insert_resource(InputState::default());
    world.insert_resource(CursorState::default());
    world.insert_resource(Camera3D::default());
    world.insert_resource(ContactTracker::default());
    world.insert_resource(SceneDirector::default());
    world.insert_resource(scenes);
    world.insert_resource(config);
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.init_resource::<Messages<AudioCmd>>();

    register_observers(&mut world);

    let mut systems_store = SystemsStore::new();
    systems_store.insert("setup", world.register_system(setup));
    systems_store.insert("enter_play", world.register_system(enter_play));
    systems_store.insert("quit_game", world.register_system(quit_game));
    world.insert_resource(systems_store);
    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {}); // enter Setup right away
    world.flush();
    world
}

pub fn register_observers(world: &mut World) {
    world.add_observer(observe_gamestate_change_event);
    // doors
    world.add_observer(observe_door_impact);
    world.add_observer(observe_door_command);
    world.add_observer(observe_door_tween_finished);
    world.add_observer(observe_door_autoclose);
    world.add_observer(observe_door_contact);
    world.add_observer(observe_door_detection);
    // throwables
    world.add_observer(observe_grab);
    world.add_observer(observe_release);
    world.add_observer(observe_throwable_contact);
    world.add_observer(observe_throwable_reset);
    // interaction and escape room
    world.add_observer(observe_proximity);
    world.add_observer(observe_interact);
    world.add_observer(observe_escape_event);
    // scenes and player
    world.add_observer(observe_scene_trigger);
    world.add_observer(observe_scene_transition_timer);
    world.add_observer(observe_respawn);
    world.flush();
}

/// The per-frame schedule. Gameplay only ticks while [`GameStates::Playing`].
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            check_pending_state,
            (
                autopilot_system.run_if(resource_exists::<Autopilot>),
                scene_switch_system,
                cursor_toggle_system,
                player_controller_system,
                spawn_point_system,
                pointer_system,
                throwable_hold_system,
                tween_pose_system,
                movement,
                collision_detector,
                trigger_detector,
                update_timers,
                ttl_system,
                log_audio_cmds,
                update_audio_cmds,
            )
                .chain()
                .run_if(state_is_playing),
        )
            .chain(),
    );
    update
}

/// Advance the clock by `dt` seconds and run one frame.
pub fn run_frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Setup hook: spawn the player and start playing.
pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
) {
    let player = &config.player;
    let height = player.player_height;
    let grounding = if player.use_gravity {
        Grounding::Gravity { height }
    } else {
        Grounding::Snap { height }
    };
    let entity = commands
        .spawn((
            Transform3D::default(),
            FirstPersonController {
                walk_speed: player.walk_speed,
                mouse_sensitivity: player.mouse_sensitivity,
                eye_height: player.eye_height,
                grounding,
                ..Default::default()
            },
            Group::new(PLAYER_GROUP),
            BoxCollider::new(PLAYER_WIDTH, height, PLAYER_WIDTH)
                .with_offset(Vec3::new(0.0, -height * 0.5, 0.0)),
        ))
        .id();
    info!("Player {:?} ready", entity);
    next_state.set(GameStates::Playing);
}

/// Play hook: load the first scene.
pub fn enter_play(config: Res<GameConfig>, mut director: ResMut<SceneDirector>) {
    info!("Starting in scene '{}'", config.session.start_scene);
    director.request(config.session.start_scene.clone());
}

/// Quit hook: report the session and raise the quit flag.
pub fn quit_game(mut signals: ResMut<WorldSignals>, room: Option<Res<EscapeRoom>>) {
    let counter = |key: &str| signals.get_integer(key).unwrap_or(0);
    info!(
        "Session over: escaped={} stage={:?} throws={} door openings={} wrong presses={}",
        signals.has_flag(FLAG_ESCAPED),
        room.map(|r| r.stage()),
        counter(COUNTER_THROWS),
        counter(COUNTER_DOOR_OPENINGS),
        counter(COUNTER_WRONG_PRESSES),
    );
    signals.set_flag(FLAG_QUIT_GAME);
}

fn forest() -> SceneDef {
    let mut objects = vec![
        ObjectDef::new("ground", [0.0, -0.5, 0.0], ObjectKind::Ground)
            .with_size([60.0, 1.0, 60.0])
            .with_color(Color::rgb(0.2, 0.5, 0.2)),
        ObjectDef::new("spawn", [0.0, 0.0, 0.0], ObjectKind::PlayerSpawn),
        ObjectDef::new(
            "tunnel",
            [0.0, 1.0, 12.0],
            ObjectKind::SceneTrigger {
                next_scene: "escape_room".into(),
            },
        ),
    ];
    let trees = [
        (-4.0, 5.0),
        (5.0, 3.0),
        (-6.0, -4.0),
        (3.0, -7.0),
        (7.0, 9.0),
        (-3.0, 15.0),
    ];
    for (i, (x, z)) in trees.into_iter().enumerate() {
        objects.push(
            ObjectDef::new(format!("tree_{}", i), [x, 2.0, z], ObjectKind::Solid)
                .with_size([0.6, 4.0, 0.6])
                .with_color(Color::BROWN)
                .with_group("tree"),
        );
    }
    SceneDef {
        name: "forest".into(),
        objects,
        escape: None,
    }
}

fn escape_room() -> SceneDef {
    let wall = |name: &str, position: [f32; 3], size: [f32; 3]| {
        ObjectDef::new(name, position, ObjectKind::Solid)
            .with_size(size)
            .with_color(Color::GRAY)
            .with_group("wall")
    };
    let button = |name: &str, id: &str, z: f32, color: Color| {
        ObjectDef::new(name, [-8.9, 1.2, z], ObjectKind::Button { id: id.into() })
            .with_size([0.2, 0.4, 0.4])
            .with_color(color)
            .with_interaction(InteractionKind::Button(id.into()))
    };
    let objects = vec![
        ObjectDef::new("floor", [0.0, -0.5, 0.0], ObjectKind::Ground)
            .with_size([20.0, 1.0, 20.0])
            .with_color(Color::rgb(0.35, 0.3, 0.25)),
        wall("wall_north", [0.0, 2.5, 8.5], [20.0, 5.0, 1.0]),
        wall("wall_south", [0.0, 2.5, -9.5], [20.0, 5.0, 1.0]),
        wall("wall_west", [-9.5, 2.5, 0.0], [1.0, 5.0, 20.0]),
        wall("wall_east", [9.5, 2.5, 0.0], [1.0, 5.0, 20.0]),
        button("button_red", "Lucy", -4.5, Color::RED),
        button("button_blue", "Edmund", -1.5, Color::BLUE),
        button("button_green", "Susan", 1.5, Color::GREEN),
        button("button_yellow", "Peter", 4.5, Color::YELLOW),
        ObjectDef::new("clue_board", [0.0, 2.0, -8.9], ObjectKind::Board)
            .with_size([3.0, 2.0, 0.1])
            .with_color(Color::BROWN)
            .with_interaction(InteractionKind::Clue),
        ObjectDef::new(
            "clue_text",
            [0.0, 2.0, -8.8],
            ObjectKind::Text {
                content: String::new(),
                font_size: 0.3,
            },
        )
        .with_color(Color::WHITE),
        ObjectDef::new("bookshelf", [8.0, 0.75, 0.0], ObjectKind::Solid)
            .with_size([1.0, 1.5, 3.0])
            .with_color(Color::BROWN),
        ObjectDef::new(
            "crystal",
            [7.3, 1.65, 0.0],
            ObjectKind::Throwable {
                target: Some("exit_door".into()),
            },
        )
        .with_size([0.3, 0.3, 0.3])
        .with_color(Color::CYAN)
        .with_interaction(InteractionKind::Crystal),
        ObjectDef::new("exit_door", [0.0, 1.5, 8.0], ObjectKind::Door { slide: None })
            .with_size([2.0, 3.0, 0.5])
            .with_color(Color::RED)
            .with_interaction(InteractionKind::Door),
        ObjectDef::new("spawn", [0.0, 0.0, -6.0], ObjectKind::PlayerSpawn),
    ];
    SceneDef {
        name: "escape_room".into(),
        objects,
        escape: Some(EscapeDef {
            order: BUTTON_OBJECTS.iter().map(|(id, _)| id.to_string()).collect(),
            clue_board: Some("clue_board".into()),
            clue_text: Some("clue_text".into()),
            crystal: Some("crystal".into()),
            exit_door: Some("exit_door".into()),
            hud: true,
        }),
    }
}

/// The forest (with a tunnel into the room) and the escape room.
pub fn builtin_scenes() -> Vec<SceneDef> {
    vec![forest(), escape_room()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_room_is_wired() {
        let store = SceneStore::from_scenes(builtin_scenes());
        assert_eq!(store.names(), vec!["escape_room", "forest"]);
        let room = store.get("escape_room").unwrap();
        let escape = room.escape.as_ref().unwrap();
        for name in [&escape.clue_board, &escape.clue_text, &escape.crystal, &escape.exit_door] {
            assert!(room.object(name.as_deref().unwrap()).is_some());
        }
        for (id, object) in BUTTON_OBJECTS {
            assert_eq!(
                room.object(object).unwrap().kind,
                ObjectKind::Button { id: id.into() }
            );
        }
        assert!(room.escape_problems().is_empty());
    }

    #[test]
    fn init_world_spawns_player_and_starts_playing() {
        let mut world = init_world(GameConfig::new(), SceneStore::from_scenes(builtin_scenes()));
        let mut players = world.query::<&FirstPersonController>();
        assert_eq!(players.iter(&world).count(), 1);
        let mut schedule = build_update_schedule();
        run_frame(&mut world, &mut schedule, 1.0 / 60.0);
        assert!(world.resource::<GameState>().is_playing());
    }
}
