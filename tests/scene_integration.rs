//! Scene integration tests: loading, teardown, spawn placement, the forest
//! tunnel and scenes read from JSON.

use bevy_ecs::prelude::*;
use glam::Vec3;

use escaperoom::components::player::FirstPersonController;
use escaperoom::components::sceneentity::SceneEntity;
use escaperoom::components::transform::Transform3D;
use escaperoom::events::input::RespawnEvent;
use escaperoom::game::{build_update_schedule, builtin_scenes, init_world, run_frame};
use escaperoom::resources::camera::Camera3D;
use escaperoom::resources::escaperoom::{EscapeRoom, Hud};
use escaperoom::resources::gameconfig::GameConfig;
use escaperoom::resources::scenestore::{SceneDirector, SceneStore};
use escaperoom::resources::worldsignals::{STRING_SCENE, WorldSignals};

const DT: f32 = 1.0 / 60.0;

fn started_world() -> (World, Schedule) {
    let mut world = init_world(GameConfig::new(), SceneStore::from_scenes(builtin_scenes()));
    let mut schedule = build_update_schedule();
    for _ in 0..2 {
        run_frame(&mut world, &mut schedule, DT);
    }
    (world, schedule)
}

fn scene_names(world: &mut World) -> Vec<String> {
    let mut q = world.query::<&SceneEntity>();
    q.iter(world).map(|e| e.name.clone()).collect()
}

fn player(world: &mut World) -> (Transform3D, FirstPersonController) {
    let mut q = world.query::<(&Transform3D, &FirstPersonController)>();
    let (t, c) = q.single(world).unwrap();
    (*t, c.clone())
}

#[test]
fn starts_in_forest_on_spawn() {
    let (mut world, _) = started_world();
    assert_eq!(world.resource::<SceneDirector>().current(), Some("forest"));
    assert_eq!(
        world
            .resource::<WorldSignals>()
            .get_string(STRING_SCENE)
            .map(String::as_str),
        Some("forest")
    );
    assert!(scene_names(&mut world).contains(&"tunnel".to_string()));
    assert!(world.get_resource::<EscapeRoom>().is_none());

    let (t, _) = player(&mut world);
    assert!(t.translation.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-4));
    let camera = world.resource::<Camera3D>();
    assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 1.6, 0.0), 1e-4));
}

#[test]
fn switching_scenes_replaces_entities() {
    let (mut world, mut schedule) = started_world();
    world.resource_mut::<SceneDirector>().request("escape_room");
    run_frame(&mut world, &mut schedule, DT);

    let names = scene_names(&mut world);
    assert!(!names.contains(&"tunnel".to_string()));
    assert!(names.contains(&"exit_door".to_string()));
    assert!(names.contains(&"exit_door_detector".to_string()));
    assert!(world.get_resource::<EscapeRoom>().is_some());
    assert!(world.get_resource::<Hud>().is_some());
    let (t, c) = player(&mut world);
    assert!(t.translation.abs_diff_eq(Vec3::new(0.0, 2.0, -6.0), 1e-4));
    assert_eq!(c.yaw, 0.0);

    world.resource_mut::<SceneDirector>().request("forest");
    run_frame(&mut world, &mut schedule, DT);
    assert!(world.get_resource::<EscapeRoom>().is_none());
    assert!(world.get_resource::<Hud>().is_none());
    assert!(!scene_names(&mut world).contains(&"exit_door".to_string()));
}

#[test]
fn unknown_scene_keeps_current() {
    let (mut world, mut schedule) = started_world();
    let before = scene_names(&mut world).len();
    world.resource_mut::<SceneDirector>().request("attic");
    run_frame(&mut world, &mut schedule, DT);
    assert_eq!(world.resource::<SceneDirector>().current(), Some("forest"));
    assert_eq!(scene_names(&mut world).len(), before);
}

#[test]
fn tunnel_leads_to_escape_room() {
    let (mut world, mut schedule) = started_world();
    {
        let mut q = world.query::<(&mut Transform3D, &FirstPersonController)>();
        let (mut t, _) = q.single_mut(&mut world).unwrap();
        t.translation = Vec3::new(0.0, 2.0, 11.0);
    }
    run_frame(&mut world, &mut schedule, DT);
    assert_eq!(world.resource::<SceneDirector>().current(), Some("forest"));

    for _ in 0..40 {
        run_frame(&mut world, &mut schedule, DT);
    }
    assert_eq!(
        world.resource::<SceneDirector>().current(),
        Some("escape_room")
    );
}

#[test]
fn respawn_returns_player_to_spawn() {
    let (mut world, mut schedule) = started_world();
    {
        let mut q = world.query::<(&mut Transform3D, &mut FirstPersonController)>();
        let (mut t, mut c) = q.single_mut(&mut world).unwrap();
        t.translation = Vec3::new(5.0, 2.0, 5.0);
        c.yaw = 120.0;
    }
    world.trigger(RespawnEvent {});
    world.flush();
    run_frame(&mut world, &mut schedule, DT);
    let (t, c) = player(&mut world);
    assert!(t.translation.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-4));
    assert_eq!(c.yaw, 0.0);
}

#[test]
fn json_scene_replaces_builtin() {
    let mut scenes = SceneStore::from_scenes(builtin_scenes());
    let json = r#"[
      {
        "name": "forest",
        "objects": [
          { "name": "plateau", "position": [0, 1, 0], "size": [10, 2, 10],
            "kind": { "type": "ground" } },
          { "name": "spawn", "position": [2, 0, 2], "yaw": 90,
            "kind": { "type": "player_spawn" } }
        ]
      }
    ]"#;
    assert_eq!(scenes.merge_json(json).unwrap(), 1);
    let mut world = init_world(GameConfig::new(), scenes);
    let mut schedule = build_update_schedule();
    for _ in 0..2 {
        run_frame(&mut world, &mut schedule, DT);
    }
    let names = scene_names(&mut world);
    assert_eq!(names.len(), 2);
    let (t, c) = player(&mut world);
    assert!(t.translation.abs_diff_eq(Vec3::new(2.0, 4.0, 2.0), 1e-4));
    assert_eq!(c.yaw, 90.0);
}
