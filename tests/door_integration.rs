//! Door integration tests: impacts, commands, settling and auto-close run
//! through the full frame schedule.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use escaperoom::components::collider::BoxCollider;
use escaperoom::components::door::{Door, DoorCommand, DoorState, HitEffect};
use escaperoom::components::timer::Timer;
use escaperoom::components::transform::Transform3D;
use escaperoom::components::tween::TweenPose;
use escaperoom::events::door::{DoorCommandEvent, DoorImpactEvent};
use escaperoom::game::{build_update_schedule, builtin_scenes, init_world, run_frame};
use escaperoom::resources::escaperoom::EscapeRoom;
use escaperoom::resources::gameconfig::GameConfig;
use escaperoom::resources::scenestore::SceneStore;
use escaperoom::resources::worldsignals::{COUNTER_DOOR_OPENINGS, WorldSignals};

const DT: f32 = 1.0 / 60.0;

fn forest_world() -> (World, Schedule) {
    let mut world = init_world(GameConfig::new(), SceneStore::from_scenes(builtin_scenes()));
    let mut schedule = build_update_schedule();
    for _ in 0..2 {
        run_frame(&mut world, &mut schedule, DT);
    }
    (world, schedule)
}

fn spawn_door(world: &mut World, door: Door) -> Entity {
    world
        .spawn((
            Transform3D::from_xyz(20.0, 1.5, 20.0),
            BoxCollider::new(2.0, 3.0, 0.5),
            door,
        ))
        .id()
}

fn run_seconds(world: &mut World, schedule: &mut Schedule, seconds: f32) {
    let frames = (seconds / DT).ceil() as usize;
    for _ in 0..frames {
        run_frame(world, schedule, DT);
    }
}

fn hit(world: &mut World, door: Entity, force: f32) {
    world.trigger(DoorImpactEvent {
        door,
        force,
        point: Vec3::new(20.0, 1.5, 19.75),
        source: None,
    });
    world.flush();
}

fn state(world: &World, door: Entity) -> DoorState {
    world.get::<Door>(door).unwrap().state()
}

#[test]
fn weak_impact_leaves_door_closed() {
    let (mut world, _) = forest_world();
    let door = spawn_door(&mut world, Door::rotating(90.0).with_minimum_force(5.0));
    hit(&mut world, door, 4.9);
    assert_eq!(state(&world, door), DoorState::Closed);
    assert!(world.get::<TweenPose>(door).is_none());
}

#[test]
fn strong_impact_opens_then_auto_closes() {
    let (mut world, mut schedule) = forest_world();
    let door = spawn_door(
        &mut world,
        Door::rotating(90.0)
            .with_open_speed(2.0)
            .with_close_delay(true, 1.0),
    );
    hit(&mut world, door, 8.0);
    assert_eq!(state(&world, door), DoorState::Opening);
    assert!(world.get::<TweenPose>(door).is_some());
    assert_eq!(
        world
            .resource::<WorldSignals>()
            .get_integer(COUNTER_DOOR_OPENINGS),
        Some(1)
    );

    run_seconds(&mut world, &mut schedule, 0.6);
    assert_eq!(state(&world, door), DoorState::Open);
    assert!(world.get::<TweenPose>(door).is_none());
    assert!(world.get::<Timer>(door).is_some());
    let open = world.get::<Transform3D>(door).unwrap().rotation;
    assert!(open.abs_diff_eq(Quat::from_rotation_y(90f32.to_radians()), 1e-4));

    // timer fires one second after settling
    run_seconds(&mut world, &mut schedule, 1.1);
    assert_eq!(state(&world, door), DoorState::Closing);
    run_seconds(&mut world, &mut schedule, 0.6);
    assert_eq!(state(&world, door), DoorState::Closed);
    let closed = world.get::<Transform3D>(door).unwrap();
    assert!(closed.rotation.abs_diff_eq(Quat::IDENTITY, 1e-4));
    assert_eq!(closed.translation, Vec3::new(20.0, 1.5, 20.0));
}

#[test]
fn door_without_close_stays_open() {
    let (mut world, mut schedule) = forest_world();
    let door = spawn_door(
        &mut world,
        Door::sliding(Vec3::X, 3.0).with_close_delay(false, 1.0),
    );
    hit(&mut world, door, 10.0);
    run_seconds(&mut world, &mut schedule, 3.0);
    assert_eq!(state(&world, door), DoorState::Open);
    assert!(world.get::<Timer>(door).is_none());
    let t = world.get::<Transform3D>(door).unwrap().translation;
    assert!(t.abs_diff_eq(Vec3::new(23.0, 1.5, 20.0), 1e-4));

    // impacts on an open door that cannot close do nothing
    hit(&mut world, door, 10.0);
    assert_eq!(state(&world, door), DoorState::Open);
}

#[test]
fn commands_open_and_close() {
    let (mut world, mut schedule) = forest_world();
    let door = spawn_door(&mut world, Door::rotating(90.0).with_close_delay(false, 0.0));
    world.trigger(DoorCommandEvent {
        door,
        command: DoorCommand::Close,
    });
    world.flush();
    assert_eq!(state(&world, door), DoorState::Closed);

    world.trigger(DoorCommandEvent {
        door,
        command: DoorCommand::Toggle,
    });
    world.flush();
    assert_eq!(state(&world, door), DoorState::Opening);
    run_seconds(&mut world, &mut schedule, 0.6);
    assert_eq!(state(&world, door), DoorState::Open);

    world.trigger(DoorCommandEvent {
        door,
        command: DoorCommand::Close,
    });
    world.flush();
    assert_eq!(state(&world, door), DoorState::Closing);
}

#[test]
fn hit_effect_is_temporary() {
    let (mut world, mut schedule) = forest_world();
    let door = spawn_door(&mut world, Door::rotating(90.0).with_hit_effect(true));
    hit(&mut world, door, 1.0);
    let mut effects = world.query::<&HitEffect>();
    assert_eq!(effects.iter(&world).count(), 1);
    run_seconds(&mut world, &mut schedule, 0.6);
    assert_eq!(effects.iter(&world).count(), 0);
}

#[test]
fn impact_outside_escape_room_does_not_create_one() {
    let (mut world, _) = forest_world();
    let door = spawn_door(&mut world, Door::rotating(90.0));
    hit(&mut world, door, 10.0);
    assert!(world.get_resource::<EscapeRoom>().is_none());
}

#[test]
fn new_transition_cancels_auto_close() {
    let (mut world, mut schedule) = forest_world();
    let door = spawn_door(
        &mut world,
        Door::rotating(90.0).with_close_delay(true, 2.0),
    );
    hit(&mut world, door, 10.0);
    run_seconds(&mut world, &mut schedule, 0.6);
    assert!(world.get::<Timer>(door).is_some());

    world.trigger(DoorCommandEvent {
        door,
        command: DoorCommand::Close,
    });
    world.flush();
    assert_eq!(state(&world, door), DoorState::Closing);
    assert!(world.get::<Timer>(door).is_none());

    // closed and quiet: nothing reopens it once the old delay has passed
    run_seconds(&mut world, &mut schedule, 2.5);
    assert_eq!(state(&world, door), DoorState::Closed);
    assert!(world.get::<Timer>(door).is_none());
}
