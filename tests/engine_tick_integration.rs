//! Engine tick integration tests for movement, TTL, timers and tweens.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use std::sync::{Arc, Mutex};

use escaperoom::components::rigidbody::RigidBody;
use escaperoom::components::timer::Timer;
use escaperoom::components::transform::Transform3D;
use escaperoom::components::ttl::Ttl;
use escaperoom::components::tween::{Easing, TweenPose};
use escaperoom::events::timer::TimerEvent;
use escaperoom::events::tween::TweenFinishedEvent;
use escaperoom::resources::worldtime::WorldTime;
use escaperoom::systems::movement::movement;
use escaperoom::systems::time::{update_timers, update_world_time};
use escaperoom::systems::ttl::ttl_system;
use escaperoom::systems::tween::tween_pose_system;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world
}

fn tick_movement(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(movement);
    schedule.run(world);
}

fn tick_ttl(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(ttl_system);
    schedule.run(world);
}

fn tick_timers(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(update_timers);
    schedule.run(world);
}

fn tick_tween(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(tween_pose_system);
    schedule.run(world);
}

#[test]
fn world_time_applies_scale() {
    let mut world = make_world();
    world.resource_mut::<WorldTime>().time_scale = 0.5;
    update_world_time(&mut world, 0.2);
    update_world_time(&mut world, 0.2);
    let time = world.resource::<WorldTime>();
    assert!(approx_eq(time.delta, 0.1));
    assert!(approx_eq(time.elapsed, 0.2));
    assert_eq!(time.frame, 2);
}

#[test]
fn movement_integrates_velocity_into_position() {
    let mut world = make_world();
    let mut rb = RigidBody::new();
    rb.set_velocity(Vec3::new(10.0, 0.0, -2.0));
    let entity = world.spawn((Transform3D::default(), rb)).id();

    tick_movement(&mut world, 0.5);

    let t = world.get::<Transform3D>(entity).unwrap().translation;
    assert!(t.abs_diff_eq(Vec3::new(5.0, 0.0, -1.0), EPSILON));
}

#[test]
fn movement_applies_gravity_when_enabled() {
    let mut world = make_world();
    let mut rb = RigidBody::with_gravity_disabled();
    let still = world.spawn((Transform3D::default(), rb.clone())).id();
    rb.set_gravity(true);
    let falling = world.spawn((Transform3D::default(), rb)).id();

    tick_movement(&mut world, 1.0);

    assert_eq!(
        world.get::<Transform3D>(still).unwrap().translation,
        Vec3::ZERO
    );
    let v = world.get::<RigidBody>(falling).unwrap().velocity;
    assert!(approx_eq(v.y, -9.81));
}

#[test]
fn movement_skips_frozen() {
    let mut world = make_world();
    let mut rb = RigidBody::new();
    rb.set_velocity(Vec3::X * 5.0);
    rb.freeze();
    let entity = world.spawn((Transform3D::from_xyz(1.0, 1.0, 1.0), rb)).id();

    tick_movement(&mut world, 1.0);

    assert_eq!(
        world.get::<Transform3D>(entity).unwrap().translation,
        Vec3::ONE
    );
}

#[test]
fn ttl_decrements_and_despawns() {
    let mut world = make_world();
    let entity = world.spawn(Ttl::new(1.0)).id();

    tick_ttl(&mut world, 0.5);
    assert!(world.get_entity(entity).is_ok());
    assert!(approx_eq(world.get::<Ttl>(entity).unwrap().remaining, 0.5));

    tick_ttl(&mut world, 0.5);
    assert!(world.get_entity(entity).is_err());
}

#[test]
fn timer_fires_once_with_its_signal() {
    let mut world = make_world();
    let fired = Arc::new(Mutex::new(Vec::new()));
    let sink = fired.clone();
    world.add_observer(move |trigger: On<TimerEvent>| {
        let e = trigger.event();
        sink.lock().unwrap().push((e.entity, e.signal.clone()));
    });
    let entity = world.spawn(Timer::new(1.0, "ring")).id();

    tick_timers(&mut world, 0.6);
    assert!(fired.lock().unwrap().is_empty());
    tick_timers(&mut world, 0.6);
    tick_timers(&mut world, 0.6);

    let fired = fired.lock().unwrap();
    assert_eq!(fired.as_slice(), &[(entity, "ring".to_string())]);
    assert!(world.get::<Timer>(entity).is_none());
}

#[test]
fn tween_lands_exactly_and_reports() {
    let mut world = make_world();
    let finished = Arc::new(Mutex::new(0));
    let sink = finished.clone();
    world.add_observer(move |_: On<TweenFinishedEvent>| {
        *sink.lock().unwrap() += 1;
    });
    let from = Transform3D::default();
    let to = Transform3D::from_xyz(0.0, 0.0, 3.0)
        .with_rotation(Quat::from_rotation_y(1.0));
    let entity = world
        .spawn((from, TweenPose::new(from, to, 1.0).with_easing(Easing::SmoothStep)))
        .id();

    tick_tween(&mut world, 0.5);
    let mid = world.get::<Transform3D>(entity).unwrap().translation;
    assert!(approx_eq(mid.z, 1.5));
    assert_eq!(*finished.lock().unwrap(), 0);

    tick_tween(&mut world, 0.7);
    let end = world.get::<Transform3D>(entity).unwrap();
    assert_eq!(end.translation, to.translation);
    assert!(end.rotation.abs_diff_eq(to.rotation, 1e-6));
    assert!(world.get::<TweenPose>(entity).is_none());
    assert_eq!(*finished.lock().unwrap(), 1);
}
