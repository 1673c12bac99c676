//! Contact and trigger detection.
//!
//! [`collision_detector`] runs after [`movement`](super::movement::movement).
//! It checks every pair of solid boxes where at least one side is a moving
//! body, pushes overlapping bodies apart and triggers a [`CollisionEvent`]
//! when a pair starts touching. [`trigger_detector`] does the same for
//! [`SphereTrigger`] volumes, which never push anything. A [`Throwable`] only
//! counts as inside a trigger while it is in flight, so one thrown from inside
//! a volume still enters it.
use bevy_ecs::prelude::*;
use glam::Vec3;
use rustc_hash::FxHashSet;

use crate::components::collider::{BoxCollider, SphereTrigger};
use crate::components::material::Hidden;
use crate::components::rigidbody::RigidBody;
use crate::components::throwable::{ThrowState, Throwable};
use crate::components::transform::Transform3D;
use crate::events::collision::{CollisionEvent, TriggerEnterEvent};
use crate::resources::contacts::ContactTracker;

/// Boxes closer than this count as touching.
pub const CONTACT_SKIN: f32 = 0.01;

fn moving(rb: Option<&RigidBody>) -> bool {
    rb.is_some_and(|rb| !rb.frozen)
}

fn velocity_of(rb: Option<&RigidBody>) -> Vec3 {
    match rb {
        Some(rb) if !rb.frozen => rb.velocity,
        _ => Vec3::ZERO,
    }
}

/// Remove the velocity component going into the surface with normal `n`.
fn bounce(rb: &mut RigidBody, n: Vec3) {
    let vn = rb.velocity.dot(n);
    if vn < 0.0 {
        rb.velocity -= (1.0 + rb.restitution) * vn * n;
    }
}

pub fn collision_detector(
    mut query: Query<
        (Entity, &mut Transform3D, &BoxCollider, Option<&mut RigidBody>),
        Without<Hidden>,
    >,
    mut tracker: ResMut<ContactTracker>,
    mut commands: Commands,
) {
    let mut touching: FxHashSet<(Entity, Entity)> = FxHashSet::default();

    let mut combos = query.iter_combinations_mut();
    while let Some(
        [
            (entity_a, mut transform_a, collider_a, mut body_a),
            (entity_b, mut transform_b, collider_b, mut body_b),
        ],
    ) = combos.fetch_next()
    {
        let dynamic_a = moving(body_a.as_deref());
        let dynamic_b = moving(body_b.as_deref());
        if !dynamic_a && !dynamic_b {
            continue;
        }

        let skin = BoxCollider {
            half_extents: collider_a.half_extents + Vec3::splat(CONTACT_SKIN),
            offset: collider_a.offset,
        };
        if !skin.overlaps(transform_a.translation, collider_b, transform_b.translation) {
            continue;
        }

        let relative = velocity_of(body_a.as_deref()) - velocity_of(body_b.as_deref());
        let relative_speed = relative.length();
        let mass = match (body_a.as_deref(), body_b.as_deref()) {
            (Some(a), Some(b)) if dynamic_a && dynamic_b => {
                let total = a.mass + b.mass;
                if total > 0.0 { a.mass * b.mass / total } else { 0.0 }
            }
            (Some(a), _) if dynamic_a => a.mass,
            (_, Some(b)) => b.mass,
            _ => 0.0,
        };
        let point = collider_b.closest_point(
            transform_b.translation,
            collider_a.center(transform_a.translation),
        );

        if let Some(push) =
            collider_a.penetration(transform_a.translation, collider_b, transform_b.translation)
        {
            let normal = push.normalize_or_zero();
            match (body_a.as_mut(), body_b.as_mut()) {
                (Some(a), Some(b)) if dynamic_a && dynamic_b => {
                    transform_a.translation += push * 0.5;
                    transform_b.translation -= push * 0.5;
                    bounce(a, normal);
                    bounce(b, -normal);
                }
                (Some(a), _) if dynamic_a => {
                    transform_a.translation += push;
                    bounce(a, normal);
                }
                (_, Some(b)) => {
                    transform_b.translation -= push;
                    bounce(b, -normal);
                }
                _ => {}
            }
        }

        let key = ContactTracker::ordered(entity_a, entity_b);
        touching.insert(key);
        if !tracker.contacts.contains(&key) {
            commands.trigger(CollisionEvent {
                a: entity_a,
                b: entity_b,
                impulse: relative_speed * mass,
                relative_speed,
                point,
            });
        }
    }

    tracker.contacts = touching;
}

/// Fire [`TriggerEnterEvent`] for boxes that entered a sphere trigger this frame.
pub fn trigger_detector(
    triggers: Query<(Entity, &Transform3D, &SphereTrigger), Without<Hidden>>,
    boxes: Query<(Entity, &Transform3D, &BoxCollider, Option<&Throwable>), Without<Hidden>>,
    mut tracker: ResMut<ContactTracker>,
    mut commands: Commands,
) {
    let mut inside: FxHashSet<(Entity, Entity)> = FxHashSet::default();
    for (trigger, trigger_transform, sphere) in triggers.iter() {
        for (other, transform, collider, throwable) in boxes.iter() {
            if other == trigger {
                continue;
            }
            if throwable.is_some_and(|t| t.state() != ThrowState::InFlight) {
                continue;
            }
            if !sphere.overlaps_box(trigger_transform.translation, collider, transform.translation)
            {
                continue;
            }
            inside.insert((trigger, other));
            if !tracker.overlaps.contains(&(trigger, other)) {
                commands.trigger(TriggerEnterEvent { trigger, other });
            }
        }
    }
    tracker.overlaps = inside;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::worldtime::WorldTime;
    use crate::systems::movement::movement;
    use std::sync::{Arc, Mutex};

    fn world_with_floor() -> (World, Schedule, Entity) {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(ContactTracker::default());
        let floor = world
            .spawn((
                Transform3D::from_xyz(0.0, -0.5, 0.0),
                BoxCollider::new(10.0, 1.0, 10.0),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems((movement, collision_detector).chain());
        (world, schedule, floor)
    }

    #[test]
    fn falling_box_lands_once() {
        let (mut world, mut schedule, floor) = world_with_floor();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = hits.clone();
        world.add_observer(move |trigger: On<CollisionEvent>| {
            let e = trigger.event();
            sink.lock().unwrap().push((e.a, e.b, e.impulse));
        });
        let mut rb = RigidBody::new().with_mass(2.0);
        rb.set_velocity(Vec3::new(0.0, -4.0, 0.0));
        let cube = world
            .spawn((Transform3D::from_xyz(0.0, 0.6, 0.0), BoxCollider::cube(1.0), rb))
            .id();

        for _ in 0..30 {
            world.resource_mut::<WorldTime>().delta = 0.05;
            schedule.run(&mut world);
        }

        let hits = hits.lock().unwrap();
        assert_eq!(hits.len(), 1);
        let (a, b, impulse) = hits[0];
        assert!((a == cube && b == floor) || (a == floor && b == cube));
        assert!((impulse - 8.0).abs() < 1e-3);
        let y = world.get::<Transform3D>(cube).unwrap().translation.y;
        assert!(y >= 0.5 - 1e-4, "cube sank to {}", y);
        assert!(world.get::<RigidBody>(cube).unwrap().velocity.y >= 0.0);
    }

    #[test]
    fn frozen_bodies_do_not_collide() {
        let (mut world, mut schedule, _) = world_with_floor();
        let mut rb = RigidBody::new();
        rb.freeze();
        world.spawn((Transform3D::from_xyz(0.0, 0.2, 0.0), BoxCollider::cube(1.0), rb));
        world.resource_mut::<WorldTime>().delta = 0.05;
        schedule.run(&mut world);
        assert!(world.resource::<ContactTracker>().contacts.is_empty());
    }

    #[test]
    fn trigger_fires_on_enter_only() {
        let mut world = World::new();
        world.insert_resource(ContactTracker::default());
        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        world.add_observer(move |_: On<TriggerEnterEvent>| {
            *sink.lock().unwrap() += 1;
        });
        world.spawn((Transform3D::default(), SphereTrigger::new(2.0)));
        let walker = world
            .spawn((Transform3D::from_xyz(5.0, 0.0, 0.0), BoxCollider::cube(1.0)))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(trigger_detector);

        for x in [5.0, 2.0, 1.0, 0.0, 5.0, 1.0] {
            world.get_mut::<Transform3D>(walker).unwrap().translation.x = x;
            schedule.run(&mut world);
        }
        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn throwable_enters_trigger_only_in_flight() {
        let mut world = World::new();
        world.insert_resource(ContactTracker::default());
        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        world.add_observer(move |_: On<TriggerEnterEvent>| {
            *sink.lock().unwrap() += 1;
        });
        world.spawn((Transform3D::default(), SphereTrigger::new(2.0)));
        let crystal = world
            .spawn((
                Transform3D::from_xyz(0.5, 0.0, 0.0),
                BoxCollider::cube(0.3),
                Throwable::new(Vec3::new(0.5, 0.0, 0.0)),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(trigger_detector);

        schedule.run(&mut world);
        {
            let mut throwable = world.get_mut::<Throwable>(crystal).unwrap();
            assert!(throwable.grab());
        }
        schedule.run(&mut world);
        assert_eq!(*count.lock().unwrap(), 0);

        world.get_mut::<Throwable>(crystal).unwrap().release();
        schedule.run(&mut world);
        schedule.run(&mut world);
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
