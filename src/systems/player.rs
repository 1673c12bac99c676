//! First-person player systems.
//!
//! - [`player_controller_system`] applies mouse look, walking and grounding,
//!   then moves the [`Camera3D`] to the player's eyes.
//! - [`spawn_point_system`] places the player when a scene adds a
//!   [`SpawnPoint`].
//! - [`observe_respawn`] puts the player back on the current spawn point.
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, warn};

use crate::components::collider::{BoxCollider, Ground};
use crate::components::material::Hidden;
use crate::components::player::{FirstPersonController, Grounding, SpawnPoint};
use crate::components::rigidbody::GRAVITY;
use crate::components::transform::Transform3D;
use crate::events::input::RespawnEvent;
use crate::resources::camera::Camera3D;
use crate::resources::input::{CursorState, InputState};
use crate::resources::worldtime::WorldTime;

/// Probe starts this far above the queried position...
pub const GROUND_PROBE_HEIGHT: f32 = 100.0;
/// ...and reaches this far down.
pub const GROUND_PROBE_LENGTH: f32 = 200.0;

type GroundQuery<'w, 's> = Query<
    'w,
    's,
    (&'static Transform3D, &'static BoxCollider),
    (With<Ground>, Without<FirstPersonController>, Without<Hidden>),
>;

/// Top of the highest ground box under `position`, if any.
pub fn ground_height_at<'a>(
    grounds: impl IntoIterator<Item = (&'a Transform3D, &'a BoxCollider)>,
    position: Vec3,
) -> Option<f32> {
    let origin = position + Vec3::Y * GROUND_PROBE_HEIGHT;
    grounds
        .into_iter()
        .filter_map(|(transform, collider)| {
            collider.ray_intersection(transform.translation, origin, Vec3::NEG_Y)
        })
        .filter(|t| *t <= GROUND_PROBE_LENGTH)
        .min_by(|a, b| a.total_cmp(b))
        .map(|t| origin.y - t)
}

fn update_camera(camera: &mut Camera3D, transform: &Transform3D, controller: &FirstPersonController) {
    let feet = transform.translation - Vec3::Y * controller.grounding.height();
    camera.position = feet + Vec3::Y * controller.eye_height;
    camera.yaw = controller.yaw;
    camera.pitch = controller.pitch;
}

pub fn player_controller_system(
    input: Res<InputState>,
    cursor: Res<CursorState>,
    time: Res<WorldTime>,
    mut camera: ResMut<Camera3D>,
    mut players: Query<(&mut Transform3D, &mut FirstPersonController)>,
    grounds: GroundQuery,
) {
    let dt = time.delta;
    for (mut transform, mut controller) in players.iter_mut() {
        if cursor.locked {
            controller.apply_look(input.look_delta);
        }
        let step = controller.walk_displacement(input.move_axes, dt);
        transform.translation += step;

        let ground = ground_height_at(grounds.iter(), transform.translation);
        match controller.grounding {
            Grounding::Snap { height } => {
                if let Some(ground) = ground {
                    transform.translation.y = ground + height;
                    controller.grounded = true;
                } else {
                    controller.grounded = false;
                }
            }
            Grounding::Gravity { height } => {
                controller.vertical_velocity -= GRAVITY * dt;
                transform.translation.y += controller.vertical_velocity * dt;
                controller.grounded = false;
                if let Some(ground) = ground {
                    let floor = ground + height;
                    if transform.translation.y <= floor {
                        transform.translation.y = floor;
                        controller.vertical_velocity = 0.0;
                        controller.grounded = true;
                    }
                }
            }
        }

        update_camera(&mut camera, &transform, &controller);
    }
}

/// Move the player onto `spawn`, resting on the ground below it when there is one.
pub fn place_at_spawn(
    spawn: &SpawnPoint,
    ground: Option<f32>,
    transform: &mut Transform3D,
    controller: &mut FirstPersonController,
) {
    let mut position = spawn.position;
    match ground {
        Some(ground) => position.y = ground + spawn.height,
        None => warn!(
            "No ground found under spawn point {:?}, using it as is",
            spawn.position
        ),
    }
    transform.translation = position;
    controller.yaw = spawn.yaw_degrees;
    controller.pitch = 0.0;
    controller.vertical_velocity = 0.0;
    debug!("Player placed at {:?} facing {}", position, spawn.yaw_degrees);
}

pub fn spawn_point_system(
    spawns: Query<&SpawnPoint, Added<SpawnPoint>>,
    mut players: Query<(&mut Transform3D, &mut FirstPersonController)>,
    grounds: GroundQuery,
    mut camera: ResMut<Camera3D>,
) {
    let Some(spawn) = spawns.iter().last() else {
        return;
    };
    let ground = ground_height_at(grounds.iter(), spawn.position);
    for (mut transform, mut controller) in players.iter_mut() {
        place_at_spawn(spawn, ground, &mut transform, &mut controller);
        update_camera(&mut camera, &transform, &controller);
    }
}

pub fn observe_respawn(
    _trigger: On<RespawnEvent>,
    spawns: Query<&SpawnPoint>,
    mut players: Query<(&mut Transform3D, &mut FirstPersonController)>,
    grounds: GroundQuery,
    mut camera: ResMut<Camera3D>,
) {
    let Some(spawn) = spawns.iter().next() else {
        warn!("Respawn requested but the scene has no spawn point");
        return;
    };
    let ground = ground_height_at(grounds.iter(), spawn.position);
    for (mut transform, mut controller) in players.iter_mut() {
        place_at_spawn(spawn, ground, &mut transform, &mut controller);
        update_camera(&mut camera, &transform, &controller);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> (Transform3D, BoxCollider) {
        (
            Transform3D::from_xyz(0.0, -0.5, 0.0),
            BoxCollider::new(20.0, 1.0, 20.0),
        )
    }

    #[test]
    fn ground_ray_finds_highest_surface() {
        let (ft, fc) = floor();
        let step_t = Transform3D::from_xyz(3.0, 0.25, 0.0);
        let step_c = BoxCollider::new(2.0, 0.5, 2.0);
        let grounds = [(&ft, &fc), (&step_t, &step_c)];
        let h = ground_height_at(grounds, Vec3::new(3.0, 1.0, 0.0)).unwrap();
        assert!((h - 0.5).abs() < 1e-5);
        let h = ground_height_at(grounds, Vec3::new(-3.0, 1.0, 0.0)).unwrap();
        assert!(h.abs() < 1e-5);
        assert!(ground_height_at(grounds, Vec3::new(50.0, 1.0, 0.0)).is_none());
    }

    #[test]
    fn spawn_without_ground_keeps_position() {
        let spawn = SpawnPoint::new(Vec3::new(1.0, 3.0, 2.0), 45.0, 2.0);
        let mut t = Transform3D::default();
        let mut c = FirstPersonController {
            pitch: 30.0,
            ..Default::default()
        };
        place_at_spawn(&spawn, None, &mut t, &mut c);
        assert_eq!(t.translation, Vec3::new(1.0, 3.0, 2.0));
        assert_eq!(c.yaw, 45.0);
        assert_eq!(c.pitch, 0.0);
        place_at_spawn(&spawn, Some(0.0), &mut t, &mut c);
        assert_eq!(t.translation.y, 2.0);
    }

    #[test]
    fn gravity_mode_lands_on_floor() {
        let mut world = World::new();
        world.insert_resource(InputState::default());
        world.insert_resource(CursorState::default());
        world.insert_resource(WorldTime::default());
        world.insert_resource(Camera3D::default());
        world.spawn(floor());
        world.spawn((floor().0, floor().1, Ground));
        let player = world
            .spawn((
                Transform3D::from_xyz(0.0, 5.0, 0.0),
                FirstPersonController {
                    grounding: Grounding::Gravity { height: 2.0 },
                    ..Default::default()
                },
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(player_controller_system);
        for _ in 0..120 {
            world.resource_mut::<WorldTime>().delta = 1.0 / 60.0;
            schedule.run(&mut world);
        }
        let c = world.get::<FirstPersonController>(player).unwrap();
        assert!(c.grounded);
        let y = world.get::<Transform3D>(player).unwrap().translation.y;
        assert!((y - 2.0).abs() < 1e-4);
        let eye = world.resource::<Camera3D>().position.y;
        assert!((eye - 1.6).abs() < 1e-4);
    }
}
