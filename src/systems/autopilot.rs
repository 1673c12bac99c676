//! Scripted input for the headless binary.
//!
//! [`autopilot_system`] runs first in the update chain (only when an
//! [`Autopilot`] resource exists) and writes [`InputState`] the way a host
//! would from real devices. See
//! [`Autopilot`] for the step list.
use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};
use log::{info, warn};

use crate::components::collider::BoxCollider;
use crate::components::door::Door;
use crate::components::player::FirstPersonController;
use crate::components::sceneentity::SceneEntity;
use crate::components::transform::Transform3D;
use crate::resources::autopilot::{Autopilot, AutopilotStep};
use crate::resources::camera::Camera3D;
use crate::resources::escaperoom::EscapeRoom;
use crate::resources::input::InputState;
use crate::resources::scenestore::SceneDirector;
use crate::resources::worldtime::WorldTime;

type ObjectQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static SceneEntity,
        &'static Transform3D,
        Option<&'static BoxCollider>,
        Option<&'static Door>,
    ),
>;

fn find_center(objects: &ObjectQuery, name: &str) -> Option<Vec3> {
    objects
        .iter()
        .find(|(scene_entity, ..)| scene_entity.name == name)
        .map(|(_, transform, collider, _)| match collider {
            Some(collider) => collider.center(transform.translation),
            None => transform.translation,
        })
}

fn door_is_open(objects: &ObjectQuery, name: &str) -> Option<bool> {
    objects
        .iter()
        .find(|(scene_entity, ..)| scene_entity.name == name)
        .and_then(|(_, _, _, door)| door.map(Door::is_open))
}

/// Move axes (strafe, forward) that walk a controller toward `direction`.
pub fn axes_toward(controller: &FirstPersonController, direction: Vec3) -> Vec2 {
    let flat = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
    Vec2::new(
        flat.dot(controller.right_flat()),
        flat.dot(controller.forward_flat()),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn autopilot_system(
    mut pilot: ResMut<Autopilot>,
    mut input: ResMut<InputState>,
    time: Res<WorldTime>,
    director: Res<SceneDirector>,
    room: Option<Res<EscapeRoom>>,
    camera: Res<Camera3D>,
    players: Query<(&Transform3D, &FirstPersonController)>,
    objects: ObjectQuery,
) {
    input.clear_motion();
    pilot.step_elapsed += time.delta;

    if let Some(step) = pilot.current().cloned() {
        let mut waiting = false;
        match &step {
            AutopilotStep::WaitForScene(name) => {
                if director.current() == Some(name.as_str()) {
                    pilot.advance();
                } else {
                    waiting = true;
                }
            }
            AutopilotStep::WalkTo { target, tolerance } => {
                match players.iter().next() {
                    Some((transform, controller)) => {
                        let mut delta = *target - transform.translation;
                        delta.y = 0.0;
                        if delta.length() <= *tolerance {
                            pilot.advance();
                        } else {
                            input.move_axes = axes_toward(controller, delta);
                            waiting = true;
                        }
                    }
                    None => pilot.fail("No player to walk"),
                }
            }
            AutopilotStep::Aim(name) => {
                if find_center(&objects, name).is_some() {
                    pilot.aim = Some(name.clone());
                    pilot.advance();
                } else {
                    pilot.fail(format!("Nothing named '{}' to aim at", name));
                }
            }
            AutopilotStep::PointerDown => {
                pilot.pointer_down = true;
                pilot.advance();
            }
            AutopilotStep::PointerUp => {
                pilot.pointer_down = false;
                pilot.advance();
            }
            AutopilotStep::ToggleCursor => {
                pilot.back_pressed = true;
                pilot.advance();
            }
            AutopilotStep::Wait(seconds) => {
                if pilot.step_elapsed >= *seconds {
                    pilot.advance();
                }
            }
            AutopilotStep::WaitForDoorOpen(name) => {
                if door_is_open(&objects, name) == Some(true) {
                    pilot.advance();
                } else {
                    waiting = true;
                }
            }
            AutopilotStep::WaitForStage(stage) => {
                if room.as_ref().is_some_and(|r| r.stage() >= *stage) {
                    pilot.advance();
                } else {
                    waiting = true;
                }
            }
        }
        if waiting && pilot.step_elapsed > pilot.step_timeout {
            warn!("Autopilot timed out on {:?}", step);
            pilot.fail(format!("Timed out on {:?}", step));
        }
        if pilot.is_finished() {
            match pilot.failure() {
                Some(reason) => warn!("Autopilot stopped: {}", reason),
                None => info!("Autopilot finished"),
            }
        }
    }

    let back = pilot.back_pressed;
    input.back.update(back);
    pilot.back_pressed = false;
    input.pointer.button.update(pilot.pointer_down);
    if let Some(center) = pilot.aim.as_deref().and_then(|name| find_center(&objects, name)) {
        input.pointer.ray_origin = camera.position;
        input.pointer.ray_direction = (center - camera.position).normalize_or_zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_follow_yaw() {
        let c = FirstPersonController {
            yaw: 90.0,
            ..Default::default()
        };
        let axes = axes_toward(&c, Vec3::new(3.0, 1.0, 0.0));
        assert!(axes.abs_diff_eq(Vec2::new(0.0, 1.0), 1e-4));
        let axes = axes_toward(&c, Vec3::new(0.0, 0.0, -2.0));
        assert!(axes.abs_diff_eq(Vec2::new(1.0, 0.0), 1e-4));
    }
}
