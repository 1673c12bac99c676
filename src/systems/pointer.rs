//! Pointer picking.
//!
//! While the cursor is unlocked the pointer ray from [`InputState`] selects
//! the nearest visible box. The hit drives hover highlights, and a press on
//! it either grabs a resting throwable or interacts with an interactable.
//! Releasing the button lets go of whatever is held, wherever the pointer is.
use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::collider::BoxCollider;
use crate::components::interaction::Interactable;
use crate::components::material::{Hidden, Highlight, Material};
use crate::components::player::FirstPersonController;
use crate::components::throwable::{ThrowState, Throwable};
use crate::components::transform::Transform3D;
use crate::events::input::{GrabEvent, InteractEvent, InteractionSource, ReleaseEvent};
use crate::resources::input::{CursorState, InputState};

/// Nearest entity hit by a ray, with the distance along `direction`.
pub fn pick<'a>(
    candidates: impl IntoIterator<Item = (Entity, &'a Transform3D, &'a BoxCollider)>,
    origin: Vec3,
    direction: Vec3,
) -> Option<(Entity, f32)> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }
    candidates
        .into_iter()
        .filter_map(|(entity, transform, collider)| {
            collider
                .ray_intersection(transform.translation, origin, direction)
                .map(|t| (entity, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[allow(clippy::too_many_arguments)]
pub fn pointer_system(
    input: Res<InputState>,
    cursor: Res<CursorState>,
    targets: Query<
        (Entity, &Transform3D, &BoxCollider),
        (Without<Hidden>, Without<FirstPersonController>),
    >,
    mut highlights: Query<(Entity, &mut Highlight, &mut Material)>,
    throwables: Query<(Entity, &Throwable)>,
    interactables: Query<(), With<Interactable>>,
    mut commands: Commands,
) {
    let hit = if cursor.locked {
        None
    } else {
        pick(
            targets.iter(),
            input.pointer.ray_origin,
            input.pointer.ray_direction,
        )
        .map(|(entity, _)| entity)
    };

    for (entity, mut highlight, mut material) in highlights.iter_mut() {
        let hovered = hit == Some(entity);
        if hovered == highlight.hovered {
            continue;
        }
        highlight.hovered = hovered;
        if !highlight.enabled {
            continue;
        }
        material.color = if hovered {
            highlight.color
        } else {
            highlight.original
        };
    }

    if input.pointer.button.just_pressed {
        if let Some(entity) = hit {
            match throwables.get(entity) {
                Ok((_, throwable)) if throwable.state() == ThrowState::AtRest => {
                    commands.trigger(GrabEvent { entity });
                }
                Ok(_) => {}
                Err(_) => {
                    if interactables.contains(entity) {
                        commands.trigger(InteractEvent {
                            entity,
                            source: InteractionSource::Click,
                        });
                    }
                }
            }
        }
    }

    if input.pointer.button.just_released {
        for (entity, throwable) in throwables.iter() {
            if throwable.is_grabbed() {
                commands.trigger(ReleaseEvent { entity });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_prefers_nearest_box() {
        let mut world = World::new();
        let far = world
            .spawn((Transform3D::from_xyz(0.0, 0.0, 10.0), BoxCollider::cube(1.0)))
            .id();
        let near = world
            .spawn((Transform3D::from_xyz(0.0, 0.0, 4.0), BoxCollider::cube(1.0)))
            .id();
        let mut q = world.query::<(Entity, &Transform3D, &BoxCollider)>();
        let hit = pick(q.iter(&world), Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(hit.map(|h| h.0), Some(near));
        let back = pick(q.iter(&world), Vec3::new(0.0, 0.0, 20.0), Vec3::NEG_Z);
        assert_eq!(back.map(|h| h.0), Some(far));
        assert!(pick(q.iter(&world), Vec3::ZERO, Vec3::ZERO).is_none());
    }
}
