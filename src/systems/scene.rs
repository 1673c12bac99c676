//! Scene loading.
//!
//! [`scene_switch_system`] is an exclusive system at the head of the frame:
//! when the [`SceneDirector`] has a pending request it tears down every
//! [`SceneEntity`], spawns the requested [`SceneDef`] and, for escape rooms,
//! triggers [`EscapeEvent::Setup`].
//!
//! Spawning takes two passes: the first creates one entity per object and
//! records it by name, the second resolves references between objects
//! (throwable targets, the escape room wiring).
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::components::collider::{BoxCollider, Ground, SphereTrigger};
use crate::components::door::{Door, DoorDetector};
use crate::components::dynamictext::DynamicText;
use crate::components::group::Group;
use crate::components::interaction::Interactable;
use crate::components::material::{Color, Hidden, Highlight, Material};
use crate::components::player::SpawnPoint;
use crate::components::puzzle::{ButtonSequence, PuzzleButton};
use crate::components::rigidbody::RigidBody;
use crate::components::sceneentity::SceneEntity;
use crate::components::scenetransition::SceneTransition;
use crate::components::throwable::{AimIndicator, Throwable};
use crate::components::transform::Transform3D;
use crate::events::escape::EscapeEvent;
use crate::events::scene::SceneLoadedEvent;
use crate::resources::contacts::ContactTracker;
use crate::resources::escaperoom::{EscapeRoom, Hud};
use crate::resources::gameconfig::GameConfig;
use crate::resources::scenestore::{ObjectDef, ObjectKind, SceneDef, SceneDirector, SceneStore};
use crate::resources::worldsignals::{STRING_SCENE, WorldSignals};

const THROWABLE_MASS: f32 = 0.5;
const DEFAULT_COLOR: Color = Color::GRAY;

pub fn scene_switch_system(world: &mut World) {
    let Some(name) = world.resource_mut::<SceneDirector>().take_pending() else {
        return;
    };
    let Some(scene) = world.resource::<SceneStore>().get(&name).cloned() else {
        warn!("Unknown scene '{}', staying where we are", name);
        return;
    };

    unload_scene(world);
    let config = world.resource::<GameConfig>().clone();
    spawn_scene(world, &scene, &config);

    world.resource_mut::<SceneDirector>().set_current(name.clone());
    world
        .resource_mut::<WorldSignals>()
        .set_string(STRING_SCENE, name.clone());
    info!("Scene '{}' loaded ({} objects)", name, scene.objects.len());

    world.trigger(SceneLoadedEvent { name });
    if scene.escape.is_some() {
        world.trigger(EscapeEvent::Setup);
    }
    world.flush();
}

/// Despawn every scene entity and drop per-scene resources.
pub fn unload_scene(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<SceneEntity>>()
        .iter(world)
        .collect();
    for entity in &entities {
        world.despawn(*entity);
    }
    world.remove_resource::<EscapeRoom>();
    world.remove_resource::<Hud>();
    if let Some(mut tracker) = world.get_resource_mut::<ContactTracker>() {
        tracker.clear();
    }
    if let Some(mut signals) = world.get_resource_mut::<WorldSignals>() {
        signals.clear_entities();
    }
    if !entities.is_empty() {
        info!("Unloaded {} scene entities", entities.len());
    }
}

fn door_for(def: &ObjectDef, slide: Option<bool>, transform: &Transform3D, config: &GameConfig) -> Door {
    let settings = &config.door;
    let door = if slide.unwrap_or(settings.slide) {
        Door::sliding(transform.right(), settings.slide_distance)
    } else {
        Door::rotating(settings.open_angle)
    };
    let mut door = door
        .with_minimum_force(settings.minimum_force)
        .with_open_speed(settings.open_speed)
        .with_close_delay(settings.can_close, settings.close_delay)
        .with_sounds(config.door_open_sound(), config.door_close_sound())
        .with_hit_effect(settings.hit_effect)
        .with_closed_pose(*transform);
    door.detection_radius = settings.detection_radius;
    door.assist_impacts = settings.assist_impacts;
    if def.size.is_none() {
        warn!("Door '{}' has no size, contacts will never reach it", def.name);
    }
    door
}

fn spawn_object(world: &mut World, def: &ObjectDef, config: &GameConfig) -> Entity {
    let position = Vec3::from_array(def.position);
    let transform = Transform3D::new(position).with_yaw_degrees(def.yaw);
    let color = def.color.unwrap_or(DEFAULT_COLOR);
    let entity = world
        .spawn((transform, SceneEntity::new(def.name.clone()), Material::new(color)))
        .id();

    let mut e = world.entity_mut(entity);
    if let Some([w, h, d]) = def.size {
        e.insert(BoxCollider::new(w, h, d));
    }
    if def.hidden {
        e.insert(Hidden);
    }
    if let Some(kind) = &def.interaction {
        e.insert((
            Interactable::new(kind.clone()).with_cooldown(config.interaction.cooldown),
            SphereTrigger::new(config.interaction.radius),
            Highlight::new(Color::WHITE, color),
        ));
    }

    let default_group = match &def.kind {
        ObjectKind::Solid => None,
        ObjectKind::Ground => {
            e.insert(Ground);
            None
        }
        ObjectKind::Door { slide } => {
            e.insert(door_for(def, *slide, &transform, config));
            Some("gate")
        }
        ObjectKind::Button { id } => {
            e.insert(PuzzleButton::new(id.clone(), color));
            None
        }
        ObjectKind::Throwable { .. } => {
            let settings = &config.throwable;
            let mut throwable = Throwable::new(position)
                .with_throw_force(settings.throw_force)
                .with_reset(settings.enable_reset, settings.reset_delay);
            throwable.hover_distance = settings.hover_distance;
            throwable.arc_lift = settings.arc_lift;
            let mut body = RigidBody::with_gravity_disabled().with_mass(THROWABLE_MASS);
            body.freeze();
            e.insert((throwable, body, AimIndicator::default()));
            Some("crystal_ball")
        }
        ObjectKind::Board => None,
        ObjectKind::Text { content, font_size } => {
            e.insert(DynamicText::new(content.clone(), *font_size, color));
            None
        }
        ObjectKind::SceneTrigger { next_scene } => {
            e.insert((
                SceneTransition::new(next_scene.clone()).with_delay(config.transition.delay),
                SphereTrigger::new(config.transition.radius),
            ));
            None
        }
        ObjectKind::PlayerSpawn => {
            e.insert(SpawnPoint::new(position, def.yaw, config.player.player_height));
            None
        }
    };
    if let Some(group) = def.group.as_deref().or(default_group) {
        e.insert(Group::new(group));
    }

    if matches!(def.kind, ObjectKind::Door { .. }) {
        world.spawn((
            Transform3D::new(position),
            SphereTrigger::new(config.door.detection_radius),
            DoorDetector { door: entity },
            SceneEntity::new(format!("{}_detector", def.name)),
        ));
    }
    entity
}

/// Spawn all objects of `scene` and wire the references between them.
pub fn spawn_scene(world: &mut World, scene: &SceneDef, config: &GameConfig) {
    let mut by_name: FxHashMap<String, Entity> = FxHashMap::default();
    for def in &scene.objects {
        let entity = spawn_object(world, def, config);
        if by_name.insert(def.name.clone(), entity).is_some() {
            warn!("Scene '{}' has two objects named '{}'", scene.name, def.name);
        }
    }

    for def in &scene.objects {
        let ObjectKind::Throwable {
            target: Some(target),
        } = &def.kind
        else {
            continue;
        };
        let (Some(&entity), Some(&target_entity)) = (by_name.get(&def.name), by_name.get(target))
        else {
            warn!("Throwable '{}' aims at unknown object '{}'", def.name, target);
            continue;
        };
        if let Some(mut throwable) = world.get_mut::<Throwable>(entity) {
            throwable.target = Some(target_entity);
        }
    }

    if let Some(escape) = &scene.escape {
        let lookup = |field: &str, name: &Option<String>| -> Option<Entity> {
            let name = name.as_ref()?;
            let found = by_name.get(name).copied();
            if found.is_none() {
                warn!("Escape room {} '{}' is not in scene '{}'", field, name, scene.name);
            }
            found
        };
        let mut room = EscapeRoom::new(ButtonSequence::new(escape.order.iter().cloned()));
        room.clue_board = lookup("clue board", &escape.clue_board);
        room.clue_text = lookup("clue text", &escape.clue_text);
        room.crystal = lookup("crystal", &escape.crystal);
        room.exit_door = lookup("exit door", &escape.exit_door);
        for def in &scene.objects {
            if let (ObjectKind::Button { id }, Some(&entity)) = (&def.kind, by_name.get(&def.name)) {
                room.buttons.insert(id.clone(), entity);
            }
        }
        for problem in scene.escape_problems() {
            warn!("Scene '{}': {}", scene.name, problem);
        }
        world.insert_resource(room);
        if escape.hud {
            world.insert_resource(Hud::default());
        }
    }

    let mut signals = world.resource_mut::<WorldSignals>();
    for (name, entity) in by_name {
        signals.set_entity(name, entity);
    }
}
