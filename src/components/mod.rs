//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the escape-room world. Components hold data and small state machines; the
//! systems and observers in [`crate::systems`] drive them.
//!
//! Submodules overview:
//! - [`collider`] – axis-aligned box colliders, sphere triggers and the ground marker
//! - [`door`] – impact-driven door state machine and its detection volume
//! - [`dynamictext`] – text shown on boards in the world
//! - [`group`] – tag component for grouping entities by name
//! - [`interaction`] – clickable / walk-in interactables with cooldown
//! - [`material`] – colors, hover highlight, glow and visibility
//! - [`player`] – first-person controller and spawn points
//! - [`puzzle`] – button-order sequence and puzzle buttons
//! - [`rigidbody`] – kinematic body with named acceleration forces
//! - [`sceneentity`] – marks entities owned by the loaded scene
//! - [`scenetransition`] – trigger volume that loads another scene
//! - [`throwable`] – grab-and-throw object and its aim indicator
//! - [`timer`] – one-shot countdown that triggers an event when finished
//! - [`transform`] – world-space position and rotation
//! - [`ttl`] – time-to-live for temporary entities
//! - [`tween`] – animated interpolation between two poses

pub mod collider;
pub mod door;
pub mod dynamictext;
pub mod group;
pub mod interaction;
pub mod material;
pub mod player;
pub mod puzzle;
pub mod rigidbody;
pub mod sceneentity;
pub mod scenetransition;
pub mod throwable;
pub mod timer;
pub mod transform;
pub mod ttl;
pub mod tween;
