//! Escape room gameplay runtime.
//!
//! This module exposes the ECS components, resources, systems, and events
//! for use by a host, in integration tests, and by the headless binary.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
