//! Engine systems and observers.
//!
//! Per-frame systems are chained in [`crate::game::build_update_schedule`];
//! observers are registered by [`crate::game::register_observers`].
//!
//! Submodules overview
//! - [`audio`] – log and advance the audio command queue
//! - [`autopilot`] – scripted input for the headless binary
//! - [`collision`] – solid contacts, push-out and trigger entries
//! - [`door`] – door impacts, commands, settling and auto-close
//! - [`escape`] – escape room stage machine and HUD
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`input`] – cursor lock toggle
//! - [`interaction`] – cooldown and dispatch of clicks and proximity entries
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`player`] – first-person look, walk, grounding and spawn points
//! - [`pointer`] – ray picking, hover highlights, grab and release
//! - [`scene`] – scene teardown and spawning
//! - [`scenetransition`] – one-shot triggers that load the next scene
//! - [`throwable`] – grab, hold, throw, impact and reset
//! - [`time`] – update simulation time and delta, process timers
//! - [`ttl`] – despawn expired entities
//! - [`tween`] – animate poses over time

pub mod audio;
pub mod autopilot;
pub mod collision;
pub mod door;
pub mod escape;
pub mod gamestate;
pub mod input;
pub mod interaction;
pub mod movement;
pub mod player;
pub mod pointer;
pub mod scene;
pub mod scenetransition;
pub mod throwable;
pub mod time;
pub mod ttl;
pub mod tween;
