//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input, timing, configuration, the
//! escape room manager and scene bookkeeping. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `autopilot` – scripted input driver used by the headless binary
//! - `camera` – first-person camera the host renders from
//! - `contacts` – touching pairs, for enter-only contact and trigger events
//! - `escaperoom` – escape stage, button sequence, scene references and HUD text
//! - `gameconfig` – gameplay tuning loaded from an INI file
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame input state and cursor lock
//! - `scenestore` – scene definitions and the scene director
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `worldsignals` – global flags, counters and named entities
//! - `worldtime` – simulation time and delta
pub mod autopilot;
pub mod camera;
pub mod contacts;
pub mod escaperoom;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod scenestore;
pub mod systemsstore;
pub mod worldsignals;
pub mod worldtime;
