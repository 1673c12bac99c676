//! Event types used by the gameplay runtime.
//!
//! Events are how the stand-in engine reports what happened (contacts,
//! trigger entries, finished timers and tweens) and how gameplay pieces talk
//! to each other without direct dependencies (a door hit notifying the
//! escape room, a click becoming an interaction).
//!
//! Submodules:
//! - [`audio`] – sound commands written for the host
//! - [`collision`] – contact and trigger-entry notifications
//! - [`door`] – door impacts, external commands and state changes
//! - [`escape`] – escape room manager inputs and stage changes
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`input`] – interactions, grabs, releases and respawn requests
//! - [`scene`] – scene loaded notification
//! - [`timer`] – one-shot timer expiry
//! - [`tween`] – tween completion
pub mod audio;
pub mod collision;
pub mod door;
pub mod escape;
pub mod gamestate;
pub mod input;
pub mod scene;
pub mod timer;
pub mod tween;
