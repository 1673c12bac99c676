//! Audio commands for the host.
//!
//! Gameplay code never plays sound itself; it writes [`AudioCmd`] messages
//! that the host drains each frame. The headless binary only logs them (see
//! [`crate::systems::audio`]).

use bevy_ecs::message::Message;

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    /// Play a one-shot effect by id.
    PlayFx { id: String },
}
