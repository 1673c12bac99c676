//! Audio command plumbing.
//!
//! Gameplay writes [`AudioCmd`] messages (door open/close sounds); playback
//! belongs to the host, which reads them from [`Messages<AudioCmd>`] between
//! frames. The headless binary only logs them.
//!
//! - [`log_audio_cmds`] reports every command written this frame.
//! - [`update_audio_cmds`] advances the message queue; run it last.
use bevy_ecs::prelude::{MessageReader, Messages, ResMut};
use log::debug;

use crate::events::audio::AudioCmd;

pub fn log_audio_cmds(mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        match cmd {
            AudioCmd::PlayFx { id } => debug!("Play fx '{}'", id),
        }
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}
