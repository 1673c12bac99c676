//! Input systems.
//!
//! The host writes [`InputState`] before each frame; the systems here only
//! derive engine state from it.
//!
//! - [`cursor_toggle_system`] flips [`CursorState`] on the back action. A
//!   locked cursor drives mouse look; an unlocked one drives the pointer.
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::input::{CursorState, InputState};

pub fn cursor_toggle_system(input: Res<InputState>, mut cursor: ResMut<CursorState>) {
    if input.back.just_pressed {
        cursor.locked = !cursor.locked;
        debug!("Cursor {}", if cursor.locked { "locked" } else { "unlocked" });
    }
}
