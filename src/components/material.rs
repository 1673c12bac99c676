//! Surface appearance data that gameplay code changes and the host renders.
//!
//! - [`Color`] – linear RGBA color with the palette the escape room uses
//! - [`Material`] – current base color of an entity
//! - [`Highlight`] – hover color plus the color recorded at spawn
//! - [`Glow`] – emissive light attached to an entity (the crystal)
//! - [`Hidden`] – entity exists but is not shown and cannot be picked

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 0.92, 0.016);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const BROWN: Color = Color::rgb(0.45, 0.3, 0.15);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
}

impl Material {
    pub fn new(color: Color) -> Self {
        Material { color }
    }
}

/// Hover highlight. `original` is the material color when the entity was
/// spawned; leaving the hover restores it, not whatever color was current.
#[derive(Component, Clone, Copy, Debug)]
pub struct Highlight {
    pub color: Color,
    pub original: Color,
    pub enabled: bool,
    pub hovered: bool,
}

impl Highlight {
    pub fn new(color: Color, original: Color) -> Self {
        Highlight {
            color,
            original,
            enabled: true,
            hovered: false,
        }
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
}

impl Glow {
    pub fn new(color: Color, intensity: f32, range: f32) -> Self {
        Glow {
            color,
            intensity,
            range,
        }
    }
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Hidden;
