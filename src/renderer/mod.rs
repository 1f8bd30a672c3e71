//! Rendering module
//!
//! The core never touches a graphics API. Each frame it produces a list of
//! draw commands in screen space; the shell replays them on whatever surface
//! it owns. Sprites resolve through an [`AssetProvider`] and fall back to a
//! solid rectangle when the image is missing.

pub mod colors;
pub mod draw;

pub use draw::{render_game, render_scene};

use glam::Vec2;

use crate::sim::Rect;

/// Opaque reference to a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Where sprites come from
pub trait AssetProvider {
    fn image(&self, name: &str) -> Option<ImageHandle>;
}

/// Provider with no images; everything renders as fallback rectangles
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn image(&self, _name: &str) -> Option<ImageHandle> {
        None
    }
}

/// Text alignment for overlay strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A single screen-space draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        image: ImageHandle,
        rect: Rect,
        flip_x: bool,
        /// Radians around the rect centre
        rotation: f32,
        alpha: f32,
    },
    Fill {
        rect: Rect,
        color: [f32; 4],
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        align: Align,
        color: [f32; 4],
    },
}

impl DrawCommand {
    pub fn rect(&self) -> Option<Rect> {
        match self {
            DrawCommand::Sprite { rect, .. } | DrawCommand::Fill { rect, .. } => Some(*rect),
            DrawCommand::Text { .. } => None,
        }
    }
}
