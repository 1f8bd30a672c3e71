//! Axis-aligned rectangles and terrain collision resolution
//!
//! Everything in the world is an AABB. Terrain resolution pushes a moving
//! rectangle out of a static one along the axis of least penetration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test; touching edges do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Shift by an offset
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

/// Which side of a static rectangle the moving one was pushed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Pushed out to the left of the tile
    Left,
    /// Pushed out to the right of the tile
    Right,
    /// Came down on top of the tile (landing)
    Top,
    /// Hit the underside of the tile
    Bottom,
}

impl Contact {
    pub fn is_landing(self) -> bool {
        self == Contact::Top
    }
}

/// Result of a terrain resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub contact: Contact,
    /// Corrected top-left position of the moving rectangle
    pub position: Vec2,
}

/// Penetration depths of `a` into `b` along each axis
#[inline]
pub fn overlap_depths(a: &Rect, b: &Rect) -> (f32, f32) {
    let overlap_x = (a.right() - b.x).min(b.right() - a.x);
    let overlap_y = (a.bottom() - b.y).min(b.bottom() - a.y);
    (overlap_x, overlap_y)
}

/// Minimum-translation resolution of moving `a` against static `b`
///
/// Horizontal wins only when its depth is strictly smaller; ties resolve
/// vertically so corner landings put the entity on top of the tile.
pub fn resolve(a: &Rect, b: &Rect) -> Option<Resolution> {
    if !a.overlaps(b) {
        return None;
    }

    let (overlap_x, overlap_y) = overlap_depths(a, b);

    let (contact, position) = if overlap_x < overlap_y {
        if a.x < b.x {
            (Contact::Left, Vec2::new(b.x - a.w, a.y))
        } else {
            (Contact::Right, Vec2::new(b.right(), a.y))
        }
    } else if a.y < b.y {
        (Contact::Top, Vec2::new(a.x, b.y - a.h))
    } else {
        (Contact::Bottom, Vec2::new(a.x, b.bottom()))
    };

    Some(Resolution { contact, position })
}
