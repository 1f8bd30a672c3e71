//! Smoothed follow camera with a short screen shake

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::frame_scale;

/// Fraction of the remaining distance covered per reference frame
pub const SMOOTHING: f32 = 0.1;
/// Shake displacement (pixels)
pub const SHAKE_MAGNITUDE: f32 = 2.0;
/// Shake alternates direction every step and settles after three
pub const SHAKE_STEP_MS: f32 = 100.0;
pub const SHAKE_MS: f32 = SHAKE_STEP_MS * 3.0;

/// World-to-screen translation. Draw at `world + camera.offset()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation (without shake)
    pub pos: Vec2,
    /// Remaining shake time (ms)
    pub shake_ms: f32,
}

impl Camera {
    /// Translation that centres `focus` on the canvas
    pub fn target_for(focus: Vec2) -> Vec2 {
        Vec2::new(-focus.x + CANVAS_WIDTH / 2.0, -focus.y + CANVAS_HEIGHT / 2.0)
    }

    /// Jump straight to `focus` (used on level load)
    pub fn snap_to(&mut self, focus: Vec2) {
        self.pos = Self::target_for(focus);
    }

    pub fn follow(&mut self, dt_ms: f32, focus: Vec2) {
        let target = Self::target_for(focus);
        let t = 1.0 - (1.0 - SMOOTHING).powf(frame_scale(dt_ms));
        self.pos += (target - self.pos) * t;
        self.shake_ms = (self.shake_ms - dt_ms).max(0.0);
    }

    pub fn shake(&mut self) {
        self.shake_ms = SHAKE_MS;
    }

    pub fn shake_offset(&self) -> Vec2 {
        if self.shake_ms > 2.0 * SHAKE_STEP_MS {
            Vec2::splat(SHAKE_MAGNITUDE)
        } else if self.shake_ms > SHAKE_STEP_MS {
            Vec2::splat(-SHAKE_MAGNITUDE)
        } else {
            Vec2::ZERO
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.pos + self.shake_offset()
    }
}
