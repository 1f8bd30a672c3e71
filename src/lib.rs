//! Bald Hero - a side-scrolling platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, enemies, levels, progression)
//! - `renderer`: Draw-list generation with asset fallbacks
//! - `input`: Action set and polled input sources
//! - `audio`: Sound effect dispatch
//! - `settings`: Player preferences

pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Viewport size in pixels
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Reference frame length (ms). Velocities are authored in pixels per
    /// reference frame and scaled by `dt / FRAME_MS` each step.
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Terrain tile edge length
    pub const TILE_SIZE: f32 = 32.0;

    /// Vertical physics (per reference frame)
    pub const GRAVITY: f32 = 0.5;
    pub const MAX_FALL_SPEED: f32 = 15.0;

    /// Hero movement
    pub const JUMP_FORCE: f32 = -12.0;
    pub const DOUBLE_JUMP_FORCE: f32 = -10.0;
    pub const MOVE_SPEED: f32 = 4.0;
    pub const FRICTION: f32 = 0.8;
    /// Friction while standing in a pudding pool
    pub const SLIPPERY_FRICTION: f32 = 0.95;
    pub const HERO_SIZE: f32 = 32.0;

    /// Timers (ms)
    pub const COYOTE_TIME_MS: f32 = 100.0;
    pub const INVINCIBILITY_MS: f32 = 1000.0;
    pub const BANANA_COOLDOWN_MS: f32 = 300.0;
    pub const PUDDING_COOLDOWN_MS: f32 = 500.0;
    pub const PUDDING_POOL_MS: f32 = 5000.0;
    pub const LEVEL_COMPLETE_DELAY_MS: f32 = 1000.0;

    /// Knockback and bounce impulses
    pub const STOMP_BOUNCE: f32 = -8.0;
    pub const HURT_KNOCKBACK_Y: f32 = -8.0;
    pub const HURT_KNOCKBACK_X: f32 = 3.0;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const STARTING_PUDDING: u32 = 3;

    /// Scoring
    pub const COIN_SCORE: u64 = 100;
    pub const KEY_SCORE: u64 = 50;
    pub const PUDDING_PICKUP_SCORE: u64 = 25;
    pub const ENEMY_SCORE: u64 = 100;
    pub const BOSS_HIT_SCORE: u64 = 200;
    pub const BOSS_DEFEAT_SCORE: u64 = 1000;
    pub const LEVEL_BONUS: u64 = 500;

    /// Distance beyond the level edges at which projectiles expire
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Distance below the level bottom at which the hero is lost
    pub const FALL_DEATH_MARGIN: f32 = 200.0;
}

/// Scale factor for a step of `dt_ms` relative to the reference frame
#[inline]
pub fn frame_scale(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}

/// Facing / travel direction along the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// -1.0 for left, 1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction pointing from `from_x` toward `to_x` (right when equal)
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x < from_x {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}
