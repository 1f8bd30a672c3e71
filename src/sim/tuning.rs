//! Data-driven gameplay tuning
//!
//! Physics and timer constants the simulation reads at runtime. Defaults
//! reproduce the shipped feel; a JSON file can override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and timer parameters (velocities per reference frame, timers in ms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_force: f32,
    pub double_jump_force: f32,
    pub move_speed: f32,
    pub friction: f32,
    pub slippery_friction: f32,
    pub coyote_time_ms: f32,
    pub invincibility_ms: f32,
    pub banana_cooldown_ms: f32,
    pub pudding_cooldown_ms: f32,
    pub pudding_pool_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            jump_force: JUMP_FORCE,
            double_jump_force: DOUBLE_JUMP_FORCE,
            move_speed: MOVE_SPEED,
            friction: FRICTION,
            slippery_friction: SLIPPERY_FRICTION,
            coyote_time_ms: COYOTE_TIME_MS,
            invincibility_ms: INVINCIBILITY_MS,
            banana_cooldown_ms: BANANA_COOLDOWN_MS,
            pudding_cooldown_ms: PUDDING_COOLDOWN_MS,
            pudding_pool_ms: PUDDING_POOL_MS,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
