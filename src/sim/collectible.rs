//! Bobbing pickups: coins, keys and pudding refills

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::session::Session;
use crate::audio::SoundEffect;
use crate::consts::{COIN_SCORE, PUDDING_PICKUP_SCORE};

/// Bob amplitude in pixels
pub const BOB_AMPLITUDE: f32 = 3.0;
/// Bob angular speed (radians per ms)
pub const BOB_SPEED: f32 = 0.003;
pub const COLLECTIBLE_SIZE: f32 = 16.0;

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Coin,
    Key,
    #[serde(rename = "pudding")]
    PuddingPickup,
}

/// A pickup floating at an anchor point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub body: Body,
    /// Rest position the bob oscillates around
    pub anchor: Vec2,
    /// Per-instance phase so pickups don't bob in lockstep
    pub phase: f32,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, x: f32, y: f32, phase: f32) -> Self {
        Self {
            kind,
            body: Body::new(x, y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE),
            anchor: Vec2::new(x, y),
            phase,
        }
    }

    /// Place the pickup on its bob curve at scene time `time_ms`
    pub fn update(&mut self, time_ms: f32) {
        self.body.pos.y = self.anchor.y + (time_ms * BOB_SPEED + self.phase).sin() * BOB_AMPLITUDE;
    }

    /// Apply this pickup's effect and mark it for removal.
    ///
    /// Returns true when the pickup was a key so the scene can count it.
    pub fn collect(&mut self, session: &mut Session) -> bool {
        self.body.active = false;
        session.play_sound(SoundEffect::Coin);
        match self.kind {
            CollectibleKind::Coin => {
                session.add_score(COIN_SCORE);
                false
            }
            CollectibleKind::Key => {
                session.collect_key();
                true
            }
            CollectibleKind::PuddingPickup => {
                session.collect_pudding();
                session.add_score(PUDDING_PICKUP_SCORE);
                false
            }
        }
    }
}
