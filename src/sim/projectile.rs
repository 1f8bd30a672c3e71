//! Thrown projectiles and the pudding pool hazard they leave behind

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::rect::Rect;
use crate::consts::OFFSCREEN_MARGIN;
use crate::{Direction, frame_scale};

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Hero's bouncing banana
    Banana,
    /// Hero's pudding, turns into a pool where it lands
    Pudding,
    /// Gorilla's rolling barrel
    Barrel,
}

/// What a projectile does when it touches terrain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerrainRule {
    /// Bounce back up with `restitution`, scale vx by `decay`, expire after `max_bounces`
    Bounce {
        restitution: f32,
        decay: f32,
        max_bounces: u32,
    },
    /// Stop dead and leave a pudding pool
    Stick,
}

/// Per-kind tuning table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileProfile {
    pub size: f32,
    /// Horizontal launch speed (multiplied by direction)
    pub speed_x: f32,
    /// Initial vertical velocity
    pub speed_y: f32,
    pub gravity: f32,
    pub rule: TerrainRule,
}

impl ProjectileKind {
    pub const fn profile(self) -> ProjectileProfile {
        match self {
            ProjectileKind::Banana => ProjectileProfile {
                size: 16.0,
                speed_x: 8.0,
                speed_y: -6.0,
                gravity: 0.3,
                rule: TerrainRule::Bounce {
                    restitution: 0.6,
                    decay: 0.8,
                    max_bounces: 2,
                },
            },
            ProjectileKind::Pudding => ProjectileProfile {
                size: 16.0,
                speed_x: 6.0,
                speed_y: -4.0,
                gravity: 0.4,
                rule: TerrainRule::Stick,
            },
            ProjectileKind::Barrel => ProjectileProfile {
                size: 24.0,
                speed_x: 4.0,
                speed_y: -8.0,
                gravity: 0.4,
                rule: TerrainRule::Bounce {
                    restitution: 0.7,
                    decay: 0.9,
                    max_bounces: 3,
                },
            },
        }
    }
}

/// Outcome of touching a terrain tile
#[derive(Debug, Clone, PartialEq)]
pub enum TerrainHit {
    Bounced,
    /// Ran out of bounces
    Expired,
    /// Pudding landed; the pool must be added to the scene
    Stuck(PuddingPool),
}

/// A ballistic projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub body: Body,
    pub direction: Direction,
    pub bounces: u32,
    /// Render rotation (radians)
    pub spin: f32,
}

impl Projectile {
    /// Launch a projectile with its top-left corner at (x, y)
    pub fn launch(kind: ProjectileKind, x: f32, y: f32, direction: Direction) -> Self {
        let profile = kind.profile();
        let mut body = Body::new(x, y, profile.size, profile.size);
        body.vel = Vec2::new(direction.sign() * profile.speed_x, profile.speed_y);
        Self {
            kind,
            body,
            direction,
            bounces: 0,
            spin: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.body.active
    }

    /// Ballistic step; expires when it leaves `bounds` by more than the margin
    pub fn update(&mut self, dt_ms: f32, bounds: &Rect) {
        if !self.body.active {
            return;
        }
        let profile = self.kind.profile();
        // Projectiles are never grounded and their fall speed is not clamped
        self.body.integrate(dt_ms, profile.gravity, f32::INFINITY);

        if self.kind == ProjectileKind::Barrel {
            self.spin += self.body.vel.x * 0.1 * frame_scale(dt_ms);
        }

        let pos = self.body.pos;
        if pos.x < bounds.x - OFFSCREEN_MARGIN
            || pos.x > bounds.right() + OFFSCREEN_MARGIN
            || pos.y > bounds.bottom() + OFFSCREEN_MARGIN
        {
            self.body.active = false;
        }
    }

    /// Apply the kind's terrain rule if overlapping `tile`
    pub fn hit_terrain(&mut self, tile: &Rect) -> Option<TerrainHit> {
        if !self.body.active || !self.body.rect().overlaps(tile) {
            return None;
        }

        match self.kind.profile().rule {
            TerrainRule::Bounce {
                restitution,
                decay,
                max_bounces,
            } => {
                if self.bounces < max_bounces {
                    self.body.vel.y = -self.body.vel.y.abs() * restitution;
                    self.body.vel.x *= decay;
                    self.bounces += 1;
                    self.body.pos.y = tile.y - self.body.size.y;
                    Some(TerrainHit::Bounced)
                } else {
                    self.body.active = false;
                    Some(TerrainHit::Expired)
                }
            }
            TerrainRule::Stick => {
                self.body.pos.y = tile.y - self.body.size.y;
                self.body.vel = Vec2::ZERO;
                self.body.active = false;
                Some(TerrainHit::Stuck(PuddingPool::new(self.body.pos.x, tile.y)))
            }
        }
    }

    /// Run the terrain rule against every tile until the projectile expires
    pub fn collide_terrain(&mut self, tiles: &[Rect]) -> Option<PuddingPool> {
        for tile in tiles {
            if !self.body.active {
                break;
            }
            if let Some(TerrainHit::Stuck(pool)) = self.hit_terrain(tile) {
                return Some(pool);
            }
        }
        None
    }
}

/// Pool footprint
pub const POOL_WIDTH: f32 = 64.0;
pub const POOL_HEIGHT: f32 = 8.0;
/// Pools fade out over their final second
pub const POOL_FADE_MS: f32 = 1000.0;

/// Slippery pudding left on a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuddingPool {
    pub body: Body,
    pub remaining_ms: f32,
    pub alpha: f32,
}

impl PuddingPool {
    /// A pool resting on the surface at `surface_y`
    pub fn new(x: f32, surface_y: f32) -> Self {
        Self::with_lifetime(x, surface_y, crate::consts::PUDDING_POOL_MS)
    }

    pub fn with_lifetime(x: f32, surface_y: f32, lifetime_ms: f32) -> Self {
        Self {
            body: Body::new(x, surface_y - POOL_HEIGHT, POOL_WIDTH, POOL_HEIGHT),
            remaining_ms: lifetime_ms,
            alpha: 1.0,
        }
    }

    pub fn update(&mut self, dt_ms: f32) {
        self.remaining_ms -= dt_ms;
        if self.remaining_ms <= 0.0 {
            self.remaining_ms = 0.0;
            self.alpha = 0.0;
            self.body.active = false;
        } else if self.remaining_ms < POOL_FADE_MS {
            self.alpha = self.remaining_ms / POOL_FADE_MS;
        }
    }

    pub fn is_active(&self) -> bool {
        self.body.active
    }

    /// Movement over an active pool slides
    pub fn is_slippery(&self) -> bool {
        self.body.active
    }
}

/// Whether `body` touches any slippery pool
pub fn standing_in_pool(body: &Body, pools: &[PuddingPool]) -> bool {
    pools
        .iter()
        .any(|pool| pool.is_slippery() && pool.body.overlaps(body))
}
