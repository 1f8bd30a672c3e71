//! Enemies: patrolling walkers and the gorilla boss
//!
//! One flat type for every enemy. The kind tag selects a row in the
//! profile table; patrol and boss behaviour are optional components.

use serde::{Deserialize, Serialize};

use super::boss::{BossAttack, BossBrain, BossOutcome};
use super::body::Body;
use super::player::Player;
use super::projectile::{PuddingPool, standing_in_pool};
use super::rect::Rect;
use super::session::{GameEvent, Session};
use super::tuning::Tuning;
use crate::audio::SoundEffect;
use crate::consts::{BOSS_DEFEAT_SCORE, BOSS_HIT_SCORE, ENEMY_SCORE};
use crate::Direction;

/// Patrol speed multiplier on a slippery pool
pub const SLIPPERY_PATROL_FACTOR: f32 = 1.5;
pub const DEATH_HOP: f32 = -5.0;
pub const BOSS_DEATH_HOP: f32 = -8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Goomba,
    Spiker,
    Gorilla,
}

/// Per-kind data table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub width: f32,
    pub height: f32,
    /// Patrol speed (pixels per reference frame)
    pub speed: f32,
    pub health: u32,
    /// Whether landing on it from above hurts it
    pub stompable: bool,
    /// Corpse lifetime before removal (ms)
    pub despawn_ms: f32,
}

impl EnemyKind {
    pub const fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Goomba => EnemyProfile {
                width: 32.0,
                height: 32.0,
                speed: 1.0,
                health: 1,
                stompable: true,
                despawn_ms: 1000.0,
            },
            EnemyKind::Spiker => EnemyProfile {
                width: 32.0,
                height: 32.0,
                speed: 0.5,
                health: 2,
                stompable: false,
                despawn_ms: 1000.0,
            },
            EnemyKind::Gorilla => EnemyProfile {
                width: 64.0,
                height: 64.0,
                speed: 0.0,
                health: 5,
                stompable: false,
                despawn_ms: 3000.0,
            },
        }
    }
}

/// Inclusive patrol bounds on the x axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    pub start: f32,
    pub end: f32,
}

/// World state an enemy reacts to
pub struct EnemyContext<'a> {
    pub tuning: &'a Tuning,
    pub player_x: f32,
    pub bounds: Rect,
    pub pools: &'a [PuddingPool],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyOutcome {
    pub ground_pound: bool,
    /// The boss corpse despawned; reported once
    pub boss_defeated: bool,
}

/// Result of touching the hero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touch {
    Stomped,
    HurtPlayer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    pub patrol: Option<Patrol>,
    pub facing: Direction,
    pub health: u32,
    pub dead: bool,
    pub death_ms: f32,
    pub boss: Option<BossBrain>,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, patrol: Option<Patrol>) -> Self {
        let profile = kind.profile();
        Self {
            kind,
            body: Body::new(x, y, profile.width, profile.height),
            patrol,
            facing: Direction::Left,
            health: profile.health,
            dead: false,
            death_ms: 0.0,
            boss: None,
        }
    }

    /// A gorilla boss with its own health and attack set
    pub fn boss(x: f32, y: f32, health: u32, attacks: Vec<BossAttack>) -> Self {
        let mut enemy = Self::new(EnemyKind::Gorilla, x, y, None);
        enemy.health = health;
        enemy.boss = Some(BossBrain::new(health, attacks));
        enemy
    }

    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.body.active && !self.dead
    }

    pub fn update(&mut self, dt_ms: f32, ctx: &EnemyContext<'_>) -> EnemyOutcome {
        let mut outcome = EnemyOutcome::default();
        if !self.body.active {
            return outcome;
        }

        if self.dead {
            self.death_ms += dt_ms;
            if self.death_ms > self.kind.profile().despawn_ms {
                self.body.active = false;
                if let Some(brain) = self.boss.as_mut() {
                    outcome.boss_defeated = brain.report_defeat();
                }
            }
        } else if let Some(brain) = self.boss.as_mut() {
            let BossOutcome { ground_pound } =
                brain.think(dt_ms, &mut self.body, &mut self.facing, ctx.player_x);
            outcome.ground_pound = ground_pound;
        } else if let Some(patrol) = self.patrol {
            self.walk_patrol(patrol, standing_in_pool(&self.body, ctx.pools));
        }

        if let Some(brain) = self.boss.as_mut() {
            brain.update_barrels(dt_ms, &ctx.bounds);
        }

        self.body.grounded = false;
        self.body
            .integrate(dt_ms, ctx.tuning.gravity, ctx.tuning.max_fall_speed);
        if let Some(brain) = self.boss.as_ref() {
            brain.confine(&mut self.body);
        }

        outcome
    }

    fn walk_patrol(&mut self, patrol: Patrol, slippery: bool) {
        let mut speed = self.kind.profile().speed;
        if slippery {
            speed *= SLIPPERY_PATROL_FACTOR;
        }
        self.body.vel.x = self.facing.sign() * speed;

        let x = self.body.pos.x;
        match self.facing {
            Direction::Left if x <= patrol.start => self.facing = Direction::Right,
            Direction::Right if x >= patrol.end => self.facing = Direction::Left,
            _ => {}
        }
    }

    /// Take one point of damage. False if it had no effect.
    pub fn take_damage(&mut self, session: &mut Session) -> bool {
        if !self.is_alive() {
            return false;
        }

        if let Some(brain) = self.boss.as_mut() {
            if !brain.hit(&mut self.body, self.facing) {
                return false;
            }
            session.add_score(BOSS_HIT_SCORE);
        }

        self.health = self.health.saturating_sub(1);
        log::debug!("{:?} hit, health {}", self.kind, self.health);
        if self.health == 0 {
            self.die(session);
        }
        true
    }

    fn die(&mut self, session: &mut Session) {
        self.dead = true;
        self.death_ms = 0.0;
        self.body.vel.x = 0.0;
        if self.is_boss() {
            self.body.vel.y = BOSS_DEATH_HOP;
            session.add_score(BOSS_DEFEAT_SCORE);
            log::info!("Boss down");
        } else {
            self.body.vel.y = DEATH_HOP;
            session.add_score(ENEMY_SCORE);
            session.push_event(GameEvent::EnemyDefeated(self.kind));
        }
    }

    /// Resolve contact with the hero: a stomp from above or damage to the hero
    pub fn touch_player(
        &mut self,
        player: &mut Player,
        tuning: &Tuning,
        session: &mut Session,
    ) -> Option<Touch> {
        if !self.is_alive() || !self.body.overlaps(&player.body) {
            return None;
        }

        let from_above = player.body.vel.y > 0.0 && player.body.pos.y < self.body.pos.y;
        if self.kind.profile().stompable && from_above {
            self.take_damage(session);
            player.stomp_bounce();
            session.play_sound(SoundEffect::Stomp);
            Some(Touch::Stomped)
        } else {
            player.take_damage(tuning, session);
            Some(Touch::HurtPlayer)
        }
    }
}
