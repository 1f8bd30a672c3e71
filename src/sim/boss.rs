//! Gorilla boss brain: attack selection, stun and its barrel volley
//!
//! The brain drives the body owned by the enclosing [`Enemy`](super::enemy::Enemy);
//! it never touches the hero directly. Ground pounds are reported back to the
//! scene, which decides whether the hero is in range.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::projectile::{Projectile, ProjectileKind};
use super::rect::Rect;
use crate::Direction;

/// Idle time before the first attack (ms)
pub const INITIAL_COOLDOWN_MS: f32 = 3000.0;
/// Beyond this horizontal distance the boss throws barrels
pub const FAR_RANGE: f32 = 200.0;
/// Inside this horizontal distance the boss pounds the ground
pub const NEAR_RANGE: f32 = 100.0;
/// Ground pound hurts the hero inside this horizontal distance
pub const GROUND_POUND_RANGE: f32 = 150.0;
pub const CHARGE_SPEED: f32 = 3.0;
pub const STUN_MS: f32 = 1000.0;
pub const INVULNERABLE_MS: f32 = 1500.0;
pub const KNOCKBACK_X: f32 = 2.0;
pub const KNOCKBACK_Y: f32 = -3.0;
pub const ANIM_FRAME_MS: f32 = 500.0;

/// Boss attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossAttack {
    ThrowBarrel,
    GroundPound,
    Charge,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackTiming {
    pub duration_ms: f32,
    pub cooldown_ms: f32,
}

impl BossAttack {
    pub const ALL: [BossAttack; 3] = [
        BossAttack::ThrowBarrel,
        BossAttack::GroundPound,
        BossAttack::Charge,
    ];

    pub const fn timing(self) -> AttackTiming {
        match self {
            BossAttack::ThrowBarrel => AttackTiming {
                duration_ms: 2000.0,
                cooldown_ms: 4000.0,
            },
            BossAttack::GroundPound => AttackTiming {
                duration_ms: 1500.0,
                cooldown_ms: 3500.0,
            },
            BossAttack::Charge => AttackTiming {
                duration_ms: 3000.0,
                cooldown_ms: 5000.0,
            },
        }
    }

    /// Attack suited to a horizontal distance from the hero
    pub fn for_distance(distance: f32) -> Self {
        if distance > FAR_RANGE {
            BossAttack::ThrowBarrel
        } else if distance < NEAR_RANGE {
            BossAttack::GroundPound
        } else {
            BossAttack::Charge
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossState {
    #[default]
    Idle,
    Attacking(BossAttack),
    Stunned,
}

/// What the brain did this frame that the scene has to act on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BossOutcome {
    pub ground_pound: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossBrain {
    pub state: BossState,
    /// Attacks this boss may use, in fallback order
    pub attacks: Vec<BossAttack>,
    pub max_health: u32,
    /// Remaining time in the current attack or stun
    pub state_ms: f32,
    /// Remaining idle time before the next attack
    pub cooldown_ms: f32,
    /// Cooldown of the most recent attack, restored after a stun
    last_cooldown_ms: f32,
    pub invulnerable_ms: f32,
    pub barrels: Vec<Projectile>,
    pub anim_frame: u32,
    anim_ms: f32,
    /// Horizontal extent the boss may move within
    pub arena: Option<(f32, f32)>,
    defeat_reported: bool,
}

impl BossBrain {
    pub fn new(max_health: u32, attacks: Vec<BossAttack>) -> Self {
        Self {
            state: BossState::Idle,
            attacks,
            max_health,
            state_ms: 0.0,
            cooldown_ms: INITIAL_COOLDOWN_MS,
            last_cooldown_ms: INITIAL_COOLDOWN_MS,
            invulnerable_ms: 0.0,
            barrels: Vec::new(),
            anim_frame: 0,
            anim_ms: 0.0,
            arena: None,
            defeat_reported: false,
        }
    }

    pub fn with_arena(mut self, min_x: f32, max_x: f32) -> Self {
        self.arena = Some((min_x, max_x));
        self
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ms > 0.0
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.state, BossState::Attacking(_))
    }

    /// The preferred attack if allowed, else the first allowed one
    pub fn choose_attack(&self, distance: f32) -> Option<BossAttack> {
        let preferred = BossAttack::for_distance(distance);
        if self.attacks.contains(&preferred) {
            Some(preferred)
        } else {
            self.attacks.first().copied()
        }
    }

    /// Advance the AI of a living boss
    pub fn think(
        &mut self,
        dt_ms: f32,
        body: &mut Body,
        facing: &mut Direction,
        player_x: f32,
    ) -> BossOutcome {
        let mut outcome = BossOutcome::default();
        self.invulnerable_ms = (self.invulnerable_ms - dt_ms).max(0.0);

        self.anim_ms += dt_ms;
        if self.anim_ms > ANIM_FRAME_MS {
            self.anim_frame = (self.anim_frame + 1) % 2;
            self.anim_ms = 0.0;
        }

        match self.state {
            BossState::Idle => {
                self.cooldown_ms -= dt_ms;
                if self.cooldown_ms <= 0.0 {
                    let distance = (body.pos.x - player_x).abs();
                    if let Some(attack) = self.choose_attack(distance) {
                        outcome = self.start_attack(attack, body, facing, player_x);
                    }
                }
            }
            BossState::Attacking(attack) => {
                self.state_ms -= dt_ms;
                if self.state_ms <= 0.0 {
                    let timing = attack.timing();
                    self.state = BossState::Idle;
                    self.state_ms = 0.0;
                    self.cooldown_ms = timing.cooldown_ms;
                    self.last_cooldown_ms = timing.cooldown_ms;
                    if attack == BossAttack::Charge {
                        body.vel.x = 0.0;
                    }
                }
            }
            BossState::Stunned => {
                self.state_ms -= dt_ms;
                if self.state_ms <= 0.0 {
                    self.state = BossState::Idle;
                    self.state_ms = 0.0;
                    self.cooldown_ms = self.last_cooldown_ms;
                    body.vel.x = 0.0;
                }
            }
        }

        outcome
    }

    fn start_attack(
        &mut self,
        attack: BossAttack,
        body: &mut Body,
        facing: &mut Direction,
        player_x: f32,
    ) -> BossOutcome {
        log::debug!("Boss starts {:?}", attack);
        *facing = Direction::toward(body.pos.x, player_x);
        self.state = BossState::Attacking(attack);
        self.state_ms = attack.timing().duration_ms;

        match attack {
            BossAttack::ThrowBarrel => {
                self.barrels.push(Projectile::launch(
                    ProjectileKind::Barrel,
                    body.pos.x + body.size.x / 2.0,
                    body.pos.y,
                    *facing,
                ));
                BossOutcome::default()
            }
            BossAttack::GroundPound => BossOutcome { ground_pound: true },
            BossAttack::Charge => {
                body.vel.x = facing.sign() * CHARGE_SPEED;
                BossOutcome::default()
            }
        }
    }

    /// Register a hit. False while invulnerable.
    ///
    /// Stun and knockback are applied here; health bookkeeping belongs to the enemy.
    pub fn hit(&mut self, body: &mut Body, facing: Direction) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.invulnerable_ms = INVULNERABLE_MS;
        self.state = BossState::Stunned;
        self.state_ms = STUN_MS;
        body.vel.x = -facing.sign() * KNOCKBACK_X;
        body.vel.y = KNOCKBACK_Y;
        true
    }

    pub fn update_barrels(&mut self, dt_ms: f32, bounds: &Rect) {
        for barrel in &mut self.barrels {
            barrel.update(dt_ms, bounds);
        }
    }

    pub fn sweep_barrels(&mut self) {
        self.barrels.retain(Projectile::is_active);
    }

    /// True exactly once, the first time it is called
    pub fn report_defeat(&mut self) -> bool {
        !std::mem::replace(&mut self.defeat_reported, true)
    }

    /// Keep `body` inside the arena
    pub fn confine(&self, body: &mut Body) {
        if let Some((min_x, max_x)) = self.arena {
            let max_x = (max_x - body.size.x).max(min_x);
            if body.pos.x < min_x || body.pos.x > max_x {
                body.pos.x = body.pos.x.clamp(min_x, max_x);
                body.vel.x = 0.0;
            }
        }
    }
}
