//! The hero: input-driven movement, jumping and throwing

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::projectile::{Projectile, ProjectileKind};
use super::session::Session;
use super::tuning::Tuning;
use crate::audio::SoundEffect;
use crate::consts::{HERO_SIZE, HURT_KNOCKBACK_X, HURT_KNOCKBACK_Y, STOMP_BOUNCE};
use crate::input::TickInput;
use crate::{Direction, frame_scale};

/// Walk cycle frame length (ms)
pub const WALK_FRAME_MS: f32 = 200.0;
/// Slack when deciding whether the coyote window ran out exactly this frame (ms)
const COYOTE_EPSILON_MS: f32 = 1e-3;

/// Discrete animation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Jump,
}

/// Per-frame context the hero needs from its surroundings
pub struct PlayerContext<'a> {
    pub tuning: &'a Tuning,
    pub session: &'a mut Session,
    pub level_width: f32,
    /// Standing in an active pudding pool
    pub on_slippery: bool,
}

/// The player-controlled hero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing: Direction,
    pub can_double_jump: bool,
    /// Grace window after leaving the ground (ms)
    pub coyote_ms: f32,
    pub invincible_ms: f32,
    pub banana_cooldown_ms: f32,
    pub pudding_cooldown_ms: f32,
    pub anim: AnimState,
    pub anim_frame: u32,
    anim_time_ms: f32,
    walking: bool,
    /// The coyote window ran out during this frame; a jump now still counts
    coyote_closing: bool,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, HERO_SIZE, HERO_SIZE),
            facing: Direction::Right,
            can_double_jump: true,
            coyote_ms: 0.0,
            invincible_ms: 0.0,
            banana_cooldown_ms: 0.0,
            pudding_cooldown_ms: 0.0,
            anim: AnimState::Idle,
            anim_frame: 0,
            anim_time_ms: 0.0,
            walking: false,
            coyote_closing: false,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ms > 0.0
    }

    /// Advance the hero by one frame. Thrown projectiles are appended to `spawned`.
    pub fn update(
        &mut self,
        dt_ms: f32,
        input: &TickInput,
        ctx: &mut PlayerContext<'_>,
        spawned: &mut Vec<Projectile>,
    ) {
        let tuning = ctx.tuning;
        self.tick_timers(dt_ms);

        // Horizontal movement
        self.walking = false;
        if input.left {
            self.body.vel.x = -tuning.move_speed;
            self.facing = Direction::Left;
            self.walking = true;
        } else if input.right {
            self.body.vel.x = tuning.move_speed;
            self.facing = Direction::Right;
            self.walking = true;
        } else {
            let friction = if ctx.on_slippery {
                tuning.slippery_friction
            } else {
                tuning.friction
            };
            self.body.vel.x *= friction.powf(frame_scale(dt_ms));
        }

        if input.jump {
            self.try_jump(tuning, ctx.session);
        }

        if input.banana {
            if let Some(banana) = self.throw_banana(tuning, ctx.session) {
                spawned.push(banana);
            }
        }
        if input.pudding {
            if let Some(pudding) = self.throw_pudding(tuning, ctx.session) {
                spawned.push(pudding);
            }
        }

        self.update_animation(dt_ms);

        // Terrain resolution re-establishes ground contact every frame
        self.body.grounded = false;
        self.body.integrate(dt_ms, tuning.gravity, tuning.max_fall_speed);

        let max_x = (ctx.level_width - self.body.size.x).max(0.0);
        self.body.pos.x = self.body.pos.x.clamp(0.0, max_x);
    }

    fn tick_timers(&mut self, dt_ms: f32) {
        self.invincible_ms = (self.invincible_ms - dt_ms).max(0.0);
        self.banana_cooldown_ms = (self.banana_cooldown_ms - dt_ms).max(0.0);
        self.pudding_cooldown_ms = (self.pudding_cooldown_ms - dt_ms).max(0.0);
        self.coyote_closing = false;
        if !self.body.grounded && self.coyote_ms > 0.0 {
            let remaining = self.coyote_ms - dt_ms;
            self.coyote_closing = remaining > -COYOTE_EPSILON_MS;
            self.coyote_ms = remaining.max(0.0);
        }
    }

    /// Still allowed a ground jump after walking off an edge
    pub fn in_coyote_window(&self) -> bool {
        self.coyote_ms > 0.0 || self.coyote_closing
    }

    /// Ground/coyote jump first, double jump second. False if neither was available.
    pub fn try_jump(&mut self, tuning: &Tuning, session: &mut Session) -> bool {
        if self.body.grounded || self.in_coyote_window() {
            self.body.vel.y = tuning.jump_force;
            self.body.grounded = false;
            self.coyote_ms = 0.0;
            self.coyote_closing = false;
        } else if self.can_double_jump {
            self.body.vel.y = tuning.double_jump_force;
            self.can_double_jump = false;
        } else {
            return false;
        }
        session.play_sound(SoundEffect::Jump);
        true
    }

    /// Called by the scene when terrain resolution puts the hero on top of a tile
    pub fn land(&mut self, tuning: &Tuning) {
        self.body.grounded = true;
        self.coyote_ms = tuning.coyote_time_ms;
        self.can_double_jump = true;
    }

    /// Launch point at the hero's leading edge, mid-height
    fn throw_origin(&self) -> Vec2 {
        let x = match self.facing {
            Direction::Right => self.body.pos.x + self.body.size.x,
            Direction::Left => self.body.pos.x,
        };
        Vec2::new(x, self.body.pos.y + self.body.size.y / 2.0)
    }

    pub fn throw_banana(&mut self, tuning: &Tuning, session: &mut Session) -> Option<Projectile> {
        if self.banana_cooldown_ms > 0.0 {
            return None;
        }
        self.banana_cooldown_ms = tuning.banana_cooldown_ms;

        let origin = self.throw_origin();
        session.play_sound(SoundEffect::Throw);
        Some(Projectile::launch(
            ProjectileKind::Banana,
            origin.x,
            origin.y,
            self.facing,
        ))
    }

    /// Needs both the cooldown and a pudding charge; neither is spent on failure
    pub fn throw_pudding(&mut self, tuning: &Tuning, session: &mut Session) -> Option<Projectile> {
        if self.pudding_cooldown_ms > 0.0 {
            return None;
        }
        if !session.use_pudding() {
            return None;
        }
        self.pudding_cooldown_ms = tuning.pudding_cooldown_ms;

        let origin = self.throw_origin();
        session.play_sound(SoundEffect::Throw);
        Some(Projectile::launch(
            ProjectileKind::Pudding,
            origin.x,
            origin.y,
            self.facing,
        ))
    }

    /// Lose a life and get knocked back, unless still invincible.
    ///
    /// Returns true when damage was applied.
    pub fn take_damage(&mut self, tuning: &Tuning, session: &mut Session) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.invincible_ms = tuning.invincibility_ms;
        session.lose_life();
        session.play_sound(SoundEffect::Hurt);

        self.body.vel.y = HURT_KNOCKBACK_Y;
        self.body.vel.x = -self.facing.sign() * HURT_KNOCKBACK_X;
        true
    }

    /// Small hop after landing on an enemy
    pub fn stomp_bounce(&mut self) {
        self.body.vel.y = STOMP_BOUNCE;
    }

    /// Put the hero back at `start` with a fresh state, keeping invincibility frames
    pub fn respawn(&mut self, start: Vec2, tuning: &Tuning) {
        let mut fresh = Player::new(start.x, start.y);
        fresh.facing = self.facing;
        fresh.invincible_ms = tuning.invincibility_ms;
        *self = fresh;
    }

    fn update_animation(&mut self, dt_ms: f32) {
        self.anim_time_ms += dt_ms;

        self.anim = if !self.body.grounded {
            AnimState::Jump
        } else if self.walking {
            AnimState::Walk
        } else {
            AnimState::Idle
        };

        if self.anim == AnimState::Walk && self.anim_time_ms > WALK_FRAME_MS {
            self.anim_frame = (self.anim_frame + 1) % 2;
            self.anim_time_ms = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_MS, STARTING_LIVES, STARTING_PUDDING};
    use crate::input::Action;

    struct Rig {
        tuning: Tuning,
        session: Session,
        spawned: Vec<Projectile>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                tuning: Tuning::default(),
                session: Session::new(),
                spawned: Vec::new(),
            }
        }

        fn step(&mut self, player: &mut Player, input: TickInput, dt: f32) {
            let mut ctx = PlayerContext {
                tuning: &self.tuning,
                session: &mut self.session,
                level_width: 2000.0,
                on_slippery: false,
            };
            player.update(dt, &input, &mut ctx, &mut self.spawned);
        }
    }

    fn airborne_after_ground(rig: &mut Rig) -> Player {
        let mut player = Player::new(100.0, 100.0);
        player.land(&rig.tuning);
        // First frame without terrain: walks off the ledge
        rig.step(&mut player, TickInput::default(), FRAME_MS);
        assert!(!player.body.grounded);
        player
    }

    #[test]
    fn test_ground_jump_impulse() {
        let mut rig = Rig::new();
        let mut player = Player::new(0.0, 0.0);
        player.land(&rig.tuning);
        assert!(player.try_jump(&rig.tuning, &mut rig.session));
        assert_eq!(player.body.vel.y, rig.tuning.jump_force);
        assert!(!player.body.grounded);
        assert_eq!(player.coyote_ms, 0.0);
        assert!(player.can_double_jump);
    }

    #[test]
    fn test_coyote_jump_inside_window() {
        let mut rig = Rig::new();
        let mut player = airborne_after_ground(&mut rig);
        rig.step(&mut player, TickInput::default(), 50.0);
        assert!(player.coyote_ms > 0.0);

        let vy_before = player.body.vel.y;
        rig.step(&mut player, TickInput::default().with(Action::Jump), FRAME_MS);
        // Normal impulse then one frame of gravity
        assert!((player.body.vel.y - (rig.tuning.jump_force + rig.tuning.gravity)).abs() < 1e-4);
        assert!(player.body.vel.y < vy_before);
        assert!(player.can_double_jump, "ground jump must not consume double jump");
    }

    #[test]
    fn test_jump_after_window_without_double_jump_fails() {
        let mut rig = Rig::new();
        let mut player = airborne_after_ground(&mut rig);
        player.can_double_jump = false;
        rig.step(&mut player, TickInput::default(), 150.0);
        assert_eq!(player.coyote_ms, 0.0);

        let vy_before = player.body.vel.y;
        assert!(!player.try_jump(&rig.tuning, &mut rig.session));
        assert_eq!(player.body.vel.y, vy_before);
    }

    #[test]
    fn test_double_jump_once_per_landing() {
        let mut rig = Rig::new();
        let mut player = airborne_after_ground(&mut rig);
        rig.step(&mut player, TickInput::default(), 150.0);

        assert!(player.try_jump(&rig.tuning, &mut rig.session));
        assert_eq!(player.body.vel.y, rig.tuning.double_jump_force);
        player.body.vel.y = 3.0;
        assert!(!player.try_jump(&rig.tuning, &mut rig.session));
        assert_eq!(player.body.vel.y, 3.0);

        player.land(&rig.tuning);
        player.body.grounded = false;
        player.coyote_ms = 0.0;
        assert!(player.try_jump(&rig.tuning, &mut rig.session));
    }

    #[test]
    fn test_coyote_jump_at_window_end() {
        let mut rig = Rig::new();
        let mut player = airborne_after_ground(&mut rig);
        player.can_double_jump = false;

        let jump = TickInput::default().with(Action::Jump);
        rig.step(&mut player, jump, rig.tuning.coyote_time_ms);
        let expected = rig.tuning.jump_force
            + rig.tuning.gravity * frame_scale(rig.tuning.coyote_time_ms);
        assert!((player.body.vel.y - expected).abs() < 1e-4);
        assert!(!player.in_coyote_window());
    }

    #[test]
    fn test_held_jump_chains_into_double_jump() {
        let mut rig = Rig::new();
        let mut player = Player::new(100.0, 100.0);
        player.land(&rig.tuning);
        let jump = TickInput::default().with(Action::Jump);

        rig.step(&mut player, jump, FRAME_MS);
        assert!(player.can_double_jump);
        rig.step(&mut player, jump, FRAME_MS);
        assert!(!player.can_double_jump);
        assert!(
            (player.body.vel.y - (rig.tuning.double_jump_force + rig.tuning.gravity)).abs() < 1e-4
        );

        // Nothing left to spend while still holding
        let vy = player.body.vel.y;
        rig.step(&mut player, jump, FRAME_MS);
        assert!(player.body.vel.y > vy);
    }

    #[test]
    fn test_friction_when_released() {
        let mut rig = Rig::new();
        let mut player = Player::new(100.0, 100.0);
        rig.step(&mut player, TickInput::default().with(Action::Left), FRAME_MS);
        assert_eq!(player.body.vel.x, -rig.tuning.move_speed);
        assert_eq!(player.facing, Direction::Left);

        rig.step(&mut player, TickInput::default(), FRAME_MS);
        assert!((player.body.vel.x - (-rig.tuning.move_speed * 0.8)).abs() < 1e-4);
    }

    #[test]
    fn test_banana_cooldown_gate() {
        let mut rig = Rig::new();
        let mut player = Player::new(100.0, 100.0);
        let throw = TickInput::default().with(Action::Banana);

        rig.step(&mut player, throw, FRAME_MS);
        rig.step(&mut player, throw, 100.0);
        assert_eq!(rig.spawned.len(), 1);

        rig.step(&mut player, throw, 200.0);
        assert_eq!(rig.spawned.len(), 2, "exactly at the cooldown the throw succeeds");
    }

    #[test]
    fn test_banana_spawns_at_leading_edge() {
        let mut rig = Rig::new();
        let mut player = Player::new(100.0, 200.0);
        let banana = player.throw_banana(&rig.tuning, &mut rig.session).unwrap();
        assert_eq!(banana.body.pos, Vec2::new(132.0, 216.0));
        assert!(banana.body.vel.x > 0.0);

        player.facing = Direction::Left;
        player.banana_cooldown_ms = 0.0;
        let banana = player.throw_banana(&rig.tuning, &mut rig.session).unwrap();
        assert_eq!(banana.body.pos.x, 100.0);
        assert!(banana.body.vel.x < 0.0);
    }

    #[test]
    fn test_pudding_needs_charge_and_cooldown() {
        let mut rig = Rig::new();
        let mut player = Player::new(0.0, 0.0);
        for _ in 0..STARTING_PUDDING {
            assert!(player.throw_pudding(&rig.tuning, &mut rig.session).is_some());
            player.pudding_cooldown_ms = 0.0;
        }
        assert!(player.throw_pudding(&rig.tuning, &mut rig.session).is_none());
        assert_eq!(player.pudding_cooldown_ms, 0.0, "failed throw has no side effect");

        rig.session.collect_pudding();
        player.pudding_cooldown_ms = 10.0;
        assert!(player.throw_pudding(&rig.tuning, &mut rig.session).is_none());
        assert_eq!(rig.session.stats.pudding, 1, "cooldown rejection keeps the charge");
    }

    #[test]
    fn test_damage_and_invincibility() {
        let mut rig = Rig::new();
        let mut player = Player::new(0.0, 0.0);
        assert!(player.take_damage(&rig.tuning, &mut rig.session));
        assert_eq!(rig.session.stats.lives, STARTING_LIVES - 1);
        assert_eq!(player.body.vel, Vec2::new(-HURT_KNOCKBACK_X, HURT_KNOCKBACK_Y));

        assert!(!player.take_damage(&rig.tuning, &mut rig.session));
        assert_eq!(rig.session.stats.lives, STARTING_LIVES - 1);

        rig.step(&mut player, TickInput::default(), rig.tuning.invincibility_ms);
        assert!(!player.is_invincible());
        assert!(player.take_damage(&rig.tuning, &mut rig.session));
    }

    #[test]
    fn test_walk_animation_cycles() {
        let mut rig = Rig::new();
        let mut player = Player::new(100.0, 100.0);
        let right = TickInput::default().with(Action::Right);
        for _ in 0..20 {
            player.land(&rig.tuning);
            rig.step(&mut player, right, FRAME_MS);
        }
        assert_eq!(player.anim, AnimState::Walk);

        rig.step(&mut player, TickInput::default(), FRAME_MS);
        assert_eq!(player.anim, AnimState::Jump);
    }

    #[test]
    fn test_position_clamped_to_level() {
        let mut rig = Rig::new();
        let mut player = Player::new(1.0, 100.0);
        for _ in 0..5 {
            rig.step(&mut player, TickInput::default().with(Action::Left), FRAME_MS);
        }
        assert_eq!(player.body.pos.x, 0.0);
    }
}
