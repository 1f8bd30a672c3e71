//! A loaded level in play
//!
//! The scene owns every entity of one level and runs the frame in a fixed
//! order: movement, collisions, fall check, completion, sweep, camera.
//! Removal is always deferred to the sweep so no collection is mutated
//! while another pass is iterating it.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::GROUND_POUND_RANGE;
use super::camera::Camera;
use super::collectible::Collectible;
use super::enemy::{Enemy, EnemyContext, EnemyKind};
use super::goal::Goal;
use super::level::{LevelData, LevelError};
use super::player::{Player, PlayerContext};
use super::projectile::{Projectile, PuddingPool, standing_in_pool};
use super::rect::Rect;
use super::session::{GameEvent, Session};
use super::tuning::Tuning;
use crate::audio::SoundEffect;
use crate::consts::{FALL_DEATH_MARGIN, LEVEL_COMPLETE_DELAY_MS};
use crate::input::TickInput;

/// What a scene update means for progression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneStatus {
    Running,
    /// Completion delay elapsed; reported once
    LevelComplete,
    /// Boss corpse despawned; reported once
    BossDefeated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScenePhase {
    Active,
    /// Goal reached, waiting out the completion delay
    Completing { remaining_ms: f32 },
    Retired,
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub level_index: usize,
    pub name: String,
    pub background: String,
    pub bounds: Rect,
    pub start: Vec2,
    pub seed: u64,
    pub camera: Camera,
    pub tiles: Vec<Rect>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pools: Vec<PuddingPool>,
    pub collectibles: Vec<Collectible>,
    pub goal: Goal,
    pub keys_collected: u32,
    pub required_keys: u32,
    pub level_complete: bool,
    pub phase: ScenePhase,
    /// Time since load (ms)
    pub time_ms: f32,
}

impl Scene {
    /// Build a scene from level data. The same data and seed give the same scene.
    pub fn load(level: &LevelData, level_index: usize, seed: u64) -> Result<Self, LevelError> {
        level.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let collectibles = level
            .collectibles
            .iter()
            .map(|c| Collectible::new(c.kind, c.x, c.y, rng.random_range(0.0..TAU)))
            .collect();

        let mut enemies: Vec<Enemy> = level
            .enemies
            .iter()
            .map(|e| Enemy::new(e.kind, e.x, e.y, e.patrol))
            .collect();

        if let Some(data) = &level.boss {
            let mut boss = Enemy::boss(data.x, data.y, data.health, data.attacks.clone());
            let foot = boss.body.rect();
            if let Some(platform) = level.platform_under(foot.center().x, foot.bottom()) {
                let (min_x, max_x) = platform.span();
                boss.boss = boss.boss.map(|brain| brain.with_arena(min_x, max_x));
            }
            enemies.push(boss);
        }

        let start: Vec2 = level.player_start.into();
        let mut camera = Camera::default();
        camera.snap_to(start);

        log::info!(
            "Loaded level {} '{}': {} tiles, {} enemies",
            level_index + 1,
            level.name,
            level.tiles().len(),
            enemies.len()
        );

        Ok(Self {
            level_index,
            name: level.name.clone(),
            background: level.background.clone(),
            bounds: level.bounds(),
            start,
            seed,
            camera,
            tiles: level.tiles(),
            player: Player::new(start.x, start.y),
            enemies,
            projectiles: Vec::new(),
            pools: Vec::new(),
            collectibles,
            goal: Goal::new(&level.goal),
            keys_collected: 0,
            required_keys: level.required_keys,
            level_complete: false,
            phase: ScenePhase::Active,
            time_ms: 0.0,
        })
    }

    pub fn boss(&self) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.is_boss())
    }

    /// Every barrel currently thrown by a boss
    pub fn barrels(&self) -> impl Iterator<Item = &Projectile> {
        self.enemies
            .iter()
            .filter_map(|e| e.boss.as_ref())
            .flat_map(|brain| brain.barrels.iter())
    }

    /// Advance one frame
    pub fn update(
        &mut self,
        dt_ms: f32,
        input: &TickInput,
        tuning: &Tuning,
        session: &mut Session,
        reduce_motion: bool,
    ) -> SceneStatus {
        if self.phase == ScenePhase::Retired {
            return SceneStatus::Running;
        }
        let mut status = SceneStatus::Running;

        // Hero
        self.time_ms += dt_ms;
        let mut ctx = PlayerContext {
            tuning,
            session: &mut *session,
            level_width: self.bounds.w,
            on_slippery: standing_in_pool(&self.player.body, &self.pools),
        };
        self.player
            .update(dt_ms, input, &mut ctx, &mut self.projectiles);

        // Enemies
        let enemy_ctx = EnemyContext {
            tuning,
            player_x: self.player.body.pos.x,
            bounds: self.bounds,
            pools: &self.pools,
        };
        for enemy in &mut self.enemies {
            let outcome = enemy.update(dt_ms, &enemy_ctx);
            if outcome.ground_pound {
                if (enemy.body.pos.x - self.player.body.pos.x).abs() < GROUND_POUND_RANGE {
                    self.player.take_damage(tuning, session);
                }
                if !reduce_motion {
                    self.camera.shake();
                }
            }
            if outcome.boss_defeated {
                log::info!("Boss defeated in '{}'", self.name);
                session.push_event(GameEvent::BossDefeated);
                status = SceneStatus::BossDefeated;
            }
        }

        // Everything else that moves
        for projectile in &mut self.projectiles {
            projectile.update(dt_ms, &self.bounds);
        }
        for pool in &mut self.pools {
            pool.update(dt_ms);
        }
        for collectible in &mut self.collectibles {
            collectible.update(self.time_ms);
        }
        self.goal.update(self.time_ms);

        self.resolve_collisions(tuning, session);
        self.check_fall(tuning, session);

        match self.phase {
            ScenePhase::Completing { remaining_ms } => {
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms <= 0.0 {
                    self.phase = ScenePhase::Retired;
                    session.push_event(GameEvent::LevelCompleted {
                        index: self.level_index,
                    });
                    if status == SceneStatus::Running {
                        status = SceneStatus::LevelComplete;
                    }
                } else {
                    self.phase = ScenePhase::Completing { remaining_ms };
                }
            }
            ScenePhase::Active => self.check_completion(),
            ScenePhase::Retired => {}
        }

        self.sweep();
        self.camera.follow(dt_ms, self.player.body.pos);

        status
    }

    fn resolve_collisions(&mut self, tuning: &Tuning, session: &mut Session) {
        // Terrain
        if self.player.body.resolve_all(&self.tiles) {
            self.player.land(tuning);
        }
        for enemy in &mut self.enemies {
            if enemy.body.active {
                enemy.body.resolve_all(&self.tiles);
            }
            if let Some(brain) = enemy.boss.as_mut() {
                for barrel in &mut brain.barrels {
                    barrel.collide_terrain(&self.tiles);
                }
            }
        }
        for projectile in &mut self.projectiles {
            if let Some(mut pool) = projectile.collide_terrain(&self.tiles) {
                pool.remaining_ms = tuning.pudding_pool_ms;
                self.pools.push(pool);
            }
        }

        // Pickups
        for collectible in &mut self.collectibles {
            if collectible.body.active
                && collectible.body.overlaps(&self.player.body)
                && collectible.collect(session)
            {
                self.keys_collected += 1;
            }
        }

        // Enemy and barrel contact
        for enemy in &mut self.enemies {
            enemy.touch_player(&mut self.player, tuning, session);

            if let Some(brain) = enemy.boss.as_mut() {
                for barrel in &mut brain.barrels {
                    if barrel.is_active() && barrel.body.overlaps(&self.player.body) {
                        self.player.take_damage(tuning, session);
                        barrel.body.active = false;
                    }
                }
            }
        }

        // Hero projectiles
        for projectile in &mut self.projectiles {
            if !projectile.is_active() {
                continue;
            }
            if let Some(enemy) = self
                .enemies
                .iter_mut()
                .find(|e| e.is_alive() && e.body.overlaps(&projectile.body))
            {
                enemy.take_damage(session);
                projectile.body.active = false;
            }
        }
    }

    fn check_fall(&mut self, tuning: &Tuning, session: &mut Session) {
        let floor = self.bounds.bottom() + FALL_DEATH_MARGIN;

        if self.player.body.pos.y > floor {
            log::debug!("Hero fell out of '{}'", self.name);
            session.lose_life();
            session.play_sound(SoundEffect::Hurt);
            self.player.respawn(self.start, tuning);
            self.camera.snap_to(self.start);
        }

        for enemy in &mut self.enemies {
            if enemy.body.active && enemy.body.pos.y > floor {
                log::debug!("{:?} fell out of the level", enemy.kind);
                enemy.body.active = false;
                if enemy.kind == EnemyKind::Gorilla {
                    log::warn!("Boss left the level without being defeated");
                }
            }
        }
    }

    fn check_completion(&mut self) {
        if self.level_complete
            || self.keys_collected < self.required_keys
            || !self.player.body.overlaps(&self.goal.body)
        {
            return;
        }
        if self.goal.activate() {
            log::info!("Level '{}' complete", self.name);
            self.level_complete = true;
            self.phase = ScenePhase::Completing {
                remaining_ms: LEVEL_COMPLETE_DELAY_MS,
            };
        }
    }

    fn sweep(&mut self) {
        self.projectiles.retain(Projectile::is_active);
        self.pools.retain(PuddingPool::is_active);
        self.collectibles.retain(|c| c.body.active);
        self.enemies.retain(|e| e.body.active);
        for enemy in &mut self.enemies {
            if let Some(brain) = enemy.boss.as_mut() {
                brain.sweep_barrels();
            }
        }
    }
}
