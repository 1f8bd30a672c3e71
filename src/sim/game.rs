//! Run progression: menus, pause, level advance, game over and victory

use serde::{Deserialize, Serialize};

use super::level::{LevelCatalog, LevelError};
use super::scene::{Scene, SceneStatus};
use super::session::{GameEvent, Session};
use super::tuning::Tuning;
use crate::audio::SoundEffect;
use crate::consts::LEVEL_BONUS;
use crate::input::TickInput;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Playing,
    Paused,
    GameOver,
    Victory,
    Instructions,
    Credits,
    Settings,
}

impl GamePhase {
    pub fn is_menu(&self) -> bool {
        matches!(
            self,
            GamePhase::MainMenu | GamePhase::Instructions | GamePhase::Credits | GamePhase::Settings
        )
    }

    /// The run is over and only a restart or the menu remain
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Owns the active scene and moves the run between levels and phases
#[derive(Debug, Clone)]
pub struct Game {
    pub phase: GamePhase,
    pub session: Session,
    pub tuning: Tuning,
    pub catalog: LevelCatalog,
    pub scene: Option<Scene>,
    /// Base seed; each level derives its own from it
    pub seed: u64,
    pub reduce_motion: bool,
    pause_was_down: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(LevelCatalog::builtin(), Tuning::default(), 0)
    }
}

impl Game {
    pub fn new(catalog: LevelCatalog, tuning: Tuning, seed: u64) -> Self {
        Self {
            phase: GamePhase::MainMenu,
            session: Session::new(),
            tuning,
            catalog,
            scene: None,
            seed,
            reduce_motion: false,
            pause_was_down: false,
        }
    }

    /// Begin a fresh run at the first level
    pub fn start(&mut self) -> Result<(), LevelError> {
        let scene = self.build_scene(0)?;
        self.session.reset();
        self.install(scene);
        self.enter(GamePhase::Playing);
        Ok(())
    }

    /// Reset stats and reload level 1
    pub fn restart(&mut self) -> Result<(), LevelError> {
        log::info!("Restarting run");
        self.start()
    }

    /// Replace the active scene with level `index`. On failure nothing changes.
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        let scene = self.build_scene(index)?;
        self.install(scene);
        Ok(())
    }

    pub fn level_index(&self) -> Option<usize> {
        self.scene.as_ref().map(|s| s.level_index)
    }

    fn build_scene(&self, index: usize) -> Result<Scene, LevelError> {
        let level = self.catalog.get(index).inspect_err(|e| log::error!("{e}"))?;
        Scene::load(level, index, self.seed.wrapping_add(index as u64))
            .inspect_err(|e| log::error!("Failed to load level {}: {e}", index + 1))
    }

    fn install(&mut self, scene: Scene) {
        self.session.stats.level = scene.level_index + 1;
        self.session.push_event(GameEvent::LevelStarted {
            index: scene.level_index,
            name: scene.name.clone(),
        });
        self.scene = Some(scene);
    }

    fn enter(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;

        if phase.is_finished() {
            self.session.push_event(GameEvent::PhaseChanged(phase));
        }
        if phase == GamePhase::Victory {
            self.session.play_sound(SoundEffect::Victory);
        }
    }

    /// Shell-driven transition. Returns false (and changes nothing) when the
    /// request makes no sense from the current phase.
    pub fn request_phase(&mut self, phase: GamePhase) -> bool {
        use GamePhase::*;

        let allowed = match (self.phase, phase) {
            (MainMenu, Instructions | Credits | Settings) => true,
            (Instructions | Credits | Settings, MainMenu) => true,
            (Playing, Paused) | (Paused, Playing) => true,
            (Paused | GameOver | Victory, MainMenu) => true,
            (MainMenu | GameOver | Victory, Playing) => {
                return self.start().is_ok();
            }
            _ => false,
        };

        if !allowed {
            log::warn!("Ignoring phase request {:?} -> {:?}", self.phase, phase);
            return false;
        }
        if phase == MainMenu {
            self.scene = None;
        }
        self.enter(phase);
        true
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.enter(GamePhase::Paused),
            GamePhase::Paused => self.enter(GamePhase::Playing),
            _ => log::debug!("Pause ignored in {:?}", self.phase),
        }
    }

    /// Advance the run by one frame
    pub fn update(&mut self, dt_ms: f32, input: &TickInput) {
        let pause_pressed = input.pause && !self.pause_was_down;
        self.pause_was_down = input.pause;
        if pause_pressed {
            self.toggle_pause();
        }

        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        let status = scene.update(
            dt_ms,
            input,
            &self.tuning,
            &mut self.session,
            self.reduce_motion,
        );

        if self.session.is_out_of_lives() {
            self.enter(GamePhase::GameOver);
            return;
        }

        match status {
            SceneStatus::Running => {}
            SceneStatus::LevelComplete => self.advance(),
            SceneStatus::BossDefeated => self.enter(GamePhase::Victory),
        }
    }

    fn advance(&mut self) {
        let next = self.level_index().map_or(0, |i| i + 1);

        if next >= self.catalog.len() {
            self.enter(GamePhase::Victory);
            return;
        }
        self.session.add_score(LEVEL_BONUS);
        // A broken level leaves the run paused on the finished scene
        if self.load_level(next).is_err() {
            self.enter(GamePhase::Paused);
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }
}
