//! Run-wide statistics and the outgoing event queue
//!
//! The simulation never talks to audio or UI directly; it records what
//! happened here and the shell drains the queue once per frame.

use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::game::GamePhase;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Player statistics carried across levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub score: u64,
    pub lives: u32,
    pub pudding: u32,
    /// 1-based level number
    pub level: usize,
    /// Keys collected over the whole run
    pub keys_collected: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            pudding: STARTING_PUDDING,
            level: 1,
            keys_collected: 0,
        }
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(SoundEffect),
    LifeLost { remaining: u32 },
    KeyCollected,
    EnemyDefeated(EnemyKind),
    BossDefeated,
    LevelStarted { index: usize, name: String },
    LevelCompleted { index: usize },
    /// The core only ever reports GameOver and Victory here
    PhaseChanged(GamePhase),
}

/// Score/life/inventory sink shared by every gameplay component
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub stats: Stats,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset statistics for a fresh run (pending events are dropped)
    pub fn reset(&mut self) {
        self.stats = Stats::default();
        self.events.clear();
    }

    pub fn add_score(&mut self, points: u64) {
        self.stats.score += points;
    }

    pub fn lose_life(&mut self) {
        self.stats.lives = self.stats.lives.saturating_sub(1);
        log::debug!("Life lost, {} remaining", self.stats.lives);
        self.events.push(GameEvent::LifeLost {
            remaining: self.stats.lives,
        });
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.stats.lives == 0
    }

    pub fn collect_key(&mut self) {
        self.stats.keys_collected += 1;
        self.add_score(KEY_SCORE);
        self.events.push(GameEvent::KeyCollected);
    }

    pub fn collect_pudding(&mut self) {
        self.stats.pudding += 1;
    }

    /// Spend one pudding charge; false (and no change) when none are left
    pub fn use_pudding(&mut self) -> bool {
        if self.stats.pudding == 0 {
            return false;
        }
        self.stats.pudding -= 1;
        true
    }

    pub fn play_sound(&mut self, effect: SoundEffect) {
        self.events.push(GameEvent::Sound(effect));
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
