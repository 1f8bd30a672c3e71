//! Sound effect dispatch
//!
//! The simulation only names the effect; synthesis belongs to a backend the
//! shell plugs in. Without a backend effects are logged and dropped.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ground jump or double jump
    Jump,
    /// Banana or pudding thrown
    Throw,
    /// Any pickup collected
    Coin,
    /// Enemy stomped
    Stomp,
    /// Hero took damage
    Hurt,
    /// Run won
    Victory,
}

/// Something that can actually make noise
pub trait SoundBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn SoundBackend>>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn SoundBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No sound backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.5,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.master_volume
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        match self.backend.as_mut() {
            Some(backend) => backend.play(effect, vol),
            None => log::debug!("sound {:?} (no backend)", effect),
        }
    }

    /// Play every sound found in a batch of simulation events
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Sound(effect) = event {
                self.play(*effect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl SoundBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    #[test]
    fn test_play_respects_volume_and_mute() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Some(Box::new(Recorder(log.clone()))));
        audio.set_volume(2.0);
        audio.play(SoundEffect::Jump);
        audio.set_muted(true);
        audio.play(SoundEffect::Hurt);

        assert_eq!(*log.borrow(), vec![(SoundEffect::Jump, 1.0)]);
    }

    #[test]
    fn test_play_events_filters_sounds() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Some(Box::new(Recorder(log.clone()))));
        audio.play_events(&[
            GameEvent::KeyCollected,
            GameEvent::Sound(SoundEffect::Coin),
            GameEvent::BossDefeated,
            GameEvent::Sound(SoundEffect::Victory),
        ]);
        let played: Vec<_> = log.borrow().iter().map(|(e, _)| *e).collect();
        assert_eq!(played, vec![SoundEffect::Coin, SoundEffect::Victory]);
    }
}
