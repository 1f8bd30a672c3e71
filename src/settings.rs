//! Game settings and preferences
//!
//! Persisted separately from progress as a small JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::AudioManager;
use crate::sim::Game;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Camera shake on ground pounds
    pub screen_shake: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
    /// High contrast mode
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            show_fps: false,
            master_volume: 0.5,
            muted: false,
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Push the preferences into the running game and the mixer
    pub fn apply(&self, game: &mut Game, audio: &mut AudioManager) {
        game.reduce_motion = !self.effective_screen_shake();
        audio.set_volume(self.master_volume);
        audio.set_muted(self.muted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());

        let mut game = Game::default();
        let mut audio = AudioManager::default();
        settings.apply(&mut game, &mut audio);
        assert!(game.reduce_motion);
        assert_eq!(audio.volume(), 0.5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"high_contrast": true}"#).unwrap();
        assert!(settings.high_contrast);
        assert!(settings.screen_shake);
        assert_eq!(settings.master_volume, 0.5);

        let round = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(round, settings);
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/bald-hero/settings.json"));
        assert_eq!(settings, Settings::default());
    }
}
