//! Bald Hero entry point
//!
//! Headless driver: a simple autopilot plays the built-in (or a JSON) level
//! catalogue for a fixed number of frames and reports how far it got.
//!
//! Usage: `bald-hero [frames] [seed] [levels.json]`

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use bald_hero::input::{Action, TickInput};
    use bald_hero::sim::{CollectibleKind, Rect, Scene};

    /// How far ahead the pilot looks for gaps and enemies
    const LOOKAHEAD: f32 = 48.0;
    const THROW_RANGE: f32 = 260.0;

    /// Next input for the hero based on the scene layout
    pub fn steer(scene: &Scene) -> TickInput {
        let hero = scene.player.body.rect();
        let center = hero.center();

        // Keys first, then the exit
        let target = if scene.keys_collected < scene.required_keys {
            scene
                .collectibles
                .iter()
                .filter(|c| c.kind == CollectibleKind::Key)
                .map(|c| c.body.rect().center())
                .min_by(|a, b| {
                    a.distance_squared(center)
                        .total_cmp(&b.distance_squared(center))
                })
                .unwrap_or(scene.goal.body.rect().center())
        } else {
            scene.goal.body.rect().center()
        };

        let mut input = TickInput::default();
        let dx = target.x - center.x;
        let going_right = dx >= 0.0;
        if dx.abs() > 4.0 {
            input = input.with(if going_right { Action::Right } else { Action::Left });
        }

        let ahead = if going_right { hero.right() + LOOKAHEAD } else { hero.x - LOOKAHEAD };
        let probe = Rect::new(ahead - 1.0, hero.bottom(), 2.0, 64.0);
        let gap_ahead = !scene.tiles.iter().any(|t| t.overlaps(&probe));
        let target_above = target.y < hero.y - 40.0;

        let enemy_ahead = scene.enemies.iter().any(|e| {
            let r = e.body.rect();
            let ex = r.center().x - center.x;
            e.is_alive()
                && ex.signum() == dx.signum()
                && ex.abs() < THROW_RANGE
                && (r.center().y - center.y).abs() < 48.0
        });

        // Jump from the ground, then spend the double jump at the apex
        let hero_body = &scene.player.body;
        if (gap_ahead || target_above) && (hero_body.grounded || hero_body.vel.y > 0.0) {
            input = input.with(Action::Jump);
        }
        if enemy_ahead {
            input = input.with(Action::Banana);
        }
        input
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use bald_hero::audio::{AudioManager, SoundBackend, SoundEffect};
    use bald_hero::consts::FRAME_MS;
    use bald_hero::input::TickInput;
    use bald_hero::renderer::{NoAssets, render_game};
    use bald_hero::sim::{Game, GameEvent, GamePhase, LevelCatalog, Tuning, tick};
    use bald_hero::Settings;

    /// Writes every effect to the log instead of a speaker
    struct LogBackend;

    impl SoundBackend for LogBackend {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            log::trace!("play {:?} at {:.2}", effect, volume);
        }
    }

    env_logger::init();
    log::info!("Bald Hero (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let frames: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(60 * 120);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(42);

    let catalog = match args.get(3) {
        Some(path) => match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| LevelCatalog::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Could not load levels from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => LevelCatalog::builtin(),
    };

    let settings = Settings::load(Path::new("settings.json"));
    let mut audio = AudioManager::new(Some(Box::new(LogBackend)));
    let mut game = Game::new(catalog, Tuning::default(), seed);
    settings.apply(&mut game, &mut audio);

    if !game.request_phase(GamePhase::Playing) {
        log::error!("Could not start the first level");
        std::process::exit(1);
    }

    let mut draw_calls = 0usize;
    for frame in 0..frames {
        let input = match &game.scene {
            Some(scene) => autopilot::steer(scene),
            None => TickInput::default(),
        };

        let events = tick(&mut game, &input, FRAME_MS);
        audio.play_events(&events);
        for event in &events {
            match event {
                GameEvent::Sound(_) => {}
                GameEvent::LevelStarted { index, name } => {
                    println!("frame {frame}: level {} '{name}'", index + 1)
                }
                other => log::debug!("frame {frame}: {:?}", other),
            }
        }

        draw_calls += render_game(&game, &NoAssets, &settings).len();

        if game.phase.is_finished() {
            break;
        }
    }

    let stats = &game.session.stats;
    println!(
        "{:?} after level {}: score {}, lives {}, keys {}, {} draw commands",
        game.phase, stats.level, stats.score, stats.lives, stats.keys_collected, draw_calls
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web shell drives `sim::tick` itself
}
