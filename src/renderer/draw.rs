//! Scene and overlay draw-list generation

use glam::Vec2;

use super::colors::{self, Palette};
use super::{Align, AssetProvider, DrawCommand};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::settings::Settings;
use crate::sim::{
    AnimState, CollectibleKind, EnemyKind, Game, GamePhase, GoalKind, ProjectileKind, Rect, Scene,
    Stats,
};

/// Hero blink period while invincible (ms)
const BLINK_MS: f32 = 100.0;
const HUD_TEXT: f32 = 20.0;
const TITLE_TEXT: f32 = 48.0;

fn viewport() -> Rect {
    Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT)
}

/// Accumulates commands for one frame
struct Painter<'a> {
    assets: &'a dyn AssetProvider,
    offset: Vec2,
    commands: Vec<DrawCommand>,
}

impl<'a> Painter<'a> {
    fn new(assets: &'a dyn AssetProvider, offset: Vec2) -> Self {
        Self {
            assets,
            offset,
            commands: Vec::new(),
        }
    }

    /// World-space sprite with a colored fallback; culled when off screen
    fn sprite(
        &mut self,
        name: &str,
        world: Rect,
        fallback: [f32; 4],
        flip_x: bool,
        rotation: f32,
        alpha: f32,
    ) {
        let rect = world.translated(self.offset);
        if !rect.overlaps(&viewport()) {
            return;
        }
        self.commands.push(match self.assets.image(name) {
            Some(image) => DrawCommand::Sprite {
                image,
                rect,
                flip_x,
                rotation,
                alpha,
            },
            None => DrawCommand::Fill {
                rect,
                color: with_alpha(fallback, alpha),
            },
        });
    }

    fn fill(&mut self, world: Rect, color: [f32; 4]) {
        let rect = world.translated(self.offset);
        if rect.overlaps(&viewport()) {
            self.commands.push(DrawCommand::Fill { rect, color });
        }
    }

    fn screen_fill(&mut self, rect: Rect, color: [f32; 4]) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, align: Align) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            align,
            color: colors::TEXT,
        });
    }
}

fn with_alpha(mut color: [f32; 4], alpha: f32) -> [f32; 4] {
    color[3] *= alpha;
    color
}

/// Draw the world, then the HUD
pub fn render_scene(
    scene: &Scene,
    stats: &Stats,
    assets: &dyn AssetProvider,
    high_contrast: bool,
) -> Vec<DrawCommand> {
    let palette = Palette::for_contrast(high_contrast);
    let mut p = Painter::new(assets, scene.camera.offset());

    // Background is screen space
    let background = [scene.background.as_str(), "background_sky"]
        .into_iter()
        .filter(|name| !name.is_empty())
        .find_map(|name| assets.image(name));
    match background {
        Some(image) if !high_contrast => p.commands.push(DrawCommand::Sprite {
            image,
            rect: viewport(),
            flip_x: false,
            rotation: 0.0,
            alpha: 1.0,
        }),
        _ => p.screen_fill(viewport(), palette.sky),
    }

    for tile in &scene.tiles {
        p.sprite("platform", *tile, palette.terrain, false, 0.0, 1.0);
    }

    for pool in &scene.pools {
        p.fill(pool.body.rect(), with_alpha(colors::POOL, pool.alpha));
    }

    for c in &scene.collectibles {
        let name = match c.kind {
            CollectibleKind::Coin => "coin",
            CollectibleKind::Key => "key",
            CollectibleKind::PuddingPickup => "pudding",
        };
        let fallback = match c.kind {
            CollectibleKind::PuddingPickup if !high_contrast => colors::PUDDING,
            _ => palette.pickup,
        };
        p.sprite(name, c.body.rect(), fallback, false, 0.0, 1.0);
    }

    let goal = &scene.goal;
    match goal.kind {
        GoalKind::Door => {
            let color = if goal.activated { colors::DOOR_OPEN } else { colors::DOOR };
            p.fill(goal.body.rect(), color);
        }
        GoalKind::Princess => p.sprite("princess", goal.body.rect(), colors::PRINCESS, false, 0.0, 1.0),
    }

    for enemy in &scene.enemies {
        let attacking = enemy.boss.as_ref().is_some_and(|b| b.is_attacking());
        let fallback = if high_contrast {
            palette.hazard
        } else {
            match enemy.kind {
                EnemyKind::Goomba => colors::GOOMBA,
                EnemyKind::Spiker => colors::SPIKER,
                EnemyKind::Gorilla if attacking => colors::GORILLA_ATTACKING,
                EnemyKind::Gorilla => colors::GORILLA,
            }
        };
        let alpha = if enemy.dead { 0.5 } else { 1.0 };
        let flip = enemy.facing == crate::Direction::Left;
        match enemy.kind {
            EnemyKind::Gorilla => p.sprite("gorilla_idle", enemy.body.rect(), fallback, flip, 0.0, alpha),
            _ => p.fill(enemy.body.rect(), with_alpha(fallback, alpha)),
        }
    }

    for barrel in scene.barrels() {
        p.sprite("barrel", barrel.body.rect(), colors::BARREL, false, barrel.spin, 1.0);
    }

    for projectile in &scene.projectiles {
        let (name, fallback) = match projectile.kind {
            ProjectileKind::Banana => ("banana", colors::BANANA),
            ProjectileKind::Pudding => ("pudding", colors::PUDDING),
            ProjectileKind::Barrel => ("barrel", colors::BARREL),
        };
        p.sprite(name, projectile.body.rect(), fallback, false, projectile.spin, 1.0);
    }

    let hero = &scene.player;
    let blink_off = hero.is_invincible() && (hero.invincible_ms / BLINK_MS) as u32 % 2 == 1;
    if !blink_off {
        let name = match hero.anim {
            AnimState::Idle => "hero_idle",
            AnimState::Walk if hero.anim_frame == 0 => "hero_walk1",
            AnimState::Walk => "hero_walk2",
            AnimState::Jump => "hero_jump",
        };
        let flip = hero.facing == crate::Direction::Left;
        p.sprite(name, hero.body.rect(), palette.hero, flip, 0.0, 1.0);
    }

    draw_hud(&mut p, scene, stats);
    p.commands
}

fn draw_hud(p: &mut Painter<'_>, scene: &Scene, stats: &Stats) {
    let lines = [
        format!("Score: {}", stats.score),
        format!("Lives: {}", stats.lives),
        format!("Pudding: {}", stats.pudding),
        format!("Keys: {}/{}", scene.keys_collected, scene.required_keys),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        p.text(line, Vec2::new(10.0, 24.0 + i as f32 * 24.0), HUD_TEXT, Align::Left);
    }
    p.text(
        format!("Level {}: {}", stats.level, scene.name),
        Vec2::new(CANVAS_WIDTH - 10.0 - 200.0, 24.0),
        HUD_TEXT,
        Align::Left,
    );

    if let Some(boss) = scene.boss().filter(|b| !b.dead) {
        let max = boss.boss.as_ref().map_or(1, |b| b.max_health.max(1));
        let bar = Rect::new(CANVAS_WIDTH / 2.0 - 150.0, 560.0, 300.0, 16.0);
        p.screen_fill(bar, colors::HEALTH_BAR_BACK);
        let filled = bar.w * boss.health as f32 / max as f32;
        p.screen_fill(Rect::new(bar.x, bar.y, filled, bar.h), colors::HEALTH_BAR);
    }
}

fn overlay(p: &mut Painter<'_>, title: &str, lines: &[String]) {
    p.screen_fill(viewport(), colors::SHADE);
    let center = CANVAS_WIDTH / 2.0;
    p.text(title, Vec2::new(center, 200.0), TITLE_TEXT, Align::Center);
    for (i, line) in lines.iter().enumerate() {
        p.text(line.clone(), Vec2::new(center, 280.0 + i as f32 * 32.0), HUD_TEXT, Align::Center);
    }
}

/// Full frame for the current phase: the scene (if any) plus menus and overlays
pub fn render_game(game: &Game, assets: &dyn AssetProvider, settings: &Settings) -> Vec<DrawCommand> {
    let mut commands = match &game.scene {
        Some(scene) if !game.phase.is_menu() => {
            render_scene(scene, &game.session.stats, assets, settings.high_contrast)
        }
        _ => Vec::new(),
    };

    let mut p = Painter::new(assets, Vec2::ZERO);
    let score = format!("Score: {}", game.session.stats.score);
    match game.phase {
        GamePhase::Playing => {}
        GamePhase::Paused => overlay(&mut p, "PAUSED", &["Press P to resume".into()]),
        GamePhase::GameOver => overlay(&mut p, "GAME OVER", &[score, "Press Enter to retry".into()]),
        GamePhase::Victory => overlay(
            &mut p,
            "VICTORY!",
            &[score, "The princess is safe".into(), "Press Enter to play again".into()],
        ),
        GamePhase::MainMenu => overlay(
            &mut p,
            "BALD HERO",
            &["Enter: play".into(), "I: instructions".into(), "C: credits".into()],
        ),
        GamePhase::Instructions => overlay(
            &mut p,
            "HOW TO PLAY",
            &[
                "Arrows: move, Space: jump (twice for double jump)".into(),
                "X: throw banana, Z: throw pudding".into(),
                "Collect the keys, then reach the exit".into(),
            ],
        ),
        GamePhase::Credits => overlay(&mut p, "CREDITS", &["Made with Rust".into()]),
        GamePhase::Settings => overlay(
            &mut p,
            "SETTINGS",
            &[
                format!("Volume: {:.0}%", settings.master_volume * 100.0),
                format!("Reduced motion: {}", settings.reduced_motion),
                format!("High contrast: {}", settings.high_contrast),
            ],
        ),
    }
    commands.append(&mut p.commands);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{ImageHandle, NoAssets};
    use crate::sim::LevelCatalog;

    struct OnlyHero;

    impl AssetProvider for OnlyHero {
        fn image(&self, name: &str) -> Option<ImageHandle> {
            (name == "hero_idle").then_some(ImageHandle(1))
        }
    }

    fn scene() -> Scene {
        Scene::load(LevelCatalog::builtin().get(0).unwrap(), 0, 1).unwrap()
    }

    #[test]
    fn test_missing_assets_fall_back_to_fills() {
        let commands = render_scene(&scene(), &Stats::default(), &NoAssets, false);
        assert!(!commands.is_empty());
        assert!(commands
            .iter()
            .all(|c| !matches!(c, DrawCommand::Sprite { .. })));
        assert!(commands.contains(&DrawCommand::Fill {
            rect: viewport(),
            color: colors::SKY,
        }));
    }

    #[test]
    fn test_available_sprite_is_used() {
        let scene = scene();
        let commands = render_scene(&scene, &Stats::default(), &OnlyHero, false);
        let hero_rect = scene.player.body.rect().translated(scene.camera.offset());
        assert!(commands.contains(&DrawCommand::Sprite {
            image: ImageHandle(1),
            rect: hero_rect,
            flip_x: false,
            rotation: 0.0,
            alpha: 1.0,
        }));
    }

    #[test]
    fn test_offscreen_entities_are_culled() {
        let scene = scene();
        let commands = render_scene(&scene, &Stats::default(), &NoAssets, false);
        for cmd in &commands {
            if let Some(rect) = cmd.rect() {
                assert!(rect.overlaps(&viewport()));
            }
        }
        // The level is wider than the screen, so some tiles were skipped
        let fills = commands.iter().filter(|c| c.rect().is_some()).count();
        assert!(fills < scene.tiles.len() + scene.collectibles.len());
    }

    #[test]
    fn test_menu_has_no_world() {
        let game = Game::default();
        let commands = render_game(&game, &NoAssets, &Settings::default());
        assert!(commands.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text == "BALD HERO"
        )));
    }

    #[test]
    fn test_high_contrast_palette() {
        let commands = render_scene(&scene(), &Stats::default(), &NoAssets, true);
        assert!(commands.contains(&DrawCommand::Fill {
            rect: viewport(),
            color: Palette::HIGH_CONTRAST.sky,
        }));
    }
}
