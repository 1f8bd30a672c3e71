//! Whole-run behaviour through the public API

use bald_hero::audio::SoundEffect;
use bald_hero::consts::*;
use bald_hero::input::{Action, TickInput};
use bald_hero::sim::enemy::EnemyContext;
use bald_hero::sim::player::PlayerContext;
use bald_hero::sim::{
    Body, BossAttack, Enemy, EnemyKind, Game, GameEvent, GamePhase, LevelCatalog, Player, Rect,
    Session, Tuning, tick,
};
use proptest::prelude::*;

/// Two flat levels where the hero spawns in front of an open door
const DOOR_RUN: &str = r#"[
    {
        "name": "First",
        "width": 800, "height": 600,
        "player_start": {"x": 100, "y": 518},
        "platforms": [{"x": 0, "y": 550, "width": 800}],
        "goal": {"type": "door", "x": 100, "y": 486}
    },
    {
        "name": "Second",
        "width": 800, "height": 600,
        "player_start": {"x": 100, "y": 518},
        "platforms": [{"x": 0, "y": 550, "width": 800}],
        "goal": {"type": "door", "x": 100, "y": 486}
    }
]"#;

/// One arena with a single-hit gorilla far from the hero
const BOSS_RUN: &str = r#"[
    {
        "name": "Arena",
        "width": 800, "height": 600,
        "player_start": {"x": 100, "y": 518},
        "platforms": [{"x": 0, "y": 550, "width": 800}],
        "goal": {"type": "princess", "x": 740, "y": 400},
        "boss": {"type": "gorilla", "x": 600, "y": 486, "health": 1, "attacks": ["charge"]}
    }
]"#;

fn start(json: &str) -> Game {
    let catalog = LevelCatalog::from_json(json).unwrap();
    let mut game = Game::new(catalog, Tuning::default(), 3);
    assert!(game.request_phase(GamePhase::Playing));
    game
}

fn run(game: &mut Game, frames: usize, input: TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(tick(game, &input, FRAME_MS));
    }
    events
}

fn airborne_player() -> Player {
    let mut player = Player::new(100.0, 100.0);
    player.body.grounded = false;
    player.coyote_ms = 0.0;
    player
}

fn step_player(player: &mut Player, session: &mut Session, dt_ms: f32, input: TickInput) {
    let tuning = Tuning::default();
    let mut ctx = PlayerContext {
        tuning: &tuning,
        session,
        level_width: 2000.0,
        on_slippery: false,
    };
    let mut spawned = Vec::new();
    player.update(dt_ms, &input, &mut ctx, &mut spawned);
}

#[test]
fn test_run_completes_every_level_then_wins() {
    let mut game = start(DOOR_RUN);
    let events = run(&mut game, 70, TickInput::default());

    assert_eq!(game.level_index(), Some(1));
    assert_eq!(game.session.stats.level, 2);
    assert!(events.contains(&GameEvent::LevelCompleted { index: 0 }));
    assert_eq!(game.session.stats.score, LEVEL_BONUS);

    let events = run(&mut game, 70, TickInput::default());
    assert_eq!(game.phase, GamePhase::Victory);
    assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Victory)));
    assert!(events.contains(&GameEvent::Sound(SoundEffect::Victory)));
    // Only moving on to another level pays the bonus
    assert_eq!(game.session.stats.score, LEVEL_BONUS);

    // Nothing more happens once the run is over
    assert!(run(&mut game, 30, TickInput::default()).is_empty());
}

#[test]
fn test_level_completion_fires_once() {
    let mut game = start(DOOR_RUN);
    let events = run(&mut game, 70, TickInput::default());
    let completions = events
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelCompleted { .. }))
        .count();
    assert_eq!(completions, 1);
}

#[test]
fn test_boss_victory_waits_for_despawn() {
    let mut game = start(BOSS_RUN);
    run(&mut game, 5, TickInput::default());

    let scene = game.scene.as_mut().unwrap();
    let boss = scene.enemies.iter_mut().find(|e| e.is_boss()).unwrap();
    assert!(boss.take_damage(&mut game.session));
    assert!(boss.dead);
    assert_eq!(game.session.stats.score, BOSS_HIT_SCORE + BOSS_DEFEAT_SCORE);

    // Corpse lingers for three seconds before the run is won
    let events = run(&mut game, 170, TickInput::default());
    assert_eq!(game.phase, GamePhase::Playing);
    assert!(!events.contains(&GameEvent::BossDefeated));

    let events = run(&mut game, 20, TickInput::default());
    assert_eq!(game.phase, GamePhase::Victory);
    let defeats = events
        .iter()
        .filter(|e| **e == GameEvent::BossDefeated)
        .count();
    assert_eq!(defeats, 1);
}

#[test]
fn test_boss_invulnerable_between_hits() {
    let tuning = Tuning::default();
    let mut session = Session::new();
    let mut boss = Enemy::boss(600.0, 100.0, 3, vec![BossAttack::ThrowBarrel]);

    assert!(boss.take_damage(&mut session));
    assert!(!boss.take_damage(&mut session));
    assert_eq!(boss.health, 2);

    let ctx = EnemyContext {
        tuning: &tuning,
        player_x: 0.0,
        bounds: Rect::new(0.0, 0.0, 2000.0, 600.0),
        pools: &[],
    };
    for _ in 0..100 {
        boss.update(FRAME_MS, &ctx);
    }
    assert!(boss.take_damage(&mut session));
    assert_eq!(boss.health, 1);
    assert_eq!(session.stats.score, 2 * BOSS_HIT_SCORE);
}

#[test]
fn test_stomp_needs_downward_motion() {
    let tuning = Tuning::default();

    for (vy, stomped) in [(5.0, true), (-2.0, false)] {
        let mut session = Session::new();
        let mut enemy = Enemy::new(EnemyKind::Goomba, 100.0, 100.0, None);
        let mut player = Player::new(100.0, 80.0);
        player.body.vel.y = vy;

        enemy.touch_player(&mut player, &tuning, &mut session);
        assert_eq!(enemy.dead, stomped);
        assert_eq!(session.stats.lives == STARTING_LIVES, stomped);
    }
}

#[test]
fn test_coyote_window() {
    let jump = TickInput::default().with(Action::Jump);

    for (elapsed, jumps) in [(50.0, true), (COYOTE_TIME_MS, true), (150.0, false)] {
        let mut session = Session::new();
        let mut player = airborne_player();
        player.can_double_jump = false;
        player.coyote_ms = COYOTE_TIME_MS;

        step_player(&mut player, &mut session, elapsed, jump);
        assert_eq!(player.body.vel.y < 0.0, jumps, "after {elapsed} ms");
    }
}

#[test]
fn test_double_jump_once_per_landing() {
    let tuning = Tuning::default();
    let jump = TickInput::default().with(Action::Jump);
    let mut session = Session::new();
    let mut player = airborne_player();
    player.can_double_jump = true;

    step_player(&mut player, &mut session, FRAME_MS, jump);
    assert!(player.body.vel.y < 0.0);
    assert!(!player.can_double_jump);

    step_player(&mut player, &mut session, FRAME_MS, TickInput::default());
    assert!(!player.try_jump(&tuning, &mut session));

    player.land(&tuning);
    assert!(player.try_jump(&tuning, &mut session));
    assert_eq!(player.body.vel.y, JUMP_FORCE);
    assert!(player.try_jump(&tuning, &mut session));
    assert_eq!(player.body.vel.y, DOUBLE_JUMP_FORCE);
    assert!(!player.try_jump(&tuning, &mut session));
}

#[test]
fn test_banana_cooldown_gates_throws() {
    let tuning = Tuning::default();
    let mut session = Session::new();
    let mut player = Player::new(100.0, 100.0);

    assert!(player.throw_banana(&tuning, &mut session).is_some());
    step_player(&mut player, &mut session, 100.0, TickInput::default());
    assert!(player.throw_banana(&tuning, &mut session).is_none());
    step_player(&mut player, &mut session, 200.0, TickInput::default());
    assert!(player.throw_banana(&tuning, &mut session).is_some());
}

#[test]
fn test_pudding_runs_out() {
    let tuning = Tuning::default();
    let mut session = Session::new();
    let mut player = Player::new(100.0, 100.0);

    for _ in 0..STARTING_PUDDING {
        assert!(player.throw_pudding(&tuning, &mut session).is_some());
        player.pudding_cooldown_ms = 0.0;
    }
    assert!(player.throw_pudding(&tuning, &mut session).is_none());
    assert_eq!(session.stats.pudding, 0);
}

#[test]
fn test_restart_reproduces_first_frame() {
    let mut fresh = Game::default();
    fresh.start().unwrap();

    let mut game = Game::default();
    game.start().unwrap();
    run(&mut game, 120, TickInput::default().with(Action::Right));
    game.restart().unwrap();

    let (a, b) = (fresh.scene.as_ref().unwrap(), game.scene.as_ref().unwrap());
    assert_eq!(a.player.body, b.player.body);
    assert_eq!(a.enemies, b.enemies);
    assert_eq!(a.collectibles, b.collectibles);
    assert_eq!(fresh.session.stats, game.session.stats);
    assert_eq!(game.phase, GamePhase::Playing);
}

#[test]
fn test_game_over_when_lives_run_out() {
    let mut game = start(DOOR_RUN);
    game.session.stats.lives = 1;

    // Drop the hero below the level
    let scene = game.scene.as_mut().unwrap();
    scene.player.body.pos.y = scene.bounds.bottom() + FALL_DEATH_MARGIN + 1.0;

    let events = run(&mut game, 1, TickInput::default());
    assert_eq!(game.phase, GamePhase::GameOver);
    assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::GameOver)));
}

/// A 32 px body dropping onto the corner of a tile: horizontal overlap
/// `across`, vertical overlap `depth <= across` (ties included)
fn corner_landing() -> impl Strategy<Value = (i32, i32, i32, bool)> {
    (1i32..=32).prop_flat_map(|across| (across..=64, Just(across), 1..=across, any::<bool>()))
}

#[test]
fn test_equal_overlap_lands_on_top() {
    let tile = Rect::new(0.0, 100.0, 16.0, 32.0);
    let mut body = Body::new(-26.0, 74.0, 32.0, 32.0); // 6 x 6 corner overlap
    body.vel.y = 6.0;

    assert!(body.resolve_all(&[tile]));
    assert!(body.grounded);
    assert_eq!((body.pos.x, body.pos.y), (-26.0, 68.0));
}

proptest! {
    #[test]
    fn prop_fall_speed_grows_and_is_capped(vy in -20.0f32..15.0, dt in 1.0f32..50.0) {
        let mut body = Body::new(0.0, 0.0, 32.0, 32.0);
        body.vel.y = vy;
        body.integrate(dt, GRAVITY, MAX_FALL_SPEED);
        prop_assert!(body.vel.y >= vy);
        prop_assert!(body.vel.y <= MAX_FALL_SPEED);
    }

    #[test]
    fn prop_landing_from_above_grounds(
        (tile_w, across, depth, from_left) in corner_landing(),
    ) {
        let tile = Rect::new(0.0, 100.0, tile_w as f32, 32.0);
        let x = if from_left { across - 32 } else { tile_w - across };
        let mut body = Body::new(x as f32, (68 + depth) as f32, 32.0, 32.0);
        body.vel.y = depth as f32;

        prop_assert!(body.resolve_all(&[tile]));
        prop_assert!(body.grounded);
        prop_assert_eq!(body.vel.y, 0.0);
        prop_assert_eq!(body.rect().bottom(), 100.0);
        prop_assert_eq!(body.pos.x, x as f32);
    }

    #[test]
    fn prop_resolution_separates(
        ax in -64i32..64, ay in -64i32..64,
        aw in 1i32..64, ah in 1i32..64,
    ) {
        let tile = Rect::new(0.0, 0.0, 32.0, 32.0);
        let mut body = Body::new(ax as f32, ay as f32, aw as f32, ah as f32);
        body.resolve_terrain(&tile);
        prop_assert!(!body.rect().overlaps(&tile));
    }

    #[test]
    fn prop_tick_survives_any_step(dt in -1.0e4f32..1.0e4) {
        let mut game = Game::default();
        game.start().unwrap();
        tick(&mut game, &TickInput::default().with(Action::Right), dt);

        let pos = game.scene.as_ref().unwrap().player.body.pos;
        prop_assert!(pos.x.is_finite() && pos.y.is_finite());
    }
}
