//! Per-frame simulation entry point
//!
//! The shell calls [`tick`] once per display frame with the elapsed time and
//! the polled input, then forwards the returned events to audio and UI.

use super::game::Game;
use super::session::GameEvent;
use crate::input::TickInput;

/// Advance the game by `dt_ms` and return what happened.
///
/// Non-finite or negative steps are treated as zero. Long frames are taken
/// as one large step.
pub fn tick(game: &mut Game, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    game.update(dt_ms, input);
    game.drain_events()
}
