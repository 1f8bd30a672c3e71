//! Player input actions
//!
//! Devices are mapped to actions outside the simulation; the core polls an
//! [`InputSource`] once per frame into a [`TickInput`] snapshot.

use serde::{Deserialize, Serialize};

/// The fixed action set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
    Banana,
    Pudding,
    Pause,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Banana,
        Action::Pudding,
        Action::Pause,
    ];
}

/// Anything that can answer "is this action held right now"
pub trait InputSource {
    fn is_pressed(&self, action: Action) -> bool;
}

/// Input state for a single tick (level-triggered)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub banana: bool,
    pub pudding: bool,
    pub pause: bool,
}

impl TickInput {
    /// Snapshot every action from a source
    pub fn poll(source: &impl InputSource) -> Self {
        Self {
            left: source.is_pressed(Action::Left),
            right: source.is_pressed(Action::Right),
            jump: source.is_pressed(Action::Jump),
            banana: source.is_pressed(Action::Banana),
            pudding: source.is_pressed(Action::Pudding),
            pause: source.is_pressed(Action::Pause),
        }
    }

    /// Builder-style helper for a single held action
    pub fn with(mut self, action: Action) -> Self {
        match action {
            Action::Left => self.left = true,
            Action::Right => self.right = true,
            Action::Jump => self.jump = true,
            Action::Banana => self.banana = true,
            Action::Pudding => self.pudding = true,
            Action::Pause => self.pause = true,
        }
        self
    }
}

impl InputSource for TickInput {
    fn is_pressed(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
            Action::Banana => self.banana,
            Action::Pudding => self.pudding,
            Action::Pause => self.pause,
        }
    }
}
