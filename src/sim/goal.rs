//! Level exit: a door, or the princess on the final level

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::level::{GoalData, GoalKind};

pub const DOOR_SIZE: Vec2 = Vec2::new(32.0, 64.0);
pub const PRINCESS_SIZE: Vec2 = Vec2::new(32.0, 32.0);
const PRINCESS_BOB_AMPLITUDE: f32 = 4.0;
const PRINCESS_BOB_SPEED: f32 = 0.003;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub kind: GoalKind,
    pub body: Body,
    anchor: Vec2,
    pub activated: bool,
}

impl Goal {
    pub fn new(data: &GoalData) -> Self {
        let size = match data.kind {
            GoalKind::Door => DOOR_SIZE,
            GoalKind::Princess => PRINCESS_SIZE,
        };
        Self {
            kind: data.kind,
            body: Body::new(data.x, data.y, size.x, size.y),
            anchor: Vec2::new(data.x, data.y),
            activated: false,
        }
    }

    /// Doors stand still; the princess hovers
    pub fn update(&mut self, time_ms: f32) {
        if self.kind == GoalKind::Princess {
            self.body.pos.y =
                self.anchor.y + (time_ms * PRINCESS_BOB_SPEED).sin() * PRINCESS_BOB_AMPLITUDE;
        }
    }

    /// Mark as reached; true only the first time
    pub fn activate(&mut self) -> bool {
        !std::mem::replace(&mut self.activated, true)
    }
}
