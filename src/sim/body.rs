//! Base physics body shared by every moving entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{self, Contact, Rect};
use crate::frame_scale;

/// Tolerance for a resting contact (pixels)
pub const REST_EPSILON: f32 = 0.01;

/// Position, velocity and extent of an entity, plus its lifecycle flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    /// False once the entity is scheduled for removal
    pub active: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::new(width, height),
            grounded: false,
            active: true,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.rect().overlaps(&other.rect())
    }

    /// One Euler step: move with the current velocity, then fall.
    ///
    /// Position integrates the pre-gravity velocity; the jump arc depends on it.
    pub fn integrate(&mut self, dt_ms: f32, gravity: f32, max_fall_speed: f32) {
        let k = frame_scale(dt_ms);
        self.pos += self.vel * k;
        if !self.grounded {
            self.vel.y += gravity * k;
        }
        if self.vel.y > max_fall_speed {
            self.vel.y = max_fall_speed;
        }
    }

    /// Push out of a terrain tile, zeroing the blocked velocity component.
    ///
    /// Returns the contact side, if the body overlapped the tile.
    pub fn resolve_terrain(&mut self, tile: &Rect) -> Option<Contact> {
        let res = rect::resolve(&self.rect(), tile)?;
        self.pos = res.position;
        match res.contact {
            Contact::Left | Contact::Right => self.vel.x = 0.0,
            Contact::Top => {
                self.vel.y = 0.0;
                self.grounded = true;
            }
            Contact::Bottom => self.vel.y = 0.0,
        }
        Some(res.contact)
    }

    /// Resolve against every tile; true if the body ends up standing on one.
    ///
    /// A body that was pushed out last frame rests exactly on the surface and
    /// no longer overlaps, so a resting contact also counts as standing.
    pub fn resolve_all(&mut self, tiles: &[Rect]) -> bool {
        let mut landed = false;
        for tile in tiles {
            if let Some(contact) = self.resolve_terrain(tile) {
                landed |= contact.is_landing();
            }
        }
        if !landed && self.vel.y >= 0.0 && self.resting_on(tiles) {
            self.grounded = true;
            landed = true;
        }
        landed
    }

    /// Bottom edge touching the top of a tile it horizontally overlaps
    pub fn resting_on(&self, tiles: &[Rect]) -> bool {
        let r = self.rect();
        tiles.iter().any(|t| {
            r.x < t.right() && r.right() > t.x && (r.bottom() - t.y).abs() <= REST_EPSILON
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_MS, GRAVITY, MAX_FALL_SPEED};

    #[test]
    fn test_integrate_moves_before_gravity() {
        let mut body = Body::new(0.0, 0.0, 32.0, 32.0);
        body.vel = Vec2::new(2.0, -12.0);
        body.integrate(FRAME_MS, GRAVITY, MAX_FALL_SPEED);
        assert_eq!(body.pos, Vec2::new(2.0, -12.0));
        assert!((body.vel.y - (-11.5)).abs() < 1e-5);
    }

    #[test]
    fn test_grounded_body_has_no_gravity() {
        let mut body = Body::new(0.0, 0.0, 32.0, 32.0);
        body.grounded = true;
        body.integrate(FRAME_MS, GRAVITY, MAX_FALL_SPEED);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_fall_speed_clamped() {
        let mut body = Body::new(0.0, 0.0, 32.0, 32.0);
        body.vel.y = 14.9;
        body.integrate(FRAME_MS, GRAVITY, MAX_FALL_SPEED);
        assert_eq!(body.vel.y, MAX_FALL_SPEED);
    }

    #[test]
    fn test_landing_sets_grounded() {
        let tile = Rect::new(0.0, 100.0, 32.0, 32.0);
        let mut body = Body::new(0.0, 70.0, 32.0, 32.0);
        body.vel.y = 6.0;
        assert_eq!(body.resolve_terrain(&tile), Some(Contact::Top));
        assert!(body.grounded);
        assert_eq!(body.vel.y, 0.0);
        assert_eq!(body.pos.y, 68.0);
    }

    #[test]
    fn test_wall_zeroes_horizontal_only() {
        let tile = Rect::new(100.0, 0.0, 32.0, 32.0);
        let mut body = Body::new(70.0, 4.0, 32.0, 32.0);
        body.vel = Vec2::new(4.0, 3.0);
        assert_eq!(body.resolve_terrain(&tile), Some(Contact::Left));
        assert_eq!(body.vel, Vec2::new(0.0, 3.0));
        assert!(!body.grounded);
    }

    #[test]
    fn test_resting_contact_counts_as_standing() {
        let tiles = [Rect::new(0.0, 100.0, 32.0, 32.0)];
        let mut body = Body::new(10.0, 68.0, 32.0, 32.0);
        body.vel.y = GRAVITY;
        assert!(body.resolve_all(&tiles));
        assert!(body.grounded);

        // Rising through the resting height is not standing
        let mut body = Body::new(10.0, 68.0, 32.0, 32.0);
        body.vel.y = -4.0;
        assert!(!body.resolve_all(&tiles));
        assert!(!body.grounded);
    }
}
