use glam::Vec2;

use crate::sim::Aabb;

/// Upward speed in units per reference frame
pub const BULLET_SPEED: f32 = 12.0;
pub const BULLET_SIZE: f32 = 8.0;
/// Bullets are dropped once they are this far above the playfield
const OFFSCREEN_MARGIN: f32 = 20.0;

/// A player bullet. Bullets only ever travel straight up.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    pub fn update(&mut self, frames: f32) {
        self.pos.y -= BULLET_SPEED * frames;
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.y < -OFFSCREEN_MARGIN
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::splat(BULLET_SIZE))
    }

    /// Where the muzzle flash for this bullet is drawn
    pub fn muzzle_point(&self) -> Vec2 {
        self.pos + Vec2::new(3.0, 10.0)
    }
}
