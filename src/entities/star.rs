use glam::Vec2;
use rand::Rng;

use crate::color::Rgba;
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Background star, scrolled faster on later levels
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgba,
    /// Units per reference frame at level 2
    pub speed: f32,
}

impl Star {
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, level: u32, frames: f32) {
        self.pos.y += self.speed * level as f32 * 0.5 * frames;
        if self.pos.y > PLAYFIELD_HEIGHT {
            self.pos = Vec2::new(rng.random_range(0.0..PLAYFIELD_WIDTH), -5.0);
        }
    }
}

pub fn create_starfield<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| {
            let radius = rng.random_range(1..=3) as f32;
            let brightness = rng.random_range(55..=254);
            let alpha = rng.random_range(100..=249);
            Star {
                pos: Vec2::new(
                    rng.random_range(0.0..PLAYFIELD_WIDTH),
                    rng.random_range(0.0..PLAYFIELD_HEIGHT),
                ),
                radius,
                color: Rgba::new(brightness, brightness, 255, alpha),
                speed: radius * 0.5,
            }
        })
        .collect()
}
