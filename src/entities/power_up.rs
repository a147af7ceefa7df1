use glam::Vec2;

use crate::color::Rgba;
use crate::consts::PLAYFIELD_HEIGHT;
use crate::sim::Aabb;

const RADIUS: f32 = 15.0;
/// Units per reference frame
const FALL_SPEED: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    RapidFire,
    Shield,
    TripleShot,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::TripleShot,
    ];

    /// Seconds the effect lasts after pickup
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::RapidFire => 8.0,
            PowerUpKind::Shield => 10.0,
            PowerUpKind::TripleShot => 12.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::RapidFire => "RAPID FIRE",
            PowerUpKind::Shield => "SHIELD ACTIVE",
            PowerUpKind::TripleShot => "TRIPLE SHOT",
        }
    }

    pub fn color(&self) -> Rgba {
        match self {
            PowerUpKind::RapidFire => Rgba::new(255, 100, 0, 200),
            PowerUpKind::Shield => Rgba::new(0, 200, 255, 200),
            PowerUpKind::TripleShot => Rgba::new(255, 255, 0, 200),
        }
    }

    pub fn get_char(&self) -> char {
        match self {
            PowerUpKind::RapidFire => 'R',
            PowerUpKind::Shield => 'S',
            PowerUpKind::TripleShot => 'T',
        }
    }
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    /// Center of the pickup
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Seconds alive, drives the pulse
    pub timer: f32,
    pub scale: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            timer: 0.0,
            scale: 1.0,
        }
    }

    pub fn update(&mut self, dt: f32, frames: f32) {
        self.pos.y += FALL_SPEED * frames;
        self.timer += dt;
        self.scale = 1.0 + (self.timer * 10.0).sin() * 0.2;
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.y > PLAYFIELD_HEIGHT
    }

    pub fn radius(&self) -> f32 {
        RADIUS * self.scale
    }

    pub fn bounds(&self) -> Aabb {
        let r = Vec2::splat(self.radius());
        Aabb::new(self.pos - r, self.pos + r)
    }
}
