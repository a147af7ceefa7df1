use glam::Vec2;

use super::bullet::Bullet;
use super::power_up::PowerUpKind;
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::Aabb;

pub const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 50.0);
/// Units per reference frame
pub const PLAYER_SPEED: f32 = 8.0;
/// Seconds between shots
pub const FIRE_INTERVAL: f32 = 0.15;
const RAPID_FIRE_FACTOR: f32 = 0.4;
const TRIPLE_SHOT_SPREAD: f32 = 15.0;

/// A power-up flag with its own countdown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerTimer {
    pub active: bool,
    pub remaining: f32,
}

impl PowerTimer {
    /// Turn on for `duration` seconds. Picking up an active power-up
    /// restarts the full duration.
    pub fn activate(&mut self, duration: f32) {
        self.active = true;
        self.remaining = duration;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.active = false;
            self.remaining = 0.0;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the ship
    pub pos: Vec2,
    pub shield: PowerTimer,
    pub triple_shot: PowerTimer,
    pub rapid_fire: PowerTimer,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            shield: PowerTimer::default(),
            triple_shot: PowerTimer::default(),
            rapid_fire: PowerTimer::default(),
            fire_cooldown: 0.0,
        }
    }

    /// Player at the bottom-center spawn point
    pub fn at_start() -> Self {
        Self::new(PLAYFIELD_WIDTH / 2.0 - 25.0, PLAYFIELD_HEIGHT - 100.0)
    }

    pub fn max_pos() -> Vec2 {
        Vec2::new(PLAYFIELD_WIDTH - PLAYER_SIZE.x, PLAYFIELD_HEIGHT - 60.0)
    }

    /// Move along the given axes (-1, 0 or 1 each), keeping the ship on the playfield
    pub fn apply_movement(&mut self, move_x: i8, move_y: i8, frames: f32) {
        let dir = Vec2::new(move_x.signum() as f32, move_y.signum() as f32);
        let moved = self.pos + dir * PLAYER_SPEED * frames;
        self.pos = moved.clamp(Vec2::ZERO, Self::max_pos());
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    pub fn fire_interval(&self) -> f32 {
        if self.rapid_fire.active {
            FIRE_INTERVAL * RAPID_FIRE_FACTOR
        } else {
            FIRE_INTERVAL
        }
    }

    /// Attempts to fire bullet(s) if cooldown allows
    /// Returns the new bullets, or an empty vec while cooling down
    pub fn try_fire(&mut self) -> Vec<Bullet> {
        if !self.can_fire() {
            return vec![];
        }
        self.fire_cooldown = self.fire_interval();

        let x = self.pos.x + 22.0;
        let y = self.pos.y - 10.0;
        if self.triple_shot.active {
            (-1..=1)
                .map(|i| Bullet::new(x + i as f32 * TRIPLE_SHOT_SPREAD, y))
                .collect()
        } else {
            vec![Bullet::new(x, y)]
        }
    }

    /// Count down fire cooldown and power-up durations
    pub fn update_timers(&mut self, dt: f32) {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.rapid_fire.update(dt);
        self.shield.update(dt);
        self.triple_shot.update(dt);
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        let timer = match kind {
            PowerUpKind::RapidFire => &mut self.rapid_fire,
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::TripleShot => &mut self.triple_shot,
        };
        timer.activate(kind.duration());
    }

    pub fn has_shield(&self) -> bool {
        self.shield.active
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, PLAYER_SIZE)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + PLAYER_SIZE / 2.0
    }
}
