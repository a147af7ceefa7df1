//! World state owned by the simulation

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::level::LevelState;
use crate::color::Rgba;
use crate::consts::*;
use crate::entities::{
    Bullet, Enemy, GameState, Particle, Player, PowerUp, Star, TrailDot,
    create_explosion_particles, create_starfield,
};

/// Camera shake left over from the last explosion
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenShake {
    /// Seconds of shake remaining
    pub timer: f32,
    /// Offset to apply to the whole scene this frame
    pub offset: Vec2,
}

impl ScreenShake {
    pub fn trigger(&mut self) {
        self.timer = SCREEN_SHAKE_SECS;
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, dt: f32) {
        if self.timer > 0.0 {
            self.timer -= dt;
            let strength = self.timer.max(0.0);
            self.offset = Vec2::new(
                rng.random_range(-10..10) as f32 * strength,
                rng.random_range(-10..10) as f32 * strength,
            );
        } else {
            self.timer = 0.0;
            self.offset = Vec2::ZERO;
        }
    }
}

/// Everything that changes while a run is in progress
#[derive(Debug, Clone)]
pub struct World {
    pub state: GameState,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub trails: Vec<TrailDot>,
    pub stars: Vec<Star>,
    pub level: LevelState,
    pub score: u64,
    pub lives: u32,
    pub combo: u32,
    /// Seconds left before the combo lapses
    pub combo_timer: f32,
    /// Seconds since the last spawn attempt
    pub spawn_timer: f32,
    pub shake: ScreenShake,
    pub rng: Pcg32,
}

impl World {
    /// A fresh run; the same seed replays the same run for the same inputs
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = create_starfield(&mut rng, STAR_COUNT);
        Self::fresh(rng, stars)
    }

    fn fresh(rng: Pcg32, stars: Vec<Star>) -> Self {
        Self {
            state: GameState::Playing,
            player: Player::at_start(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            trails: Vec::new(),
            stars,
            level: LevelState::new(),
            score: 0,
            lives: STARTING_LIVES,
            combo: 0,
            combo_timer: 0.0,
            spawn_timer: 0.0,
            shake: ScreenShake::default(),
            rng,
        }
    }

    /// Back to the initial state of a run. The starfield and RNG carry over.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        let stars = std::mem::take(&mut self.stars);
        *self = Self::fresh(rng, stars);
        log::info!("Run restarted");
    }

    pub fn boss(&self) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.is_boss() && !e.destroyed)
    }

    pub fn boss_alive(&self) -> bool {
        self.boss().is_some()
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub(crate) fn end_run(&mut self) {
        if self.state != GameState::GameOver {
            log::info!(
                "Game over at level {} with score {}",
                self.level.current,
                self.score
            );
        }
        self.state = GameState::GameOver;
    }

    /// Burst of particles plus a screen shake
    pub(crate) fn explode(&mut self, pos: Vec2, color: Rgba) {
        let particles = create_explosion_particles(&mut self.rng, pos, color);
        self.particles.extend(particles);
        self.shake.trigger();
    }

    /// An enemy got past the bottom edge
    pub(crate) fn enemy_escaped(&mut self, pos: Vec2) {
        if !self.player.has_shield() {
            self.lives = self.lives.saturating_sub(1);
            log::debug!("Enemy escaped, {} lives left", self.lives);
        }
        self.explode(pos, crate::color::RED);
        if self.lives == 0 {
            self.end_run();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_defaults() {
        let world = World::new(1);
        assert_eq!(world.state, GameState::Playing);
        assert_eq!(world.lives, 3);
        assert_eq!(world.score, 0);
        assert_eq!(world.level.current, 1);
        assert_eq!(world.stars.len(), STAR_COUNT);
        assert!(world.enemies.is_empty());
        assert!(!world.boss_alive());
    }

    #[test]
    fn test_escape_costs_life_unless_shielded() {
        let mut world = World::new(1);
        world.enemy_escaped(Vec2::new(100.0, 801.0));
        assert_eq!(world.lives, 2);
        assert!(!world.particles.is_empty());
        assert!(world.shake.timer > 0.0);

        world.player.shield.activate(10.0);
        world.enemy_escaped(Vec2::new(100.0, 801.0));
        assert_eq!(world.lives, 2);
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut world = World::new(1);
        world.lives = 1;
        world.enemy_escaped(Vec2::ZERO);
        assert_eq!(world.lives, 0);
        assert!(world.is_over());

        world.enemy_escaped(Vec2::ZERO);
        assert_eq!(world.lives, 0);
    }

    #[test]
    fn test_screen_shake_decays_to_zero() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut shake = ScreenShake::default();
        shake.trigger();
        shake.update(&mut rng, 0.1);
        assert!(shake.offset.x.abs() <= 10.0 * 0.2 + 1e-4);
        for _ in 0..5 {
            shake.update(&mut rng, 0.1);
        }
        assert_eq!(shake.offset, Vec2::ZERO);
        assert_eq!(shake.timer, 0.0);
    }
}
