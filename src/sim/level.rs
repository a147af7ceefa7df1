//! Difficulty ramp, kill thresholds and the boss

use super::state::World;
use crate::consts::{LEVEL_TRANSITION_SECS, MAX_LEVEL, PLAYFIELD_WIDTH};
use crate::entities::{Enemy, EnemyKind, GameState};
use rand::Rng;

/// Constants for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProfile {
    /// Units per reference frame before the enemy kind's multiplier
    pub base_enemy_speed: f32,
    /// Seconds between regular spawns
    pub spawn_interval: f32,
    /// Kills needed to move on; the last level has none
    pub kills_to_advance: Option<u32>,
    /// Percent chances of normal, fast and tank spawns
    pub spawn_weights: [u32; 3],
}

pub const LEVELS: [LevelProfile; 3] = [
    LevelProfile {
        base_enemy_speed: 2.0,
        spawn_interval: 1.2,
        kills_to_advance: Some(15),
        spawn_weights: [70, 20, 10],
    },
    LevelProfile {
        base_enemy_speed: 3.5,
        spawn_interval: 0.9,
        kills_to_advance: Some(25),
        spawn_weights: [50, 30, 20],
    },
    LevelProfile {
        base_enemy_speed: 5.0,
        spawn_interval: 0.6,
        kills_to_advance: None,
        spawn_weights: [30, 40, 30],
    },
];

pub fn profile(level: u32) -> &'static LevelProfile {
    &LEVELS[(level.clamp(1, MAX_LEVEL) - 1) as usize]
}

/// Map a roll in `0..100` onto an enemy kind using the level's weights
pub fn pick_enemy_kind(level: u32, roll: u32) -> EnemyKind {
    let [normal, fast, _] = profile(level).spawn_weights;
    if roll < normal {
        EnemyKind::Normal
    } else if roll < normal + fast {
        EnemyKind::Fast
    } else {
        EnemyKind::Tank
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelState {
    pub current: u32,
    /// Kills since the level started
    pub kills: u32,
    /// Seconds left in the level transition
    pub transition_timer: f32,
}

impl LevelState {
    pub fn new() -> Self {
        Self {
            current: 1,
            kills: 0,
            transition_timer: 0.0,
        }
    }

    pub fn profile(&self) -> &'static LevelProfile {
        profile(self.current)
    }

    pub fn threshold_reached(&self) -> bool {
        self.current < MAX_LEVEL
            && self
                .profile()
                .kills_to_advance
                .is_some_and(|needed| self.kills >= needed)
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Switch to `level` and start its transition: clears enemies and
    /// bullets, and brings in the boss on the last level.
    pub fn enter_level(&mut self, level: u32) {
        let level = level.clamp(1, MAX_LEVEL);
        self.level.current = level;
        self.level.kills = 0;
        self.level.transition_timer = LEVEL_TRANSITION_SECS;
        self.enemies.clear();
        self.bullets.clear();
        self.state = GameState::LevelTransition;
        log::info!("Entering level {level}");

        if level == MAX_LEVEL {
            self.enemies.push(Enemy::boss());
            log::info!("Boss spawned");
        }
    }

    pub(crate) fn check_level_advance(&mut self) {
        if self.state == GameState::Playing && self.level.threshold_reached() {
            self.enter_level(self.level.current + 1);
        }
    }

    /// Count down the transition; nothing else moves meanwhile
    pub(crate) fn update_transition(&mut self, dt: f32) {
        self.level.transition_timer -= dt;
        if self.level.transition_timer <= 0.0 {
            self.level.transition_timer = 0.0;
            self.state = GameState::Playing;
        }
    }

    pub(crate) fn spawn_enemy(&mut self) {
        let level = self.level.current;
        let kind = pick_enemy_kind(level, self.rng.random_range(0..100));
        let x = self.rng.random_range(0.0..PLAYFIELD_WIDTH - 50.0);
        self.enemies.push(Enemy::new(kind, x, -50.0, level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_constants() {
        assert_eq!(profile(1).base_enemy_speed, 2.0);
        assert_eq!(profile(2).spawn_interval, 0.9);
        assert_eq!(profile(2).kills_to_advance, Some(25));
        assert_eq!(profile(3).kills_to_advance, None);
        assert_eq!(profile(7), profile(3));
    }

    #[test]
    fn test_pick_enemy_kind_weights() {
        assert_eq!(pick_enemy_kind(1, 0), EnemyKind::Normal);
        assert_eq!(pick_enemy_kind(1, 69), EnemyKind::Normal);
        assert_eq!(pick_enemy_kind(1, 70), EnemyKind::Fast);
        assert_eq!(pick_enemy_kind(1, 90), EnemyKind::Tank);
        assert_eq!(pick_enemy_kind(2, 79), EnemyKind::Fast);
        assert_eq!(pick_enemy_kind(3, 29), EnemyKind::Normal);
        assert_eq!(pick_enemy_kind(3, 70), EnemyKind::Tank);
    }

    #[test]
    fn test_threshold() {
        let mut level = LevelState::new();
        level.kills = 14;
        assert!(!level.threshold_reached());
        level.kills = 15;
        assert!(level.threshold_reached());

        level.current = 3;
        level.kills = 10_000;
        assert!(!level.threshold_reached());
    }

    #[test]
    fn test_enter_final_level_spawns_single_boss() {
        let mut world = World::new(3);
        world.spawn_enemy();
        world.enter_level(3);
        assert_eq!(world.state, GameState::LevelTransition);
        assert_eq!(world.enemies.len(), 1);
        assert!(world.enemies[0].is_boss());
        assert_eq!(world.enemies[0].health, 100);
    }

    #[test]
    fn test_transition_countdown() {
        let mut world = World::new(3);
        world.enter_level(2);
        world.update_transition(1.5);
        assert_eq!(world.state, GameState::LevelTransition);
        world.update_transition(1.5);
        assert_eq!(world.state, GameState::Playing);
    }

    #[test]
    fn test_spawned_enemy_above_playfield() {
        let mut world = World::new(11);
        for _ in 0..20 {
            world.spawn_enemy();
        }
        for enemy in &world.enemies {
            assert_eq!(enemy.pos.y, -50.0);
            assert!(enemy.pos.x >= 0.0 && enemy.pos.x < 950.0);
            assert!(!enemy.is_boss());
        }
    }
}
