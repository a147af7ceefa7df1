use glam::Vec2;

use crate::color::Rgba;
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
    Boss,
}

/// How an enemy's descent speed is derived
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemySpeed {
    /// Multiplier on the level's base enemy speed
    Scaled(f32),
    /// Units per reference frame, whatever the level
    Fixed(f32),
}

/// Per-kind constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub size: Vec2,
    pub speed: EnemySpeed,
    /// Points before level and combo multipliers; bosses pay a flat bonus instead
    pub base_points: u64,
    pub color: Rgba,
    pub base_health: u32,
    pub health_per_level: u32,
}

const NORMAL: EnemyProfile = EnemyProfile {
    size: Vec2::new(40.0, 30.0),
    speed: EnemySpeed::Scaled(1.0),
    base_points: 10,
    color: Rgba::opaque(255, 50, 50),
    base_health: 1,
    health_per_level: 0,
};

const FAST: EnemyProfile = EnemyProfile {
    size: Vec2::new(30.0, 25.0),
    speed: EnemySpeed::Scaled(1.3),
    base_points: 15,
    color: Rgba::opaque(255, 150, 0),
    base_health: 1,
    health_per_level: 0,
};

const TANK: EnemyProfile = EnemyProfile {
    size: Vec2::new(50.0, 40.0),
    speed: EnemySpeed::Scaled(0.6),
    base_points: 30,
    color: Rgba::opaque(150, 0, 255),
    base_health: 3,
    health_per_level: 1,
};

const BOSS: EnemyProfile = EnemyProfile {
    size: Vec2::new(180.0, 120.0),
    speed: EnemySpeed::Fixed(0.9),
    base_points: 0,
    color: Rgba::opaque(180, 50, 255),
    base_health: 100,
    health_per_level: 0,
};

impl EnemyKind {
    pub fn profile(&self) -> &'static EnemyProfile {
        match self {
            EnemyKind::Normal => &NORMAL,
            EnemyKind::Fast => &FAST,
            EnemyKind::Tank => &TANK,
            EnemyKind::Boss => &BOSS,
        }
    }

    pub fn max_health(&self, level: u32) -> u32 {
        let profile = self.profile();
        profile.base_health + profile.health_per_level * level
    }
}

/// Health-bar color tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    Green,
    Yellow,
    Red,
}

impl HealthTier {
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio > 0.6 {
            HealthTier::Green
        } else if ratio > 0.3 {
            HealthTier::Yellow
        } else {
            HealthTier::Red
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBar {
    /// Fill fraction in `[0, 1]`
    pub ratio: f32,
    pub tier: HealthTier,
}

impl HealthBar {
    pub const FULL: HealthBar = HealthBar {
        ratio: 1.0,
        tier: HealthTier::Green,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub health: u32,
    pub max_health: u32,
    pub health_bar: HealthBar,
    /// Set when health reaches zero; the sweep after the collision pass removes it
    pub destroyed: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f32, y: f32, level: u32) -> Self {
        let max_health = kind.max_health(level);
        Self {
            pos: Vec2::new(x, y),
            kind,
            health: max_health,
            max_health,
            health_bar: HealthBar::FULL,
            destroyed: false,
        }
    }

    /// The boss enters above the top edge, horizontally centered
    pub fn boss() -> Self {
        let size = BOSS.size;
        Self::new(
            EnemyKind::Boss,
            PLAYFIELD_WIDTH / 2.0 - size.x / 2.0,
            -150.0,
            0,
        )
    }

    pub fn profile(&self) -> &'static EnemyProfile {
        self.kind.profile()
    }

    pub fn size(&self) -> Vec2 {
        self.profile().size
    }

    pub fn color(&self) -> Rgba {
        self.profile().color
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }

    /// Descent speed in units per reference frame
    pub fn speed(&self, base_speed: f32) -> f32 {
        match self.profile().speed {
            EnemySpeed::Scaled(factor) => base_speed * factor,
            EnemySpeed::Fixed(speed) => speed,
        }
    }

    pub fn update(&mut self, base_speed: f32, frames: f32) {
        self.pos.y += self.speed(base_speed) * frames;
        self.refresh_health_bar();
    }

    pub fn refresh_health_bar(&mut self) {
        let ratio = if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        };
        self.health_bar = HealthBar {
            ratio,
            tier: HealthTier::from_ratio(ratio),
        };
    }

    /// Take one hit. Returns true when this hit destroyed the enemy.
    pub fn hit(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.destroyed = true;
        }
        self.destroyed
    }

    /// Past the bottom edge of the playfield
    pub fn has_escaped(&self) -> bool {
        self.pos.y > PLAYFIELD_HEIGHT
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size())
    }

    /// Score for this kill at `level` with `combo` kills already chained
    pub fn points(&self, level: u32, combo: u32) -> u64 {
        self.profile().base_points * level as u64 * (combo as u64 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_health_by_kind() {
        assert_eq!(Enemy::new(EnemyKind::Normal, 0.0, 0.0, 1).health, 1);
        assert_eq!(Enemy::new(EnemyKind::Fast, 0.0, 0.0, 2).health, 1);
        assert_eq!(Enemy::new(EnemyKind::Tank, 0.0, 0.0, 1).health, 4);
        assert_eq!(Enemy::new(EnemyKind::Tank, 0.0, 0.0, 3).health, 6);
        assert_eq!(Enemy::boss().health, 100);
    }

    #[test]
    fn test_enemy_points_by_kind() {
        let normal = Enemy::new(EnemyKind::Normal, 0.0, 0.0, 1);
        assert_eq!(normal.points(1, 0), 10);

        let fast = Enemy::new(EnemyKind::Fast, 0.0, 0.0, 2);
        assert_eq!(fast.points(2, 0), 30);

        let tank = Enemy::new(EnemyKind::Tank, 0.0, 0.0, 3);
        assert_eq!(tank.points(3, 2), 270);
    }

    #[test]
    fn test_enemy_speed_by_kind() {
        let base = 2.0;
        assert_eq!(Enemy::new(EnemyKind::Normal, 0.0, 0.0, 1).speed(base), 2.0);
        assert!((Enemy::new(EnemyKind::Fast, 0.0, 0.0, 1).speed(base) - 2.6).abs() < 1e-6);
        assert!((Enemy::new(EnemyKind::Tank, 0.0, 0.0, 1).speed(base) - 1.2).abs() < 1e-6);
        assert_eq!(Enemy::boss().speed(5.0), 0.9);
    }

    #[test]
    fn test_boss_spawn_position() {
        let boss = Enemy::boss();
        assert_eq!(boss.pos, Vec2::new(410.0, -150.0));
        assert!(boss.is_boss());
    }

    #[test]
    fn test_enemy_hit_marks_destroyed_once() {
        let mut enemy = Enemy::new(EnemyKind::Normal, 0.0, 0.0, 1);
        assert!(enemy.hit());
        assert!(enemy.destroyed);
        assert!(!enemy.hit());
        assert_eq!(enemy.health, 0);
    }

    #[test]
    fn test_health_bar_tiers() {
        let mut tank = Enemy::new(EnemyKind::Tank, 0.0, 0.0, 2);
        assert_eq!(tank.max_health, 5);
        tank.refresh_health_bar();
        assert_eq!(tank.health_bar.tier, HealthTier::Green);

        tank.hit();
        tank.refresh_health_bar();
        // 4/5 = 0.8
        assert_eq!(tank.health_bar.tier, HealthTier::Green);

        tank.hit();
        tank.refresh_health_bar();
        // 3/5 = 0.6 is not above 0.6
        assert_eq!(tank.health_bar.tier, HealthTier::Yellow);

        tank.hit();
        tank.hit();
        tank.refresh_health_bar();
        assert_eq!(tank.health_bar.tier, HealthTier::Red);
        assert!((tank.health_bar.ratio - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_enemy_update_moves_down() {
        let mut enemy = Enemy::new(EnemyKind::Normal, 10.0, 0.0, 1);
        enemy.update(2.0, 1.0);
        assert_eq!(enemy.pos.y, 2.0);
        assert!(!enemy.has_escaped());

        enemy.pos.y = 800.5;
        assert!(enemy.has_escaped());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_health_never_increases(
                kind in prop::sample::select(vec![EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Tank, EnemyKind::Boss]),
                level in 1u32..=3,
                hits in 0usize..150
            ) {
                let mut enemy = Enemy::new(kind, 0.0, 0.0, level);
                let mut last = enemy.health;
                let mut kills = 0;
                for _ in 0..hits {
                    if enemy.hit() {
                        kills += 1;
                    }
                    prop_assert!(enemy.health <= last);
                    last = enemy.health;
                }
                prop_assert!(kills <= 1);
            }
        }
    }
}
