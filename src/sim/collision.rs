//! Collision detection and scoring

use glam::Vec2;
use rand::Rng;

use super::state::World;
use crate::consts::{BOSS_KILL_BONUS, COMBO_WINDOW, POWER_UP_DROP_CHANCE};
use crate::entities::{Enemy, PowerUp, PowerUpKind};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos, pos + size)
    }

    /// Boxes that only touch along an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Run the full collision pass for one tick
pub(crate) fn resolve(world: &mut World) {
    resolve_bullet_hits(world);
    sweep_destroyed(world);
    collect_power_ups(world);
}

/// Each bullet hits at most one enemy, the first live one it overlaps.
/// Destroyed enemies stay in place until [`sweep_destroyed`].
fn resolve_bullet_hits(world: &mut World) {
    let mut kills: Vec<Enemy> = Vec::new();
    let mut boss_down = false;

    let enemies = &mut world.enemies;
    world.bullets.retain(|bullet| {
        if boss_down {
            return true;
        }
        let bounds = bullet.bounds();
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| !e.destroyed && e.bounds().overlaps(&bounds))
        else {
            return true;
        };

        if enemy.hit() {
            boss_down = enemy.is_boss();
            kills.push(enemy.clone());
        }
        false
    });

    for enemy in &kills {
        award_kill(world, enemy);
    }
}

fn award_kill(world: &mut World, enemy: &Enemy) {
    world.explode(enemy.pos, enemy.color());

    if enemy.is_boss() {
        world.score += BOSS_KILL_BONUS;
        log::info!("Boss destroyed");
        world.end_run();
        return;
    }

    world.score += enemy.points(world.level.current, world.combo);
    world.combo += 1;
    world.combo_timer = COMBO_WINDOW;
    world.level.kills += 1;

    if world.rng.random_bool(POWER_UP_DROP_CHANCE) {
        let kind = PowerUpKind::ALL[world.rng.random_range(0..PowerUpKind::ALL.len())];
        world.power_ups.push(PowerUp::new(enemy.pos, kind));
    }
}

/// Remove every enemy marked destroyed, keeping the order of the rest
fn sweep_destroyed(world: &mut World) {
    world.enemies.retain(|e| !e.destroyed);
}

fn collect_power_ups(world: &mut World) {
    let player_bounds = world.player.bounds();
    let player = &mut world.player;
    world.power_ups.retain(|power_up| {
        if power_up.bounds().overlaps(&player_bounds) {
            log::debug!("Picked up {}", power_up.kind.label());
            player.apply_power_up(power_up.kind);
            false
        } else {
            true
        }
    });
}
