//! Per-frame simulation step

use rand::Rng;

use super::collision;
use super::state::World;
use crate::color::{NEON_CYAN, NEON_YELLOW, Rgba};
use crate::consts::REFERENCE_FPS;
use crate::entities::{GameState, TrailDot, create_muzzle_flash};

/// Intents for a single frame, produced by the input layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// -1 left, 1 right
    pub move_x: i8,
    /// -1 up, 1 down
    pub move_y: i8,
    /// Fire key held
    pub fire: bool,
    /// Restart pressed this frame
    pub restart: bool,
}

/// Advance the world by `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    match world.state {
        GameState::GameOver => {
            if input.restart {
                world.reset();
            }
            return;
        }
        GameState::LevelTransition => {
            world.update_transition(dt);
            return;
        }
        GameState::Playing => {}
    }

    let frames = dt * REFERENCE_FPS;

    // Player intents
    world
        .player
        .apply_movement(input.move_x, input.move_y, frames);
    if input.fire {
        fire(world);
    }

    // Timers
    world.player.update_timers(dt);
    world.combo_timer -= dt;
    if world.combo_timer <= 0.0 {
        world.combo = 0;
        world.combo_timer = 0.0;
    }
    world.shake.update(&mut world.rng, dt);

    // The boss holds back regular spawns until it is gone
    world.spawn_timer += dt;
    if world.spawn_timer >= world.level.profile().spawn_interval {
        if !world.boss_alive() {
            world.spawn_enemy();
        }
        world.spawn_timer = 0.0;
    }

    update_bullets(world, frames);
    update_trails(world);
    update_enemies(world, frames);
    if world.is_over() {
        return;
    }
    update_power_ups(world, dt, frames);

    collision::resolve(world);
    if world.is_over() {
        return;
    }
    world.check_level_advance();

    update_particles(world, dt, frames);
    update_stars(world, frames);
}

impl World {
    /// Value-style wrapper around [`tick`]
    pub fn advanced(mut self, input: &TickInput, dt: f32) -> Self {
        tick(&mut self, input, dt);
        self
    }
}

fn fire(world: &mut World) {
    let bullets = world.player.try_fire();
    if bullets.is_empty() {
        return;
    }
    let flash_color = if world.player.triple_shot.active {
        NEON_YELLOW
    } else {
        NEON_CYAN
    };
    for bullet in &bullets {
        let flash = create_muzzle_flash(&mut world.rng, bullet.muzzle_point(), flash_color);
        world.particles.extend(flash);
    }
    world.bullets.extend(bullets);
}

fn update_bullets(world: &mut World, frames: f32) {
    let trail_color = if world.player.triple_shot.active {
        Rgba::new(255, 255, 0, 100)
    } else {
        Rgba::new(0, 255, 255, 100)
    };

    let rng = &mut world.rng;
    let trails = &mut world.trails;
    world.bullets.retain_mut(|bullet| {
        bullet.update(frames);
        if rng.random_ratio(1, 3) {
            trails.push(TrailDot::new(bullet.pos, trail_color));
        }
        !bullet.is_out_of_bounds()
    });
}

fn update_trails(world: &mut World) {
    for dot in &mut world.trails {
        dot.update();
    }
    world.trails.retain(|dot| !dot.is_faded());
}

fn update_enemies(world: &mut World, frames: f32) {
    let base_speed = world.level.profile().base_enemy_speed;
    let mut escaped = Vec::new();
    world.enemies.retain_mut(|enemy| {
        enemy.update(base_speed, frames);
        if enemy.has_escaped() {
            escaped.push(enemy.pos);
            false
        } else {
            true
        }
    });

    for pos in escaped {
        world.enemy_escaped(pos);
    }
}

fn update_power_ups(world: &mut World, dt: f32, frames: f32) {
    for power_up in &mut world.power_ups {
        power_up.update(dt, frames);
    }
    world.power_ups.retain(|p| !p.is_out_of_bounds());
}

fn update_particles(world: &mut World, dt: f32, frames: f32) {
    for particle in &mut world.particles {
        particle.update(dt, frames);
    }
    world.particles.retain(|p| !p.is_dead());
}

fn update_stars(world: &mut World, frames: f32) {
    let level = world.level.current;
    let rng = &mut world.rng;
    for star in &mut world.stars {
        star.update(rng, level, frames);
    }
}
