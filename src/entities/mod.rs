mod bullet;
mod enemy;
mod game_state;
mod particle;
mod player;
mod power_up;
mod star;

// Re-export all public types
pub use bullet::{BULLET_SIZE, BULLET_SPEED, Bullet};
pub use enemy::{Enemy, EnemyKind, EnemyProfile, EnemySpeed, HealthBar, HealthTier};
pub use game_state::GameState;
pub use particle::{Particle, TrailDot, create_explosion_particles, create_muzzle_flash};
pub use player::{FIRE_INTERVAL, PLAYER_SIZE, PLAYER_SPEED, Player, PowerTimer};
pub use power_up::{PowerUp, PowerUpKind};
pub use star::{Star, create_starfield};
