//! Neon Assault - a terminal arcade shooter
//!
//! Core modules:
//! - `sim`: the frame simulation (spawning, movement, collisions, levels)
//! - `entities`: player, bullets, enemies, power-ups and cosmetic effects
//! - `input`: key polling translated into per-frame intents
//! - `renderer` / `hud`: read-only presentation of the world
//! - `settings` / `assets`: optional configuration and the HUD font

pub mod app;
pub mod assets;
pub mod color;
pub mod entities;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

// Library exports for testing
pub use entities::{
    Bullet, Enemy, EnemyKind, GameState, HealthTier, Particle, Player, PowerUp, PowerUpKind,
};
pub use settings::Settings;
pub use sim::{TickInput, World, tick};

/// Game configuration constants
pub mod consts {
    /// Logical playfield size; the renderer scales it to the terminal.
    pub const PLAYFIELD_WIDTH: f32 = 1000.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Speeds are tuned in units per frame at this rate and scaled by `dt`.
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Longest step the app will feed the simulation after a stall
    pub const MAX_FRAME_DT: f32 = 0.25;

    pub const STARTING_LIVES: u32 = 3;
    /// Seconds without a kill before the combo resets
    pub const COMBO_WINDOW: f32 = 2.0;
    pub const LEVEL_TRANSITION_SECS: f32 = 3.0;
    pub const MAX_LEVEL: u32 = 3;

    pub const POWER_UP_DROP_CHANCE: f64 = 0.35;
    pub const BOSS_KILL_BONUS: u64 = 5000;

    pub const STAR_COUNT: usize = 200;
    pub const SCREEN_SHAKE_SECS: f32 = 0.3;
}
