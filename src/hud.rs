//! HUD strings derived from the world each frame

use crate::entities::{GameState, PowerUpKind};
use crate::sim::World;

/// Full-screen overlay shown on top of the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    LevelTransition {
        title: String,
        subtitle: &'static str,
    },
    GameOver {
        title: &'static str,
        prompt: &'static str,
        final_score: String,
        level_reached: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub lives: String,
    pub level: String,
    /// Only shown once more than one kill is chained
    pub combo: Option<String>,
    pub power_ups: Vec<&'static str>,
    pub overlay: Option<Overlay>,
}

impl HudText {
    pub fn from_world(world: &World) -> Self {
        let player = &world.player;
        let power_ups = PowerUpKind::ALL
            .iter()
            .filter(|kind| match kind {
                PowerUpKind::RapidFire => player.rapid_fire.active,
                PowerUpKind::Shield => player.shield.active,
                PowerUpKind::TripleShot => player.triple_shot.active,
            })
            .map(|kind| kind.label())
            .collect();

        let overlay = match world.state {
            GameState::Playing => None,
            GameState::LevelTransition => Some(Overlay::LevelTransition {
                title: format!("LEVEL {}", world.level.current),
                subtitle: "GET READY!",
            }),
            GameState::GameOver => Some(Overlay::GameOver {
                title: "GAME OVER",
                prompt: "Press R to Restart",
                final_score: format!("FINAL SCORE: {}", world.score),
                level_reached: format!("Level Reached: {}", world.level.current),
            }),
        };

        Self {
            score: format!("SCORE: {:08}", world.score),
            lives: format!("LIVES: {}", "♥".repeat(world.lives as usize)),
            level: format!("LEVEL: {}", world.level.current),
            combo: (world.combo > 1).then(|| format!("COMBO x{}", world.combo)),
            power_ups,
            overlay,
        }
    }
}
