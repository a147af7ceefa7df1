//! Runtime settings
//!
//! Read from the JSON file named by `NEON_ASSAULT_SETTINGS`, or
//! `neon-assault.json` in the working directory. Missing keys take their
//! defaults. Difficulty is fixed and not configurable here.

use color_eyre::{Result, eyre::WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const SETTINGS_ENV_VAR: &str = "NEON_ASSAULT_SETTINGS";
pub const DEFAULT_SETTINGS_FILE: &str = "neon-assault.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Font that enables HUD text
    pub font_path: PathBuf,
    /// Frame-rate cap
    pub target_fps: u32,
    /// Fixed RNG seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,
    /// Where log output goes; the terminal is taken by the game
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
            target_fps: 60,
            seed: None,
            log_file: PathBuf::from("neon-assault.log"),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("parsing settings")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&json)
    }

    /// The settings file to read, if any
    pub fn resolve_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(SETTINGS_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        let default = PathBuf::from(DEFAULT_SETTINGS_FILE);
        default.exists().then_some(default)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }

    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
