//! Runtime configuration, read from an optional TOML file.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::consts::TARGET_FPS;
use crate::error::{GameError, GameResult};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "GRID_INVADERS_CONFIG";
/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "grid_invaders.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendered frames per second
    pub target_fps: u32,
    /// Sleep between two loop iterations; must stay below the frame interval
    pub schedule_interval_ms: u64,
    /// Arena units covered by one terminal column
    pub cell_width: f64,
    /// Arena units covered by one terminal row
    pub cell_height: f64,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    /// Where log records go (the terminal is in raw mode while playing)
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            schedule_interval_ms: 4,
            cell_width: 5.0,
            cell_height: 10.0,
            seed: None,
            log_file: PathBuf::from("grid_invaders.log"),
        }
    }
}

impl Config {
    /// Load from `$GRID_INVADERS_CONFIG`, else `./grid_invaders.toml`, else
    /// defaults.
    pub fn load() -> GameResult<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> GameResult<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }

    pub fn schedule_interval(&self) -> Duration {
        Duration::from_millis(self.schedule_interval_ms)
    }

    /// Terminal grid size needed to show the whole arena.
    pub fn grid_size(&self) -> (u16, u16) {
        use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
        let cols = (ARENA_WIDTH / self.cell_width.max(1.0)).ceil() as u16;
        let rows = (ARENA_HEIGHT / self.cell_height.max(1.0)).ceil() as u16;
        (cols, rows)
    }
}
