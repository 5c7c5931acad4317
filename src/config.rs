//! Runtime configuration and gameplay tuning.
//!
//! Values come from built-in defaults, overridden by `ISOPAC_*` environment
//! variables. Nested tuning keys use a double underscore, e.g.
//! `ISOPAC_TUNING__SCARE_SECONDS=3`.

use std::path::PathBuf;

use figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::constants::{ghost, speed, STARTING_LIVES, TICKS_PER_SECOND};
use crate::entity::ghost::GhostKind;
use crate::error::ConfigError;

/// Gameplay constants collected in one place so tests can shorten them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ticks_per_second: u32,
    pub pacman_seconds_per_cell: f32,
    pub ghost_seconds_per_cell: f32,
    pub chase_seconds: u32,
    pub opportunist_chase_seconds: u32,
    pub scatter_seconds: u32,
    pub scare_seconds: u32,
    pub ambush_lookahead: usize,
    pub opportunist_threshold: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,
            pacman_seconds_per_cell: speed::PACMAN_SECONDS_PER_CELL,
            ghost_seconds_per_cell: speed::GHOST_SECONDS_PER_CELL,
            chase_seconds: ghost::CHASE_SECONDS,
            opportunist_chase_seconds: ghost::OPPORTUNIST_CHASE_SECONDS,
            scatter_seconds: ghost::SCATTER_SECONDS,
            scare_seconds: ghost::SCARE_SECONDS,
            ambush_lookahead: ghost::AMBUSH_LOOKAHEAD,
            opportunist_threshold: ghost::OPPORTUNIST_THRESHOLD,
        }
    }
}

impl Tuning {
    pub fn pacman_frames_per_cell(&self) -> f32 {
        self.pacman_seconds_per_cell * self.ticks_per_second as f32
    }

    pub fn ghost_frames_per_cell(&self) -> f32 {
        self.ghost_seconds_per_cell * self.ticks_per_second as f32
    }

    /// Ticks a ghost of the given kind spends in chase mode before scattering.
    pub fn chase_ticks(&self, kind: GhostKind) -> u32 {
        let seconds = match kind {
            GhostKind::Opportunist => self.opportunist_chase_seconds,
            _ => self.chase_seconds,
        };
        seconds * self.ticks_per_second
    }

    pub fn scatter_ticks(&self) -> u32 {
        self.scatter_seconds * self.ticks_per_second
    }

    pub fn scare_ticks(&self) -> u32 {
        self.scare_seconds * self.ticks_per_second
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct Config {
    /// Name the final score is stored under; a single word.
    pub player_name: String,
    /// Name of an embedded level, or a path to a level file.
    pub level: String,
    pub scoreboard_path: PathBuf,
    /// Seed for every random decision; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub lives: u32,
    /// Tick budget of the attract-mode demo.
    pub demo_ticks: u64,
    pub tuning: Tuning,
}

/// Configuration as read from the providers, before validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_player_name")]
    player_name: String,
    #[serde(default = "default_level")]
    level: String,
    #[serde(default = "default_scoreboard_path")]
    scoreboard_path: PathBuf,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_lives")]
    lives: u32,
    #[serde(default = "default_demo_ticks")]
    demo_ticks: u64,
    #[serde(default)]
    tuning: Tuning,
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let player_name = raw.player_name.trim().to_string();
        if player_name.is_empty() || player_name.split_whitespace().count() != 1 {
            return Err(ConfigError::Invalid(format!(
                "player name must be a single word, got {:?}",
                raw.player_name
            )));
        }
        if raw.lives == 0 {
            return Err(ConfigError::Invalid("lives must be at least 1".into()));
        }
        if raw.tuning.ticks_per_second == 0 {
            return Err(ConfigError::Invalid("ticks_per_second must be at least 1".into()));
        }
        // A cell must take at least one tick to cross.
        for (name, frames) in [
            ("pacman_seconds_per_cell", raw.tuning.pacman_frames_per_cell()),
            ("ghost_seconds_per_cell", raw.tuning.ghost_frames_per_cell()),
        ] {
            if frames.is_nan() || frames < 1.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must last at least one tick, got {frames} ticks"
                )));
            }
        }

        Ok(Config {
            player_name,
            level: raw.level,
            scoreboard_path: raw.scoreboard_path,
            seed: raw.seed,
            lives: raw.lives,
            demo_ticks: raw.demo_ticks,
            tuning: raw.tuning,
        })
    }
}

fn default_player_name() -> String {
    "player".into()
}

fn default_level() -> String {
    "classic".into()
}

fn default_scoreboard_path() -> PathBuf {
    PathBuf::from("scoreboard.txt")
}

fn default_lives() -> u32 {
    STARTING_LIVES
}

fn default_demo_ticks() -> u64 {
    TICKS_PER_SECOND as u64 * 120
}

/// The provider chain used by [`load_config`].
pub fn figment() -> Figment {
    Figment::new().merge(Env::prefixed("ISOPAC_").split("__"))
}

/// Loads configuration from the environment.
///
/// # Errors
///
/// Returns an error if a value has the wrong type or fails validation.
pub fn load_config() -> Result<Config, ConfigError> {
    extract(figment())
}

/// Extracts and validates a configuration from any figment.
pub fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment.extract().map_err(|e| ConfigError::Extract(Box::new(e)))
}
