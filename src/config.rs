//! Game configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! `BLOCKFALL_*` environment variables. Command-line flags are applied last
//! by the binary.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Timing;
use crate::types::{DROP_INTERVAL_MS, GAME_OVER_DELAY_MS, TICK_MS};

pub const ENV_CONFIG: &str = "BLOCKFALL_CONFIG";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_SOUND: &str = "BLOCKFALL_SOUND";
pub const ENV_LOG: &str = "BLOCKFALL_LOG";

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

/// Which sound sink the binary installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundMode {
    Off,
    #[default]
    Bell,
    Log,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sound mode {0:?} (expected off, bell or log)")]
pub struct UnknownSoundMode(pub String);

impl FromStr for SoundMode {
    type Err = UnknownSoundMode;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "mute" | "none" => Ok(SoundMode::Off),
            "bell" => Ok(SoundMode::Bell),
            "log" => Ok(SoundMode::Log),
            _ => Err(UnknownSoundMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    pub drop_interval_ms: u32,
    pub game_over_delay_ms: u32,
    /// Frame and input-poll interval of the binary.
    pub tick_ms: u32,
    pub sound: SoundMode,
    /// Log destination; no logging without one.
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            drop_interval_ms: DROP_INTERVAL_MS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,
            tick_ms: TICK_MS,
            sound: SoundMode::default(),
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the config file, then the environment, validated.
    ///
    /// `config_path` takes precedence over `BLOCKFALL_CONFIG`.
    pub fn load<F>(config_path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_path = env(ENV_CONFIG).map(PathBuf::from);
        let mut config = match config_path.or(env_path.as_deref()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BLOCKFALL_SEED`, `BLOCKFALL_SOUND` and `BLOCKFALL_LOG`.
    pub fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env(ENV_SEED) {
            let seed = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_SEED,
                    value: value.clone(),
                })?;
            self.seed = Some(seed);
        }
        if let Some(value) = env(ENV_SOUND) {
            self.sound = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_SOUND,
                value: value.clone(),
            })?;
        }
        if let Some(value) = env(ENV_LOG) {
            if !value.is_empty() {
                self.log_file = Some(PathBuf::from(value));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("drop_interval_ms"));
        }
        if self.game_over_delay_ms == 0 {
            return Err(ConfigError::ZeroInterval("game_over_delay_ms"));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroInterval("tick_ms"));
        }
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            drop_interval_ms: self.drop_interval_ms,
            game_over_delay_ms: self.game_over_delay_ms,
        }
    }

    /// The configured seed, or one taken from the system clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
