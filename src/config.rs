//! Game configuration loaded from `hanoi.toml`, overridable from the command line.

use derive_getters::Getters;
use derive_more::{Display, Error};
use hanoi_core::{HanoiError, LaunchConfig, PegId, PlayMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "hanoi.toml";

/// Game settings.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Disks in the tower.
    #[serde(default = "default_disks")]
    disks: u8,

    /// Pegs on the board.
    #[serde(default = "default_pegs")]
    pegs: usize,

    /// Destination peg. Defaults to the last peg.
    #[serde(default)]
    target_peg: Option<PegId>,

    /// Manual or auto-solve.
    #[serde(default)]
    mode: PlayMode,

    /// Duration of one animated move, in milliseconds.
    #[serde(default = "default_animation_ms")]
    animation_ms: u64,

    /// Name written to the scores file.
    #[serde(default = "default_player_name")]
    player_name: String,

    /// Scores file location.
    #[serde(default = "default_scores_path")]
    scores_path: PathBuf,
}

fn default_disks() -> u8 {
    3
}

fn default_pegs() -> usize {
    3
}

fn default_animation_ms() -> u64 {
    400
}

fn default_player_name() -> String {
    "Player".to_string()
}

fn default_scores_path() -> PathBuf {
    PathBuf::from("hanoi_scores.json")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            disks: default_disks(),
            pegs: default_pegs(),
            target_peg: None,
            mode: PlayMode::default(),
            animation_ms: default_animation_ms(),
            player_name: default_player_name(),
            scores_path: default_scores_path(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Disk count.
    pub disks: Option<u8>,
    /// Peg count.
    pub pegs: Option<usize>,
    /// Target peg.
    pub target_peg: Option<PegId>,
    /// Play mode.
    pub mode: Option<PlayMode>,
    /// Animation step in milliseconds.
    pub animation_ms: Option<u64>,
    /// Player name.
    pub player_name: Option<String>,
    /// Scores file.
    pub scores_path: Option<PathBuf>,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(disks = config.disks, pegs = config.pegs, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the configuration to use.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read when present and defaults are used otherwise.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(disks) = overrides.disks {
            self.disks = disks;
        }
        if let Some(pegs) = overrides.pegs {
            self.pegs = pegs;
        }
        if overrides.target_peg.is_some() {
            self.target_peg = overrides.target_peg;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(ms) = overrides.animation_ms {
            self.animation_ms = ms;
        }
        if let Some(name) = overrides.player_name {
            self.player_name = name;
        }
        if let Some(path) = overrides.scores_path {
            self.scores_path = path;
        }
        self
    }

    /// Validates board parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::InvalidArgument`] for out-of-range values.
    pub fn launch(&self) -> Result<LaunchConfig, HanoiError> {
        LaunchConfig::new(self.disks, self.pegs, self.target_peg, self.mode)
    }

    /// Duration of one animated move.
    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.step_duration(), Duration::from_millis(400));
    }

    #[test]
    fn test_partial_file() {
        let config: GameConfig = toml::from_str(
            r#"
            disks = 5
            mode = "auto"
            player_name = "Ada"
            "#,
        )
        .unwrap();
        assert_eq!(*config.disks(), 5);
        assert_eq!(*config.pegs(), 3);
        assert_eq!(*config.mode(), PlayMode::Auto);
        assert_eq!(config.player_name(), "Ada");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(toml::from_str::<GameConfig>("mode = \"turbo\"").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = GameConfig::default().with_overrides(Overrides {
            disks: Some(6),
            pegs: Some(4),
            ..Default::default()
        });
        assert_eq!(*config.disks(), 6);
        assert_eq!(*config.pegs(), 4);
        assert_eq!(*config.animation_ms(), 400);

        let launch = config.launch().unwrap();
        assert_eq!(*launch.target_peg(), 3);
    }

    #[test]
    fn test_launch_rejects_out_of_range() {
        let config = GameConfig::default().with_overrides(Overrides {
            disks: Some(0),
            ..Default::default()
        });
        assert!(config.launch().is_err());
    }
}
