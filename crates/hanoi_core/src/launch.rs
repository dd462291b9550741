//! Launch parameters, validated before any board exists.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::board::validate_dimensions;
use super::{Board, HanoiError, PegId};

/// How a game is driven.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayMode {
    /// The player drags disks.
    #[default]
    Manual,
    /// The solver plays the game as an animation.
    Auto,
}

/// Validated game parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct LaunchConfig {
    disk_count: u8,
    peg_count: usize,
    target_peg: PegId,
    mode: PlayMode,
}

impl LaunchConfig {
    /// Validates and builds a launch configuration.
    ///
    /// `target_peg` defaults to the last peg.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::InvalidArgument`] for any combination a board
    /// would reject.
    #[instrument]
    pub fn new(
        disk_count: u8,
        peg_count: usize,
        target_peg: Option<PegId>,
        mode: PlayMode,
    ) -> Result<Self, HanoiError> {
        let target_peg = target_peg.unwrap_or_else(|| peg_count.saturating_sub(1));
        validate_dimensions(disk_count, peg_count, target_peg)?;
        info!(disk_count, peg_count, target_peg, %mode, "Launch configuration accepted");
        Ok(Self {
            disk_count,
            peg_count,
            target_peg,
            mode,
        })
    }

    /// Creates a fresh board for these parameters.
    ///
    /// # Errors
    ///
    /// Propagates [`Board::create`] errors.
    pub fn create_board(&self) -> Result<Board, HanoiError> {
        Board::create(self.disk_count, self.peg_count, self.target_peg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_is_last_peg() {
        let config = LaunchConfig::new(4, 5, None, PlayMode::Manual).unwrap();
        assert_eq!(*config.target_peg(), 4);
    }

    #[test]
    fn test_rejects_invalid_combinations() {
        assert!(LaunchConfig::new(0, 3, None, PlayMode::Manual).is_err());
        assert!(LaunchConfig::new(3, 2, None, PlayMode::Auto).is_err());
        assert!(LaunchConfig::new(3, 3, Some(0), PlayMode::Manual).is_err());
        assert!(LaunchConfig::new(3, 3, Some(3), PlayMode::Manual).is_err());
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(PlayMode::Auto.to_string(), "auto");
        let json = serde_json::to_string(&PlayMode::Manual).unwrap();
        assert_eq!(json, "\"manual\"");
    }
}
