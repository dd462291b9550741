//! Tower of Hanoi in the terminal.
//!
//! The game rules live in [`hanoi_core`]; this crate adds the pieces that
//! touch the outside world.
//!
//! # Architecture
//!
//! - **Config**: `hanoi.toml` with command-line overrides
//! - **Scores**: JSON-backed best scores and game history
//! - **TUI**: ratatui front end with mouse drag-and-drop
//!
//! # Example
//!
//! ```no_run
//! use hanoi::{GameConfig, JsonScoreStore};
//! use hanoi_core::{ScoreLedger, Session};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load(None)?;
//! let ledger = ScoreLedger::new(
//!     JsonScoreStore::new(config.scores_path().clone()),
//!     config.player_name().clone(),
//! );
//! let session = Session::new(config.launch()?, ledger, config.step_duration())?;
//! assert_eq!(session.board().move_count(), 0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod scores;

/// Command-line interface.
pub mod cli;
/// Terminal front end.
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, GameConfig, Overrides};

// Crate-level exports - Scores
pub use scores::{HistoryEntry, JsonScoreStore, MAX_HISTORY};

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,hanoi=debug,hanoi_core=debug";
