//! Command-line interface for hanoi.

use clap::{Args, Parser, Subcommand};
use hanoi_core::PegId;
use std::path::PathBuf;

use crate::Overrides;

/// Tower of Hanoi - drag disks in the terminal or watch the solver
#[derive(Parser, Debug)]
#[command(name = "hanoi")]
#[command(about = "Tower of Hanoi in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./hanoi.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Board dimensions shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct BoardArgs {
    /// Number of disks (1-20)
    #[arg(short, long)]
    pub disks: Option<u8>,

    /// Number of pegs (3-9)
    #[arg(short, long)]
    pub pegs: Option<usize>,

    /// Destination peg, 0-based (defaults to the last peg)
    #[arg(short, long)]
    pub target: Option<PegId>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        #[command(flatten)]
        board: BoardArgs,

        /// Let the solver play the whole game
        #[arg(long)]
        auto: bool,

        /// Duration of one animated move in milliseconds
        #[arg(long)]
        animation_ms: Option<u64>,

        /// Name recorded with your scores
        #[arg(long)]
        player: Option<String>,

        /// Scores file
        #[arg(long)]
        scores: Option<PathBuf>,
    },

    /// Print the solution without playing
    Solve {
        #[command(flatten)]
        board: BoardArgs,

        /// Emit the moves as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show best scores and the leaderboard
    Scores {
        /// Only games with this many disks
        #[arg(short, long)]
        disks: Option<u8>,

        /// Only games with this many pegs (requires --disks)
        #[arg(short, long, requires = "disks")]
        pegs: Option<usize>,

        /// Leaderboard size
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Scores file
        #[arg(long)]
        scores: Option<PathBuf>,
    },
}

impl BoardArgs {
    /// Board overrides for the loaded config.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            disks: self.disks,
            pegs: self.pegs,
            target_peg: self.target,
            ..Default::default()
        }
    }
}
