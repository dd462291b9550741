//! First-class move values.
//!
//! A move is a request to relocate the top disk of one peg to another.
//! It carries no state of its own and can be validated before it is applied.

use super::{Disk, PegId};
use serde::{Deserialize, Serialize};

/// Relocation of the top disk from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Peg the disk leaves.
    pub from: PegId,
    /// Peg the disk lands on.
    pub to: PegId,
}

impl Move {
    /// Creates a new move.
    pub fn new(from: PegId, to: PegId) -> Self {
        Self { from, to }
    }
}

impl From<(PegId, PegId)> for Move {
    fn from((from, to): (PegId, PegId)) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Reason a move was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Source and destination are the same peg.
    #[display("Cannot move a disk from peg {} onto itself", _0)]
    SamePeg(PegId),

    /// A peg index is outside the board.
    #[display("Peg {} does not exist (board has {} pegs)", peg, peg_count)]
    PegOutOfRange {
        /// Offending peg index.
        peg: PegId,
        /// Number of pegs on the board.
        peg_count: usize,
    },

    /// The source peg holds no disk.
    #[display("Peg {} is empty", _0)]
    EmptySource(PegId),

    /// The moving disk is larger than the disk it would rest on.
    #[display("Cannot place {} on {}", moving, resting)]
    LargerOnSmaller {
        /// Disk being moved.
        moving: Disk,
        /// Top disk of the destination.
        resting: Disk,
    },

    /// The game is already solved.
    #[display("Game is already solved")]
    GameOver,
}

impl std::error::Error for MoveError {}
