//! Strict order invariant: no disk ever rests on a smaller one.

use super::Invariant;
use crate::{Board, Peg};

/// Invariant: within every peg, sizes strictly decrease bottom to top.
pub struct StrictlyDescendingInvariant;

impl Invariant<Board> for StrictlyDescendingInvariant {
    fn holds(board: &Board) -> bool {
        board.pegs().iter().all(Peg::is_strictly_descending)
    }

    fn description() -> &'static str {
        "Every peg is strictly descending from bottom to top"
    }
}
