//! Solved flag consistency.

use super::Invariant;
use crate::Board;

/// Invariant: `solved` is true iff the whole tower sits on the target peg.
pub struct SolvedFlagInvariant;

impl Invariant<Board> for SolvedFlagInvariant {
    fn holds(board: &Board) -> bool {
        let complete = board
            .peg(board.target_peg())
            .is_some_and(|peg| peg.len() == usize::from(board.disk_count()));
        complete == board.is_solved()
    }

    fn description() -> &'static str {
        "Solved flag matches the target peg holding every disk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsolved_board_holds() {
        let board = Board::create(2, 3, 2).unwrap();
        assert!(SolvedFlagInvariant::holds(&board));
    }

    #[test]
    fn test_stale_flag_violates() {
        let mut board = Board::create(1, 3, 2).unwrap();
        board.apply_move(0, 2).unwrap();
        board.solved = false;
        assert!(!SolvedFlagInvariant::holds(&board));
    }
}
