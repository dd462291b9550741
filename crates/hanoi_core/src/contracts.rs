//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} apply_move {Q}.

use super::invariants::{BoardInvariants, InvariantSet};
use super::{Board, HanoiError, Move, MoveError};
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), HanoiError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: both pegs exist.
pub struct PegsInRange;

impl PegsInRange {
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        let peg_count = board.peg_count();
        for peg in [mov.from, mov.to] {
            if peg >= peg_count {
                return Err(MoveError::PegOutOfRange { peg, peg_count });
            }
        }
        Ok(())
    }
}

/// Precondition: source and destination differ.
pub struct DistinctPegs;

impl DistinctPegs {
    #[instrument]
    pub fn check(mov: &Move) -> Result<(), MoveError> {
        if mov.from == mov.to {
            Err(MoveError::SamePeg(mov.from))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the destination is empty or topped by a larger disk.
pub struct SmallerOnLarger;

impl SmallerOnLarger {
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        let moving = board.top(mov.from).ok_or(MoveError::EmptySource(mov.from))?;
        match board.top(mov.to) {
            Some(resting) if resting < moving => Err(MoveError::LargerOnSmaller { moving, resting }),
            _ => Ok(()),
        }
    }
}

/// Composite precondition: the pure legality rule, independent of game phase.
pub struct LegalMove;

impl LegalMove {
    /// Validates the legality rule for a move.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        PegsInRange::check(mov, board)?;
        DistinctPegs::check(mov)?;
        SmallerOnLarger::check(mov, board)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for [`Board::apply_move`].
///
/// Preconditions:
/// - Board is not solved
/// - Move is legal
///
/// Postconditions:
/// - Every peg strictly descending
/// - Disks conserved
/// - Solved flag agrees with the target peg
/// - Move counter advanced by exactly one
pub struct MoveContract;

impl Contract<Board, Move> for MoveContract {
    fn pre(board: &Board, action: &Move) -> Result<(), MoveError> {
        if board.is_solved() {
            return Err(MoveError::GameOver);
        }
        LegalMove::check(action, board)
    }

    fn post(before: &Board, after: &Board) -> Result<(), HanoiError> {
        BoardInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            HanoiError::InternalInvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        if after.move_count() != before.move_count() + 1 {
            warn!(
                before = before.move_count(),
                after = after.move_count(),
                "Move counter did not advance by one"
            );
            return Err(HanoiError::InternalInvariantViolation(
                "Postcondition failed: move counter did not advance by one".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Disk;

    #[test]
    fn test_precondition_accepts_legal_move() {
        let board = Board::create(3, 3, 2).unwrap();
        assert!(MoveContract::pre(&board, &Move::new(0, 2)).is_ok());
    }

    #[test]
    fn test_precondition_larger_on_smaller() {
        let mut board = Board::create(3, 3, 2).unwrap();
        board.apply_move(0, 2).unwrap();
        assert_eq!(
            MoveContract::pre(&board, &Move::new(0, 2)),
            Err(MoveError::LargerOnSmaller {
                moving: Disk::new(2),
                resting: Disk::new(1),
            })
        );
    }

    #[test]
    fn test_precondition_out_of_range() {
        let board = Board::create(3, 3, 2).unwrap();
        assert_eq!(
            MoveContract::pre(&board, &Move::new(0, 5)),
            Err(MoveError::PegOutOfRange { peg: 5, peg_count: 3 })
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let board = Board::create(3, 3, 2).unwrap();
        let mut after = board.clone();
        after.apply_move(0, 1).unwrap();
        assert!(MoveContract::post(&board, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let board = Board::create(3, 3, 2).unwrap();
        let mut after = board.clone();
        after.apply_move(0, 1).unwrap();

        // Smuggle a larger disk on top of a smaller one
        after.pegs[1].push(Disk::new(3));
        assert!(matches!(
            MoveContract::post(&board, &after),
            Err(HanoiError::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn test_postcondition_detects_stalled_counter() {
        let board = Board::create(3, 3, 2).unwrap();
        assert!(MoveContract::post(&board, &board).is_err());
    }
}
