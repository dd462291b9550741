//! Bounded model checking of the generator and board with Kani.

#[cfg(kani)]
mod proofs {
    use crate::{Board, BoardInvariants, InvariantSet, generate};

    /// Verify the generated solution is legal, of length 2^n - 1, and solves the board.
    #[kani::proof]
    #[kani::unwind(9)]
    fn verify_generated_solution_solves_board() {
        let n: u8 = kani::any();
        kani::assume(n >= 1 && n <= 3);

        let moves = generate(n, 0, 2, 1).unwrap();
        assert_eq!(moves.len(), (1usize << n) - 1);

        let mut board = Board::create(n, 3, 2).unwrap();
        for mov in moves {
            assert!(board.apply_move(mov.from, mov.to).is_ok());
            assert!(BoardInvariants::check_all(&board).is_ok());
        }
        assert!(board.is_solved());
    }
}
