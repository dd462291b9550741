//! Property checks for the move generators against a live board.

use hanoi_core::{Board, Move, SolvePolicy, frame_stewart, generate, min_moves, plan, solve_from};

fn replay(board: &mut Board, moves: &[Move]) {
    for mov in moves {
        board
            .apply_move(mov.from, mov.to)
            .unwrap_or_else(|e| panic!("{} refused: {}", mov, e));
    }
}

#[test]
fn test_generate_solves_every_target() {
    for n in 1..=8u8 {
        for (target, auxiliary) in [(1, 2), (2, 1)] {
            let moves = generate(n, 0, target, auxiliary).expect("Generate failed");
            assert_eq!(moves.len() as u64, (1u64 << n) - 1);

            let mut board = Board::create(n, 3, target).expect("Board failed");
            replay(&mut board, &moves);
            assert!(board.is_solved(), "n={} target={}", n, target);
        }
    }
}

#[test]
fn test_generate_rejects_repeated_pegs() {
    assert!(generate(3, 0, 0, 1).is_err());
    assert!(generate(3, 0, 2, 2).is_err());
}

#[test]
fn test_zero_disks_is_empty() {
    assert!(generate(0, 0, 2, 1).expect("Generate failed").is_empty());
}

#[test]
fn test_frame_stewart_matches_minimum() {
    for pegs in 4..=6usize {
        for n in 1..=10u8 {
            let moves = frame_stewart(n, pegs, 0, pegs - 1).expect("Plan failed");
            assert_eq!(Some(moves.len() as u64), min_moves(n, pegs), "n={} pegs={}", n, pegs);

            let mut board = Board::create(n, pegs, pegs - 1).expect("Board failed");
            replay(&mut board, &moves);
            assert!(board.is_solved());
        }
    }
}

#[test]
fn test_more_pegs_never_cost_more() {
    for n in 1..=12u8 {
        let mut last = u64::MAX;
        for pegs in 3..=9usize {
            let cost = min_moves(n, pegs).expect("Minimum failed");
            assert!(cost <= last);
            last = cost;
        }
    }
}

#[test]
fn test_plan_finishes_any_reachable_position() {
    // Wander with a fixed walk of legal moves, then ask for a plan
    let mut board = Board::create(5, 4, 3).expect("Board failed");
    let walk = [(0, 1), (0, 2), (1, 2), (0, 1), (2, 0), (2, 3)];
    for (from, to) in walk {
        if board.is_legal(from, to) {
            board.apply_move(from, to).expect("Legal move refused");
        }
    }

    let plan = plan(&board).expect("Plan failed");
    assert_eq!(*plan.policy(), SolvePolicy::Gather);
    replay(&mut board, plan.moves());
    assert!(board.is_solved());
}

#[test]
fn test_solve_from_solved_board_is_empty() {
    let mut board = Board::create(2, 3, 1).expect("Board failed");
    replay(&mut board, &generate(2, 0, 1, 2).expect("Generate failed"));
    assert!(solve_from(&board).is_empty());
}
