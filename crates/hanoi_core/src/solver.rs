//! Move generation.
//!
//! - [`generate`]: the classic minimal 3-peg solution, `2^n - 1` moves
//! - [`frame_stewart`]: the Frame–Stewart plan for four or more pegs
//! - [`solve_from`]: a legal plan from any reachable position, on any peg count
//! - [`plan`]: picks one of the above for a live board

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{Board, HanoiError, MAX_DISKS, MAX_PEGS, Move, PegId, SOURCE_PEG};

/// Which algorithm produced a [`Plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SolvePolicy {
    /// Recursive 3-peg solution from the start position. Optimal.
    Classic,
    /// Frame–Stewart split from the start position on four or more pegs.
    FrameStewart,
    /// Largest-disk-first gathering from an arbitrary position.
    /// Optimal on three pegs, legal but not guaranteed minimal on more.
    Gather,
}

/// A move sequence that takes a board to its solved state.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Plan {
    policy: SolvePolicy,
    moves: Vec<Move>,
}

impl Plan {
    /// Consumes the plan, returning its moves.
    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }
}

/// Minimal 3-peg solution moving `n` disks from `source` to `target`.
///
/// Returns exactly `2^n - 1` moves (none for `n = 0`).
///
/// # Errors
///
/// Returns [`HanoiError::InvalidArgument`] if the pegs are not pairwise
/// distinct or `n` exceeds [`MAX_DISKS`].
#[instrument]
pub fn generate(
    n: u8,
    source: PegId,
    target: PegId,
    auxiliary: PegId,
) -> Result<Vec<Move>, HanoiError> {
    if source == target || source == auxiliary || target == auxiliary {
        return Err(HanoiError::InvalidArgument(format!(
            "pegs must be pairwise distinct, got source={} target={} auxiliary={}",
            source, target, auxiliary
        )));
    }
    check_disk_count(n)?;

    let mut moves = Vec::with_capacity((1usize << n) - 1);
    classic(n, source, target, auxiliary, &mut moves);
    debug!(n, count = moves.len(), "Generated classic solution");
    Ok(moves)
}

fn classic(n: u8, source: PegId, target: PegId, auxiliary: PegId, out: &mut Vec<Move>) {
    if n == 0 {
        return;
    }
    classic(n - 1, source, auxiliary, target, out);
    out.push(Move::new(source, target));
    classic(n - 1, auxiliary, target, source, out);
}

fn check_disk_count(n: u8) -> Result<(), HanoiError> {
    if n > MAX_DISKS {
        return Err(HanoiError::InvalidArgument(format!(
            "disk count {} exceeds the maximum of {}",
            n, MAX_DISKS
        )));
    }
    Ok(())
}

/// Minimum number of moves for `disks` disks on `pegs` pegs.
///
/// `2^n - 1` on three pegs, the Frame–Stewart number beyond. `None` for fewer
/// than three pegs (unsolvable for more than one disk) or out-of-range input.
#[instrument]
pub fn min_moves(disks: u8, pegs: usize) -> Option<u64> {
    if disks > MAX_DISKS || !(3..=MAX_PEGS).contains(&pegs) {
        return None;
    }
    Some(FrameStewartTable::new(disks, pegs).cost(disks, pegs))
}

/// Frame–Stewart cost table `T(n, p)` and the split that achieves it.
struct FrameStewartTable {
    // Indexed [p][n]
    cost: Vec<Vec<u64>>,
    split: Vec<Vec<u8>>,
}

impl FrameStewartTable {
    fn new(disks: u8, pegs: usize) -> Self {
        let n_max = usize::from(disks);
        let mut cost = vec![vec![0u64; n_max + 1]; pegs + 1];
        let mut split = vec![vec![0u8; n_max + 1]; pegs + 1];

        for n in 0..=n_max {
            cost[3][n] = (1u64 << n) - 1;
        }
        for p in 4..=pegs {
            for n in 1..=n_max {
                if n == 1 {
                    cost[p][1] = 1;
                    continue;
                }
                let (best_k, best) = (1..n)
                    .map(|k| (k, 2 * cost[p][k] + cost[p - 1][n - k]))
                    .min_by_key(|&(_, c)| c)
                    .unwrap_or((0, cost[p - 1][n]));
                cost[p][n] = best;
                split[p][n] = best_k as u8;
            }
        }

        Self { cost, split }
    }

    fn cost(&self, n: u8, p: usize) -> u64 {
        self.cost[p][usize::from(n)]
    }

    fn split(&self, n: u8, p: usize) -> u8 {
        self.split[p][usize::from(n)]
    }
}

/// Frame–Stewart solution moving `n` disks from `source` to `target` using
/// every one of `peg_count` pegs.
///
/// On three pegs this is identical to [`generate`].
///
/// # Errors
///
/// Returns [`HanoiError::InvalidArgument`] for an out-of-range peg count,
/// disk count, or peg index, or if `source == target`.
#[instrument]
pub fn frame_stewart(
    n: u8,
    peg_count: usize,
    source: PegId,
    target: PegId,
) -> Result<Vec<Move>, HanoiError> {
    if !(3..=MAX_PEGS).contains(&peg_count) {
        return Err(HanoiError::InvalidArgument(format!(
            "peg count must be between 3 and {}, got {}",
            MAX_PEGS, peg_count
        )));
    }
    if source >= peg_count || target >= peg_count || source == target {
        return Err(HanoiError::InvalidArgument(format!(
            "invalid source {} / target {} for {} pegs",
            source, target, peg_count
        )));
    }
    check_disk_count(n)?;

    let table = FrameStewartTable::new(n, peg_count);
    let spares: Vec<PegId> = (0..peg_count)
        .filter(|&p| p != source && p != target)
        .collect();

    let mut moves = Vec::with_capacity(table.cost(n, peg_count) as usize);
    split_move(&table, n, source, target, &spares, &mut moves);
    debug!(n, peg_count, count = moves.len(), "Generated Frame-Stewart solution");
    Ok(moves)
}

fn split_move(
    table: &FrameStewartTable,
    n: u8,
    source: PegId,
    target: PegId,
    spares: &[PegId],
    out: &mut Vec<Move>,
) {
    if n == 0 {
        return;
    }
    if n == 1 {
        out.push(Move::new(source, target));
        return;
    }
    if let [auxiliary] = spares {
        classic(n, source, target, *auxiliary, out);
        return;
    }

    let pegs = spares.len() + 2;
    let k = table.split(n, pegs);
    let parking = spares[0];

    // Park the top k disks using every peg
    let mut park_spares: Vec<PegId> = spares[1..].to_vec();
    park_spares.push(target);
    split_move(table, k, source, parking, &park_spares, out);

    // Move the rest without touching the parking peg
    split_move(table, n - k, source, target, &spares[1..], out);

    // Bring the parked disks home
    let mut home_spares: Vec<PegId> = spares[1..].to_vec();
    home_spares.push(source);
    split_move(table, k, parking, target, &home_spares, out);
}

/// Legal move sequence taking `board` from its current position to solved.
///
/// Places disks largest first: if disk `k` is not on its destination, the
/// smaller disks are first gathered on a spare peg, then `k` moves, then the
/// smaller disks follow. Works from any reachable position on any peg count.
#[instrument(skip(board), fields(move_count = board.move_count()))]
pub fn solve_from(board: &Board) -> Vec<Move> {
    let n = board.disk_count();
    let mut locations: Vec<PegId> = vec![board.target_peg(); usize::from(n)];
    for (peg_id, peg) in board.pegs().iter().enumerate() {
        for disk in peg.disks() {
            locations[usize::from(disk.size()) - 1] = peg_id;
        }
    }

    let mut moves = Vec::new();
    gather(n, board.target_peg(), &mut locations, board.peg_count(), &mut moves);
    debug!(count = moves.len(), "Planned solution from current position");
    moves
}

fn gather(k: u8, dest: PegId, locations: &mut [PegId], peg_count: usize, out: &mut Vec<Move>) {
    if k == 0 {
        return;
    }
    let at = locations[usize::from(k) - 1];
    if at == dest {
        gather(k - 1, dest, locations, peg_count, out);
        return;
    }

    // peg_count >= 3 guarantees a spare
    let spare = (0..peg_count).find(|&p| p != at && p != dest).unwrap_or(dest);
    gather(k - 1, spare, locations, peg_count, out);
    out.push(Move::new(at, dest));
    locations[usize::from(k) - 1] = dest;
    gather(k - 1, dest, locations, peg_count, out);
}

/// Chooses and runs a solver for the board's current position.
///
/// - solved board: empty plan
/// - start position, three pegs: [`generate`]
/// - start position, more pegs: [`frame_stewart`]
/// - anything else: [`solve_from`]
///
/// # Errors
///
/// Propagates generator errors, which indicate a board outside the solver's limits.
#[instrument(skip(board), fields(disks = board.disk_count(), pegs = board.peg_count()))]
pub fn plan(board: &Board) -> Result<Plan, HanoiError> {
    if board.is_solved() {
        return Ok(Plan {
            policy: SolvePolicy::Gather,
            moves: Vec::new(),
        });
    }

    let n = board.disk_count();
    let target = board.target_peg();
    let plan = if board.is_canonical_start() {
        if board.peg_count() == 3 {
            let auxiliary = 3 - SOURCE_PEG - target;
            Plan {
                policy: SolvePolicy::Classic,
                moves: generate(n, SOURCE_PEG, target, auxiliary)?,
            }
        } else {
            Plan {
                policy: SolvePolicy::FrameStewart,
                moves: frame_stewart(n, board.peg_count(), SOURCE_PEG, target)?,
            }
        }
    } else {
        Plan {
            policy: SolvePolicy::Gather,
            moves: solve_from(board),
        }
    };

    debug!(policy = %plan.policy, count = plan.moves.len(), "Plan ready");
    Ok(plan)
}
