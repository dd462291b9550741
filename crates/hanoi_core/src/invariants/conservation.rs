//! Disk conservation: every disk is on exactly one peg.

use super::Invariant;
use crate::Board;

/// Invariant: the union of all pegs is exactly `{1..=N}` with no duplicates.
pub struct DiskConservationInvariant;

impl Invariant<Board> for DiskConservationInvariant {
    fn holds(board: &Board) -> bool {
        let n = usize::from(board.disk_count());
        let mut seen = vec![false; n];
        let mut total = 0;

        for disk in board.pegs().iter().flat_map(|peg| peg.disks()) {
            let size = usize::from(disk.size());
            if size == 0 || size > n || seen[size - 1] {
                return false;
            }
            seen[size - 1] = true;
            total += 1;
        }

        total == n
    }

    fn description() -> &'static str {
        "Each disk 1..=N is on exactly one peg"
    }
}
