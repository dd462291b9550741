//! Core domain types: disks and pegs.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Index of a peg, `0..peg_count`.
pub type PegId = usize;

/// A disk, identified by its size rank (1 = smallest).
///
/// Disks are immutable; where a disk is depends only on which [`Peg`] holds it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
#[display("disk {}", _0)]
pub struct Disk(u8);

impl Disk {
    /// Creates a disk of the given size rank.
    pub fn new(size: u8) -> Self {
        Self(size)
    }

    /// Returns the size rank.
    pub fn size(self) -> u8 {
        self.0
    }
}

/// A peg: disks ordered bottom to top, top = last element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Peg {
    disks: Vec<Disk>,
}

impl Peg {
    /// Creates an empty peg.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a peg holding disks `n..=1`, largest at the bottom.
    #[instrument]
    pub(crate) fn canonical(n: u8) -> Self {
        Self {
            disks: (1..=n).rev().map(Disk::new).collect(),
        }
    }

    /// Returns the disks bottom to top.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    /// Returns the top disk, if any.
    pub fn top(&self) -> Option<Disk> {
        self.disks.last().copied()
    }

    /// Number of disks on the peg.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Whether the peg holds no disks.
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Whether sizes strictly decrease from bottom to top.
    pub fn is_strictly_descending(&self) -> bool {
        self.disks.windows(2).all(|w| w[0] > w[1])
    }

    pub(crate) fn push(&mut self, disk: Disk) {
        self.disks.push(disk);
    }

    pub(crate) fn pop(&mut self) -> Option<Disk> {
        self.disks.pop()
    }
}
