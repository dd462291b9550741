//! The board model: peg stacks, counters and the single mutating operation.

use std::time::Duration;

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::contracts::{Contract, LegalMove, MoveContract};
use super::{Disk, HanoiError, Move, MoveError, Peg, PegId};

/// Every game starts with the full tower on this peg.
pub const SOURCE_PEG: PegId = 0;

/// Largest disk count a board accepts.
pub const MAX_DISKS: u8 = 20;

/// Largest peg count a board accepts.
pub const MAX_PEGS: usize = 9;

/// Facts about a finished game, handed to the score ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct GameSummary {
    disk_count: u8,
    peg_count: usize,
    move_count: u32,
    elapsed: Duration,
}

impl GameSummary {
    /// Elapsed time in whole milliseconds, saturating at `u64::MAX`.
    pub fn elapsed_ms(&self) -> u64 {
        saturating_millis(self.elapsed)
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
pub(crate) fn saturating_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Notifications emitted by [`Board::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// A move was applied.
    StateChanged {
        /// The applied move.
        mov: Move,
        /// Move counter after the move.
        move_count: u32,
    },
    /// The board just became solved. Emitted once per game.
    GameWon(GameSummary),
}

/// Read-only view of a board for rendering collaborators.
#[derive(Debug, Clone, Copy)]
pub struct BoardSnapshot<'a> {
    /// Peg stacks, bottom to top.
    pub pegs: &'a [Peg],
    /// Number of disks in play.
    pub disk_count: u8,
    /// Peg the tower must reach.
    pub target_peg: PegId,
    /// Successful moves so far.
    pub move_count: u32,
    /// Time spent on the game so far.
    pub elapsed: Duration,
    /// Whether the board is solved.
    pub solved: bool,
}

/// A Tower of Hanoi board.
///
/// Created in the canonical start state (all disks on peg 0, largest at the
/// bottom) and mutated only through [`Board::apply_move`]. Once solved, the
/// board is terminal: further moves are refused until a new board is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) pegs: Vec<Peg>,
    pub(crate) disk_count: u8,
    pub(crate) target_peg: PegId,
    pub(crate) move_count: u32,
    pub(crate) elapsed: Duration,
    pub(crate) solved: bool,
    pub(crate) events: Vec<BoardEvent>,
}

/// Checks board dimensions shared by [`Board::create`] and launch validation.
#[instrument]
pub(crate) fn validate_dimensions(
    disk_count: u8,
    peg_count: usize,
    target_peg: PegId,
) -> Result<(), HanoiError> {
    if disk_count < 1 {
        return Err(HanoiError::InvalidArgument(
            "disk count must be at least 1".to_string(),
        ));
    }
    if disk_count > MAX_DISKS {
        return Err(HanoiError::InvalidArgument(format!(
            "disk count {} exceeds the maximum of {}",
            disk_count, MAX_DISKS
        )));
    }
    if !(3..=MAX_PEGS).contains(&peg_count) {
        return Err(HanoiError::InvalidArgument(format!(
            "peg count must be between 3 and {}, got {}",
            MAX_PEGS, peg_count
        )));
    }
    if target_peg >= peg_count {
        return Err(HanoiError::InvalidArgument(format!(
            "target peg {} is out of range for {} pegs",
            target_peg, peg_count
        )));
    }
    if target_peg == SOURCE_PEG {
        return Err(HanoiError::InvalidArgument(
            "target peg cannot be the source peg 0".to_string(),
        ));
    }
    Ok(())
}

impl Board {
    /// Creates a board in the canonical start state.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::InvalidArgument`] if `disk_count < 1`, the peg
    /// count is outside `3..=MAX_PEGS`, or `target_peg` is out of range or 0.
    #[instrument]
    pub fn create(disk_count: u8, peg_count: usize, target_peg: PegId) -> Result<Self, HanoiError> {
        validate_dimensions(disk_count, peg_count, target_peg)?;

        let mut pegs = vec![Peg::new(); peg_count];
        pegs[SOURCE_PEG] = Peg::canonical(disk_count);

        info!(disk_count, peg_count, target_peg, "Board created");
        Ok(Self {
            pegs,
            disk_count,
            target_peg,
            move_count: 0,
            elapsed: Duration::ZERO,
            solved: false,
            events: Vec::new(),
        })
    }

    /// Number of disks in play.
    pub fn disk_count(&self) -> u8 {
        self.disk_count
    }

    /// Number of pegs.
    pub fn peg_count(&self) -> usize {
        self.pegs.len()
    }

    /// Peg the tower must reach.
    pub fn target_peg(&self) -> PegId {
        self.target_peg
    }

    /// Successful moves so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Time spent while the game was active.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether all disks sit on the target peg.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// All pegs.
    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    /// The peg at `id`, if it exists.
    pub fn peg(&self, id: PegId) -> Option<&Peg> {
        self.pegs.get(id)
    }

    /// Top disk of the peg at `id`.
    pub fn top(&self, id: PegId) -> Option<Disk> {
        self.peg(id).and_then(Peg::top)
    }

    /// Peg currently holding `disk`.
    pub fn location(&self, disk: Disk) -> Option<PegId> {
        self.pegs.iter().position(|peg| peg.disks().contains(&disk))
    }

    /// Whether every disk sits on the source peg (move count is irrelevant).
    pub fn is_canonical_start(&self) -> bool {
        self.pegs[SOURCE_PEG].len() == usize::from(self.disk_count)
    }

    /// Checks a move against the rules, explaining any refusal.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] describing the first rule the move breaks.
    #[instrument(skip(self))]
    pub fn check_move(&self, from: PegId, to: PegId) -> Result<(), MoveError> {
        LegalMove::check(&Move::new(from, to), self)
    }

    /// True iff `from != to`, `from` is non-empty, and `to` is empty or its top
    /// disk is larger than the top disk of `from`.
    pub fn is_legal(&self, from: PegId, to: PegId) -> bool {
        self.check_move(from, to).is_ok()
    }

    /// Moves the top disk of `from` onto `to`.
    ///
    /// On success increments the move counter, re-evaluates `solved`, and
    /// queues a [`BoardEvent::StateChanged`] (plus [`BoardEvent::GameWon`] on
    /// the solving move). On failure nothing changes.
    ///
    /// # Errors
    ///
    /// - [`HanoiError::IllegalMove`] if the move breaks a rule or the board is solved
    /// - [`HanoiError::InternalInvariantViolation`] if a board invariant broke
    #[instrument(skip(self), fields(move_count = self.move_count))]
    pub fn apply_move(&mut self, from: PegId, to: PegId) -> Result<(), HanoiError> {
        let mov = Move::new(from, to);
        MoveContract::pre(self, &mov).map_err(|reason| {
            debug!(%mov, %reason, "Move refused");
            HanoiError::IllegalMove { mov, reason }
        })?;

        let before = self.clone();

        let disk = self.pegs[from].pop().ok_or_else(|| {
            HanoiError::InternalInvariantViolation(format!("peg {} emptied during {}", from, mov))
        })?;
        self.pegs[to].push(disk);
        self.move_count += 1;
        self.solved = self.pegs[self.target_peg].len() == usize::from(self.disk_count);

        if let Err(e) = MoveContract::post(&before, self) {
            error!(error = %e, %mov, "Board invariant broken by move");
            *self = before;
            return Err(e);
        }

        debug!(%mov, %disk, move_count = self.move_count, "Move applied");
        self.events.push(BoardEvent::StateChanged {
            mov,
            move_count: self.move_count,
        });

        if self.solved {
            let summary = GameSummary::new(
                self.disk_count,
                self.pegs.len(),
                self.move_count,
                self.elapsed,
            );
            info!(move_count = self.move_count, elapsed_ms = summary.elapsed_ms(), "Game won");
            self.events.push(BoardEvent::GameWon(summary));
        }

        Ok(())
    }

    /// Advances the game clock. The clock stops once the board is solved.
    pub fn advance_clock(&mut self, dt: Duration) {
        if !self.solved {
            self.elapsed += dt;
        }
    }

    /// Drains queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> BoardSnapshot<'_> {
        BoardSnapshot {
            pegs: &self.pegs,
            disk_count: self.disk_count,
            target_peg: self.target_peg,
            move_count: self.move_count,
            elapsed: self.elapsed,
            solved: self.solved,
        }
    }
}
