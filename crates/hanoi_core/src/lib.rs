//! Tower of Hanoi game logic.
//!
//! Everything here is pure and single-threaded: no terminal, no files, no clocks.
//! Collaborators (renderer, audio, score storage) plug in through small traits.
//!
//! # Architecture
//!
//! - **Board**: peg stacks, move counter, elapsed time and the single mutating
//!   operation [`Board::apply_move`]
//! - **Solver**: minimal move sequences ([`generate`]), Frame–Stewart for more
//!   pegs, and planning from an arbitrary position ([`plan`])
//! - **Interaction**: drag-and-drop state machine over pointer events
//! - **Playback**: turns a move list into timed, interpolated animation steps
//! - **Ledger**: best-score bookkeeping over an injected [`ScoreStore`]
//! - **Session**: the manual/auto-play mutual-exclusion switch tying it together
//!
//! # Example
//!
//! ```
//! use hanoi_core::{Board, generate};
//!
//! # fn example() -> Result<(), hanoi_core::HanoiError> {
//! let mut board = Board::create(3, 3, 2)?;
//! for mov in generate(3, 0, 2, 1)? {
//!     board.apply_move(mov.from, mov.to)?;
//! }
//! assert!(board.is_solved());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod effects;
mod error;
mod interaction;
mod invariants;
mod launch;
mod ledger;
mod playback;
mod session;
mod solver;
mod types;

// Crate-level exports - Domain types
pub use action::{Move, MoveError};
pub use types::{Disk, Peg, PegId};

// Crate-level exports - Errors
pub use error::{HanoiError, StoreError};

// Crate-level exports - Board model
pub use board::{Board, BoardEvent, BoardSnapshot, GameSummary, MAX_DISKS, MAX_PEGS, SOURCE_PEG};

// Crate-level exports - Rules
pub use contracts::{Contract, LegalMove, MoveContract};
pub use invariants::{
    BoardInvariants, DiskConservationInvariant, Invariant, InvariantSet, InvariantViolation,
    SolvedFlagInvariant, StrictlyDescendingInvariant,
};

// Crate-level exports - Solver
pub use solver::{Plan, SolvePolicy, frame_stewart, generate, min_moves, plan, solve_from};

// Crate-level exports - Interaction
pub use interaction::{
    DragState, Feedback, Highlight, HitTest, InteractionController, Pointer, PointerEvent,
};

// Crate-level exports - Playback
pub use playback::{
    AnimationFrame, AnimationStep, DEFAULT_STEP_DURATION, DiskPosition, PlaybackScheduler,
    PlaybackTick, ease_out_quad, lift_path,
};

// Crate-level exports - Scores
pub use ledger::{LedgerOutcome, MemoryStore, ScoreKey, ScoreLedger, ScoreRecord, ScoreStore};

// Crate-level exports - Effects and launch
pub use effects::{AudioSink, Cue, NullAudio};
pub use launch::{LaunchConfig, PlayMode};

// Crate-level exports - Session
pub use session::{GameOutcome, Mode, Session};
