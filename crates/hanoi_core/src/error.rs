//! Error taxonomy for the game core.

use super::{Move, MoveError};
use derive_more::{Display, Error};
use tracing::instrument;

/// Errors raised by the board, the solver and the schedulers.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum HanoiError {
    /// Bad launch or generator parameters. Fatal at startup.
    #[display("Invalid argument: {}", _0)]
    InvalidArgument(String),

    /// A move the rules forbid. Expected and recoverable.
    #[display("Illegal move {}: {}", mov, reason)]
    IllegalMove {
        /// The refused move.
        mov: Move,
        /// Why it was refused.
        reason: MoveError,
    },

    /// A logic bug: a planned move was rejected or a board invariant broke.
    #[display("Internal invariant violation: {}", _0)]
    InternalInvariantViolation(String),
}

impl HanoiError {
    /// Whether this is the recoverable [`HanoiError::IllegalMove`] case.
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, Self::IllegalMove { .. })
    }
}

impl std::error::Error for HanoiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IllegalMove { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Score storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Score store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
