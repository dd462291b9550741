//! Drag-and-drop interaction controller.
//!
//! Translates raw pointer events into candidate moves and feedback. The board
//! is never touched while a disk is in the air: the dragged disk stays on its
//! origin peg until release, so a move is either fully applied or not at all.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{Board, BoardSnapshot, Cue, Disk, HanoiError, Move, PegId};

/// Pointer coordinates in renderer cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pointer {
    /// Horizontal cell.
    pub column: u16,
    /// Vertical cell.
    pub row: u16,
}

impl Pointer {
    /// Creates a pointer position.
    pub fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }
}

/// Raw pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Button pressed.
    Press(Pointer),
    /// Pointer moved (with or without a button held).
    Move(Pointer),
    /// Button released.
    Release(Pointer),
}

/// Maps pointer positions onto the board. Implemented by the renderer,
/// which is the only party that knows where things are drawn.
pub trait HitTest {
    /// Peg whose top disk is under the pointer.
    fn top_disk_at(&self, board: &BoardSnapshot<'_>, at: Pointer) -> Option<PegId>;

    /// Peg whose drop zone is under the pointer.
    fn peg_at(&self, at: Pointer) -> Option<PegId>;
}

/// Drop-target highlight while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Dropping here would be legal (green).
    Legal(PegId),
    /// Dropping here would be refused (red).
    Illegal(PegId),
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// Waiting for a press.
    Idle,
    /// A disk follows the pointer.
    Dragging {
        /// Disk in the air.
        disk: Disk,
        /// Peg it was lifted from.
        origin: PegId,
        /// Last pointer position.
        pointer: Pointer,
    },
    /// A release is being turned into a move. Never outlives one event.
    Resolving {
        /// Disk being dropped.
        disk: Disk,
        /// Peg it was lifted from.
        origin: PegId,
    },
    /// The board is solved; input is ignored until reset.
    Won,
}

/// Signals for the renderer and audio collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Play a sound cue.
    Cue(Cue),
    /// Highlight changed (`None` clears it).
    Highlight(Option<Highlight>),
    /// A move was applied.
    Placed(Move),
    /// The disk returns to its origin peg.
    SnapBack {
        /// Disk returning.
        disk: Disk,
        /// Peg it returns to.
        origin: PegId,
    },
    /// The board reported solved after a drop.
    Won,
}

/// Drag-and-drop state machine: `Idle -> Dragging -> Resolving -> Idle | Won`.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: DragState,
    highlight: Option<Highlight>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            highlight: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Current drop-target highlight.
    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    /// Whether no drag is in progress.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    /// Handles one pointer event.
    ///
    /// # Errors
    ///
    /// Only [`HanoiError::InternalInvariantViolation`] escapes; illegal
    /// drops become [`Feedback::SnapBack`] with an invalid-move cue.
    #[instrument(skip(self, board, hit), fields(state = ?self.state))]
    pub fn handle(
        &mut self,
        event: PointerEvent,
        board: &mut Board,
        hit: &impl HitTest,
    ) -> Result<Vec<Feedback>, HanoiError> {
        let mut feedback = Vec::new();

        match (self.state, event) {
            (DragState::Idle, PointerEvent::Press(at)) => {
                if board.is_solved() {
                    return Ok(feedback);
                }
                let Some(origin) = hit.top_disk_at(&board.snapshot(), at) else {
                    return Ok(feedback);
                };
                let Some(disk) = board.top(origin) else {
                    return Ok(feedback);
                };

                debug!(%disk, origin, "Disk picked up");
                self.state = DragState::Dragging {
                    disk,
                    origin,
                    pointer: at,
                };
                feedback.push(Feedback::Cue(Cue::Pickup));
                self.rehighlight(board, origin, at, hit, &mut feedback);
            }

            (DragState::Dragging { disk, origin, .. }, PointerEvent::Move(at)) => {
                self.state = DragState::Dragging {
                    disk,
                    origin,
                    pointer: at,
                };
                self.rehighlight(board, origin, at, hit, &mut feedback);
            }

            (DragState::Dragging { disk, origin, .. }, PointerEvent::Release(at)) => {
                self.state = DragState::Resolving { disk, origin };
                let target = hit.peg_at(at);
                self.resolve(disk, origin, target, board, &mut feedback)?;
            }

            // Idle moves/releases, presses mid-drag, and anything after the win
            _ => {}
        }

        Ok(feedback)
    }

    /// Abandons an in-flight drag, snapping the disk back.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> Vec<Feedback> {
        let mut feedback = Vec::new();
        if let DragState::Dragging { disk, origin, .. } | DragState::Resolving { disk, origin } =
            self.state
        {
            debug!(%disk, origin, "Drag cancelled");
            self.clear_highlight(&mut feedback);
            feedback.push(Feedback::SnapBack { disk, origin });
            self.state = DragState::Idle;
        }
        feedback
    }

    /// Returns to `Idle` for a new board.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.highlight = None;
    }

    fn resolve(
        &mut self,
        disk: Disk,
        origin: PegId,
        target: Option<PegId>,
        board: &mut Board,
        feedback: &mut Vec<Feedback>,
    ) -> Result<(), HanoiError> {
        self.clear_highlight(feedback);

        let Some(target) = target else {
            debug!(%disk, origin, "Dropped outside any peg");
            self.snap_back(disk, origin, feedback);
            return Ok(());
        };

        match board.apply_move(origin, target) {
            Ok(()) => {
                feedback.push(Feedback::Placed(Move::new(origin, target)));
                feedback.push(Feedback::Cue(Cue::Drop));
                if board.is_solved() {
                    info!(move_count = board.move_count(), "Puzzle solved by hand");
                    feedback.push(Feedback::Cue(Cue::Victory));
                    feedback.push(Feedback::Won);
                    self.state = DragState::Won;
                } else {
                    self.state = DragState::Idle;
                }
                Ok(())
            }
            Err(e) if e.is_illegal_move() => {
                debug!(error = %e, "Drop refused");
                self.snap_back(disk, origin, feedback);
                Ok(())
            }
            Err(e) => {
                self.state = DragState::Idle;
                Err(e)
            }
        }
    }

    fn snap_back(&mut self, disk: Disk, origin: PegId, feedback: &mut Vec<Feedback>) {
        feedback.push(Feedback::Cue(Cue::InvalidMove));
        feedback.push(Feedback::SnapBack { disk, origin });
        self.state = DragState::Idle;
    }

    fn rehighlight(
        &mut self,
        board: &Board,
        origin: PegId,
        at: Pointer,
        hit: &impl HitTest,
        feedback: &mut Vec<Feedback>,
    ) {
        let next = hit.peg_at(at).map(|peg| {
            if board.is_legal(origin, peg) {
                Highlight::Legal(peg)
            } else {
                Highlight::Illegal(peg)
            }
        });
        if next != self.highlight {
            self.highlight = next;
            feedback.push(Feedback::Highlight(next));
        }
    }

    fn clear_highlight(&mut self, feedback: &mut Vec<Feedback>) {
        if self.highlight.take().is_some() {
            feedback.push(Feedback::Highlight(None));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pegs are 10 columns wide; the top disk is hit on row 0 only.
    struct Columns;

    impl HitTest for Columns {
        fn top_disk_at(&self, board: &BoardSnapshot<'_>, at: Pointer) -> Option<PegId> {
            let peg = self.peg_at(at)?;
            (at.row == 0 && !board.pegs[peg].is_empty()).then_some(peg)
        }

        fn peg_at(&self, at: Pointer) -> Option<PegId> {
            let peg = usize::from(at.column / 10);
            (peg < 3).then_some(peg)
        }
    }

    fn over(peg: u16) -> Pointer {
        Pointer::new(peg * 10 + 5, 0)
    }

    fn cues(feedback: &[Feedback]) -> Vec<Cue> {
        feedback
            .iter()
            .filter_map(|f| match f {
                Feedback::Cue(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_press_on_top_disk_starts_drag() {
        let mut board = Board::create(3, 3, 2).unwrap();
        let mut ctl = InteractionController::new();

        let fb = ctl.handle(PointerEvent::Press(over(0)), &mut board, &Columns).unwrap();
        assert_eq!(cues(&fb), vec![Cue::Pickup]);
        assert!(matches!(
            ctl.state(),
            DragState::Dragging { origin: 0, disk, .. } if disk == Disk::new(1)
        ));
        // Board untouched while dragging
        assert_eq!(board.peg(0).unwrap().len(), 3);
    }

    #[test]
    fn test_press_on_empty_peg_is_ignored() {
        let mut board = Board::create(3, 3, 2).unwrap();
        let mut ctl = InteractionController::new();
        let fb = ctl.handle(PointerEvent::Press(over(1)), &mut board, &Columns).unwrap();
        assert!(fb.is_empty());
        assert!(ctl.is_idle());
    }

    #[test]
    fn test_hover_highlights_legal_and_illegal() {
        let mut board = Board::create(3, 3, 2).unwrap();
        board.apply_move(0, 2).unwrap();
        let mut ctl = InteractionController::new();

        // Lift disk 2 from peg 0
        ctl.handle(PointerEvent::Press(over(0)), &mut board, &Columns).unwrap();
        ctl.handle(PointerEvent::Move(over(1)), &mut board, &Columns).unwrap();
        assert_eq!(ctl.highlight(), Some(Highlight::Legal(1)));

        ctl.handle(PointerEvent::Move(over(2)), &mut board, &Columns).unwrap();
        assert_eq!(ctl.highlight(), Some(Highlight::Illegal(2)));

        ctl.handle(PointerEvent::Move(Pointer::new(99, 0)), &mut board, &Columns).unwrap();
        assert_eq!(ctl.highlight(), None);
    }

    #[test]
    fn test_legal_drop_applies_move() {
        let mut board = Board::create(3, 3, 2).unwrap();
        let mut ctl = InteractionController::new();

        ctl.handle(PointerEvent::Press(over(0)), &mut board, &Columns).unwrap();
        let fb = ctl.handle(PointerEvent::Release(over(1)), &mut board, &Columns).unwrap();

        assert!(fb.contains(&Feedback::Placed(Move::new(0, 1))));
        assert_eq!(cues(&fb), vec![Cue::Drop]);
        assert_eq!(board.move_count(), 1);
        assert!(ctl.is_idle());
        assert_eq!(ctl.highlight(), None);
    }

    #[test]
    fn test_illegal_drop_snaps_back() {
        let mut board = Board::create(3, 3, 2).unwrap();
        board.apply_move(0, 2).unwrap();
        let before = board.clone();
        let mut ctl = InteractionController::new();

        ctl.handle(PointerEvent::Press(over(0)), &mut board, &Columns).unwrap();
        let fb = ctl.handle(PointerEvent::Release(over(2)), &mut board, &Columns).unwrap();

        assert_eq!(cues(&fb), vec![Cue::InvalidMove]);
        assert!(fb.contains(&Feedback::SnapBack { disk: Disk::new(2), origin: 0 }));
        assert_eq!(board, before);
        assert!(ctl.is_idle());
    }

    #[test]
    fn test_drop_outside_pegs_snaps_back() {
        let mut board = Board::create(2, 3, 2).unwrap();
        let mut ctl = InteractionController::new();

        ctl.handle(PointerEvent::Press(over(0)), &mut board, &Columns).unwrap();
        let fb = ctl
            .handle(PointerEvent::Release(Pointer::new(200, 0)), &mut board, &Columns)
            .unwrap();

        assert_eq!(cues(&fb), vec![Cue::InvalidMove]);
        assert_eq!(board.move_count(), 0);
        assert!(ctl.is_idle());
    }

    #[test]
    fn test_drop_on_origin_is_refused() {
        let mut board = Board::create(2, 3, 2).unwrap();
        let mut ctl = InteractionController::new();

        ctl.handle(PointerEvent::Press(over(0)), &mut board, &Columns).unwrap();
        let fb = ctl.handle(PointerEvent::Release(over(0)), &mut board, &Columns).unwrap();
        assert_eq!(cues(&fb), vec![Cue::InvalidMove]);
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_winning_drop_enters_won_state() {
        let mut board = Board::create(1, 3, 2).unwrap();
        let mut ctl = InteractionController::new();

        ctl.handle(PointerEvent::Press(over(0)), &mut board, &Columns).unwrap();
        let fb = ctl.handle(PointerEvent::Release(over(2)), &mut board, &Columns).unwrap();

        assert_eq!(cues(&fb), vec![Cue::Drop, Cue::Victory]);
        assert!(fb.contains(&Feedback::Won));
        assert_eq!(ctl.state(), DragState::Won);

        // Further input is ignored
        let fb = ctl.handle(PointerEvent::Press(over(2)), &mut board, &Columns).unwrap();
        assert!(fb.is_empty());
    }

    #[test]
    fn test_cancel_mid_drag() {
        let mut board = Board::create(3, 3, 2).unwrap();
        let mut ctl = InteractionController::new();

        ctl.handle(PointerEvent::Press(over(0)), &mut board, &Columns).unwrap();
        let fb = ctl.cancel();
        assert!(fb.contains(&Feedback::SnapBack { disk: Disk::new(1), origin: 0 }));
        assert!(ctl.is_idle());
        assert!(ctl.cancel().is_empty());
    }
}
