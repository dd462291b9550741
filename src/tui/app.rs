//! Application state and input handling.

use std::time::Instant;

use anyhow::Result;
use hanoi_core::{DragState, Feedback, LedgerOutcome, PointerEvent, ScoreStore, Session};
use tracing::{debug, info, instrument};

use super::audio::TerminalBell;
use super::input::KeyAction;
use super::layout::BoardLayout;

/// Main application state.
pub struct App<S> {
    session: Session<S>,
    layout: Option<BoardLayout>,
    audio: TerminalBell,
    started: Instant,
    status_message: String,
    quit: bool,
}

impl<S: ScoreStore> App<S> {
    /// Creates a new application around a started session.
    pub fn new(session: Session<S>) -> Self {
        Self {
            session,
            layout: None,
            audio: TerminalBell::default(),
            started: Instant::now(),
            status_message: "Drag a disk with the mouse.".to_string(),
            quit: false,
        }
    }

    /// The running game.
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Records where the board was last drawn, for hit testing.
    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = Some(layout);
    }

    /// Advances clocks and playback.
    pub fn tick(&mut self) -> Result<()> {
        let now = self.started.elapsed();
        let was_won = self.session.outcome().is_some();
        self.session.tick(now, &mut self.audio)?;
        if !was_won {
            self.announce_outcome();
        }
        Ok(())
    }

    /// Routes a pointer event to the session.
    #[instrument(skip(self))]
    pub fn pointer(&mut self, event: PointerEvent) -> Result<()> {
        let Some(layout) = self.layout else {
            debug!("No layout yet, ignoring pointer");
            return Ok(());
        };
        let feedback = self.session.pointer(event, &layout, &mut self.audio)?;
        for item in feedback {
            match item {
                Feedback::Placed(mov) => {
                    self.status_message = format!("Moved {}", mov);
                }
                Feedback::SnapBack { disk, origin } => {
                    self.status_message = format!("Can't drop there: {} returns to peg {}", disk, origin);
                }
                _ => {}
            }
        }
        self.announce_outcome();
        Ok(())
    }

    /// Handles a keyboard command.
    #[instrument(skip(self))]
    pub fn key(&mut self, action: KeyAction) -> Result<()> {
        debug!(%action, "Key command");
        match action {
            KeyAction::Quit => {
                info!("User quit");
                self.quit = true;
            }
            KeyAction::Back
                if matches!(self.session.controller().state(), DragState::Dragging { .. }) =>
            {
                self.session.cancel_drag();
                self.status_message = "Drag cancelled.".to_string();
            }
            KeyAction::Back => {
                info!("User quit");
                self.quit = true;
            }
            KeyAction::Restart => {
                self.session.restart()?;
                self.status_message = "New game.".to_string();
            }
            KeyAction::Solve => {
                if self.session.request_auto_solve()? {
                    self.status_message = "Solving... press x to stop.".to_string();
                }
            }
            KeyAction::Stop => {
                if self.session.stop_auto_solve() {
                    self.status_message = "Stopped. Your turn.".to_string();
                }
            }
        }
        Ok(())
    }

    fn announce_outcome(&mut self) {
        let Some(outcome) = self.session.outcome() else {
            return;
        };
        let moves = *outcome.summary().move_count();
        self.status_message = match outcome.ledger() {
            Some(LedgerOutcome::NewBest(_)) => {
                format!("Solved in {} moves. New best score! Press r to play again.", moves)
            }
            Some(LedgerOutcome::Unchanged) => {
                format!("Solved in {} moves. Press r to play again.", moves)
            }
            None => format!("Solved by the computer in {} moves. Press r to play again.", moves),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanoi_core::{LaunchConfig, MemoryStore, PlayMode, Pointer, ScoreLedger};
    use ratatui::layout::Rect;
    use std::time::Duration;

    fn app(disks: u8) -> App<MemoryStore> {
        let config = LaunchConfig::new(disks, 3, None, PlayMode::Manual).unwrap();
        let ledger = ScoreLedger::new(MemoryStore::new(), "Player");
        let session = Session::new(config, ledger, Duration::from_millis(10)).unwrap();
        let mut app = App::new(session);
        // 3 bands of 20 columns, base on row 9, level 0 on row 8
        app.set_layout(BoardLayout::new(Rect::new(0, 0, 60, 10), 3, disks));
        app
    }

    #[test]
    fn test_back_quits_after_win() {
        let mut app = app(1);
        app.pointer(PointerEvent::Press(Pointer::new(10, 8))).unwrap();
        app.pointer(PointerEvent::Move(Pointer::new(50, 2))).unwrap();
        app.pointer(PointerEvent::Release(Pointer::new(50, 2))).unwrap();
        assert!(app.session().board().is_solved());
        assert!(app.status_message().starts_with("Solved in 1 moves"));

        app.key(KeyAction::Back).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_back_cancels_drag_without_quitting() {
        let mut app = app(1);
        app.pointer(PointerEvent::Press(Pointer::new(10, 8))).unwrap();
        assert!(matches!(
            app.session().controller().state(),
            DragState::Dragging { .. }
        ));

        app.key(KeyAction::Back).unwrap();
        assert!(!app.should_quit());
        assert!(app.session().controller().is_idle());
        assert_eq!(app.status_message(), "Drag cancelled.");

        app.key(KeyAction::Back).unwrap();
        assert!(app.should_quit());
    }
}
