//! One game from launch to victory: wires the board to its controllers.
//!
//! The session owns the board and routes every mutation through either the
//! interaction controller (manual play) or the playback scheduler (auto
//! solve), never both at once.

use std::time::Duration;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{
    AnimationFrame, AudioSink, Board, BoardEvent, Cue, Feedback, GameSummary, HanoiError, HitTest,
    InteractionController, LaunchConfig, LedgerOutcome, PlayMode, PlaybackScheduler,
    PlaybackTick, PointerEvent, ScoreKey, ScoreLedger, ScoreRecord, ScoreStore, min_moves, plan,
};

/// Who is driving the board right now.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Mode {
    /// Pointer input moves disks.
    Manual,
    /// The playback scheduler moves disks; pointer input is ignored.
    AutoPlay,
}

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameOutcome {
    summary: GameSummary,
    perfect: bool,
    ledger: Option<LedgerOutcome>,
}

/// A running game.
#[derive(Debug)]
pub struct Session<S> {
    config: LaunchConfig,
    board: Board,
    controller: InteractionController,
    scheduler: PlaybackScheduler,
    mode: Mode,
    ledger: ScoreLedger<S>,
    assisted: bool,
    last_tick: Duration,
    best: Option<ScoreRecord>,
    /// Win reached by playback, held until the last disk lands.
    pending: Option<GameOutcome>,
    outcome: Option<GameOutcome>,
    frame: Option<AnimationFrame>,
}

impl<S: ScoreStore> Session<S> {
    /// Starts a game. In [`PlayMode::Auto`] the solution is queued at once.
    ///
    /// # Errors
    ///
    /// Propagates board creation and planning failures.
    #[instrument(skip(ledger))]
    pub fn new(
        config: LaunchConfig,
        ledger: ScoreLedger<S>,
        step_duration: Duration,
    ) -> Result<Self, HanoiError> {
        let best = ledger.best(&ScoreKey::new(*config.disk_count(), *config.peg_count()));
        let mut session = Self {
            config,
            board: config.create_board()?,
            controller: InteractionController::new(),
            scheduler: PlaybackScheduler::new(step_duration),
            mode: Mode::Manual,
            ledger,
            assisted: false,
            last_tick: Duration::ZERO,
            best,
            pending: None,
            outcome: None,
            frame: None,
        };
        if *config.mode() == PlayMode::Auto {
            session.begin_playback()?;
        }
        info!(mode = %session.mode, "Session started");
        Ok(session)
    }

    /// Routes pointer input to the interaction controller.
    ///
    /// Ignored while auto-solve runs. Sound cues go to `audio`; the remaining
    /// feedback is returned for the renderer.
    ///
    /// # Errors
    ///
    /// Only internal invariant violations escape.
    pub fn pointer(
        &mut self,
        event: PointerEvent,
        hit: &impl HitTest,
        audio: &mut impl AudioSink,
    ) -> Result<Vec<Feedback>, HanoiError> {
        if self.mode != Mode::Manual {
            return Ok(Vec::new());
        }
        let feedback = self.controller.handle(event, &mut self.board, hit)?;
        for item in &feedback {
            if let Feedback::Cue(cue) = item {
                audio.play(*cue);
            }
        }
        self.drain_events();
        Ok(feedback)
    }

    /// Abandons an in-flight drag; the disk snaps back to its origin.
    pub fn cancel_drag(&mut self) -> Vec<Feedback> {
        self.controller.cancel()
    }

    /// Switches to auto-solve from the current position.
    ///
    /// Refused (returns `false`) mid-drag, during playback, or once solved.
    /// A game finished with help is never offered to the ledger.
    ///
    /// # Errors
    ///
    /// Propagates planning failures.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn request_auto_solve(&mut self) -> Result<bool, HanoiError> {
        if self.mode != Mode::Manual || !self.controller.is_idle() || self.board.is_solved() {
            debug!("Auto-solve request ignored");
            return Ok(false);
        }
        self.begin_playback()?;
        Ok(true)
    }

    /// Stops auto-solve and hands the board back to the player, frozen at
    /// the last committed move.
    #[instrument(skip(self))]
    pub fn stop_auto_solve(&mut self) -> bool {
        if self.mode != Mode::AutoPlay {
            return false;
        }
        let dropped = self.scheduler.stop();
        self.finish_playback();
        info!(dropped, move_count = self.board.move_count(), "Auto-solve stopped");
        true
    }

    /// Advances the session to `now`, measured from session start.
    ///
    /// Runs the game clock and, in auto-solve, the playback scheduler.
    ///
    /// # Errors
    ///
    /// Propagates internal invariant violations from playback.
    pub fn tick(&mut self, now: Duration, audio: &mut impl AudioSink) -> Result<(), HanoiError> {
        let dt = now.saturating_sub(self.last_tick);
        self.last_tick = now;
        self.board.advance_clock(dt);

        if self.mode == Mode::AutoPlay {
            match self.scheduler.tick(now, &mut self.board) {
                Ok(PlaybackTick::Animating(frame)) => self.frame = Some(frame),
                Ok(PlaybackTick::Finished { solved }) => {
                    self.drain_events();
                    self.finish_playback();
                    if solved {
                        audio.play(Cue::Victory);
                    }
                }
                Ok(PlaybackTick::Idle) => {
                    self.drain_events();
                    self.finish_playback();
                }
                Err(e) => {
                    self.drain_events();
                    self.finish_playback();
                    return Err(e);
                }
            }
        }

        self.drain_events();
        Ok(())
    }

    /// Returns the board to the player and publishes a win held back
    /// during playback.
    fn finish_playback(&mut self) {
        self.frame = None;
        self.mode = Mode::Manual;
        if let Some(outcome) = self.pending.take() {
            self.outcome = Some(outcome);
        }
    }

    /// Starts a fresh board with the launch configuration.
    ///
    /// # Errors
    ///
    /// Propagates board creation and planning failures.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<(), HanoiError> {
        self.board = self.config.create_board()?;
        self.controller.reset();
        self.scheduler.stop();
        self.mode = Mode::Manual;
        self.assisted = false;
        self.pending = None;
        self.outcome = None;
        self.frame = None;
        self.best = self.ledger.best(&self.key());
        if *self.config.mode() == PlayMode::Auto {
            self.begin_playback()?;
        }
        info!("Session restarted");
        Ok(())
    }

    fn begin_playback(&mut self) -> Result<(), HanoiError> {
        let plan = plan(&self.board)?;
        info!(policy = %plan.policy(), moves = plan.moves().len(), "Auto-solve planned");
        self.scheduler.start(plan.into_moves());
        self.mode = Mode::AutoPlay;
        self.assisted = true;
        Ok(())
    }

    fn drain_events(&mut self) {
        for event in self.board.take_events() {
            if let BoardEvent::GameWon(summary) = event {
                self.settle(summary);
            }
        }
    }

    fn key(&self) -> ScoreKey {
        ScoreKey::new(self.board.disk_count(), self.board.peg_count())
    }

    fn settle(&mut self, summary: GameSummary) {
        if self.outcome.is_some() || self.pending.is_some() {
            warn!("Board reported a second win, keeping the first outcome");
            return;
        }
        let perfect = min_moves(*summary.disk_count(), *summary.peg_count())
            .is_some_and(|minimum| u64::from(*summary.move_count()) <= minimum);
        let ledger = if self.assisted {
            debug!("Assisted game, skipping ledger");
            None
        } else {
            let settled = self.ledger.settle(&summary);
            if let LedgerOutcome::NewBest(record) = &settled {
                self.best = Some(record.clone());
            }
            Some(settled)
        };
        info!(
            move_count = *summary.move_count(),
            elapsed_ms = summary.elapsed_ms(),
            perfect,
            assisted = self.assisted,
            "Game won"
        );
        let outcome = GameOutcome {
            summary,
            perfect,
            ledger,
        };
        if self.mode == Mode::AutoPlay {
            self.pending = Some(outcome);
        } else {
            self.outcome = Some(outcome);
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Launch parameters.
    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Current driver.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Drag state and highlight.
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Playback state.
    pub fn scheduler(&self) -> &PlaybackScheduler {
        &self.scheduler
    }

    /// Score ledger.
    pub fn ledger(&self) -> &ScoreLedger<S> {
        &self.ledger
    }

    /// Best record for this board shape, read at start and kept current
    /// as the session settles wins.
    pub fn best(&self) -> Option<&ScoreRecord> {
        self.best.as_ref()
    }

    /// Outcome once the game is won. A playback win is published only after
    /// its final animation finishes.
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Disk in flight during auto-solve.
    pub fn frame(&self) -> Option<&AnimationFrame> {
        self.frame.as_ref()
    }

    /// Whether auto-solve touched this game.
    pub fn is_assisted(&self) -> bool {
        self.assisted
    }

    /// Fewest moves that solve this board from the start.
    pub fn min_moves(&self) -> Option<u64> {
        min_moves(self.board.disk_count(), self.board.peg_count())
    }
}
