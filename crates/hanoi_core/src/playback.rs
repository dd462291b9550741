//! Playback scheduler: turns a move list into timed animation steps.
//!
//! Moves are committed to the board the instant their animation begins, so
//! the logical state is never ambiguous while a disk is in flight.

use std::collections::VecDeque;
use std::time::Duration;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::{Board, Disk, HanoiError, Move};

/// Time one animated move takes unless configured otherwise.
pub const DEFAULT_STEP_DURATION: Duration = Duration::from_millis(400);

/// A disk position in board space.
///
/// `x` is measured in pegs (peg `i` sits at `x = i`), `y` in disk heights
/// above the base (the bottom slot is `y = 0`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiskPosition {
    /// Horizontal position, in pegs.
    pub x: f32,
    /// Vertical position, in disk heights.
    pub y: f32,
}

/// Quadratic ease-out: fast start, gentle landing.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Position along the lift, slide, drop path at fraction `t`.
///
/// The disk rises from `from_level` to `lift`, slides across, then descends
/// to `to_level`. `t` is eased and mapped onto the path by distance, so the
/// three legs share one continuous speed curve.
pub fn lift_path(
    from_peg: f32,
    from_level: f32,
    to_peg: f32,
    to_level: f32,
    lift: f32,
    t: f32,
) -> DiskPosition {
    let up = (lift - from_level).max(0.0);
    let across = (to_peg - from_peg).abs();
    let down = (lift - to_level).max(0.0);
    let total = up + across + down;
    if total <= f32::EPSILON {
        return DiskPosition {
            x: to_peg,
            y: to_level,
        };
    }

    let mut s = ease_out_quad(t) * total;
    if s <= up {
        return DiskPosition {
            x: from_peg,
            y: from_level + s,
        };
    }
    s -= up;
    if s <= across {
        let direction = (to_peg - from_peg).signum();
        return DiskPosition {
            x: from_peg + direction * s,
            y: lift,
        };
    }
    s -= across;
    DiskPosition {
        x: to_peg,
        y: (lift - s).max(to_level),
    }
}

/// One animated move, owned by the scheduler until it completes.
#[derive(Debug, Clone, Copy, PartialEq, Getters)]
pub struct AnimationStep {
    disk: Disk,
    mov: Move,
    from_level: usize,
    to_level: usize,
    lift: f32,
    start_time: Duration,
    duration: Duration,
}

impl AnimationStep {
    /// Elapsed fraction at `now`, clamped to `0.0..=1.0`.
    pub fn fraction(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Interpolated disk position at `now`.
    pub fn position(&self, now: Duration) -> DiskPosition {
        lift_path(
            self.mov.from as f32,
            self.from_level as f32,
            self.mov.to as f32,
            self.to_level as f32,
            self.lift,
            self.fraction(now),
        )
    }

    fn frame(&self, now: Duration) -> AnimationFrame {
        AnimationFrame {
            disk: self.disk,
            mov: self.mov,
            fraction: self.fraction(now),
            position: self.position(now),
        }
    }
}

/// What a renderer needs to draw the disk in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Disk in flight. The board already lists it on `mov.to`.
    pub disk: Disk,
    /// The committed move.
    pub mov: Move,
    /// Elapsed fraction of the step.
    pub fraction: f32,
    /// Interpolated position.
    pub position: DiskPosition,
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackTick {
    /// Nothing scheduled.
    Idle,
    /// A disk is in flight.
    Animating(AnimationFrame),
    /// The last step just finished.
    Finished {
        /// Whether the board ended solved.
        solved: bool,
    },
}

/// Advances a move sequence one animated step at a time.
#[derive(Debug, Clone)]
pub struct PlaybackScheduler {
    queue: VecDeque<Move>,
    active: Option<AnimationStep>,
    step_duration: Duration,
    running: bool,
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DURATION)
    }
}

impl PlaybackScheduler {
    /// Creates an idle scheduler with a fixed per-move duration.
    pub fn new(step_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            active: None,
            step_duration,
            running: false,
        }
    }

    /// Queues `moves`, replacing anything pending. The first move is
    /// committed on the next [`tick`](Self::tick).
    #[instrument(skip(self, moves), fields(count = moves.len()))]
    pub fn start(&mut self, moves: Vec<Move>) {
        info!(count = moves.len(), "Playback started");
        self.queue = moves.into();
        self.active = None;
        self.running = true;
    }

    /// Advances playback to `now`.
    ///
    /// With no step in flight, pops the next move, commits it to `board`, and
    /// starts its animation. A step whose fraction reaches 1.0 is discarded;
    /// the next move is popped on the following tick.
    ///
    /// # Errors
    ///
    /// Returns [`HanoiError::InternalInvariantViolation`] if the board refuses a
    /// scheduled move. Playback stops; the board keeps its last good state.
    pub fn tick(&mut self, now: Duration, board: &mut Board) -> Result<PlaybackTick, HanoiError> {
        if let Some(step) = self.active {
            let frame = step.frame(now);
            if frame.fraction >= 1.0 {
                self.active = None;
            }
            return Ok(PlaybackTick::Animating(frame));
        }

        if !self.running {
            return Ok(PlaybackTick::Idle);
        }

        let Some(mov) = self.queue.pop_front() else {
            self.running = false;
            let solved = board.is_solved();
            info!(solved, move_count = board.move_count(), "Playback finished");
            return Ok(PlaybackTick::Finished { solved });
        };

        self.commit(mov, now, board).map(PlaybackTick::Animating)
    }

    #[instrument(skip(self, board))]
    fn commit(
        &mut self,
        mov: Move,
        now: Duration,
        board: &mut Board,
    ) -> Result<AnimationFrame, HanoiError> {
        let from_level = board.peg(mov.from).map_or(0, |p| p.len().saturating_sub(1));
        let to_level = board.peg(mov.to).map_or(0, |p| p.len());
        let disk = board.top(mov.from);

        if let Err(e) = board.apply_move(mov.from, mov.to) {
            error!(error = %e, %mov, "Scheduled move rejected by board");
            self.stop();
            return Err(HanoiError::InternalInvariantViolation(format!(
                "scheduled move {} rejected: {}",
                mov, e
            )));
        }
        let disk = disk.ok_or_else(|| {
            HanoiError::InternalInvariantViolation(format!("no disk moved by {}", mov))
        })?;

        let step = AnimationStep {
            disk,
            mov,
            from_level,
            to_level,
            lift: f32::from(board.disk_count()) + 1.0,
            start_time: now,
            duration: self.step_duration,
        };
        debug!(%mov, %disk, remaining = self.queue.len(), "Step committed");
        self.active = Some(step);
        Ok(step.frame(now))
    }

    /// Discards the step in flight and all pending moves. The board stays as
    /// of the last committed move. Returns how many moves were dropped.
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        self.active = None;
        self.running = false;
        debug!(dropped, "Playback stopped");
        dropped
    }

    /// Whether nothing is scheduled or in flight.
    pub fn is_idle(&self) -> bool {
        !self.running && self.active.is_none()
    }

    /// Moves not yet committed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Step in flight, if any.
    pub fn active(&self) -> Option<&AnimationStep> {
        self.active.as_ref()
    }

    /// Per-move duration.
    pub fn step_duration(&self) -> Duration {
        self.step_duration
    }
}
