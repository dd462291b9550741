//! Fire-and-forget feedback effects.

use serde::{Deserialize, Serialize};

/// A discrete sound cue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Cue {
    /// A disk was picked up.
    Pickup,
    /// A disk landed on a new peg.
    Drop,
    /// A move was refused.
    InvalidMove,
    /// The game was won.
    Victory,
}

/// Audio collaborator. No acknowledgement is expected.
pub trait AudioSink {
    /// Plays a cue.
    fn play(&mut self, cue: Cue);
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

impl AudioSink for Vec<Cue> {
    fn play(&mut self, cue: Cue) {
        self.push(cue);
    }
}
