//! Sound cues for a terminal: only the bell is available.

use hanoi_core::{AudioSink, Cue};
use std::io::Write;
use tracing::{debug, warn};

/// Rings the terminal bell for refused moves and victories.
///
/// Pickup and drop cues are too frequent for the bell and stay silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl TerminalBell {
    /// Whether this cue rings the bell.
    pub fn rings(cue: Cue) -> bool {
        matches!(cue, Cue::InvalidMove | Cue::Victory)
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        debug!(%cue, "Cue");
        if !Self::rings(cue) {
            return;
        }
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            warn!(error = %e, "Failed to ring terminal bell");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_refusals_and_victory_ring() {
        assert!(TerminalBell::rings(Cue::InvalidMove));
        assert!(TerminalBell::rings(Cue::Victory));
        assert!(!TerminalBell::rings(Cue::Pickup));
        assert!(!TerminalBell::rings(Cue::Drop));
    }
}
