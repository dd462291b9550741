//! End-to-end games driven through the terminal layout.

use std::time::Duration;

use hanoi::JsonScoreStore;
use hanoi::tui::BoardLayout;
use hanoi_core::{
    Cue, Feedback, LaunchConfig, LedgerOutcome, Mode, PegId, PlayMode, Pointer, PointerEvent,
    ScoreKey, ScoreLedger, ScoreStore, Session, generate,
};
use ratatui::layout::Rect;
use tempfile::TempDir;

/// Three 20-column bands; base on row 9.
fn layout() -> BoardLayout {
    BoardLayout::new(Rect::new(0, 0, 60, 10), 3, 3)
}

fn setup_session(mode: PlayMode) -> (TempDir, Session<JsonScoreStore>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let ledger = ScoreLedger::new(JsonScoreStore::new(dir.path().join("scores.json")), "Ada");
    let config = LaunchConfig::new(3, 3, None, mode).expect("Bad config");
    let session =
        Session::new(config, ledger, Duration::from_millis(20)).expect("Session failed");
    (dir, session)
}

/// Drags the top disk of `from` onto `to` with real screen coordinates.
fn drag(session: &mut Session<JsonScoreStore>, from: PegId, to: PegId, audio: &mut Vec<Cue>) -> Vec<Feedback> {
    let layout = layout();
    let height = session.board().peg(from).map_or(0, |p| p.len()) as u16;
    let grab = Pointer::new(layout.peg_center(from), 9 - height);
    let drop = Pointer::new(layout.peg_center(to), 2);

    let mut feedback = session
        .pointer(PointerEvent::Press(grab), &layout, audio)
        .expect("Press failed");
    feedback.extend(
        session
            .pointer(PointerEvent::Move(drop), &layout, audio)
            .expect("Move failed"),
    );
    feedback.extend(
        session
            .pointer(PointerEvent::Release(drop), &layout, audio)
            .expect("Release failed"),
    );
    feedback
}

#[test]
fn test_perfect_manual_game_is_recorded() {
    let (_dir, mut session) = setup_session(PlayMode::Manual);
    let mut audio = Vec::new();
    session
        .tick(Duration::from_secs(4), &mut audio)
        .expect("Tick failed");

    for mov in generate(3, 0, 2, 1).expect("Generate failed") {
        let feedback = drag(&mut session, mov.from, mov.to, &mut audio);
        assert!(feedback.contains(&Feedback::Placed(mov)), "{} should land", mov);
    }

    assert!(session.board().is_solved());
    assert_eq!(session.board().move_count(), 7);
    let outcome = session.outcome().expect("No outcome");
    assert!(*outcome.perfect());
    assert!(matches!(outcome.ledger(), Some(LedgerOutcome::NewBest(_))));

    let best = session
        .ledger()
        .store()
        .load(&ScoreKey::new(3, 3))
        .expect("Load failed")
        .expect("Missing record");
    assert_eq!(*best.move_count(), 7);
    assert_eq!(*best.elapsed_ms(), 4_000);
    assert_eq!(best.player(), "Ada");
    assert_eq!(audio.last(), Some(&Cue::Victory));
}

#[test]
fn test_illegal_drop_snaps_back() {
    let (_dir, mut session) = setup_session(PlayMode::Manual);
    let mut audio = Vec::new();
    drag(&mut session, 0, 2, &mut audio);

    let before = session.board().clone();
    let feedback = drag(&mut session, 0, 2, &mut audio);

    assert!(feedback.iter().any(|f| matches!(f, Feedback::SnapBack { origin: 0, .. })));
    assert_eq!(audio.last(), Some(&Cue::InvalidMove));
    assert_eq!(session.board().pegs(), before.pegs());
    assert_eq!(session.board().move_count(), 1);
}

#[test]
fn test_auto_play_leaves_scores_alone() {
    let (_dir, mut session) = setup_session(PlayMode::Auto);
    let mut audio = Vec::new();
    assert_eq!(session.mode(), Mode::AutoPlay);

    let mut now = Duration::ZERO;
    while session.mode() == Mode::AutoPlay {
        now += Duration::from_millis(10);
        session.tick(now, &mut audio).expect("Tick failed");
    }

    assert!(session.board().is_solved());
    assert_eq!(session.board().move_count(), 7);
    assert!(session.outcome().expect("No outcome").ledger().is_none());
    assert_eq!(
        session
            .ledger()
            .store()
            .load(&ScoreKey::new(3, 3))
            .expect("Load failed"),
        None
    );
}

#[test]
fn test_stop_then_finish_by_hand() {
    let (_dir, mut session) = setup_session(PlayMode::Manual);
    let mut audio = Vec::new();
    assert!(session.request_auto_solve().expect("Solve failed"));
    session
        .tick(Duration::from_millis(1), &mut audio)
        .expect("Tick failed");
    assert!(session.stop_auto_solve());

    // One move committed by the solver; finish the rest manually
    assert_eq!(session.board().move_count(), 1);
    for mov in generate(3, 0, 2, 1).expect("Generate failed").into_iter().skip(1) {
        drag(&mut session, mov.from, mov.to, &mut audio);
    }

    assert!(session.board().is_solved());
    assert!(session.outcome().expect("No outcome").ledger().is_none());
}
