//! Best-score ledger keyed by board dimensions.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Duration;

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::board::saturating_millis;
use super::{GameSummary, StoreError, min_moves};

/// Scores are only comparable between games of the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new)]
pub struct ScoreKey {
    /// Disks in play.
    pub disk_count: u8,
    /// Pegs on the board.
    pub peg_count: usize,
}

impl std::fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} disks / {} pegs", self.disk_count, self.peg_count)
    }
}

/// One completed manual game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct ScoreRecord {
    move_count: u32,
    elapsed_ms: u64,
    player: String,
    perfect: bool,
}

impl ScoreRecord {
    /// Ranking order: fewer moves first, then less time.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.move_count
            .cmp(&other.move_count)
            .then(self.elapsed_ms.cmp(&other.elapsed_ms))
    }

    /// Whether `self` strictly improves on `other`.
    ///
    /// Equal moves and equal time do not count as an improvement.
    pub fn beats(&self, other: &Self) -> bool {
        self.rank_cmp(other) == Ordering::Less
    }

    /// Elapsed time as a duration.
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }
}

/// Result of offering a game to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerOutcome {
    /// The stored best still stands.
    Unchanged,
    /// The candidate became the stored best.
    NewBest(ScoreRecord),
}

/// Decides whether `candidate` replaces `existing`.
pub(crate) fn compare(existing: Option<&ScoreRecord>, candidate: &ScoreRecord) -> LedgerOutcome {
    match existing {
        Some(best) if !candidate.beats(best) => LedgerOutcome::Unchanged,
        _ => LedgerOutcome::NewBest(candidate.clone()),
    }
}

/// Persistence for best scores.
///
/// Failures are reported to the ledger, which logs them and carries on: a
/// broken store never breaks a game.
pub trait ScoreStore {
    /// Loads the best record for `key`, if one exists.
    fn load(&self, key: &ScoreKey) -> Result<Option<ScoreRecord>, StoreError>;

    /// Replaces the best record for `key`.
    fn save(&mut self, key: &ScoreKey, record: &ScoreRecord) -> Result<(), StoreError>;

    /// Appends a finished game to the history. Stores without history ignore it.
    fn log_game(&mut self, _key: &ScoreKey, _record: &ScoreRecord) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Volatile store for tests and sessions run without a scores file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: HashMap<ScoreKey, ScoreRecord>,
    history: Vec<(ScoreKey, ScoreRecord)>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Games logged so far, oldest first.
    pub fn history(&self) -> &[(ScoreKey, ScoreRecord)] {
        &self.history
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &ScoreKey) -> Result<Option<ScoreRecord>, StoreError> {
        Ok(self.best.get(key).cloned())
    }

    fn save(&mut self, key: &ScoreKey, record: &ScoreRecord) -> Result<(), StoreError> {
        self.best.insert(*key, record.clone());
        Ok(())
    }

    fn log_game(&mut self, key: &ScoreKey, record: &ScoreRecord) -> Result<(), StoreError> {
        self.history.push((*key, record.clone()));
        Ok(())
    }
}

/// Compares finished games against the stored best and persists improvements.
#[derive(Debug, Clone)]
pub struct ScoreLedger<S> {
    store: S,
    player: String,
}

impl<S: ScoreStore> ScoreLedger<S> {
    /// Creates a ledger writing records under `player`.
    pub fn new(store: S, player: impl Into<String>) -> Self {
        Self {
            store,
            player: player.into(),
        }
    }

    /// Player name attached to new records.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Best record for `key`. Store failures read as "no record".
    pub fn best(&self, key: &ScoreKey) -> Option<ScoreRecord> {
        match self.store.load(key) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, %key, "Failed to load best score, treating as none");
                None
            }
        }
    }

    /// Offers a completed game to the ledger.
    ///
    /// Every game is logged to the history. The best record is replaced only
    /// on a strict improvement. Store failures are logged and otherwise
    /// ignored.
    #[instrument(skip(self))]
    pub fn record(
        &mut self,
        disk_count: u8,
        peg_count: usize,
        move_count: u32,
        elapsed: Duration,
    ) -> LedgerOutcome {
        let key = ScoreKey::new(disk_count, peg_count);
        let perfect = min_moves(disk_count, peg_count)
            .is_some_and(|minimum| u64::from(move_count) <= minimum);
        let elapsed_ms = saturating_millis(elapsed);
        let candidate = ScoreRecord::new(move_count, elapsed_ms, self.player.clone(), perfect);

        if let Err(e) = self.store.log_game(&key, &candidate) {
            warn!(error = %e, %key, "Failed to append game to history");
        }

        let existing = self.best(&key);
        let outcome = compare(existing.as_ref(), &candidate);
        match &outcome {
            LedgerOutcome::NewBest(record) => {
                info!(%key, move_count, elapsed_ms, perfect, "New best score");
                self.persist(&key, record);
            }
            LedgerOutcome::Unchanged => {
                debug!(%key, move_count, elapsed_ms, "Best score unchanged");
            }
        }
        outcome
    }

    /// Offers a finished game summary to the ledger.
    pub fn settle(&mut self, summary: &GameSummary) -> LedgerOutcome {
        self.record(
            *summary.disk_count(),
            *summary.peg_count(),
            *summary.move_count(),
            *summary.elapsed(),
        )
    }

    fn persist(&mut self, key: &ScoreKey, record: &ScoreRecord) {
        if let Err(e) = self.store.save(key, record) {
            warn!(error = %e, %key, "Failed to persist best score");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn seeded() -> ScoreLedger<MemoryStore> {
        let mut store = MemoryStore::new();
        store
            .save(
                &ScoreKey::new(4, 3),
                &ScoreRecord::new(10, 30_000, "Ada".into(), false),
            )
            .unwrap();
        ScoreLedger::new(store, "Player")
    }

    #[test]
    fn test_first_game_is_new_best() {
        let mut ledger = ScoreLedger::new(MemoryStore::new(), "Player");
        let outcome = ledger.record(3, 3, 7, secs(12));
        assert!(matches!(outcome, LedgerOutcome::NewBest(r) if *r.perfect()));
        assert!(ledger.best(&ScoreKey::new(3, 3)).is_some());
    }

    #[test]
    fn test_fewer_moves_wins_even_if_slower() {
        let mut ledger = seeded();
        let outcome = ledger.record(4, 3, 9, secs(90));
        assert!(matches!(outcome, LedgerOutcome::NewBest(_)));
    }

    #[test]
    fn test_same_moves_faster_wins() {
        let mut ledger = seeded();
        let outcome = ledger.record(4, 3, 10, secs(25));
        assert!(matches!(outcome, LedgerOutcome::NewBest(ref r) if *r.elapsed_ms() == 25_000));
        assert_eq!(
            ledger.best(&ScoreKey::new(4, 3)).map(|r| *r.elapsed_ms()),
            Some(25_000)
        );
    }

    #[test]
    fn test_more_moves_loses_even_if_faster() {
        let mut ledger = seeded();
        assert_eq!(ledger.record(4, 3, 11, secs(5)), LedgerOutcome::Unchanged);
        assert_eq!(
            ledger.best(&ScoreKey::new(4, 3)).map(|r| *r.move_count()),
            Some(10)
        );
    }

    #[test]
    fn test_exact_tie_keeps_existing() {
        let mut ledger = seeded();
        assert_eq!(ledger.record(4, 3, 10, secs(30)), LedgerOutcome::Unchanged);
        assert_eq!(
            ledger.best(&ScoreKey::new(4, 3)).map(|r| r.player().clone()),
            Some("Ada".to_string())
        );
    }

    #[test]
    fn test_keys_are_independent() {
        let mut ledger = seeded();
        let outcome = ledger.record(4, 4, 40, secs(100));
        assert!(matches!(outcome, LedgerOutcome::NewBest(_)));
    }

    #[test]
    fn test_every_game_is_logged() {
        let mut ledger = seeded();
        ledger.record(4, 3, 11, secs(5));
        ledger.record(4, 3, 9, secs(5));
        assert_eq!(ledger.store().history().len(), 2);
    }

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self, _key: &ScoreKey) -> Result<Option<ScoreRecord>, StoreError> {
            Err(StoreError::new("disk on fire"))
        }

        fn save(&mut self, _key: &ScoreKey, _record: &ScoreRecord) -> Result<(), StoreError> {
            Err(StoreError::new("disk on fire"))
        }
    }

    #[test]
    fn test_store_failures_are_not_fatal() {
        let mut ledger = ScoreLedger::new(BrokenStore, "Player");
        let outcome = ledger.record(3, 3, 7, secs(1));
        assert!(matches!(outcome, LedgerOutcome::NewBest(_)));
    }

    #[test]
    fn test_settle_uses_summary() {
        let mut ledger = seeded();
        let summary = GameSummary::new(4, 3, 15, secs(20));
        assert_eq!(ledger.settle(&summary), LedgerOutcome::Unchanged);
    }

    #[test]
    fn test_perfect_flag_follows_minimum() {
        let mut ledger = ScoreLedger::new(MemoryStore::new(), "Player");
        let outcome = ledger.record(3, 4, 6, secs(1));
        assert!(matches!(outcome, LedgerOutcome::NewBest(r) if !*r.perfect()));
    }
}
