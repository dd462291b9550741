//! JSON-backed score store.
//!
//! The file keeps one best record per board shape plus a bounded history of
//! every finished manual game. It is re-read on every access so that a
//! damaged file is reported, never silently overwritten.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use hanoi_core::{ScoreKey, ScoreRecord, ScoreStore, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Oldest history entries are dropped beyond this many.
pub const MAX_HISTORY: usize = 1000;

/// A finished game in the history.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct HistoryEntry {
    #[serde(flatten)]
    key: ScoreKey,
    #[serde(flatten)]
    record: ScoreRecord,
    played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct BestEntry {
    #[serde(flatten)]
    key: ScoreKey,
    #[serde(flatten)]
    record: ScoreRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ScoresFile {
    #[serde(default)]
    best: Vec<BestEntry>,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

/// Score store persisted as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    /// Creates a store at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read(&self) -> Result<ScoresFile, StoreError> {
        if !self.path.exists() {
            debug!("Scores file missing, starting empty");
            return Ok(ScoresFile::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::new(format!("Failed to read scores file: {}", e)))?;
        if content.trim().is_empty() {
            return Ok(ScoresFile::default());
        }
        serde_json::from_str(&content)
            .map_err(|e| StoreError::new(format!("Failed to parse scores file: {}", e)))
    }

    #[instrument(skip(self, file), fields(path = %self.path.display()))]
    fn write(&self, file: &ScoresFile) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(file)
            .map_err(|e| StoreError::new(format!("Failed to serialize scores: {}", e)))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::new(format!("Failed to create scores directory: {}", e)))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| StoreError::new(format!("Failed to write scores file: {}", e)))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::new(format!("Failed to replace scores file: {}", e)))?;
        debug!("Scores file written");
        Ok(())
    }

    /// Best record per board shape, ordered by shape.
    pub fn bests(&self) -> Result<Vec<(ScoreKey, ScoreRecord)>, StoreError> {
        let mut bests: Vec<_> = self
            .read()?
            .best
            .into_iter()
            .map(|entry| (entry.key, entry.record))
            .collect();
        bests.sort_by_key(|(key, _)| *key);
        Ok(bests)
    }

    /// Top `limit` games from the history, best first.
    ///
    /// Ranked by fewest moves, then shortest time. With `key`, only games of
    /// that shape are considered.
    #[instrument(skip(self))]
    pub fn leaderboard(
        &self,
        key: Option<ScoreKey>,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, StoreError> {
        let mut entries: Vec<_> = self
            .read()?
            .history
            .into_iter()
            .filter(|entry| key.is_none_or(|k| entry.key == k))
            .collect();
        entries.sort_by(|a, b| {
            a.key
                .cmp(&b.key)
                .then_with(|| a.record.rank_cmp(&b.record))
                .then(a.played_at.cmp(&b.played_at))
        });
        entries.truncate(limit);
        Ok(entries)
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self, key: &ScoreKey) -> Result<Option<ScoreRecord>, StoreError> {
        Ok(self
            .read()?
            .best
            .into_iter()
            .find(|entry| entry.key == *key)
            .map(|entry| entry.record))
    }

    #[instrument(skip(self, record))]
    fn save(&mut self, key: &ScoreKey, record: &ScoreRecord) -> Result<(), StoreError> {
        let mut file = self.read()?;
        match file.best.iter_mut().find(|entry| entry.key == *key) {
            Some(entry) => entry.record = record.clone(),
            None => file.best.push(BestEntry {
                key: *key,
                record: record.clone(),
            }),
        }
        self.write(&file)?;
        info!(%key, "Best score saved");
        Ok(())
    }

    #[instrument(skip(self, record))]
    fn log_game(&mut self, key: &ScoreKey, record: &ScoreRecord) -> Result<(), StoreError> {
        let mut file = self.read()?;
        file.history
            .push(HistoryEntry::new(*key, record.clone(), Utc::now()));
        if file.history.len() > MAX_HISTORY {
            let excess = file.history.len() - MAX_HISTORY;
            file.history.drain(..excess);
        }
        self.write(&file)
    }
}
