//! Persisted session history: a bounded list of most-recent session
//! summaries, used only as input to the advisory and redemption calls.
//!
//! Persistence failures are never fatal: a missing or corrupt file reads
//! as an empty history, and a failed write is logged and dropped.

use std::fs;
use std::path::PathBuf;

use coreguard_core::constants::{EARLY_FAILURE_STREAK, EARLY_FAILURE_WAVE, HISTORY_LIMIT};
use coreguard_core::state::SessionSummary;

/// Bounded session history with optional JSON file backing.
pub struct SessionLog {
    entries: Vec<SessionSummary>,
    path: Option<PathBuf>,
}

impl SessionLog {
    /// History that lives only in memory (tests, embeddings that persist
    /// elsewhere).
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            path: None,
        }
    }

    /// Load history from a JSON file, or start empty if it is missing
    /// or unreadable.
    pub fn load(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("session history at {} is corrupt: {e}", path.display());
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        Self {
            entries,
            path: Some(path),
        }
    }

    /// Oldest-first summaries.
    pub fn entries(&self) -> &[SessionSummary] {
        &self.entries
    }

    /// Append a summary, keeping only the most recent entries, and write
    /// through to disk when backed by a file.
    pub fn record(&mut self, summary: SessionSummary) {
        self.entries.push(summary);
        if self.entries.len() > HISTORY_LIMIT {
            let excess = self.entries.len() - HISTORY_LIMIT;
            self.entries.drain(..excess);
        }
        self.save();
    }

    /// True when the last few sessions all ended before the early-failure
    /// wave threshold. Triggers the redemption-card request.
    pub fn early_failure_trend(&self) -> bool {
        if self.entries.len() < EARLY_FAILURE_STREAK {
            return false;
        }
        self.entries[self.entries.len() - EARLY_FAILURE_STREAK..]
            .iter()
            .all(|s| s.wave_reached < EARLY_FAILURE_WAVE)
    }

    fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                log::warn!("cannot create history directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("failed to write session history: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize session history: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(wave: u32) -> SessionSummary {
        SessionSummary {
            wave_reached: wave,
            defeated_count: wave * 3,
            timestamp: 1_700_000_000 + wave as u64,
        }
    }

    #[test]
    fn record_bounds_history() {
        let mut log = SessionLog::in_memory();
        for wave in 0..(HISTORY_LIMIT as u32 + 5) {
            log.record(summary(wave));
        }
        assert_eq!(log.entries().len(), HISTORY_LIMIT);
        // Oldest entries were dropped.
        assert_eq!(log.entries()[0].wave_reached, 5);
    }

    #[test]
    fn trend_needs_full_streak() {
        let mut log = SessionLog::in_memory();
        log.record(summary(2));
        log.record(summary(3));
        assert!(!log.early_failure_trend());
        log.record(summary(4));
        assert!(log.early_failure_trend());
    }

    #[test]
    fn one_good_session_breaks_the_trend() {
        let mut log = SessionLog::in_memory();
        log.record(summary(2));
        log.record(summary(EARLY_FAILURE_WAVE + 2));
        log.record(summary(3));
        log.record(summary(4));
        assert!(log.early_failure_trend());

        log.record(summary(EARLY_FAILURE_WAVE));
        assert!(!log.early_failure_trend());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = std::env::temp_dir().join("coreguard_test_history");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("sessions.json");

        let mut log = SessionLog::load(path.clone());
        log.record(summary(6));
        log.record(summary(9));

        let restored = SessionLog::load(path);
        assert_eq!(restored.entries().len(), 2);
        assert_eq!(restored.entries()[1].wave_reached, 9);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = std::env::temp_dir().join("coreguard_test_history_corrupt");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sessions.json");
        fs::write(&path, "not json").unwrap();

        let log = SessionLog::load(path);
        assert!(log.entries().is_empty());

        let _ = fs::remove_dir_all(&dir);
    }
}
