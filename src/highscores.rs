//! Local best-score records
//!
//! Persisted to LocalStorage, top 10 finished sessions across all settings.

use serde::{Deserialize, Serialize};

use crate::settings::{Difficulty, Settings};
use crate::sim::SessionSummary;

/// Maximum number of records to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished session worth remembering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub score: u64,
    /// Percent
    pub accuracy: f64,
    /// Milliseconds
    pub avg_reaction_ms: f64,
    pub difficulty: Difficulty,
    /// Session length (s)
    pub duration: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl HighScoreEntry {
    pub fn from_summary(summary: &SessionSummary, settings: &Settings, timestamp: f64) -> Self {
        Self {
            score: summary.score,
            accuracy: summary.accuracy,
            avg_reaction_ms: summary.avg_reaction_time,
            difficulty: settings.difficulty,
            duration: settings.duration,
            timestamp,
        }
    }
}

/// Records sorted by score, highest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "aim_trainer_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// A zero score never qualifies; otherwise it must beat the lowest
    /// record once the board is full
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank a score would take (1-indexed), `None` if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a record if it qualifies. Ties rank below existing entries.
    /// Returns the rank achieved (1-indexed).
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let rank = self.potential_rank(entry.score)?;
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record a finished session
    pub fn record(
        &mut self,
        summary: &SessionSummary,
        settings: &Settings,
        timestamp: f64,
    ) -> Option<usize> {
        let rank = self.add_score(HighScoreEntry::from_summary(summary, settings, timestamp));
        if let Some(rank) = rank {
            log::info!("New high score #{}: {}", rank, summary.score);
        }
        rank
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Best record played at `difficulty`
    pub fn best_for(&self, difficulty: Difficulty) -> Option<&HighScoreEntry> {
        self.entries.iter().find(|e| e.difficulty == difficulty)
    }

    /// Load records from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScores>(&json) {
                    Ok(scores) => {
                        log::info!("Loaded {} high scores", scores.entries.len());
                        return scores;
                    }
                    Err(e) => log::warn!("Failed to parse stored high scores: {}", e),
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save records to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64, difficulty: Difficulty) -> HighScoreEntry {
        HighScoreEntry {
            score,
            accuracy: 80.0,
            avg_reaction_ms: 400.0,
            difficulty,
            duration: 60,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_sorted_insert_and_ties() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(entry(500, Difficulty::Medium)), Some(1));
        assert_eq!(scores.add_score(entry(900, Difficulty::Hard)), Some(1));
        assert_eq!(scores.add_score(entry(500, Difficulty::Easy)), Some(3));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![900, 500, 500]);
        assert_eq!(scores.entries[1].difficulty, Difficulty::Medium);
        assert_eq!(scores.top_score(), Some(900));
    }

    #[test]
    fn test_full_board_keeps_best_ten() {
        let mut scores = HighScores::new();
        for s in 1..=10 {
            scores.add_score(entry(s * 100, Difficulty::Medium));
        }
        assert!(!scores.qualifies(100));
        assert_eq!(scores.add_score(entry(50, Difficulty::Medium)), None);
        assert_eq!(scores.add_score(entry(150, Difficulty::Medium)), Some(10));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(150));
    }

    #[test]
    fn test_record_from_summary() {
        let mut scores = HighScores::new();
        let summary = SessionSummary {
            score: 4321,
            total_targets: 10,
            clicked_targets: 8,
            missed_clicks: 2,
            targets_expired: 2,
            accuracy: 80.0,
            avg_reaction_time: 350.0,
            reaction_time_history: Vec::new(),
        };
        let settings = Settings {
            difficulty: Difficulty::Hard,
            duration: 90,
            ..Settings::default()
        };
        assert_eq!(scores.record(&summary, &settings, 1.0e12), Some(1));

        let best = scores.best_for(Difficulty::Hard).unwrap();
        assert_eq!(best.score, 4321);
        assert_eq!(best.duration, 90);
        assert!(scores.best_for(Difficulty::Easy).is_none());
    }

    #[test]
    fn test_serde_shape() {
        let mut scores = HighScores::new();
        scores.add_score(entry(700, Difficulty::Easy));
        let json = serde_json::to_string(&scores).unwrap();
        assert!(json.contains("\"avgReactionMs\":400.0"));
        assert!(json.contains("\"difficulty\":\"EASY\""));
        let back: HighScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries, scores.entries);
    }
}
