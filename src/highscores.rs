//! High score leaderboard system
//!
//! Persisted as JSON, tracks the top 10 two-player scores.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{read_json, write_json};
use crate::sim::Scoreboard;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub name: String,
}

/// High score leaderboard, sorted best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a score if it qualifies. Returns the rank achieved (1-indexed).
    pub fn add_score(&mut self, score: u32, name: impl Into<String>) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                name: name.into(),
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Offer both players' final scores from a finished two-player session
    pub fn record_session(&mut self, scores: &Scoreboard) -> Vec<usize> {
        [&scores.left, &scores.right]
            .into_iter()
            .filter_map(|player| self.add_score(player.score, player.name.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    pub fn load(path: &Path) -> Self {
        match read_json::<Self>(path) {
            Ok(mut scores) => {
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::info!("No high scores found, starting fresh ({e})");
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> bool {
        match write_json(path, self) {
            Ok(()) => {
                log::info!("High scores saved ({} entries)", self.entries.len());
                true
            }
            Err(e) => {
                log::warn!("Failed to save high scores: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_insert_and_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, "a"), Some(1));
        assert_eq!(scores.add_score(9, "b"), Some(1));
        assert_eq!(scores.add_score(7, "c"), Some(2));
        let names: Vec<&str> = scores.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
        assert_eq!(scores.top().map(|e| e.score), Some(9));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, "nobody"), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_full_table_keeps_ten() {
        let mut scores = HighScores::new();
        for i in 1..=10 {
            scores.add_score(i * 2, format!("p{i}"));
        }
        assert!(!scores.qualifies(2));
        assert_eq!(scores.potential_rank(3), Some(10));
        assert_eq!(scores.add_score(21, "best"), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(4));
    }

    #[test]
    fn test_record_session() {
        let mut board = Scoreboard::new("Ada", "Grace");
        board.left.score = 6;
        board.right.score = 0;
        let mut scores = HighScores::new();
        assert_eq!(scores.record_session(&board), vec![1]);
        assert_eq!(scores.entries[0].name, "Ada");
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("neo-pong-hs-{}.json", std::process::id()));
        let mut scores = HighScores::new();
        scores.add_score(12, "Ada");
        assert!(scores.save(&path));
        assert_eq!(HighScores::load(&path), scores);
        let _ = std::fs::remove_file(&path);
    }
}
