//! In-memory session leaderboard
//!
//! Tracks the top 10 finished runs for the lifetime of the process. Nothing
//! is persisted.

use serde::Serialize;

use crate::sim::Difficulty;

/// Maximum number of entries to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, Serialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub difficulty: Difficulty,
    /// Ticks survived
    pub ticks: u64,
}

/// Session leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, Serialize)]
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

    /// Record a finished run. Returns the rank achieved (1-indexed) or None
    /// if it didn't qualify.
    pub fn add_score(&mut self, score: u32, difficulty: Difficulty, ticks: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            difficulty,
            ticks,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score of the session (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_add_score_keeps_descending_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, Difficulty::Easy, 100), Some(1));
        assert_eq!(scores.add_score(9, Difficulty::Hard, 200), Some(1));
        assert_eq!(scores.add_score(7, Difficulty::Medium, 150), Some(2));
        let values: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![9, 7, 5]);
        assert_eq!(scores.top_score(), Some(9));
    }

    #[test]
    fn test_leaderboard_caps_at_ten() {
        let mut scores = HighScores::new();
        for score in 1..=12 {
            scores.add_score(score, Difficulty::Easy, 0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(12));
        // 1 and 2 fell off the bottom
        assert_eq!(scores.entries.last().map(|e| e.score), Some(3));
        // A score below the floor no longer qualifies
        assert_eq!(scores.add_score(2, Difficulty::Easy, 0), None);
    }
}
