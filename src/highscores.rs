//! High score leaderboard system
//!
//! Persisted as a JSON array of `{name, score}` under a single storage key,
//! tracks top 10 scores.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Name the player typed at game over
    pub name: String,
    /// Player's score
    pub score: u32,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key for the leaderboard slot
    pub const STORAGE_KEY: &'static str = "skyline_dash_leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary entries, restoring the ordering and size invariants
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Parse the persisted JSON array
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<HighScoreEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Check if a score would survive insertion
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties go after existing entries, so they must beat the lowest
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

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        // Find insertion point (sorted descending by score, after equal scores)
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

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Record a finished run under the name the player gave.
    /// A missing or blank name means the player declined; nothing is recorded.
    pub fn submit(&mut self, name: Option<&str>, score: u32) -> Option<usize> {
        let name = name.map(str::trim).filter(|n| !n.is_empty())?;
        self.add_score(name, score)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from storage.
    ///
    /// Unreadable or malformed data counts as an empty leaderboard.
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(e) => log::warn!("Discarding malformed leaderboard: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read leaderboard: {e}"),
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to storage
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json = self.to_json()?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn names_and_scores(board: &HighScores) -> Vec<(&str, u32)> {
        board
            .entries()
            .iter()
            .map(|e| (e.name.as_str(), e.score))
            .collect()
    }

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut board = HighScores::new();
        board.add_score("A", 50);
        board.add_score("B", 80);
        let rank = board.add_score("C", 65);

        assert_eq!(rank, Some(2));
        assert_eq!(names_and_scores(&board), vec![("B", 80), ("C", 65), ("A", 50)]);
    }

    #[test]
    fn test_capacity_evicts_lowest() {
        let mut board = HighScores::new();
        for i in 1..=10 {
            board.add_score(&format!("p{i}"), i * 10);
        }
        assert_eq!(board.entries().len(), MAX_HIGH_SCORES);

        // Too low to make it
        assert!(!board.qualifies(10));
        assert_eq!(board.add_score("low", 5), None);

        // Beats the 10-point entry, which falls off
        assert_eq!(board.add_score("mid", 55), Some(6));
        assert_eq!(board.entries().len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries().last().map(|e| e.score), Some(20));
        assert_eq!(board.top_score(), Some(100));
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut board = HighScores::new();
        board.add_score("first", 30);
        assert_eq!(board.potential_rank(30), Some(2));
        assert_eq!(board.add_score("second", 30), Some(2));
        assert_eq!(board.entries()[0].name, "first");
    }

    #[test]
    fn test_zero_score_is_recorded() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score("newbie", 0), Some(1));
    }

    #[test]
    fn test_submit_declined_name() {
        let mut board = HighScores::new();
        assert_eq!(board.submit(None, 40), None);
        assert_eq!(board.submit(Some("   "), 40), None);
        assert!(board.is_empty());

        assert_eq!(board.submit(Some("  Ada "), 40), Some(1));
        assert_eq!(board.entries()[0].name, "Ada");
    }

    #[test]
    fn test_json_shape_is_plain_array() {
        let mut board = HighScores::new();
        board.add_score("A", 7);
        assert_eq!(board.to_json().unwrap(), r#"[{"name":"A","score":7}]"#);
    }

    #[test]
    fn test_from_json_restores_invariants() {
        let json = r#"[{"name":"A","score":1},{"name":"B","score":9},{"name":"C","score":5}]"#;
        let board = HighScores::from_json(json).unwrap();
        assert_eq!(names_and_scores(&board), vec![("B", 9), ("C", 5), ("A", 1)]);
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut store = MemoryStore::new();
        store.set(HighScores::STORAGE_KEY, "{not json").unwrap();
        assert!(HighScores::load(&store).is_empty());

        store.set(HighScores::STORAGE_KEY, r#"[{"name":"A"}]"#).unwrap();
        assert!(HighScores::load(&store).is_empty());

        assert!(HighScores::load(&MemoryStore::new()).is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut board = HighScores::new();
        board.add_score("A", 50);
        board.add_score("B", 80);
        board.save(&mut store).unwrap();

        assert_eq!(HighScores::load(&store), board);
    }

    proptest! {
        #[test]
        fn stays_sorted_and_capped(scores in proptest::collection::vec(0u32..1000, 0..40)) {
            let mut board = HighScores::new();
            for (i, score) in scores.iter().enumerate() {
                board.add_score(&format!("p{i}"), *score);
                prop_assert!(board.entries().len() <= MAX_HIGH_SCORES);
                prop_assert!(board.entries().windows(2).all(|w| w[0].score >= w[1].score));
            }

            // The board holds exactly the best scores seen
            let mut expected = scores.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            expected.truncate(MAX_HIGH_SCORES);
            let kept: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
            prop_assert_eq!(kept, expected);
        }
    }
}
