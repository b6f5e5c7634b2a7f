//! Session state shared by the game scenes
//!
//! Lives for one process; nothing here is persisted.

use serde::{Deserialize, Serialize};

/// Maximum number of best scores to keep
pub const MAX_BEST_SCORES: usize = 10;

/// Score of the current run plus the best runs of this session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Taps landed in the current run
    pub score: u64,
    /// Finished runs
    pub runs: u32,
    /// Best scores, sorted descending
    best: Vec<u64>,
    /// Last composed share message
    #[serde(skip)]
    pub shared: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score makes the best-score table
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.best.len() < MAX_BEST_SCORES {
            return true;
        }
        self.best.last().is_none_or(|&lowest| score > lowest)
    }

    /// Close the current run and record its score
    ///
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn finish_run(&mut self) -> Option<usize> {
        self.runs += 1;
        let score = self.score;
        if !self.qualifies(score) {
            log::info!("Run {} ended with score {}", self.runs, score);
            return None;
        }

        let index = self
            .best
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.best.len());
        self.best.insert(index, score);
        self.best.truncate(MAX_BEST_SCORES);

        log::info!("Run {} ended with score {} (rank {})", self.runs, score, index + 1);
        Some(index + 1)
    }

    pub fn best_score(&self) -> Option<u64> {
        self.best.first().copied()
    }

    pub fn best_scores(&self) -> &[u64] {
        &self.best
    }
}

/// Text posted by the share button
pub fn share_message(score: u64) -> String {
    format!("I kept the ball up for {score} taps in Tap Bounce!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_never_qualifies() {
        let mut session = Session::new();
        assert_eq!(session.finish_run(), None);
        assert_eq!(session.runs, 1);
        assert!(session.best_scores().is_empty());
    }

    #[test]
    fn test_best_scores_sorted_and_capped() {
        let mut session = Session::new();
        for score in 1..=12 {
            session.score = score;
            session.finish_run();
        }
        assert_eq!(session.best_scores().len(), MAX_BEST_SCORES);
        assert_eq!(session.best_score(), Some(12));
        assert_eq!(session.best_scores().last(), Some(&3));

        // Too low for a full table
        session.score = 2;
        assert_eq!(session.finish_run(), None);

        session.score = 7;
        assert_eq!(session.finish_run(), Some(6));
    }
}
