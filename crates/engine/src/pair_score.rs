//! PairScoreTable - sparse (user, movie) score overrides
//!
//! Populated only while a generation that declares a score source is active
//! (e.g. a neural collaborative-filtering model exporting precomputed
//! predictions). Switching to a generation without one leaves the table
//! empty.

use std::collections::HashMap;

use marquee_core::{MovieId, UserId};

/// Returned by [`PairScoreTable::score`] when no override exists.
///
/// This is a "no opinion" sentinel. Use [`PairScoreTable::get`] to tell it
/// apart from a stored score of exactly zero.
pub const NO_SCORE: f64 = 0.0;

/// Sparse (user, movie) -> score mapping
#[derive(Debug, Clone, Default)]
pub struct PairScoreTable {
    scores: HashMap<(UserId, MovieId), f64>,
}

impl PairScoreTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for a pair, [`NO_SCORE`] when absent
    pub fn score(&self, user_id: UserId, movie_id: MovieId) -> f64 {
        self.get(user_id, movie_id).unwrap_or(NO_SCORE)
    }

    /// Score for a pair, None when absent
    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> Option<f64> {
        self.scores.get(&(user_id, movie_id)).copied()
    }

    /// Replace the whole table
    pub fn replace(&mut self, scores: HashMap<(UserId, MovieId), f64>) {
        self.scores = scores;
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.scores.clear();
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True if no pair is stored
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
