//! ServingState - one immutable, published generation snapshot
//!
//! Readers hold an `Arc<ServingState>` for the duration of a request, so
//! the active generation name, its vectors and its pair scores are always
//! observed together. A generation switch builds a brand-new state and
//! replaces the `Arc`; it never mutates a published one.

use crate::pair_score::PairScoreTable;
use crate::vector::VectorCatalog;

/// Snapshot of everything a generation switch replaces
#[derive(Debug, Default)]
pub struct ServingState {
    /// Active generation name
    generation: String,
    /// Number of successful switches that produced this state
    epoch: u64,
    /// Movie and user vectors of the active generation
    vectors: VectorCatalog,
    /// Pair scores of the active generation (empty if none declared)
    pair_scores: PairScoreTable,
}

impl ServingState {
    pub(crate) fn new(
        generation: String,
        epoch: u64,
        vectors: VectorCatalog,
        pair_scores: PairScoreTable,
    ) -> Self {
        ServingState {
            generation,
            epoch,
            vectors,
            pair_scores,
        }
    }

    /// Active generation name
    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// Monotonic publish counter, 1 after the boot-time load
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Vectors of the active generation
    pub fn vectors(&self) -> &VectorCatalog {
        &self.vectors
    }

    /// Pair scores of the active generation
    pub fn pair_scores(&self) -> &PairScoreTable {
        &self.pair_scores
    }
}
