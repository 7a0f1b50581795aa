//! RetrievalEngine - ranked candidate lists over one serving snapshot
//!
//! The engine borrows the boot-time [`EntityCatalog`] and one published
//! [`ServingState`]; it never mutates either. All rankings are
//! deterministic:
//!
//! 1. Movie vectors are scanned in ascending id order
//! 2. Scores are computed single-threaded
//! 3. Results are sorted by (score desc, movie id asc)
//! 4. The list is truncated to K
//!
//! # Missing embeddings
//!
//! `similar_to` and `for_user` return `None` when the query entity has no
//! embedding in the active generation (or does not exist). That is the
//! signal the service layer uses to substitute a popularity list. A
//! `Some` with fewer than K entries is a valid, complete answer.

use marquee_core::{EmbeddingKind, MovieId, SortBy, UserId};

use crate::catalog::EntityCatalog;
use crate::state::ServingState;
use crate::vector::cosine_similarity;

/// A ranked candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMovie {
    /// Candidate movie
    pub movie_id: MovieId,
    /// Ranking score, higher is better
    pub score: f32,
}

/// Read-only ranking over a catalog and a serving snapshot
pub struct RetrievalEngine<'a> {
    catalog: &'a EntityCatalog,
    state: &'a ServingState,
}

impl<'a> RetrievalEngine<'a> {
    /// Create an engine over one snapshot
    pub fn new(catalog: &'a EntityCatalog, state: &'a ServingState) -> Self {
        RetrievalEngine { catalog, state }
    }

    /// Cosine similarity between two movies, None if either lacks a vector
    pub fn similarity(&self, a: MovieId, b: MovieId) -> Option<f32> {
        let vectors = self.state.vectors();
        let va = vectors.get_embedding(EmbeddingKind::Movie, a)?;
        let vb = vectors.get_embedding(EmbeddingKind::Movie, b)?;
        Some(cosine_similarity(va, vb))
    }

    /// Movies most similar to `movie_id`, excluding the movie itself
    ///
    /// Only movies that have a vector are candidates. Pair scores play no
    /// part here.
    pub fn similar_to(&self, movie_id: MovieId, k: usize) -> Option<Vec<ScoredMovie>> {
        let query = self
            .state
            .vectors()
            .get_embedding(EmbeddingKind::Movie, movie_id)?;

        let candidates = self
            .state
            .vectors()
            .iter_movies()
            .filter(|(id, _)| *id != movie_id)
            .map(|(id, vector)| ScoredMovie {
                movie_id: id,
                score: cosine_similarity(query, vector),
            })
            .collect();

        Some(rank(candidates, k))
    }

    /// Movies for a user, excluding everything in the user's rating history
    ///
    /// Each candidate is scored by cosine similarity to the user vector,
    /// unless the active generation carries a pair score for
    /// (user, candidate): that score then replaces the similarity.
    pub fn for_user(&self, user_id: UserId, k: usize) -> Option<Vec<ScoredMovie>> {
        let query = self
            .state
            .vectors()
            .get_embedding(EmbeddingKind::User, user_id)?;
        let seen = self.catalog.rated_movies(user_id);
        let pair_scores = self.state.pair_scores();

        let candidates = self
            .state
            .vectors()
            .iter_movies()
            .filter(|(id, _)| !seen.contains(id))
            .map(|(id, vector)| {
                let score = match pair_scores.get(user_id, id) {
                    Some(score) => score as f32,
                    None => cosine_similarity(query, vector),
                };
                ScoredMovie {
                    movie_id: id,
                    score,
                }
            })
            .collect();

        Some(rank(candidates, k))
    }

    /// Movies tagged with `genre`, ordered by `sort_by`, at most `k`
    ///
    /// Unknown genre yields an empty list.
    pub fn by_genre(&self, genre: &str, k: usize, sort_by: SortBy) -> Vec<MovieId> {
        match self.catalog.genre(genre) {
            Some(ids) => self.sorted(ids.to_vec(), k, sort_by),
            None => Vec::new(),
        }
    }

    /// All movies ordered by `sort_by`, at most `k`
    pub fn top(&self, k: usize, sort_by: SortBy) -> Vec<MovieId> {
        let ids = self.catalog.movies().iter().map(|m| m.id).collect();
        self.sorted(ids, k, sort_by)
    }

    fn sorted(&self, mut ids: Vec<MovieId>, k: usize, sort_by: SortBy) -> Vec<MovieId> {
        match sort_by {
            SortBy::Rating => {
                // Aggregate is derived per read; compute once per sort, not per comparison
                let mut keyed: Vec<(MovieId, f64)> = ids
                    .iter()
                    .map(|&id| (id, self.catalog.average_rating(id)))
                    .collect();
                keyed.sort_by(|(id_a, avg_a), (id_b, avg_b)| {
                    avg_b.total_cmp(avg_a).then_with(|| id_a.cmp(id_b))
                });
                ids = keyed.into_iter().map(|(id, _)| id).collect();
            }
            SortBy::ReleaseYear => {
                let year = |id: &MovieId| self.catalog.movie(*id).and_then(|m| m.release_year);
                // None sorts below every year
                ids.sort_by(|a, b| year(b).cmp(&year(a)).then_with(|| a.cmp(b)));
            }
            SortBy::None => {}
        }
        ids.truncate(k);
        ids
    }
}

/// Sort by (score desc, movie id asc) and truncate to k
///
/// NaN ranks below every number so the comparator stays a total order.
fn rank(mut candidates: Vec<ScoredMovie>, k: usize) -> Vec<ScoredMovie> {
    if k == 0 {
        return Vec::new();
    }
    candidates.sort_by(|a, b| {
        rank_key(b.score)
            .total_cmp(&rank_key(a.score))
            .then_with(|| a.movie_id.cmp(&b.movie_id))
    });
    candidates.truncate(k);
    candidates
}

fn rank_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IngestBatch;
    use crate::pair_score::PairScoreTable;
    use crate::vector::VectorCatalog;
    use marquee_core::{Movie, Rating};
    use std::collections::{BTreeMap, HashMap};

    fn catalog() -> EntityCatalog {
        EntityCatalog::build(IngestBatch {
            movies: vec![
                Movie::new(1, "A", Some(2020), &["Drama"]),
                Movie::new(2, "B", Some(2019), &["Drama"]),
                Movie::new(3, "C", Some(2021), &["Comedy"]),
                Movie::new(4, "D", None, &["Comedy", "Drama"]),
            ],
            users: vec![],
            ratings: vec![
                Rating::new(10, 1, 4.0, 0),
                Rating::new(11, 2, 5.0, 0),
                Rating::new(10, 3, 4.0, 0),
            ],
        })
        .unwrap()
    }

    fn state(movies: &[(u32, &[f32])], users: &[(u32, &[f32])], scores: &[((u32, u32), f64)]) -> ServingState {
        let mut vectors = VectorCatalog::new();
        let m: BTreeMap<u32, Vec<f32>> = movies.iter().map(|(id, v)| (*id, v.to_vec())).collect();
        let u: BTreeMap<u32, Vec<f32>> = users.iter().map(|(id, v)| (*id, v.to_vec())).collect();
        vectors.set_embeddings(EmbeddingKind::Movie, m, "m").unwrap();
        vectors.set_embeddings(EmbeddingKind::User, u, "u").unwrap();
        let mut pair_scores = PairScoreTable::new();
        pair_scores.replace(scores.iter().copied().collect::<HashMap<_, _>>());
        ServingState::new("T".into(), 1, vectors, pair_scores)
    }

    fn ids(hits: &[ScoredMovie]) -> Vec<MovieId> {
        hits.iter().map(|h| h.movie_id).collect()
    }

    #[test]
    fn test_similar_to_skips_movies_without_vectors() {
        let catalog = catalog();
        let state = state(&[(1, &[1.0, 0.0]), (2, &[0.9, 0.1])], &[], &[]);
        let engine = RetrievalEngine::new(&catalog, &state);

        let hits = engine.similar_to(1, 2).unwrap();
        assert_eq!(ids(&hits), vec![2]);
    }

    #[test]
    fn test_similar_to_missing_query_vector() {
        let catalog = catalog();
        let state = state(&[(1, &[1.0, 0.0])], &[], &[]);
        let engine = RetrievalEngine::new(&catalog, &state);
        assert!(engine.similar_to(3, 5).is_none());
        assert!(engine.similar_to(404, 5).is_none());
    }

    #[test]
    fn test_similar_to_only_vector_is_some_empty() {
        let catalog = catalog();
        let state = state(&[(1, &[1.0, 0.0])], &[], &[]);
        let engine = RetrievalEngine::new(&catalog, &state);
        assert_eq!(engine.similar_to(1, 5), Some(Vec::new()));
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        let catalog = catalog();
        let state = state(
            &[(1, &[1.0, 0.0]), (4, &[0.0, 1.0]), (2, &[0.0, 2.0]), (3, &[0.0, 3.0])],
            &[],
            &[],
        );
        let engine = RetrievalEngine::new(&catalog, &state);
        let hits = engine.similar_to(1, 3).unwrap();
        assert_eq!(ids(&hits), vec![2, 3, 4]);
    }

    #[test]
    fn test_zero_vector_query_scores_zero() {
        let catalog = catalog();
        let state = state(&[(1, &[0.0, 0.0]), (2, &[1.0, 0.0])], &[], &[]);
        let engine = RetrievalEngine::new(&catalog, &state);
        let hits = engine.similar_to(1, 5).unwrap();
        assert_eq!(hits, vec![ScoredMovie { movie_id: 2, score: 0.0 }]);
    }

    #[test]
    fn test_k_zero_is_empty() {
        let catalog = catalog();
        let state = state(&[(1, &[1.0, 0.0]), (2, &[1.0, 0.0])], &[], &[]);
        let engine = RetrievalEngine::new(&catalog, &state);
        assert_eq!(engine.similar_to(1, 0), Some(Vec::new()));
    }

    #[test]
    fn test_for_user_excludes_history() {
        let catalog = catalog();
        let state = state(
            &[(1, &[1.0, 0.0]), (2, &[0.9, 0.1]), (3, &[1.0, 0.0]), (4, &[0.0, 1.0])],
            &[(10, &[1.0, 0.0])],
            &[],
        );
        let engine = RetrievalEngine::new(&catalog, &state);
        let hits = engine.for_user(10, 10).unwrap();
        // user 10 rated 1 and 3
        assert_eq!(ids(&hits), vec![2, 4]);
    }

    #[test]
    fn test_for_user_missing_vector() {
        let catalog = catalog();
        let state = state(&[(1, &[1.0, 0.0])], &[], &[]);
        let engine = RetrievalEngine::new(&catalog, &state);
        assert!(engine.for_user(10, 5).is_none());
    }

    #[test]
    fn test_pair_score_overrides_similarity() {
        let catalog = catalog();
        let state = state(
            &[(2, &[1.0, 0.0]), (4, &[0.0, 1.0])],
            &[(11, &[1.0, 0.0])],
            &[((11, 4), 0.5)],
        );
        let engine = RetrievalEngine::new(&catalog, &state);
        // user 11 rated movie 2, so only 4 remains
        let hits = engine.for_user(11, 5).unwrap();
        assert_eq!(hits, vec![ScoredMovie { movie_id: 4, score: 0.5 }]);
    }

    #[test]
    fn test_pair_score_reorders_candidates() {
        let catalog = catalog();
        let state = state(
            &[(1, &[1.0, 0.0]), (3, &[0.0, 1.0])],
            &[(11, &[1.0, 0.0])],
            &[((11, 3), 1.5)],
        );
        let engine = RetrievalEngine::new(&catalog, &state);
        let hits = engine.for_user(11, 5).unwrap();
        assert_eq!(ids(&hits), vec![3, 1]);
    }

    #[test]
    fn test_by_genre_rating_order() {
        let catalog = catalog();
        let state = ServingState::default();
        let engine = RetrievalEngine::new(&catalog, &state);
        // Drama: 1 (4.0), 2 (5.0), 4 (unrated)
        assert_eq!(engine.by_genre("Drama", 5, SortBy::Rating), vec![2, 1, 4]);
        assert_eq!(engine.by_genre("Drama", 2, SortBy::Rating), vec![2, 1]);
    }

    #[test]
    fn test_by_genre_release_year_and_none() {
        let catalog = catalog();
        let state = ServingState::default();
        let engine = RetrievalEngine::new(&catalog, &state);
        assert_eq!(engine.by_genre("Drama", 5, SortBy::ReleaseYear), vec![1, 2, 4]);
        assert_eq!(engine.by_genre("Comedy", 5, SortBy::None), vec![3, 4]);
    }

    #[test]
    fn test_unknown_genre_is_empty() {
        let catalog = catalog();
        let state = ServingState::default();
        let engine = RetrievalEngine::new(&catalog, &state);
        assert!(engine.by_genre("Western", 5, SortBy::Rating).is_empty());
    }

    #[test]
    fn test_large_magnitude_vectors_rank_by_direction() {
        let catalog = catalog();
        let state = state(
            &[(1, &[1e20, 0.0]), (2, &[0.0, 1.0]), (3, &[1e20, 0.0])],
            &[],
            &[],
        );
        let engine = RetrievalEngine::new(&catalog, &state);

        let same = engine.similarity(1, 3).unwrap();
        assert!((same - 1.0).abs() < 1e-6, "got {}", same);

        let hits = engine.similar_to(1, 2).unwrap();
        assert_eq!(ids(&hits), vec![3, 2]);
        assert!(hits.iter().all(|h| h.score.is_finite()));
    }

    #[test]
    fn test_rank_puts_nan_last() {
        let ranked = rank(
            vec![
                ScoredMovie { movie_id: 1, score: f32::NAN },
                ScoredMovie { movie_id: 2, score: -1.0 },
                ScoredMovie { movie_id: 3, score: 0.5 },
            ],
            3,
        );
        assert_eq!(ids(&ranked), vec![3, 2, 1]);
    }

    #[test]
    fn test_release_year_ties_by_id() {
        let catalog = EntityCatalog::build(IngestBatch {
            movies: vec![
                Movie::new(7, "G", Some(2018), &["Drama"]),
                Movie::new(5, "E", Some(2020), &["Drama"]),
                Movie::new(9, "I", None, &["Drama"]),
                Movie::new(6, "F", Some(2018), &["Drama"]),
                Movie::new(8, "H", None, &["Drama"]),
            ],
            users: vec![],
            ratings: vec![],
        })
        .unwrap();
        let state = ServingState::default();
        let engine = RetrievalEngine::new(&catalog, &state);

        assert_eq!(engine.by_genre("Drama", 10, SortBy::ReleaseYear), vec![5, 6, 7, 8, 9]);
        assert_eq!(engine.top(3, SortBy::ReleaseYear), vec![5, 6, 7]);
    }

    #[test]
    fn test_top_rating_ties_by_id() {
        let catalog = catalog();
        let state = ServingState::default();
        let engine = RetrievalEngine::new(&catalog, &state);
        // 2 = 5.0, 1 = 4.0, 3 = 4.0, 4 = 0.0
        assert_eq!(engine.top(10, SortBy::Rating), vec![2, 1, 3, 4]);
        assert_eq!(engine.top(2, SortBy::None), vec![1, 2]);
    }
}
