//! Handlers for embedding-based retrieval (SimilarMovies, RecommendForUser).
//!
//! Both commands share the fallback boundary: when retrieval reports that
//! the query entity has no embedding in the active generation, the answer
//! is the top-rated list of the same size, computed from the same snapshot.
//! A personalized list shorter than `size` is never replaced.

use marquee_core::{MovieId, SortBy, UserId};
use marquee_engine::{RetrievalEngine, ScoredMovie, ServingContext};
use tracing::warn;

use super::movie_views;
use crate::{Output, Result};

fn or_top_rated(
    engine: &RetrievalEngine<'_>,
    ranked: Option<Vec<ScoredMovie>>,
    size: usize,
) -> Vec<MovieId> {
    match ranked {
        Some(ranked) => ranked.into_iter().map(|m| m.movie_id).collect(),
        None => engine.top(size, SortBy::Rating),
    }
}

/// Handle `Command::SimilarMovies`.
pub fn similar_movies(ctx: &ServingContext, movie_id: MovieId, size: usize) -> Result<Output> {
    let ids = ctx.with_retrieval(|engine| {
        let ranked = engine.similar_to(movie_id, size);
        if ranked.is_none() {
            warn!(
                target: "marquee::service",
                movie_id,
                size,
                "No embedding for movie; answering with top rated"
            );
        }
        or_top_rated(engine, ranked, size)
    });
    Ok(Output::Movies(movie_views(ctx.catalog(), &ids)))
}

/// Handle `Command::RecommendForUser`.
pub fn recommend_for_user(ctx: &ServingContext, user_id: UserId, size: usize) -> Result<Output> {
    let ids = ctx.with_retrieval(|engine| {
        let ranked = engine.for_user(user_id, size);
        if ranked.is_none() {
            warn!(
                target: "marquee::service",
                user_id,
                size,
                "No embedding for user; answering with top rated"
            );
        }
        or_top_rated(engine, ranked, size)
    });
    Ok(Output::Movies(movie_views(ctx.catalog(), &ids)))
}
