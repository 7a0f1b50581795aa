//! Handlers for catalog listings and lookups.
//!
//! These read the boot-time catalog only (plus the active generation for
//! `has_embedding`), so they behave the same under every generation.

use marquee_core::{EmbeddingKind, MovieId, SortBy, UserId};
use marquee_engine::ServingContext;

use super::movie_views;
use crate::types::UserInfo;
use crate::{Output, Result};

fn sort_by(raw: Option<&str>) -> SortBy {
    raw.map(SortBy::parse).unwrap_or_default()
}

/// Handle `Command::MoviesByGenre`.
pub fn movies_by_genre(
    ctx: &ServingContext,
    genre: String,
    size: usize,
    sort: Option<String>,
) -> Result<Output> {
    let sort = sort_by(sort.as_deref());
    let ids = ctx.with_retrieval(|engine| engine.by_genre(&genre, size, sort));
    Ok(Output::Movies(movie_views(ctx.catalog(), &ids)))
}

/// Handle `Command::TopMovies`.
pub fn top_movies(ctx: &ServingContext, size: usize, sort: Option<String>) -> Result<Output> {
    let sort = sort_by(sort.as_deref());
    let ids = ctx.with_retrieval(|engine| engine.top(size, sort));
    Ok(Output::Movies(movie_views(ctx.catalog(), &ids)))
}

/// Handle `Command::GetMovie`.
pub fn get_movie(ctx: &ServingContext, movie_id: MovieId) -> Result<Output> {
    Ok(Output::Movie(ctx.catalog().movie_view(movie_id)))
}

/// Handle `Command::GetUser`.
pub fn get_user(ctx: &ServingContext, user_id: UserId) -> Result<Output> {
    let catalog = ctx.catalog();
    if !catalog.contains_user(user_id) {
        return Ok(Output::User(None));
    }

    let (sum, rating_count) = catalog
        .user_history(user_id)
        .fold((0.0f64, 0usize), |(sum, n), r| (sum + f64::from(r.score), n + 1));
    let average_score = if rating_count == 0 {
        0.0
    } else {
        sum / rating_count as f64
    };
    let has_embedding = ctx
        .snapshot()
        .vectors()
        .get_embedding(EmbeddingKind::User, user_id)
        .is_some();

    Ok(Output::User(Some(UserInfo {
        id: user_id,
        rating_count,
        average_score,
        has_embedding,
    })))
}
