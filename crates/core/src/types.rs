//! Entity types for the movie catalog
//!
//! Movies, users and ratings are created once from the boot-time ingestion
//! batch and never mutated afterwards. Embeddings are NOT stored on the
//! entities: they live in the engine's vector catalog so that a generation
//! switch can replace them wholesale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Movie identifier (unique within the movie collection)
pub type MovieId = u32;

/// User identifier (unique within the user collection)
pub type UserId = u32;

/// A single user → movie rating
///
/// Ratings are immutable. The catalog stores each one exactly once and
/// exposes it through a per-movie and a per-user view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating user
    pub user_id: UserId,
    /// Rated movie
    pub movie_id: MovieId,
    /// Score on the source scale (MovieLens uses 0.5..=5.0)
    pub score: f32,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

impl Rating {
    /// Create a rating
    pub fn new(user_id: UserId, movie_id: MovieId, score: f32, timestamp: i64) -> Self {
        Rating {
            user_id,
            movie_id,
            score,
            timestamp,
        }
    }
}

/// A movie as delivered by the ingestion collaborator
///
/// The aggregate rating is intentionally absent: it is derived from the
/// rating set on every read so it can never go stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique movie id
    pub id: MovieId,
    /// Display title (release year stripped)
    pub title: String,
    /// Release year, if the title carried one
    pub release_year: Option<u16>,
    /// Genre tags in source order
    pub genres: Vec<String>,
    /// IMDb id from the links table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    /// TMDb id from the links table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<String>,
    /// Free-form feature bag (feature name → value)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, String>,
}

impl Movie {
    /// Create a movie with no external ids and an empty feature bag
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        release_year: Option<u16>,
        genres: &[&str],
    ) -> Self {
        Movie {
            id,
            title: title.into(),
            release_year,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            imdb_id: None,
            tmdb_id: None,
            features: BTreeMap::new(),
        }
    }

    /// Attach external ids (builder style)
    pub fn with_links(mut self, imdb_id: impl Into<String>, tmdb_id: impl Into<String>) -> Self {
        self.imdb_id = Some(imdb_id.into());
        self.tmdb_id = Some(tmdb_id.into());
        self
    }

    /// Add one feature to the bag (builder style)
    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.features.insert(name.into(), value.into());
        self
    }

    /// True if the movie carries the given genre tag
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// A user. Ratings and embeddings are held by the catalogs, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Unique user id
    pub id: UserId,
}

/// Which entity collection an embedding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmbeddingKind {
    /// Item (movie) vectors
    Movie,
    /// User vectors
    User,
}

impl EmbeddingKind {
    /// Lower-case name used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingKind::Movie => "movie",
            EmbeddingKind::User => "user",
        }
    }
}

impl std::fmt::Display for EmbeddingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering applied by genre and top-N listings
///
/// Every ordering breaks ties by ascending movie id, except `None` which
/// keeps ingestion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Aggregate rating, descending
    Rating,
    /// Release year, descending (movies without a year sort last)
    ReleaseYear,
    /// Ingestion order
    #[default]
    None,
}

impl SortBy {
    /// Parse the wire name. Unrecognised names fall back to ingestion order.
    pub fn parse(s: &str) -> SortBy {
        match s {
            "rating" => SortBy::Rating,
            "releaseYear" => SortBy::ReleaseYear,
            _ => SortBy::None,
        }
    }
}

/// Movie record returned to the service layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieView {
    /// Movie id
    pub id: MovieId,
    /// Title
    pub title: String,
    /// Release year
    pub year: Option<u16>,
    /// Genre tags
    pub genres: Vec<String>,
    /// Mean of all attached ratings, 0.0 when unrated
    pub aggregate_rating: f64,
}
