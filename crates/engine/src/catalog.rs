//! EntityCatalog - the boot-time movie/user/rating collections
//!
//! Built exactly once from an [`IngestBatch`] and never mutated afterwards,
//! so it is shared between readers and generations behind a plain `Arc`.
//!
//! Ratings are stored once in an append-only vector. Two index views
//! (per movie, per user) point into it, giving O(1) access from either side
//! without duplicating the relation.

use std::collections::{HashMap, HashSet};

use marquee_core::{MarqueeError, MarqueeResult, Movie, MovieId, MovieView, Rating, User, UserId};
use tracing::info;

/// Already-parsed records delivered by the ingestion collaborator
#[derive(Debug, Clone, Default)]
pub struct IngestBatch {
    /// Movies in ingestion order
    pub movies: Vec<Movie>,
    /// Users known up front. Users that only appear in ratings are created
    /// automatically.
    pub users: Vec<UserId>,
    /// Ratings in ingestion order
    pub ratings: Vec<Rating>,
}

/// Immutable entity collections plus derived indexes
#[derive(Debug, Default)]
pub struct EntityCatalog {
    /// Movies in ingestion order
    movies: Vec<Movie>,
    /// MovieId -> position in `movies`
    movie_index: HashMap<MovieId, usize>,
    /// Users in first-seen order
    users: Vec<User>,
    /// UserId -> position in `users`
    user_index: HashMap<UserId, usize>,
    /// Every rating, stored once
    ratings: Vec<Rating>,
    /// MovieId -> positions in `ratings`
    ratings_by_movie: HashMap<MovieId, Vec<usize>>,
    /// UserId -> positions in `ratings`, ingestion order
    ratings_by_user: HashMap<UserId, Vec<usize>>,
    /// Genre -> movie ids in ingestion order
    genre_index: HashMap<String, Vec<MovieId>>,
}

impl EntityCatalog {
    /// Build the catalog from an ingestion batch
    ///
    /// Ratings that reference an unknown movie are kept in the user's
    /// history but contribute to no movie's aggregate.
    ///
    /// # Errors
    ///
    /// `DuplicateId` if the batch lists the same movie or user twice.
    pub fn build(batch: IngestBatch) -> MarqueeResult<Self> {
        let mut catalog = EntityCatalog::default();

        for movie in batch.movies {
            if catalog.movie_index.contains_key(&movie.id) {
                return Err(MarqueeError::DuplicateId {
                    entity: "movie",
                    id: movie.id,
                });
            }
            for genre in &movie.genres {
                catalog
                    .genre_index
                    .entry(genre.clone())
                    .or_default()
                    .push(movie.id);
            }
            catalog.movie_index.insert(movie.id, catalog.movies.len());
            catalog.movies.push(movie);
        }

        for user_id in batch.users {
            if catalog.user_index.contains_key(&user_id) {
                return Err(MarqueeError::DuplicateId {
                    entity: "user",
                    id: user_id,
                });
            }
            catalog.insert_user(user_id);
        }

        for rating in batch.ratings {
            let pos = catalog.ratings.len();
            if catalog.movie_index.contains_key(&rating.movie_id) {
                catalog
                    .ratings_by_movie
                    .entry(rating.movie_id)
                    .or_default()
                    .push(pos);
            }
            if !catalog.user_index.contains_key(&rating.user_id) {
                catalog.insert_user(rating.user_id);
            }
            catalog
                .ratings_by_user
                .entry(rating.user_id)
                .or_default()
                .push(pos);
            catalog.ratings.push(rating);
        }

        info!(
            target: "marquee::catalog",
            movies = catalog.movies.len(),
            users = catalog.users.len(),
            ratings = catalog.ratings.len(),
            genres = catalog.genre_index.len(),
            "Entity catalog built"
        );

        Ok(catalog)
    }

    fn insert_user(&mut self, user_id: UserId) {
        self.user_index.insert(user_id, self.users.len());
        self.users.push(User { id: user_id });
    }

    /// Look up a movie
    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movie_index.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Look up a user
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.user_index.get(&id).map(|&pos| &self.users[pos])
    }

    /// True if the movie id was ingested
    pub fn contains_movie(&self, id: MovieId) -> bool {
        self.movie_index.contains_key(&id)
    }

    /// True if the user id was ingested
    pub fn contains_user(&self, id: UserId) -> bool {
        self.user_index.contains_key(&id)
    }

    /// All movies in ingestion order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// All users in first-seen order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of movies
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Number of users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of ratings
    pub fn rating_count(&self) -> usize {
        self.ratings.len()
    }

    /// Movie ids tagged with a genre, in ingestion order. None for an unknown genre.
    pub fn genre(&self, genre: &str) -> Option<&[MovieId]> {
        self.genre_index.get(genre).map(Vec::as_slice)
    }

    /// All genre names, sorted
    pub fn genres(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.genre_index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Ratings attached to a movie
    pub fn movie_ratings(&self, id: MovieId) -> impl Iterator<Item = &Rating> {
        self.ratings_by_movie
            .get(&id)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.ratings[pos])
    }

    /// A user's rating history in ingestion order
    pub fn user_history(&self, id: UserId) -> impl Iterator<Item = &Rating> {
        self.ratings_by_user
            .get(&id)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.ratings[pos])
    }

    /// Set of movie ids a user has rated
    pub fn rated_movies(&self, id: UserId) -> HashSet<MovieId> {
        self.user_history(id).map(|r| r.movie_id).collect()
    }

    /// Mean rating of a movie, computed from its rating set on every call.
    /// 0.0 for an unrated movie.
    pub fn average_rating(&self, id: MovieId) -> f64 {
        let (sum, count) = self
            .movie_ratings(id)
            .fold((0.0f64, 0usize), |(sum, count), r| {
                (sum + f64::from(r.score), count + 1)
            });
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Number of ratings attached to a movie
    pub fn movie_rating_count(&self, id: MovieId) -> usize {
        self.ratings_by_movie.get(&id).map_or(0, Vec::len)
    }

    /// Service-layer view of a movie
    pub fn movie_view(&self, id: MovieId) -> Option<MovieView> {
        self.movie(id).map(|movie| MovieView {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.release_year,
            genres: movie.genres.clone(),
            aggregate_rating: self.average_rating(movie.id),
        })
    }
}
