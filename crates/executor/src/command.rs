//! Command enum defining every service operation.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON by a transport layer
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};

use marquee_core::{MovieId, UserId};

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Models | 2 | List and switch model generations |
/// | Recommend | 2 | Embedding-based retrieval with popularity fallback |
/// | Catalog | 4 | Listings and lookups over the boot-time catalog |
/// | Service | 1 | Health check |
///
/// # Example
///
/// ```ignore
/// use marquee_executor::Command;
///
/// let cmd = Command::MoviesByGenre {
///     genre: "Comedy".into(),
///     size: 5,
///     sort_by: Some("rating".into()),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Models (2) ====================
    /// List declared generations, flagging the active one.
    /// Returns: `Output::Models`
    ListModels,

    /// Make a generation active.
    /// Returns: `Output::Switched`
    SwitchModel {
        /// Generation name
        name: String,
    },

    // ==================== Recommend (2) ====================
    /// Movies most similar to a movie.
    /// Returns: `Output::Movies`
    SimilarMovies {
        /// Query movie
        movie_id: MovieId,
        /// Maximum number of results
        size: usize,
    },

    /// Movies for a user, excluding the user's rating history.
    /// Returns: `Output::Movies`
    RecommendForUser {
        /// Query user
        user_id: UserId,
        /// Maximum number of results
        size: usize,
    },

    // ==================== Catalog (4) ====================
    /// Movies tagged with a genre.
    /// Returns: `Output::Movies`
    MoviesByGenre {
        /// Genre tag, matched exactly
        genre: String,
        /// Maximum number of results
        size: usize,
        /// "rating", "releaseYear", anything else keeps ingestion order
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sort_by: Option<String>,
    },

    /// All movies.
    /// Returns: `Output::Movies`
    TopMovies {
        /// Maximum number of results
        size: usize,
        /// Same names as `MoviesByGenre`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sort_by: Option<String>,
    },

    /// Look up one movie.
    /// Returns: `Output::Movie`
    GetMovie {
        /// Movie id
        movie_id: MovieId,
    },

    /// Look up one user.
    /// Returns: `Output::User`
    GetUser {
        /// User id
        user_id: UserId,
    },

    // ==================== Service (1) ====================
    /// Health check.
    /// Returns: `Output::Pong`
    Ping,
}
