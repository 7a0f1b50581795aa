//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant.

use serde::{Deserialize, Serialize};

use marquee_core::MovieView;
use marquee_engine::ModelInfo;

use crate::types::UserInfo;

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
///
/// # Example
///
/// ```text
/// match executor.execute(Command::GetMovie { movie_id: 1 })? {
///     Output::Movie(Some(movie)) => println!("{}", movie.title),
///     Output::Movie(None) => println!("Not found"),
///     _ => unreachable!("GetMovie always returns Movie"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Declared generations in declaration order
    Models(Vec<ModelInfo>),

    /// The generation that is now active
    Switched {
        /// Generation name
        name: String,
        /// Human-readable label
        display_name: String,
    },

    /// Ranked or sorted movie list
    Movies(Vec<MovieView>),

    /// Single movie lookup
    Movie(Option<MovieView>),

    /// Single user lookup
    User(Option<UserInfo>),

    /// Health check response
    Pong {
        /// Executor crate version
        version: String,
    },
}
