//! The Executor - single entry point to the serving engine.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! handlers and converts engine results to outputs.

use std::sync::Arc;

use marquee_engine::ServingContext;
use tracing::debug;

use crate::handlers::{catalog, models, recommend};
use crate::{Command, Error, Output, Result};

/// The command executor - single entry point to the serving engine.
///
/// The Executor is **stateless**: it holds a reference to the shared
/// [`ServingContext`] but keeps no state of its own. Clone the `Arc` to
/// hand the same context to several executors or threads.
///
/// # Example
///
/// ```ignore
/// use marquee_executor::{Command, Executor};
///
/// let executor = Executor::new(context);
///
/// // Single command execution
/// let result = executor.execute(Command::SimilarMovies { movie_id: 1, size: 10 })?;
///
/// // Batch execution
/// let results = executor.execute_many(vec![
///     Command::ListModels,
///     Command::TopMovies { size: 10, sort_by: Some("rating".into()) },
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    context: Arc<ServingContext>,
}

impl Executor {
    /// Create a new executor over a serving context.
    pub fn new(context: Arc<ServingContext>) -> Self {
        Self { context }
    }

    /// Execute a single command.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let ctx = self.context.as_ref();
        match cmd {
            Command::Ping => Ok(Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),

            Command::ListModels => models::list_models(ctx),
            Command::SwitchModel { name } => models::switch_model(ctx, name),

            Command::SimilarMovies { movie_id, size } => {
                recommend::similar_movies(ctx, movie_id, size)
            }
            Command::RecommendForUser { user_id, size } => {
                recommend::recommend_for_user(ctx, user_id, size)
            }

            Command::MoviesByGenre {
                genre,
                size,
                sort_by,
            } => catalog::movies_by_genre(ctx, genre, size, sort_by),
            Command::TopMovies { size, sort_by } => catalog::top_movies(ctx, size, sort_by),
            Command::GetMovie { movie_id } => catalog::get_movie(ctx, movie_id),
            Command::GetUser { user_id } => catalog::get_user(ctx, user_id),
        }
    }

    /// Decode a JSON-encoded command and execute it.
    ///
    /// A payload that does not decode to a [`Command`] is `InvalidInput`.
    pub fn execute_json(&self, payload: &str) -> Result<Output> {
        let cmd: Command = serde_json::from_str(payload).map_err(|e| {
            debug!(target: "marquee::service", error = %e, "Rejected command payload");
            Error::InvalidInput {
                reason: format!("malformed command: {}", e),
            }
        })?;
        self.execute(cmd)
    }

    /// Execute multiple commands sequentially.
    ///
    /// Returns all results in the same order as the input commands.
    /// Execution continues even if some commands fail.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// The shared serving context.
    pub fn context(&self) -> &Arc<ServingContext> {
        &self.context
    }
}
