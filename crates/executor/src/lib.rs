//! # Marquee Executor
//!
//! The service-facing API of the marquee recommendation engine.
//!
//! This is the only crate a transport layer needs to import. It provides:
//! - [`Executor`] - dispatches commands against a shared [`ServingContext`]
//! - [`Command`]/[`Output`] - the serializable request/response set
//! - [`Error`] - structured, serializable failures
//!
//! ## Quick Start
//!
//! ```text
//! use marquee_executor::{Command, Executor, MarqueeConfig, ServingContext};
//!
//! let config = MarqueeConfig::from_file(Path::new("marquee.toml"))?;
//! let context = ServingContext::open(&config, batch, None)?;
//! let executor = Executor::new(context);
//!
//! let similar = executor.execute(Command::SimilarMovies { movie_id: 1, size: 10 })?;
//! executor.execute(Command::SwitchModel { name: "NCF".into() })?;
//! ```
//!
//! ## Fallback
//!
//! `SimilarMovies` and `RecommendForUser` answer with the top-rated movies
//! when the query movie or user has no embedding in the active generation.
//! A personalized list shorter than `size` is returned as is.

#![warn(missing_docs)]

mod command;
mod convert;
mod error;
mod executor;
mod output;
mod types;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API
// =============================================================================

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use types::UserInfo;

pub use marquee_core::{Movie, MovieId, MovieView, Rating, SortBy, UserId};
pub use marquee_engine::{
    IngestBatch, MarqueeConfig, MemoryNamespaceStore, ModelInfo, NamespaceStore, ServingContext,
    CONFIG_FILE_NAME,
};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
