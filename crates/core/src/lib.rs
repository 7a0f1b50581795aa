//! Core types for marquee
//!
//! This crate defines the foundational types shared by the engine and the
//! service layer:
//! - MovieId / UserId: entity identifiers
//! - Movie, User, Rating: the boot-time entity model
//! - EmbeddingKind: which collection a vector belongs to
//! - SortBy: listing order for genre and top-N queries
//! - MovieView: the record handed to the service layer
//! - MarqueeError: error hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{MarqueeError, MarqueeResult};
pub use types::{EmbeddingKind, Movie, MovieId, MovieView, Rating, SortBy, User, UserId};
