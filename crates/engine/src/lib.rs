//! Serving engine for marquee
//!
//! This crate owns everything between the ingested entity model and the
//! service layer:
//! - EntityCatalog: boot-time movies, users and ratings
//! - VectorCatalog: per-generation movie and user embeddings
//! - PairScoreTable: optional precomputed (user, movie) scores
//! - ModelRegistry: the declared model generations
//! - Reloader: stage, validate and assemble a generation
//! - ServingContext: atomic publication of the active generation
//! - RetrievalEngine: deterministic ranking over one snapshot
//!
//! Generations are swapped as whole immutable [`ServingState`] snapshots,
//! so a reader never observes vectors from one generation next to pair
//! scores or a "current" name from another.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod context;
pub mod pair_score;
pub mod registry;
pub mod reload;
pub mod retrieval;
pub mod source;
pub mod state;
pub mod vector;

pub use catalog::{EntityCatalog, IngestBatch};
pub use config::{MarqueeConfig, CONFIG_FILE_NAME};
pub use context::ServingContext;
pub use pair_score::{PairScoreTable, NO_SCORE};
pub use registry::{GenerationSpec, ModelInfo, ModelRegistry};
pub use reload::{ReloadStats, Reloader, StagedGeneration};
pub use retrieval::{RetrievalEngine, ScoredMovie};
pub use source::{MemoryNamespaceStore, NamespaceStore, SourceDescriptor, SourceResolver};
pub use state::ServingState;
pub use vector::VectorCatalog;
