//! Embedding storage and similarity
//!
//! - **VectorCatalog**: per-kind vectors for one model generation
//! - **distance**: cosine similarity and helpers

pub mod catalog;
pub mod distance;

pub use catalog::VectorCatalog;
pub use distance::cosine_similarity;
