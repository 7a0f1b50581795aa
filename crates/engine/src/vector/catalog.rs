//! VectorCatalog - per-kind embedding storage
//!
//! Holds one dense vector per movie and per user for a single model
//! generation. Uses BTreeMap so iteration is always in ascending id order,
//! which keeps brute-force scans and their tie-breaks deterministic.
//!
//! # Mutation contract
//!
//! `clear_embeddings(kind)` followed by `set_embeddings(kind, mapping)` is the
//! only way vectors change. A catalog that is reachable by readers is never
//! mutated: the reloader mutates a private staged copy and publishes it as a
//! whole.
//!
//! # Invariants
//!
//! - All vectors of one kind share a single dimension
//! - `set_embeddings` is all-or-nothing: a rejected mapping leaves the
//!   catalog exactly as it was

use std::collections::BTreeMap;
use std::sync::Arc;

use marquee_core::{EmbeddingKind, MarqueeError, MarqueeResult};

/// Vectors of a single entity kind
#[derive(Debug, Clone, Default)]
struct KindVectors {
    /// id -> vector, ascending id order
    vectors: BTreeMap<u32, Arc<[f32]>>,
    /// Dimension of every accepted vector; None while empty
    dimension: Option<usize>,
}

/// Movie and user embeddings for one generation
#[derive(Debug, Clone, Default)]
pub struct VectorCatalog {
    movies: KindVectors,
    users: KindVectors,
}

impl VectorCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    fn kind(&self, kind: EmbeddingKind) -> &KindVectors {
        match kind {
            EmbeddingKind::Movie => &self.movies,
            EmbeddingKind::User => &self.users,
        }
    }

    fn kind_mut(&mut self, kind: EmbeddingKind) -> &mut KindVectors {
        match kind {
            EmbeddingKind::Movie => &mut self.movies,
            EmbeddingKind::User => &mut self.users,
        }
    }

    /// Get the embedding of an entity, if this generation has one
    pub fn get_embedding(&self, kind: EmbeddingKind, id: u32) -> Option<&[f32]> {
        self.kind(kind).vectors.get(&id).map(|v| &v[..])
    }

    /// Drop every vector of the given kind and forget its dimension
    pub fn clear_embeddings(&mut self, kind: EmbeddingKind) {
        let slot = self.kind_mut(kind);
        slot.vectors.clear();
        slot.dimension = None;
    }

    /// Insert a mapping of vectors for one kind
    ///
    /// Every vector must match the dimension of vectors already accepted for
    /// this kind (or, after a clear, the first vector of the mapping).
    /// Validation runs over the whole mapping before anything is inserted.
    ///
    /// Returns the number of vectors inserted.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` naming `source_desc` if any vector disagrees.
    pub fn set_embeddings(
        &mut self,
        kind: EmbeddingKind,
        mapping: BTreeMap<u32, Vec<f32>>,
        source_desc: &str,
    ) -> MarqueeResult<usize> {
        let slot = self.kind_mut(kind);

        let mut expected = slot.dimension;
        for vector in mapping.values() {
            match expected {
                None => expected = Some(vector.len()),
                Some(dim) if dim != vector.len() => {
                    return Err(MarqueeError::DimensionMismatch {
                        source_desc: source_desc.to_string(),
                        expected: dim,
                        actual: vector.len(),
                    });
                }
                Some(_) => {}
            }
        }

        let inserted = mapping.len();
        for (id, vector) in mapping {
            slot.vectors.insert(id, Arc::from(vector));
        }
        if inserted > 0 {
            slot.dimension = expected;
        }
        Ok(inserted)
    }

    /// Dimension of the given kind, None if it has no vectors
    pub fn dimension(&self, kind: EmbeddingKind) -> Option<usize> {
        self.kind(kind).dimension
    }

    /// Number of vectors of the given kind
    pub fn len(&self, kind: EmbeddingKind) -> usize {
        self.kind(kind).vectors.len()
    }

    /// True if neither kind has any vector
    pub fn is_empty(&self) -> bool {
        self.movies.vectors.is_empty() && self.users.vectors.is_empty()
    }

    /// Iterate movie vectors in ascending movie id order
    pub fn iter_movies(&self) -> impl Iterator<Item = (u32, &[f32])> {
        self.movies.vectors.iter().map(|(id, v)| (*id, &v[..]))
    }
}
