//! Reloader - stage, validate and assemble a generation's serving state
//!
//! A switch is a single logical transaction:
//!
//! 1. Parse the item, user and (optional) score sources into private
//!    staging mappings
//! 2. Drop ids the catalog does not know; a mapping that covers zero known
//!    ids is accepted with a warning (cold start). User vectors must have
//!    the movie vectors' dimension, since `for_user` compares across kinds
//! 3. Clear then set movie and user vectors on a staged `VectorCatalog`
//! 4. Replace the staged `PairScoreTable` wholesale, or clear it when the
//!    generation declares no score source
//!
//! Any failure in steps 1-2 returns before a `ServingState` exists, so
//! nothing partially applied can ever be published. Publishing the
//! assembled state is the caller's job (see [`ServingContext`]).
//!
//! [`ServingContext`]: crate::ServingContext

use std::collections::{BTreeMap, HashMap};

use marquee_core::{EmbeddingKind, MarqueeError, MarqueeResult, MovieId, UserId};
use tracing::{debug, warn};

use crate::catalog::EntityCatalog;
use crate::pair_score::PairScoreTable;
use crate::registry::GenerationSpec;
use crate::source::{SourceDescriptor, SourceResolver};
use crate::state::ServingState;
use crate::vector::VectorCatalog;

/// Counts gathered while staging a generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadStats {
    /// Movie vectors kept
    pub movie_vectors: usize,
    /// Movie vector entries dropped for unknown ids
    pub unknown_movie_ids: usize,
    /// User vectors kept
    pub user_vectors: usize,
    /// User vector entries dropped for unknown ids
    pub unknown_user_ids: usize,
    /// Pair scores loaded
    pub pair_scores: usize,
}

/// Fully parsed, validated, not-yet-published generation data
#[derive(Debug)]
pub struct StagedGeneration {
    generation: String,
    item_desc: String,
    user_desc: String,
    movie_vectors: BTreeMap<MovieId, Vec<f32>>,
    user_vectors: BTreeMap<UserId, Vec<f32>>,
    pair_scores: Option<HashMap<(UserId, MovieId), f64>>,
    stats: ReloadStats,
}

impl StagedGeneration {
    /// Generation this data belongs to
    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// Staging counts
    pub fn stats(&self) -> ReloadStats {
        self.stats
    }
}

/// User vectors are scored against movie vectors, so both kinds must agree
/// whenever both are present.
fn check_cross_kind_dimension(
    movie_vectors: &BTreeMap<MovieId, Vec<f32>>,
    user_vectors: &BTreeMap<UserId, Vec<f32>>,
    user_desc: &str,
) -> MarqueeResult<()> {
    let movie_dim = movie_vectors.values().next().map(Vec::len);
    let user_dim = user_vectors.values().next().map(Vec::len);
    match (movie_dim, user_dim) {
        (Some(expected), Some(actual)) if expected != actual => Err(MarqueeError::DimensionMismatch {
            source_desc: user_desc.to_string(),
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}

/// Builds the next serving state from a generation's sources
pub struct Reloader<'a> {
    catalog: &'a EntityCatalog,
    resolver: &'a SourceResolver,
}

impl<'a> Reloader<'a> {
    /// Create a reloader over the boot-time catalog
    pub fn new(catalog: &'a EntityCatalog, resolver: &'a SourceResolver) -> Self {
        Reloader { catalog, resolver }
    }

    /// Steps 1-2: parse every declared source into staging mappings
    ///
    /// # Errors
    ///
    /// `MalformedSource`, `DimensionMismatch` or `Configuration` naming the
    /// offending source. Nothing observable changes on error.
    pub fn stage(&self, spec: &GenerationSpec) -> MarqueeResult<StagedGeneration> {
        let item_desc = self.resolver.describe(&spec.item_source);
        let user_desc = self.resolver.describe(&spec.user_source);

        let (movie_vectors, unknown_movie_ids) = self.stage_vectors(
            &spec.name,
            EmbeddingKind::Movie,
            &spec.item_source,
            |id| self.catalog.contains_movie(id),
        )?;
        let (user_vectors, unknown_user_ids) = self.stage_vectors(
            &spec.name,
            EmbeddingKind::User,
            &spec.user_source,
            |id| self.catalog.contains_user(id),
        )?;
        check_cross_kind_dimension(&movie_vectors, &user_vectors, &user_desc)?;

        let pair_scores = match &spec.score_source {
            Some(source) => Some(self.stage_scores(&spec.name, source)?),
            None => None,
        };

        let stats = ReloadStats {
            movie_vectors: movie_vectors.len(),
            unknown_movie_ids,
            user_vectors: user_vectors.len(),
            unknown_user_ids,
            pair_scores: pair_scores.as_ref().map_or(0, HashMap::len),
        };

        Ok(StagedGeneration {
            generation: spec.name.clone(),
            item_desc,
            user_desc,
            movie_vectors,
            user_vectors,
            pair_scores,
            stats,
        })
    }

    fn stage_vectors(
        &self,
        generation: &str,
        kind: EmbeddingKind,
        source: &SourceDescriptor,
        is_known: impl Fn(u32) -> bool,
    ) -> MarqueeResult<(BTreeMap<u32, Vec<f32>>, usize)> {
        let parsed = self.resolver.load_vectors(source)?;
        let total = parsed.len();

        let mut staged = BTreeMap::new();
        let mut unknown = 0;
        for (id, vector) in parsed {
            if is_known(id) {
                staged.insert(id, vector);
            } else {
                unknown += 1;
            }
        }

        if staged.is_empty() {
            warn!(
                target: "marquee::reload",
                generation = %generation,
                kind = %kind,
                source = %source,
                entries = total,
                "Vector source matches zero known ids; every {} falls back to popularity",
                kind
            );
        } else {
            debug!(
                target: "marquee::reload",
                generation = %generation,
                kind = %kind,
                kept = staged.len(),
                unknown,
                "Staged vectors"
            );
        }

        Ok((staged, unknown))
    }

    fn stage_scores(
        &self,
        generation: &str,
        source: &SourceDescriptor,
    ) -> MarqueeResult<HashMap<(UserId, MovieId), f64>> {
        let parsed = self.resolver.load_scores(source)?;

        let covered = parsed
            .iter()
            .filter(|((user, movie), _)| {
                self.catalog.contains_user(*user) && self.catalog.contains_movie(*movie)
            })
            .count();
        if covered == 0 {
            warn!(
                target: "marquee::reload",
                generation = %generation,
                source = %source,
                entries = parsed.len(),
                "Score source matches zero known (user, movie) pairs"
            );
        }

        Ok(parsed.into_iter().collect())
    }

    /// Steps 3-4: assemble the next state from staged data
    ///
    /// The result is private to the caller until it is published.
    pub fn apply(&self, staged: StagedGeneration, previous: &ServingState) -> MarqueeResult<ServingState> {
        // Clear-then-set on a staged catalog: an id missing from this
        // generation's source must never keep the previous generation's vector.
        let mut vectors = VectorCatalog::new();
        vectors.clear_embeddings(EmbeddingKind::Movie);
        vectors.set_embeddings(EmbeddingKind::Movie, staged.movie_vectors, &staged.item_desc)?;
        vectors.clear_embeddings(EmbeddingKind::User);
        vectors.set_embeddings(EmbeddingKind::User, staged.user_vectors, &staged.user_desc)?;

        let mut pair_scores = PairScoreTable::new();
        match staged.pair_scores {
            Some(scores) => pair_scores.replace(scores),
            None => pair_scores.clear(),
        }

        Ok(ServingState::new(
            staged.generation,
            previous.epoch() + 1,
            vectors,
            pair_scores,
        ))
    }

    /// Stage and assemble in one call
    pub fn reload(
        &self,
        spec: &GenerationSpec,
        previous: &ServingState,
    ) -> MarqueeResult<(ServingState, ReloadStats)> {
        let staged = self.stage(spec)?;
        let stats = staged.stats();
        let state = self.apply(staged, previous)?;
        Ok((state, stats))
    }
}
