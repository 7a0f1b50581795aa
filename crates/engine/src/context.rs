//! ServingContext - the process-wide handle requests are served from
//!
//! Holds the boot-time [`EntityCatalog`], the [`ModelRegistry`] and the
//! currently published [`ServingState`]. Readers take a snapshot (an `Arc`
//! clone under a read lock held for nanoseconds) and serve the whole
//! request from it. `switch_model` stages the next generation off to the
//! side and publishes it with a single pointer swap.
//!
//! Switches are serialized: a switch that arrives while another is
//! staging fails with `SwitchInProgress` rather than queueing.

use std::sync::Arc;
use std::time::Instant;

use marquee_core::{MarqueeError, MarqueeResult};
use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use crate::catalog::{EntityCatalog, IngestBatch};
use crate::config::MarqueeConfig;
use crate::registry::{ModelInfo, ModelRegistry};
use crate::reload::Reloader;
use crate::retrieval::RetrievalEngine;
use crate::source::{NamespaceStore, SourceResolver};
use crate::state::ServingState;

/// Shared serving context
pub struct ServingContext {
    catalog: Arc<EntityCatalog>,
    registry: ModelRegistry,
    resolver: SourceResolver,
    /// Published state; the lock only guards the pointer
    state: RwLock<Arc<ServingState>>,
    /// Held for the duration of a switch
    switch_guard: Mutex<()>,
}

impl std::fmt::Debug for ServingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.snapshot();
        f.debug_struct("ServingContext")
            .field("movies", &self.catalog.movie_count())
            .field("users", &self.catalog.user_count())
            .field("generation", &state.generation())
            .field("epoch", &state.epoch())
            .finish()
    }
}

impl ServingContext {
    /// Build a context and load `default_generation`
    ///
    /// # Errors
    ///
    /// `UnknownGeneration` if `default_generation` is not declared, or any
    /// source error from loading it. The service must not start serving
    /// without a loaded generation.
    pub fn new(
        catalog: Arc<EntityCatalog>,
        registry: ModelRegistry,
        resolver: SourceResolver,
        default_generation: &str,
    ) -> MarqueeResult<Self> {
        let context = ServingContext {
            catalog,
            registry,
            resolver,
            state: RwLock::new(Arc::new(ServingState::default())),
            switch_guard: Mutex::new(()),
        };
        context.switch_model(default_generation)?;
        Ok(context)
    }

    /// Boot from configuration and an ingested batch
    ///
    /// `store` backs `namespace` sources; pass `None` if every generation
    /// uses file sources.
    pub fn open(
        config: &MarqueeConfig,
        batch: IngestBatch,
        store: Option<Arc<dyn NamespaceStore>>,
    ) -> MarqueeResult<Arc<Self>> {
        config.validate()?;
        let catalog = Arc::new(EntityCatalog::build(batch)?);
        let registry = config.registry()?;
        let mut resolver = SourceResolver::new(&config.model_dir);
        if let Some(store) = store {
            resolver = resolver.with_store(store);
        }

        info!(
            target: "marquee::service",
            model_dir = %config.model_dir.display(),
            generations = registry.generations().len(),
            default = %config.default_generation,
            "Opening serving context"
        );

        let context = Self::new(catalog, registry, resolver, &config.default_generation)?;
        Ok(Arc::new(context))
    }

    /// Boot-time entity catalog
    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// Declared generations
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// The currently published state
    ///
    /// Everything read through the returned snapshot belongs to one
    /// generation, even if a switch publishes meanwhile.
    pub fn snapshot(&self) -> Arc<ServingState> {
        self.state.read().clone()
    }

    /// Name of the active generation
    pub fn current_generation(&self) -> String {
        self.snapshot().generation().to_string()
    }

    /// All declared generations, flagging the active one
    pub fn list_models(&self) -> Vec<ModelInfo> {
        let state = self.snapshot();
        self.registry.list(state.generation())
    }

    /// Pair score under the active generation (0.0 if absent)
    pub fn pair_score(&self, user_id: u32, movie_id: u32) -> f64 {
        self.snapshot().pair_scores().score(user_id, movie_id)
    }

    /// Run `f` against a retrieval engine over one snapshot
    pub fn with_retrieval<R>(&self, f: impl FnOnce(&RetrievalEngine<'_>) -> R) -> R {
        let state = self.snapshot();
        let engine = RetrievalEngine::new(&self.catalog, &state);
        f(&engine)
    }

    /// Make `name` the active generation
    ///
    /// On error the previously published state stays active and
    /// observably unchanged.
    ///
    /// # Errors
    ///
    /// - `UnknownGeneration` if `name` is not declared
    /// - `SwitchInProgress` if another switch is staging
    /// - `MalformedSource`, `DimensionMismatch` or `Configuration` if a
    ///   source cannot be loaded
    pub fn switch_model(&self, name: &str) -> MarqueeResult<ModelInfo> {
        let spec = self.registry.resolve(name)?;
        let _guard = self
            .switch_guard
            .try_lock()
            .ok_or(MarqueeError::SwitchInProgress)?;

        let started = Instant::now();
        let previous = self.snapshot();
        let reloader = Reloader::new(&self.catalog, &self.resolver);

        match reloader.reload(spec, &previous) {
            Ok((next, stats)) => {
                let epoch = next.epoch();
                *self.state.write() = Arc::new(next);
                info!(
                    target: "marquee::reload",
                    from = %previous.generation(),
                    to = %spec.name,
                    epoch,
                    movie_vectors = stats.movie_vectors,
                    user_vectors = stats.user_vectors,
                    pair_scores = stats.pair_scores,
                    unknown_movie_ids = stats.unknown_movie_ids,
                    unknown_user_ids = stats.unknown_user_ids,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Switched model generation"
                );
                Ok(spec.info(true))
            }
            Err(e) => {
                warn!(
                    target: "marquee::reload",
                    from = %previous.generation(),
                    to = %spec.name,
                    error = %e,
                    "Model switch failed; keeping previous generation"
                );
                Err(e)
            }
        }
    }
}
