//! ModelRegistry - the closed set of declared model generations
//!
//! The registry is fixed at construction. The "current" pointer is not kept
//! here: it lives inside the published [`ServingState`] so that the active
//! generation name, its vectors and its pair scores always change together.
//!
//! [`ServingState`]: crate::ServingState

use marquee_core::{MarqueeError, MarqueeResult};
use serde::{Deserialize, Serialize};

use crate::source::SourceDescriptor;

/// A named bundle of vector sources from one trained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSpec {
    /// Stable name used by `switch` (e.g. "STANDARD")
    pub name: String,
    /// Human-readable label
    pub display_name: String,
    /// Movie (item) vectors
    pub item_source: SourceDescriptor,
    /// User vectors
    pub user_source: SourceDescriptor,
    /// Optional precomputed (user, movie) scores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_source: Option<SourceDescriptor>,
}

impl GenerationSpec {
    /// Declare a generation without a score source
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        item_source: SourceDescriptor,
        user_source: SourceDescriptor,
    ) -> Self {
        GenerationSpec {
            name: name.into(),
            display_name: display_name.into(),
            item_source,
            user_source,
            score_source: None,
        }
    }

    /// Attach a score source (builder style)
    pub fn with_scores(mut self, score_source: SourceDescriptor) -> Self {
        self.score_source = Some(score_source);
        self
    }

    /// Describe this generation for listings
    pub fn info(&self, is_current: bool) -> ModelInfo {
        ModelInfo {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            is_current,
            has_pair_scores: self.score_source.is_some(),
            item_source: self.item_source.clone(),
            user_source: self.user_source.clone(),
            score_source: self.score_source.clone(),
        }
    }
}

/// One row of `list()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Generation name
    pub name: String,
    /// Human-readable label
    pub display_name: String,
    /// True for the active generation
    pub is_current: bool,
    /// True if the generation declares a score source
    pub has_pair_scores: bool,
    /// Where movie vectors load from
    pub item_source: SourceDescriptor,
    /// Where user vectors load from
    pub user_source: SourceDescriptor,
    /// Where pair scores load from, if anywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_source: Option<SourceDescriptor>,
}

/// Declared generations in declaration order
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    generations: Vec<GenerationSpec>,
}

impl ModelRegistry {
    /// Build a registry
    ///
    /// # Errors
    ///
    /// `Configuration` if the list is empty, a name is empty, or a name is
    /// declared twice.
    pub fn new(generations: Vec<GenerationSpec>) -> MarqueeResult<Self> {
        if generations.is_empty() {
            return Err(MarqueeError::configuration(
                "registry",
                "at least one generation must be declared",
            ));
        }
        for (i, spec) in generations.iter().enumerate() {
            if spec.name.is_empty() {
                return Err(MarqueeError::configuration(
                    "registry",
                    "generation name must not be empty",
                ));
            }
            if generations[..i].iter().any(|g| g.name == spec.name) {
                return Err(MarqueeError::configuration(
                    "registry",
                    format!("generation '{}' declared twice", spec.name),
                ));
            }
        }
        Ok(ModelRegistry { generations })
    }

    /// Look up a generation
    pub fn get(&self, name: &str) -> Option<&GenerationSpec> {
        self.generations.iter().find(|g| g.name == name)
    }

    /// Look up a generation, failing with `UnknownGeneration`
    pub fn resolve(&self, name: &str) -> MarqueeResult<&GenerationSpec> {
        self.get(name).ok_or_else(|| MarqueeError::UnknownGeneration {
            name: name.to_string(),
        })
    }

    /// All generations in declaration order
    pub fn generations(&self) -> &[GenerationSpec] {
        &self.generations
    }

    /// Generation names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generations.iter().map(|g| g.name.as_str())
    }

    /// Describe every generation, flagging `current`
    pub fn list(&self, current: &str) -> Vec<ModelInfo> {
        self.generations
            .iter()
            .map(|g| g.info(g.name == current))
            .collect()
    }
}
