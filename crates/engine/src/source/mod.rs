//! Vector and score sources
//!
//! A generation declares where its vectors come from with a
//! [`SourceDescriptor`]: either a file (resolved against the model
//! directory) or a key-value namespace (resolved through a
//! [`NamespaceStore`]). [`SourceResolver`] turns descriptors into parsed
//! mappings. Resolution never touches published state.

pub mod parse;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use marquee_core::{MarqueeError, MarqueeResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where a generation's vectors or scores live
///
/// In `marquee.toml`:
///
/// ```toml
/// item_source = { file = "item2vecEmb.csv" }
/// user_source = { namespace = "uEmb:" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceDescriptor {
    /// Delimited text file, relative paths resolve against the model directory
    File(PathBuf),
    /// Key prefix in the attached namespace store; keys are `<prefix><id>`
    Namespace(String),
}

impl SourceDescriptor {
    /// Shorthand for a file source
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SourceDescriptor::File(path.into())
    }

    /// Shorthand for a namespace source
    pub fn namespace(prefix: impl Into<String>) -> Self {
        SourceDescriptor::Namespace(prefix.into())
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDescriptor::File(path) => write!(f, "file:{}", path.display()),
            SourceDescriptor::Namespace(prefix) => write!(f, "namespace:{}", prefix),
        }
    }
}

// ============================================================================
// Namespace Store
// ============================================================================

/// Key-value store holding vectors or scores under key prefixes
///
/// Values use the same text encoding as file sources: whitespace-separated
/// components for vectors, a single number for scores.
pub trait NamespaceStore: Send + Sync {
    /// All keys starting with `prefix`
    fn keys(&self, prefix: &str) -> Vec<String>;

    /// Value stored under `key`
    fn get(&self, key: &str) -> Option<String>;
}

/// In-process [`NamespaceStore`]
#[derive(Debug, Default)]
pub struct MemoryNamespaceStore {
    entries: DashMap<String, String>,
}

impl MemoryNamespaceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a key, returning its value
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.remove(key).map(|(_, v)| v)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the store has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NamespaceStore for MemoryNamespaceStore {
    fn keys(&self, prefix: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves source descriptors into parsed mappings
#[derive(Clone)]
pub struct SourceResolver {
    model_dir: PathBuf,
    store: Option<Arc<dyn NamespaceStore>>,
}

impl fmt::Debug for SourceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceResolver")
            .field("model_dir", &self.model_dir)
            .field("has_store", &self.store.is_some())
            .finish()
    }
}

impl SourceResolver {
    /// Resolver for file sources under `model_dir` with no namespace store
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        SourceResolver {
            model_dir: model_dir.into(),
            store: None,
        }
    }

    /// Attach a namespace store (builder style)
    pub fn with_store(mut self, store: Arc<dyn NamespaceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Directory relative file sources resolve against
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Absolute location of a file source
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.model_dir.join(path)
        }
    }

    /// Human-readable descriptor used in errors and logs
    pub fn describe(&self, source: &SourceDescriptor) -> String {
        match source {
            SourceDescriptor::File(path) => self.resolve_path(path).display().to_string(),
            SourceDescriptor::Namespace(_) => source.to_string(),
        }
    }

    fn read_file(&self, path: &Path) -> MarqueeResult<String> {
        let full = self.resolve_path(path);
        std::fs::read_to_string(&full).map_err(|e| {
            MarqueeError::configuration(full.display().to_string(), format!("unreadable source: {}", e))
        })
    }

    fn store(&self, source: &SourceDescriptor) -> MarqueeResult<&Arc<dyn NamespaceStore>> {
        self.store.as_ref().ok_or_else(|| {
            MarqueeError::configuration(source.to_string(), "no namespace store attached")
        })
    }

    /// Load an id -> vector mapping
    ///
    /// # Errors
    ///
    /// - `Configuration` if the file is unreadable or no store is attached
    /// - `MalformedSource` / `DimensionMismatch` if any entry is bad
    pub fn load_vectors(&self, source: &SourceDescriptor) -> MarqueeResult<Vec<(u32, Vec<f32>)>> {
        let desc = self.describe(source);
        match source {
            SourceDescriptor::File(path) => {
                let content = self.read_file(path)?;
                parse::parse_vector_lines(&content, &desc)
            }
            SourceDescriptor::Namespace(prefix) => {
                let store = self.store(source)?;
                let mut keys = store.keys(prefix);
                keys.sort_unstable();

                let mut out = Vec::with_capacity(keys.len());
                let mut dimension: Option<usize> = None;
                for key in keys {
                    let suffix = key.strip_prefix(prefix.as_str()).unwrap_or(&key);
                    let id = parse::parse_entity_id(suffix).ok_or_else(|| {
                        MarqueeError::malformed(&desc, 0, format!("invalid id in key '{}'", key))
                    })?;
                    let Some(raw) = store.get(&key) else {
                        debug!(target: "marquee::reload", key = %key, "Key vanished during load");
                        continue;
                    };
                    let vector = parse::parse_components(&raw).map_err(|reason| {
                        MarqueeError::malformed(&desc, 0, format!("key '{}': {}", key, reason))
                    })?;
                    match dimension {
                        None => dimension = Some(vector.len()),
                        Some(dim) if dim != vector.len() => {
                            return Err(MarqueeError::DimensionMismatch {
                                source_desc: format!("{} (key {})", desc, key),
                                expected: dim,
                                actual: vector.len(),
                            });
                        }
                        Some(_) => {}
                    }
                    out.push((id, vector));
                }
                Ok(out)
            }
        }
    }

    /// Load a (user, movie) -> score mapping
    ///
    /// # Errors
    ///
    /// Same classes as [`SourceResolver::load_vectors`].
    pub fn load_scores(&self, source: &SourceDescriptor) -> MarqueeResult<Vec<((u32, u32), f64)>> {
        let desc = self.describe(source);
        match source {
            SourceDescriptor::File(path) => {
                let content = self.read_file(path)?;
                parse::parse_score_lines(&content, &desc)
            }
            SourceDescriptor::Namespace(prefix) => {
                let store = self.store(source)?;
                let mut keys = store.keys(prefix);
                keys.sort_unstable();

                let mut out = Vec::with_capacity(keys.len());
                for key in keys {
                    let suffix = key.strip_prefix(prefix.as_str()).unwrap_or(&key);
                    let pair = parse::parse_pair_key(suffix).map_err(|reason| {
                        MarqueeError::malformed(&desc, 0, format!("key '{}': {}", key, reason))
                    })?;
                    let Some(raw) = store.get(&key) else {
                        continue;
                    };
                    let score = parse::parse_score(&raw).map_err(|reason| {
                        MarqueeError::malformed(&desc, 0, format!("key '{}': {}", key, reason))
                    })?;
                    out.push((pair, score));
                }
                Ok(out)
            }
        }
    }
}
