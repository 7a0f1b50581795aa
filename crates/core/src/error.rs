//! Error types for the marquee serving layer
//!
//! All fallible operations in the workspace return [`MarqueeResult`].
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! # Categories
//!
//! | Category | Variants | Effect |
//! |----------|----------|--------|
//! | Lookup | `UnknownGeneration` | Caller-facing, never fatal |
//! | Source | `MalformedSource`, `DimensionMismatch` | Aborts a generation switch |
//! | Configuration | `Configuration` | Aborts a switch or a boot |
//! | Coordination | `SwitchInProgress` | Switch rejected, retry is up to the caller |
//! | Ingestion | `DuplicateId` | Boot-time batch rejected |
//!
//! Unknown movie, user and genre lookups are deliberately NOT errors: the
//! retrieval layer degrades them to empty results.

use thiserror::Error;

/// Result type alias for marquee operations
pub type MarqueeResult<T> = std::result::Result<T, MarqueeError>;

/// Error hierarchy for catalog ingestion, reload and registry operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarqueeError {
    /// The requested model generation is not declared in the registry
    #[error("unknown model generation: {name}")]
    UnknownGeneration {
        /// Name that was requested
        name: String,
    },

    /// Another generation switch currently holds the reload guard
    #[error("generation switch already in progress")]
    SwitchInProgress,

    /// A vector or score source contained a line/value that could not be parsed
    #[error("malformed source {source_desc} (line {line}): {reason}")]
    MalformedSource {
        /// Human-readable source descriptor (path or namespace prefix)
        source_desc: String,
        /// 1-based line number, or 0 for keyed sources
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// A vector's length disagrees with vectors already accepted for its kind,
    /// or a generation's user vectors disagree with its movie vectors
    #[error("dimension mismatch in {source_desc}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Source the offending vector came from
        source_desc: String,
        /// Dimension accepted so far
        expected: usize,
        /// Dimension of the offending vector
        actual: usize,
    },

    /// A declared source is unreachable or the configuration is inconsistent
    #[error("configuration error for {source_desc}: {reason}")]
    Configuration {
        /// Source or config file the error relates to
        source_desc: String,
        /// Underlying cause
        reason: String,
    },

    /// The ingestion batch contained the same id twice
    #[error("duplicate {entity} id {id} in ingestion batch")]
    DuplicateId {
        /// Entity kind ("movie" or "user")
        entity: &'static str,
        /// The repeated id
        id: u32,
    },
}

impl MarqueeError {
    /// Create a `Configuration` error
    pub fn configuration(source_desc: impl Into<String>, reason: impl Into<String>) -> Self {
        MarqueeError::Configuration {
            source_desc: source_desc.into(),
            reason: reason.into(),
        }
    }

    /// Create a `MalformedSource` error
    pub fn malformed(source_desc: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        MarqueeError::MalformedSource {
            source_desc: source_desc.into(),
            line,
            reason: reason.into(),
        }
    }

    /// True for errors raised while staging a generation's sources.
    ///
    /// These never leave partially-applied state behind.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            MarqueeError::MalformedSource { .. }
                | MarqueeError::DimensionMismatch { .. }
                | MarqueeError::Configuration { .. }
        )
    }
}
