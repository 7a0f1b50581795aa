//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Lossless**: No error information is lost in conversion from engine errors

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Not Found | `UnknownGeneration` | Generation name not declared |
/// | Concurrency | `SwitchInProgress` | Another switch is staging |
/// | Source | `MalformedSource`, `DimensionMismatch`, `Configuration` | Switch aborted, previous generation still active |
/// | Validation | `InvalidInput` | Bad request |
///
/// Movie, user and genre lookups never fail: unknown ids yield empty
/// outputs.
///
/// # Example
///
/// ```ignore
/// match executor.execute(Command::SwitchModel { name }) {
///     Ok(Output::Switched { display_name, .. }) => println!("now serving {}", display_name),
///     Err(Error::UnknownGeneration { name }) => println!("no generation '{}'", name),
///     Err(e) => println!("switch failed: {}", e),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Not Found ====================
    /// Generation not declared
    #[error("unknown model generation: {name}")]
    UnknownGeneration {
        /// Requested name
        name: String,
    },

    // ==================== Concurrency Errors ====================
    /// Another switch is staging; retry later
    #[error("generation switch already in progress")]
    SwitchInProgress,

    // ==================== Source Errors ====================
    /// A vector or score source could not be parsed
    #[error("malformed source {source_desc} (line {line}): {reason}")]
    MalformedSource {
        /// Offending source
        source_desc: String,
        /// 1-based line number, 0 for keyed sources
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// A source mixes vector lengths
    #[error("dimension mismatch in {source_desc}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Offending source
        source_desc: String,
        /// Dimension accepted so far
        expected: usize,
        /// Dimension of the offending vector
        actual: usize,
    },

    /// A declared source is unreachable
    #[error("configuration error for {source_desc}: {reason}")]
    Configuration {
        /// Offending source or config file
        source_desc: String,
        /// Underlying cause
        reason: String,
    },

    // ==================== Validation Errors ====================
    /// Invalid input
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },
}
