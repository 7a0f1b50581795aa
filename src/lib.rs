//! Marquee - embedding-based movie recommendation serving
//!
//! Marquee answers "movies similar to X" and "movies for user Y" from
//! pre-trained embedding vectors, and switches between trained model
//! generations without a restart.
//!
//! # Quick Start
//!
//! ```ignore
//! use marquee::{Command, Executor, IngestBatch, MarqueeConfig, ServingContext};
//!
//! let config = MarqueeConfig::from_file(Path::new("marquee.toml"))?;
//! let context = ServingContext::open(&config, batch, None)?;
//! let executor = Executor::new(context);
//!
//! let movies = executor.execute(Command::RecommendForUser { user_id: 7, size: 10 })?;
//! executor.execute(Command::SwitchModel { name: "NCF".into() })?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which provides a command-based
//! API over a shared [`ServingContext`]. Catalog, vector and reload
//! internals live in `marquee-engine` and are not re-exported here.

// Re-export the public API from marquee-executor
pub use marquee_executor::*;
