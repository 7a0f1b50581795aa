//! Shared fixtures for engine integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Once};

use marquee_core::{Movie, Rating};
use marquee_engine::{
    GenerationSpec, IngestBatch, MarqueeConfig, NamespaceStore, ServingContext, SourceDescriptor,
};
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Route engine logs through the test harness writer
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

pub fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

/// Four movies, three users:
///
/// | id | title | year | genres         | ratings           |
/// |----|-------|------|----------------|-------------------|
/// | 1  | A     | 2020 | Comedy         | 3.0 (u10)         |
/// | 2  | B     | 2019 | Comedy, Drama  | 4.0 (u10), 5.0 (u11) -> 4.5 |
/// | 3  | C     | 2018 | Drama          | 4.5 (u12)         |
/// | 4  | D     | -    | Comedy         | none              |
pub fn batch() -> IngestBatch {
    IngestBatch {
        movies: vec![
            Movie::new(1, "A", Some(2020), &["Comedy"]),
            Movie::new(2, "B", Some(2019), &["Comedy", "Drama"]),
            Movie::new(3, "C", Some(2018), &["Drama"]),
            Movie::new(4, "D", None, &["Comedy"]),
        ],
        users: vec![],
        ratings: vec![
            Rating::new(10, 1, 3.0, 1),
            Rating::new(10, 2, 4.0, 2),
            Rating::new(11, 2, 5.0, 3),
            Rating::new(12, 3, 4.5, 4),
        ],
    }
}

/// Model directory with two well-formed generations of different
/// dimension, one generation with pair scores and one broken generation.
pub fn model_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let p = dir.path();
    write(p, "std_item.csv", "1:1 0\n2:0.9 0.1\n3:0 1\n4:0.5 0.5\n");
    write(p, "std_user.csv", "10:1 0\nuser_11:0 1\n");
    write(p, "wide_item.csv", "1:1 0 0\n2:0 1 0\n3:0 0 1\n4:1 1 0\n");
    write(p, "wide_user.csv", "10:0 0 1\n11:1 0 0\n");
    write(p, "ncf_scores.csv", "10_3:0.875\n11_1:0.5\n");
    write(p, "bad_item.csv", "1:1 0\n2:1 x\n");
    dir
}

pub fn generations() -> Vec<GenerationSpec> {
    vec![
        GenerationSpec::new(
            "STANDARD",
            "Standard Version",
            SourceDescriptor::file("std_item.csv"),
            SourceDescriptor::file("std_user.csv"),
        ),
        GenerationSpec::new(
            "WIDE",
            "Wide Version",
            SourceDescriptor::file("wide_item.csv"),
            SourceDescriptor::file("wide_user.csv"),
        ),
        GenerationSpec::new(
            "NCF",
            "NCF Version",
            SourceDescriptor::file("std_item.csv"),
            SourceDescriptor::file("std_user.csv"),
        )
        .with_scores(SourceDescriptor::file("ncf_scores.csv")),
        GenerationSpec::new(
            "BROKEN",
            "Broken Version",
            SourceDescriptor::file("bad_item.csv"),
            SourceDescriptor::file("std_user.csv"),
        ),
    ]
}

pub fn config(dir: &TempDir, default_generation: &str) -> MarqueeConfig {
    MarqueeConfig {
        default_generation: default_generation.to_string(),
        model_dir: dir.path().to_path_buf(),
        generations: generations(),
    }
}

pub fn open(dir: &TempDir, default_generation: &str) -> Arc<ServingContext> {
    init_tracing();
    ServingContext::open(&config(dir, default_generation), batch(), None).unwrap()
}

pub fn open_with_store(
    config: &MarqueeConfig,
    store: Arc<dyn NamespaceStore>,
) -> Arc<ServingContext> {
    init_tracing();
    ServingContext::open(config, batch(), Some(store)).unwrap()
}
