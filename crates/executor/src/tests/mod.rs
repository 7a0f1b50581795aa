//! Test modules for the executor crate.


use std::sync::Arc;

use marquee_core::{Movie, Rating};
use marquee_engine::{GenerationSpec, IngestBatch, MarqueeConfig, ServingContext, SourceDescriptor};
use tempfile::TempDir;

use crate::Executor;

/// Executor over a temp model directory.
///
/// Catalog: movies 1-4 (4 has no vector in any generation), users 10, 11
/// and 12 (12 has no vector). Generations: `STANDARD`, `NCF` (adds pair
/// scores) and `BROKEN` (malformed item source).
///
/// Average ratings: 1 => 3.0, 2 => 4.5, 3 => 4.5, 4 => unrated.
pub(crate) fn create_test_executor() -> (TempDir, Executor) {
    let dir = TempDir::new().unwrap();
    let p = dir.path();
    std::fs::write(p.join("item.csv"), "1:1 0\n2:0.9 0.1\n3:0 1\n").unwrap();
    std::fs::write(p.join("user.csv"), "10:0 1\n11:1 0\n").unwrap();
    std::fs::write(p.join("scores.csv"), "11_3:1.5\n").unwrap();
    std::fs::write(p.join("bad.csv"), "1:1 0\n2:oops\n").unwrap();

    let config = MarqueeConfig {
        default_generation: "STANDARD".into(),
        model_dir: p.to_path_buf(),
        generations: vec![
            GenerationSpec::new(
                "STANDARD",
                "Standard Version",
                SourceDescriptor::file("item.csv"),
                SourceDescriptor::file("user.csv"),
            ),
            GenerationSpec::new(
                "NCF",
                "NCF Version",
                SourceDescriptor::file("item.csv"),
                SourceDescriptor::file("user.csv"),
            )
            .with_scores(SourceDescriptor::file("scores.csv")),
            GenerationSpec::new(
                "BROKEN",
                "Broken Version",
                SourceDescriptor::file("bad.csv"),
                SourceDescriptor::file("user.csv"),
            ),
        ],
    };

    let batch = IngestBatch {
        movies: vec![
            Movie::new(1, "Alpha", Some(2001), &["Comedy"]),
            Movie::new(2, "Beta", Some(1999), &["Comedy", "Drama"]),
            Movie::new(3, "Gamma", Some(2010), &["Drama"]),
            Movie::new(4, "Delta", None, &["Comedy"]),
        ],
        users: vec![],
        ratings: vec![
            Rating::new(10, 1, 3.0, 1),
            Rating::new(10, 2, 4.0, 2),
            Rating::new(11, 2, 5.0, 3),
            Rating::new(12, 3, 4.5, 4),
        ],
    };

    let context: Arc<ServingContext> = ServingContext::open(&config, batch, None).unwrap();
    (dir, Executor::new(context))
}

/// Movie ids of an `Output::Movies`
pub(crate) fn movie_ids(output: crate::Output) -> Vec<u32> {
    match output {
        crate::Output::Movies(movies) => movies.into_iter().map(|m| m.id).collect(),
        other => panic!("Expected Movies output, got {:?}", other),
    }
}
