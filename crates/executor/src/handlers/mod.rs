//! Command handlers organized by category.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `models` | ListModels, SwitchModel |
//! | `recommend` | SimilarMovies, RecommendForUser |
//! | `catalog` | MoviesByGenre, TopMovies, GetMovie, GetUser |

pub mod catalog;
pub mod models;
pub mod recommend;

use marquee_core::{MovieId, MovieView};
use marquee_engine::EntityCatalog;

/// Resolve ranked ids to service-layer records, keeping order
pub(crate) fn movie_views(catalog: &EntityCatalog, ids: &[MovieId]) -> Vec<MovieView> {
    ids.iter().filter_map(|&id| catalog.movie_view(id)).collect()
}
