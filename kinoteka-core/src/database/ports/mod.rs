//! Repository ports for the catalog. Implementations live in the Postgres
//! adapter under `database::infrastructure::postgres`.

pub mod episodes;
pub mod movie_types;
pub mod movies;
pub mod recommendations;
pub mod references;
pub mod seasons;

pub use episodes::EpisodesRepository;
pub use movie_types::MovieTypesRepository;
pub use movies::MoviesRepository;
pub use recommendations::RecommendationsRepository;
pub use references::{ReferenceEntity, ReferenceRepository};
pub use seasons::SeasonsRepository;
