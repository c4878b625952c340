//! PostgreSQL infrastructure adapters implementing the database ports.

pub mod repositories;

pub use repositories::episodes::PostgresEpisodesRepository;
pub use repositories::movie_types::PostgresMovieTypesRepository;
pub use repositories::movies::PostgresMoviesRepository;
pub use repositories::recommendations::PostgresRecommendationsRepository;
pub use repositories::references::PostgresReferenceRepository;
pub use repositories::seasons::PostgresSeasonsRepository;
