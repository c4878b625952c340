use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use kinoteka_model::{AgeRating, Category, Genre};

use crate::database::ports::{
    EpisodesRepository, MovieTypesRepository, MoviesRepository,
    RecommendationsRepository, ReferenceRepository, SeasonsRepository,
};
use crate::database::postgres::PostgresDatabase;

/// Aggregates all repository ports used by application services.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub movies: Arc<dyn MoviesRepository>,
    pub seasons: Arc<dyn SeasonsRepository>,
    pub episodes: Arc<dyn EpisodesRepository>,
    pub genres: Arc<dyn ReferenceRepository<Genre>>,
    pub categories: Arc<dyn ReferenceRepository<Category>>,
    pub ages: Arc<dyn ReferenceRepository<AgeRating>>,
    pub movie_types: Arc<dyn MovieTypesRepository>,
    pub recommendations: Arc<dyn RecommendationsRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("movies", &type_name_of_val(self.movies.as_ref()))
            .field("seasons", &type_name_of_val(self.seasons.as_ref()))
            .field("episodes", &type_name_of_val(self.episodes.as_ref()))
            .field("genres", &type_name_of_val(self.genres.as_ref()))
            .field("categories", &type_name_of_val(self.categories.as_ref()))
            .field("ages", &type_name_of_val(self.ages.as_ref()))
            .field(
                "movie_types",
                &type_name_of_val(self.movie_types.as_ref()),
            )
            .field(
                "recommendations",
                &type_name_of_val(self.recommendations.as_ref()),
            )
            .finish()
    }
}

impl AppUnitOfWork {
    /// Wire every port to its PostgreSQL adapter.
    pub fn from_postgres(db: &PostgresDatabase) -> Self {
        Self {
            movies: Arc::new(db.movies().clone()),
            seasons: Arc::new(db.seasons().clone()),
            episodes: Arc::new(db.episodes().clone()),
            genres: Arc::new(db.genres().clone()),
            categories: Arc::new(db.categories().clone()),
            ages: Arc::new(db.ages().clone()),
            movie_types: Arc::new(db.movie_types().clone()),
            recommendations: Arc::new(db.recommendations().clone()),
        }
    }
}
