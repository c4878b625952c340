//! Core data model definitions shared across Kinoteka crates.
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod filters;
pub mod homepage;
pub mod ids;
pub mod requests;

pub use catalog::{
    AgeRating, Category, Episode, Genre, Movie, MovieMedia, MovieSummary,
    MovieType, Season,
};
pub use error::{ModelError, Result as ModelResult};
pub use filters::MovieFilters;
pub use homepage::{CategoryShelf, Homepage, Recommendation};
pub use ids::{
    AgeRatingId, CatalogId, CategoryId, EpisodeId, GenreId, MovieId,
    MovieTypeId, RecommendationId, SENTINEL_ID, SeasonId,
};
pub use requests::{
    EpisodeDraft, EpisodeUpdate, MediaUpdate, MovieDraft, MovieTypeDraft,
    RecommendationDraft, RecommendationUpdate, ReferenceDraft, SeasonDraft,
    SeasonUpdate,
};
