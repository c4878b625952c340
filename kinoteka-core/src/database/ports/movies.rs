use async_trait::async_trait;
use kinoteka_model::{
    Movie, MovieDraft, MovieFilters, MovieId, MovieMedia, MovieSummary,
};

use crate::error::Result;

/// Persistence of the movie aggregate root.
///
/// Writes are all-or-nothing: a failing association insert rolls back the
/// movie row as well.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoviesRepository: Send + Sync {
    /// Full aggregate for one movie, or `NotFound`.
    async fn find_by_id(&self, id: MovieId) -> Result<Movie>;
    async fn find_all(&self, filters: &MovieFilters) -> Result<Vec<Movie>>;
    async fn exists(&self, id: MovieId) -> Result<bool>;
    async fn create(&self, draft: &MovieDraft) -> Result<MovieId>;
    /// Replace scalars and every association list of `id`.
    async fn update(&self, id: MovieId, draft: &MovieDraft) -> Result<()>;
    /// Remove the movie together with its seasons, episodes, associations
    /// and recommendation slot.
    async fn delete(&self, id: MovieId) -> Result<()>;
    async fn search(&self, title: &str) -> Result<Vec<MovieSummary>>;

    async fn media(&self, id: MovieId) -> Result<MovieMedia>;
    async fn set_cover(&self, id: MovieId, path: &str) -> Result<()>;
    async fn append_screenshots(
        &self,
        id: MovieId,
        paths: &[String],
    ) -> Result<()>;
    /// Drop `path` from the cover or the screenshot list.
    async fn remove_media(&self, id: MovieId, path: &str) -> Result<()>;
}
