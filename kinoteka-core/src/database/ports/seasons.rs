use async_trait::async_trait;
use kinoteka_model::{MovieId, Season, SeasonDraft, SeasonId, SeasonUpdate};

use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeasonsRepository: Send + Sync {
    async fn exists(&self, movie_id: MovieId, number: i32) -> Result<bool>;
    /// Insert the season and its episodes in one transaction.
    async fn create(
        &self,
        movie_id: MovieId,
        draft: &SeasonDraft,
    ) -> Result<SeasonId>;
    async fn find_by_id(&self, id: SeasonId) -> Result<Season>;
    /// Seasons of a movie ordered by number, episodes included.
    async fn find_all_by_movie(&self, movie_id: MovieId) -> Result<Vec<Season>>;
    /// Renumber the season and apply episode edits in one transaction.
    async fn update(&self, id: SeasonId, update: &SeasonUpdate) -> Result<()>;
    async fn delete(&self, id: SeasonId) -> Result<()>;
}
