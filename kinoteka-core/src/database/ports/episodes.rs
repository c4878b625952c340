use async_trait::async_trait;
use kinoteka_model::{Episode, EpisodeDraft, EpisodeId, SeasonId};

use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EpisodesRepository: Send + Sync {
    async fn exists(&self, season_id: SeasonId, number: i32) -> Result<bool>;
    async fn create(
        &self,
        season_id: SeasonId,
        draft: &EpisodeDraft,
    ) -> Result<EpisodeId>;
    async fn find_by_id(&self, id: EpisodeId) -> Result<Episode>;
    async fn find_all_by_season(
        &self,
        season_id: SeasonId,
    ) -> Result<Vec<Episode>>;
    async fn update(&self, id: EpisodeId, draft: &EpisodeDraft) -> Result<()>;
    async fn delete(&self, id: EpisodeId) -> Result<()>;
}
