use async_trait::async_trait;
use kinoteka_model::{Episode, EpisodeDraft, EpisodeId, SeasonId};
use sqlx::{FromRow, PgPool};
use tracing::{Instrument, Span, info, info_span};

use super::expect_affected;
use crate::database::ports::episodes::EpisodesRepository;
use crate::error::{CatalogError, Result};

#[derive(Debug, FromRow)]
struct EpisodeRow {
    id: i32,
    number: i32,
    season_id: i32,
    video_url: String,
}

impl From<EpisodeRow> for Episode {
    fn from(row: EpisodeRow) -> Self {
        Episode {
            id: EpisodeId(row.id),
            number: row.number,
            season_id: SeasonId(row.season_id),
            video_url: row.video_url,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PostgresEpisodesRepository {
    pool: PgPool,
    span: Span,
}

impl PostgresEpisodesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            span: info_span!("catalog.episodes"),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EpisodesRepository for PostgresEpisodesRepository {
    async fn exists(&self, season_id: SeasonId, number: i32) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM episodes WHERE season_id = $1 AND number = $2)",
        )
        .bind(season_id.get())
        .bind(number)
        .fetch_one(self.pool())
        .instrument(self.span.clone())
        .await?;
        Ok(exists)
    }

    async fn create(
        &self,
        season_id: SeasonId,
        draft: &EpisodeDraft,
    ) -> Result<EpisodeId> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO episodes (season_id, number, video_url) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(season_id.get())
        .bind(draft.number)
        .bind(&draft.video_url)
        .fetch_one(self.pool())
        .instrument(self.span.clone())
        .await?;

        let id = EpisodeId(id);
        self.span.in_scope(|| {
            info!(season_id = %season_id, episode_id = %id, "episode created")
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: EpisodeId) -> Result<Episode> {
        sqlx::query_as::<_, EpisodeRow>(
            "SELECT id, number, season_id, video_url FROM episodes WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(self.pool())
        .instrument(self.span.clone())
        .await?
        .map(Episode::from)
        .ok_or_else(|| CatalogError::not_found("episode", id))
    }

    async fn find_all_by_season(
        &self,
        season_id: SeasonId,
    ) -> Result<Vec<Episode>> {
        let rows = sqlx::query_as::<_, EpisodeRow>(
            "SELECT id, number, season_id, video_url FROM episodes \
             WHERE season_id = $1 ORDER BY number, id",
        )
        .bind(season_id.get())
        .fetch_all(self.pool())
        .instrument(self.span.clone())
        .await?;
        Ok(rows.into_iter().map(Episode::from).collect())
    }

    async fn update(&self, id: EpisodeId, draft: &EpisodeDraft) -> Result<()> {
        let result = sqlx::query(
            "UPDATE episodes SET number = $2, video_url = $3 WHERE id = $1",
        )
        .bind(id.get())
        .bind(draft.number)
        .bind(&draft.video_url)
        .execute(self.pool())
        .instrument(self.span.clone())
        .await?;
        expect_affected(result.rows_affected(), "episode", id)
    }

    async fn delete(&self, id: EpisodeId) -> Result<()> {
        let result = sqlx::query("DELETE FROM episodes WHERE id = $1")
            .bind(id.get())
            .execute(self.pool())
            .instrument(self.span.clone())
            .await?;
        expect_affected(result.rows_affected(), "episode", id)
    }
}
