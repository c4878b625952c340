use async_trait::async_trait;
use kinoteka_model::{MovieId, Season, SeasonDraft, SeasonId, SeasonUpdate};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::{Instrument, Span, info, info_span};

use super::{begin, expect_affected, settle};
use crate::aggregate::reducer::{SeasonColumns, SeasonTree};
use crate::database::ports::seasons::SeasonsRepository;
use crate::error::{CatalogError, Result};

const SEASON_SQL: &str = r#"
SELECT
    s.id AS season_id,
    s.number AS season_number,
    s.movie_id,
    COALESCE(e.id, 0) AS episode_id,
    COALESCE(e.number, 0) AS episode_number,
    COALESCE(e.video_url, '') AS episode_video_url
FROM seasons s
LEFT JOIN episodes e ON e.season_id = s.id
"#;

#[derive(Debug, Clone, FromRow)]
pub(crate) struct SeasonRow {
    pub season_id: i32,
    pub season_number: i32,
    pub movie_id: i32,
    pub episode_id: i32,
    pub episode_number: i32,
    pub episode_video_url: String,
}

/// Group season/episode join rows into seasons ordered by number.
pub(crate) fn fold_seasons(rows: Vec<SeasonRow>) -> Vec<Season> {
    let mut tree = SeasonTree::default();
    for row in rows {
        tree.push(SeasonColumns {
            movie_id: row.movie_id,
            season_id: row.season_id,
            season_number: row.season_number,
            episode_id: row.episode_id,
            episode_number: row.episode_number,
            episode_video_url: row.episode_video_url,
        });
    }
    tree.finish()
}

#[derive(Clone, Debug)]
pub struct PostgresSeasonsRepository {
    pool: PgPool,
    span: Span,
}

impl PostgresSeasonsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            span: info_span!("catalog.seasons"),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_season(
        conn: &mut PgConnection,
        movie_id: MovieId,
        draft: &SeasonDraft,
    ) -> Result<SeasonId> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO seasons (movie_id, number) VALUES ($1, $2) RETURNING id",
        )
        .bind(movie_id.get())
        .bind(draft.number)
        .fetch_one(&mut *conn)
        .await?;

        if !draft.episodes.is_empty() {
            let numbers: Vec<i32> =
                draft.episodes.iter().map(|e| e.number).collect();
            let urls: Vec<String> =
                draft.episodes.iter().map(|e| e.video_url.clone()).collect();
            sqlx::query(
                r#"
                INSERT INTO episodes (season_id, number, video_url)
                SELECT $1, t.number, t.video_url
                FROM UNNEST($2::INTEGER[], $3::TEXT[]) AS t(number, video_url)
                "#,
            )
            .bind(id)
            .bind(&numbers)
            .bind(&urls)
            .execute(&mut *conn)
            .await?;
        }

        Ok(SeasonId(id))
    }

    async fn apply_update(
        conn: &mut PgConnection,
        id: SeasonId,
        update: &SeasonUpdate,
    ) -> Result<()> {
        let result =
            sqlx::query("UPDATE seasons SET number = $2 WHERE id = $1")
                .bind(id.get())
                .bind(update.number)
                .execute(&mut *conn)
                .await?;
        expect_affected(result.rows_affected(), "season", id)?;

        for episode in &update.episodes {
            let result = sqlx::query(
                "UPDATE episodes SET number = $3, video_url = $4 \
                 WHERE id = $1 AND season_id = $2",
            )
            .bind(episode.id.get())
            .bind(id.get())
            .bind(episode.number)
            .bind(&episode.video_url)
            .execute(&mut *conn)
            .await?;
            expect_affected(result.rows_affected(), "episode", episode.id)?;
        }
        Ok(())
    }

    async fn remove_season(conn: &mut PgConnection, id: SeasonId) -> Result<()> {
        sqlx::query("DELETE FROM episodes WHERE season_id = $1")
            .bind(id.get())
            .execute(&mut *conn)
            .await?;
        let result = sqlx::query("DELETE FROM seasons WHERE id = $1")
            .bind(id.get())
            .execute(&mut *conn)
            .await?;
        expect_affected(result.rows_affected(), "season", id)
    }
}

#[async_trait]
impl SeasonsRepository for PostgresSeasonsRepository {
    async fn exists(&self, movie_id: MovieId, number: i32) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM seasons WHERE movie_id = $1 AND number = $2)",
        )
        .bind(movie_id.get())
        .bind(number)
        .fetch_one(self.pool())
        .instrument(self.span.clone())
        .await?;
        Ok(exists)
    }

    async fn create(
        &self,
        movie_id: MovieId,
        draft: &SeasonDraft,
    ) -> Result<SeasonId> {
        async {
            let mut tx = begin(self.pool(), "create season").await?;
            let outcome = Self::insert_season(&mut *tx, movie_id, draft).await;
            let id = settle(tx, "create season", outcome).await?;
            info!(
                movie_id = %movie_id,
                season_id = %id,
                episodes = draft.episodes.len(),
                "season created"
            );
            Ok(id)
        }
        .instrument(self.span.clone())
        .await
    }

    async fn find_by_id(&self, id: SeasonId) -> Result<Season> {
        let sql = format!("{SEASON_SQL} WHERE s.id = $1");
        let rows = sqlx::query_as::<_, SeasonRow>(&sql)
            .bind(id.get())
            .fetch_all(self.pool())
            .instrument(self.span.clone())
            .await?;
        fold_seasons(rows)
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::not_found("season", id))
    }

    async fn find_all_by_movie(&self, movie_id: MovieId) -> Result<Vec<Season>> {
        let sql = format!("{SEASON_SQL} WHERE s.movie_id = $1");
        let rows = sqlx::query_as::<_, SeasonRow>(&sql)
            .bind(movie_id.get())
            .fetch_all(self.pool())
            .instrument(self.span.clone())
            .await?;
        Ok(fold_seasons(rows))
    }

    async fn update(&self, id: SeasonId, update: &SeasonUpdate) -> Result<()> {
        async {
            let mut tx = begin(self.pool(), "update season").await?;
            let outcome = Self::apply_update(&mut *tx, id, update).await;
            settle(tx, "update season", outcome).await?;
            info!(season_id = %id, "season updated");
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    async fn delete(&self, id: SeasonId) -> Result<()> {
        async {
            let mut tx = begin(self.pool(), "delete season").await?;
            let outcome = Self::remove_season(&mut *tx, id).await;
            settle(tx, "delete season", outcome).await?;
            info!(season_id = %id, "season deleted");
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }
}
