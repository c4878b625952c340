use async_trait::async_trait;
use kinoteka_model::{MovieType, MovieTypeDraft, MovieTypeId};
use sqlx::PgPool;
use tracing::{Instrument, Span, info, info_span};

use super::expect_affected;
use crate::database::ports::movie_types::MovieTypesRepository;
use crate::error::{CatalogError, Result};

#[derive(Clone, Debug)]
pub struct PostgresMovieTypesRepository {
    pool: PgPool,
    span: Span,
}

impl PostgresMovieTypesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            span: info_span!("catalog.movie_types"),
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

fn decode((id, title): (i32, String)) -> MovieType {
    MovieType {
        id: MovieTypeId(id),
        title,
    }
}

#[async_trait]
impl MovieTypesRepository for PostgresMovieTypesRepository {
    async fn find_all(&self) -> Result<Vec<MovieType>> {
        let rows = sqlx::query_as::<_, (i32, String)>(
            "SELECT id, title FROM movie_types ORDER BY id",
        )
        .fetch_all(self.pool())
        .instrument(self.span.clone())
        .await?;
        Ok(rows.into_iter().map(decode).collect())
    }

    async fn find_by_id(&self, id: MovieTypeId) -> Result<MovieType> {
        sqlx::query_as::<_, (i32, String)>(
            "SELECT id, title FROM movie_types WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(self.pool())
        .instrument(self.span.clone())
        .await?
        .map(decode)
        .ok_or_else(|| CatalogError::not_found("movie type", id))
    }

    async fn create(&self, draft: &MovieTypeDraft) -> Result<MovieTypeId> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO movie_types (title) VALUES ($1) RETURNING id",
        )
        .bind(&draft.title)
        .fetch_one(self.pool())
        .instrument(self.span.clone())
        .await?;
        self.span
            .in_scope(|| info!(id, title = %draft.title, "movie type created"));
        Ok(MovieTypeId(id))
    }

    async fn update(
        &self,
        id: MovieTypeId,
        draft: &MovieTypeDraft,
    ) -> Result<()> {
        let result =
            sqlx::query("UPDATE movie_types SET title = $2 WHERE id = $1")
                .bind(id.get())
                .bind(&draft.title)
                .execute(self.pool())
                .instrument(self.span.clone())
                .await?;
        expect_affected(result.rows_affected(), "movie type", id)
    }

    async fn delete(&self, id: MovieTypeId) -> Result<()> {
        let result = sqlx::query("DELETE FROM movie_types WHERE id = $1")
            .bind(id.get())
            .execute(self.pool())
            .instrument(self.span.clone())
            .await?;
        expect_affected(result.rows_affected(), "movie type", id)
    }
}
