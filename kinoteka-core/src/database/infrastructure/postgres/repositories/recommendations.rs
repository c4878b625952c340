use async_trait::async_trait;
use kinoteka_model::{
    MovieId, MovieSummary, Recommendation, RecommendationDraft,
    RecommendationId,
};
use sqlx::PgPool;
use tracing::{Instrument, Span, info, info_span};

use super::expect_affected;
use super::movies::SummaryRow;
use crate::database::ports::recommendations::RecommendationsRepository;
use crate::error::{CatalogError, Result};

#[derive(Clone, Debug)]
pub struct PostgresRecommendationsRepository {
    pool: PgPool,
    span: Span,
}

impl PostgresRecommendationsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            span: info_span!("catalog.recommendations"),
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

fn decode((id, movie_id, position): (i32, i32, i32)) -> Recommendation {
    Recommendation {
        id: RecommendationId(id),
        movie_id: MovieId(movie_id),
        position,
    }
}

#[async_trait]
impl RecommendationsRepository for PostgresRecommendationsRepository {
    async fn find_all(&self) -> Result<Vec<Recommendation>> {
        let rows = sqlx::query_as::<_, (i32, i32, i32)>(
            "SELECT id, movie_id, position FROM recommended_movies \
             ORDER BY position, id",
        )
        .fetch_all(self.pool())
        .instrument(self.span.clone())
        .await?;
        Ok(rows.into_iter().map(decode).collect())
    }

    async fn find_by_id(&self, id: RecommendationId) -> Result<Recommendation> {
        sqlx::query_as::<_, (i32, i32, i32)>(
            "SELECT id, movie_id, position FROM recommended_movies WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(self.pool())
        .instrument(self.span.clone())
        .await?
        .map(decode)
        .ok_or_else(|| CatalogError::not_found("recommendation", id))
    }

    async fn create(
        &self,
        draft: &RecommendationDraft,
    ) -> Result<RecommendationId> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO recommended_movies (movie_id, position) \
             VALUES ($1, $2) RETURNING id",
        )
        .bind(draft.movie_id.get())
        .bind(draft.position)
        .fetch_one(self.pool())
        .instrument(self.span.clone())
        .await?;
        self.span.in_scope(|| {
            info!(
                id,
                movie_id = %draft.movie_id,
                position = draft.position,
                "movie recommended"
            )
        });
        Ok(RecommendationId(id))
    }

    async fn update(&self, id: RecommendationId, position: i32) -> Result<()> {
        let result = sqlx::query(
            "UPDATE recommended_movies SET position = $2 WHERE id = $1",
        )
        .bind(id.get())
        .bind(position)
        .execute(self.pool())
        .instrument(self.span.clone())
        .await?;
        expect_affected(result.rows_affected(), "recommendation", id)
    }

    async fn delete(&self, id: RecommendationId) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM recommended_movies WHERE id = $1")
                .bind(id.get())
                .execute(self.pool())
                .instrument(self.span.clone())
                .await?;
        expect_affected(result.rows_affected(), "recommendation", id)
    }

    async fn recommended_movies(&self) -> Result<Vec<MovieSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT m.id, m.title, m.description, m.release_year, m.runtime,
                   COALESCE(m.cover, '') AS cover
            FROM recommended_movies rm
            JOIN movies m ON m.id = rm.movie_id
            ORDER BY rm.position, rm.id
            "#,
        )
        .fetch_all(self.pool())
        .instrument(self.span.clone())
        .await?;
        Ok(rows.into_iter().map(MovieSummary::from).collect())
    }
}
