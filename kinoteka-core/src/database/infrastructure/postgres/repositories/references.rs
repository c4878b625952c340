use std::marker::PhantomData;

use async_trait::async_trait;
use kinoteka_model::ids::raw_ids;
use kinoteka_model::{CatalogId, ReferenceDraft};
use sqlx::PgPool;
use tracing::{Instrument, Span, info, info_span};

use super::expect_affected;
use crate::database::ports::references::{ReferenceEntity, ReferenceRepository};
use crate::error::{CatalogError, Result};

type ReferenceRow = (i32, String, Option<String>);

/// PostgreSQL repository for genres, categories and age ratings.
///
/// The table name comes from [`ReferenceEntity::TABLE`], never from input.
#[derive(Clone, Debug)]
pub struct PostgresReferenceRepository<R> {
    pool: PgPool,
    span: Span,
    _entity: PhantomData<fn() -> R>,
}

impl<R: ReferenceEntity> PostgresReferenceRepository<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            span: info_span!("catalog.references", table = R::TABLE),
            _entity: PhantomData,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn decode((id, title, poster_url): ReferenceRow) -> R {
        R::from_parts(R::Id::from_raw(id), title, poster_url)
    }
}

#[async_trait]
impl<R: ReferenceEntity> ReferenceRepository<R> for PostgresReferenceRepository<R> {
    async fn find_all(&self) -> Result<Vec<R>> {
        let sql =
            format!("SELECT id, title, poster_url FROM {} ORDER BY id", R::TABLE);
        let rows = sqlx::query_as::<_, ReferenceRow>(&sql)
            .fetch_all(self.pool())
            .instrument(self.span.clone())
            .await?;
        Ok(rows.into_iter().map(Self::decode).collect())
    }

    async fn find_by_id(&self, id: R::Id) -> Result<R> {
        let sql =
            format!("SELECT id, title, poster_url FROM {} WHERE id = $1", R::TABLE);
        sqlx::query_as::<_, ReferenceRow>(&sql)
            .bind(id.raw())
            .fetch_optional(self.pool())
            .instrument(self.span.clone())
            .await?
            .map(Self::decode)
            .ok_or_else(|| CatalogError::not_found(R::KIND, id))
    }

    async fn find_all_by_ids(&self, ids: &[R::Id]) -> Result<Vec<R>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT id, title, poster_url FROM {} WHERE id = ANY($1) ORDER BY id",
            R::TABLE
        );
        let rows = sqlx::query_as::<_, ReferenceRow>(&sql)
            .bind(raw_ids(ids))
            .fetch_all(self.pool())
            .instrument(self.span.clone())
            .await?;
        Ok(rows.into_iter().map(Self::decode).collect())
    }

    async fn create(&self, draft: &ReferenceDraft) -> Result<R::Id> {
        let sql = format!(
            "INSERT INTO {} (title, poster_url) VALUES ($1, $2) RETURNING id",
            R::TABLE
        );
        let id: i32 = sqlx::query_scalar(&sql)
            .bind(&draft.title)
            .bind(&draft.poster_url)
            .fetch_one(self.pool())
            .instrument(self.span.clone())
            .await?;
        self.span.in_scope(|| info!(kind = R::KIND, id, "reference created"));
        Ok(R::Id::from_raw(id))
    }

    async fn update(&self, id: R::Id, draft: &ReferenceDraft) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET title = $2, poster_url = $3 WHERE id = $1",
            R::TABLE
        );
        let result = sqlx::query(&sql)
            .bind(id.raw())
            .bind(&draft.title)
            .bind(&draft.poster_url)
            .execute(self.pool())
            .instrument(self.span.clone())
            .await?;
        expect_affected(result.rows_affected(), R::KIND, id)
    }

    async fn delete(&self, id: R::Id) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", R::TABLE);
        let result = sqlx::query(&sql)
            .bind(id.raw())
            .execute(self.pool())
            .instrument(self.span.clone())
            .await?;
        expect_affected(result.rows_affected(), R::KIND, id)
    }
}
