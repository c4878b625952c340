use async_trait::async_trait;
use kinoteka_model::ids::raw_ids;
use kinoteka_model::{
    Movie, MovieDraft, MovieFilters, MovieId, MovieMedia, MovieSummary,
};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::{Instrument, Span, debug, info, info_span};

use super::{begin, expect_affected, settle};
use crate::aggregate::{MovieRow, reduce_stream};
use crate::database::ports::movies::MoviesRepository;
use crate::error::{CatalogError, Result};
use crate::query::{PredicateSet, find_all_query, find_by_id_query};

/// Many-to-many link tables owned by a movie.
#[derive(Debug, Clone, Copy)]
enum Association {
    Genres,
    Categories,
    Ages,
}

impl Association {
    const ALL: [Association; 3] =
        [Association::Genres, Association::Categories, Association::Ages];

    fn table(self) -> &'static str {
        match self {
            Association::Genres => "movie_genres",
            Association::Categories => "movie_categories",
            Association::Ages => "movie_ages",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Association::Genres => "genre_id",
            Association::Categories => "category_id",
            Association::Ages => "age_id",
        }
    }

    fn ids(self, draft: &MovieDraft) -> Vec<i32> {
        match self {
            Association::Genres => raw_ids(&draft.unique_genre_ids()),
            Association::Categories => raw_ids(&draft.unique_category_ids()),
            Association::Ages => raw_ids(&draft.unique_age_ids()),
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct SummaryRow {
    id: i32,
    title: String,
    description: String,
    release_year: i32,
    runtime: i32,
    cover: String,
}

impl From<SummaryRow> for MovieSummary {
    fn from(row: SummaryRow) -> Self {
        MovieSummary {
            id: MovieId(row.id),
            title: row.title,
            description: row.description,
            release_year: row.release_year,
            runtime: row.runtime,
            cover: (!row.cover.is_empty()).then_some(row.cover),
        }
    }
}

#[derive(Debug, FromRow)]
struct MediaRow {
    cover: String,
    screenshots: Vec<String>,
}

/// PostgreSQL-backed movie aggregate repository.
#[derive(Clone, Debug)]
pub struct PostgresMoviesRepository {
    pool: PgPool,
    span: Span,
}

impl PostgresMoviesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            span: info_span!("catalog.movies"),
        }
    }

    /// Replace the span every query of this repository is recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn load_one(&self, id: MovieId) -> Result<Movie> {
        let mut query = find_by_id_query(id);
        let rows = query.build_query_as::<MovieRow>().fetch(self.pool());
        let reducer = reduce_stream(rows).await?;
        debug!(movie_id = %id, rows = reducer.rows_seen(), "movie rows reduced");
        reducer
            .finish_single()
            .ok_or_else(|| CatalogError::not_found("movie", id))
    }

    async fn load_all(&self, filters: &MovieFilters) -> Result<Vec<Movie>> {
        let predicates = PredicateSet::from_filters(filters);
        debug!(params = ?predicates.params(), "listing movies");

        let mut query = find_all_query(&predicates);
        let rows = query.build_query_as::<MovieRow>().fetch(self.pool());
        let reducer = reduce_stream(rows).await?;
        debug!(
            rows = reducer.rows_seen(),
            movies = reducer.len(),
            "movie listing reduced"
        );
        Ok(reducer.finish())
    }

    async fn insert_movie(
        conn: &mut PgConnection,
        draft: &MovieDraft,
    ) -> Result<MovieId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO movies (
                title, description, release_year, runtime, keywords,
                director, producer, movie_type_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.release_year)
        .bind(draft.runtime)
        .bind(&draft.keywords)
        .bind(&draft.director)
        .bind(&draft.producer)
        .bind(draft.movie_type_id.get())
        .fetch_one(&mut *conn)
        .await?;

        let id = MovieId(id);
        Self::link_associations(conn, id, draft).await?;
        Ok(id)
    }

    async fn replace_movie(
        conn: &mut PgConnection,
        id: MovieId,
        draft: &MovieDraft,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = $2,
                description = $3,
                release_year = $4,
                runtime = $5,
                keywords = $6,
                director = $7,
                producer = $8,
                movie_type_id = $9
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.release_year)
        .bind(draft.runtime)
        .bind(&draft.keywords)
        .bind(&draft.director)
        .bind(&draft.producer)
        .bind(draft.movie_type_id.get())
        .execute(&mut *conn)
        .await?;
        expect_affected(result.rows_affected(), "movie", id)?;

        Self::unlink_associations(conn, id).await?;
        Self::link_associations(conn, id, draft).await
    }

    async fn remove_movie(conn: &mut PgConnection, id: MovieId) -> Result<()> {
        sqlx::query(
            "DELETE FROM episodes WHERE season_id IN \
             (SELECT id FROM seasons WHERE movie_id = $1)",
        )
        .bind(id.get())
        .execute(&mut *conn)
        .await?;

        sqlx::query("DELETE FROM seasons WHERE movie_id = $1")
            .bind(id.get())
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM recommended_movies WHERE movie_id = $1")
            .bind(id.get())
            .execute(&mut *conn)
            .await?;

        Self::unlink_associations(conn, id).await?;

        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id.get())
            .execute(&mut *conn)
            .await?;
        expect_affected(result.rows_affected(), "movie", id)
    }

    async fn link_associations(
        conn: &mut PgConnection,
        id: MovieId,
        draft: &MovieDraft,
    ) -> Result<()> {
        for association in Association::ALL {
            let ids = association.ids(draft);
            if ids.is_empty() {
                continue;
            }
            let sql = format!(
                "INSERT INTO {} (movie_id, {}) SELECT $1, UNNEST($2::INTEGER[])",
                association.table(),
                association.column()
            );
            sqlx::query(&sql)
                .bind(id.get())
                .bind(&ids)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    async fn unlink_associations(
        conn: &mut PgConnection,
        id: MovieId,
    ) -> Result<()> {
        for association in Association::ALL {
            let sql = format!(
                "DELETE FROM {} WHERE movie_id = $1",
                association.table()
            );
            sqlx::query(&sql).bind(id.get()).execute(&mut *conn).await?;
        }
        Ok(())
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[async_trait]
impl MoviesRepository for PostgresMoviesRepository {
    async fn find_by_id(&self, id: MovieId) -> Result<Movie> {
        self.load_one(id).instrument(self.span.clone()).await
    }

    async fn find_all(&self, filters: &MovieFilters) -> Result<Vec<Movie>> {
        self.load_all(filters).instrument(self.span.clone()).await
    }

    async fn exists(&self, id: MovieId) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)",
        )
        .bind(id.get())
        .fetch_one(self.pool())
        .instrument(self.span.clone())
        .await?;
        Ok(exists)
    }

    async fn create(&self, draft: &MovieDraft) -> Result<MovieId> {
        async {
            let mut tx = begin(self.pool(), "create movie").await?;
            let outcome = Self::insert_movie(&mut *tx, draft).await;
            let id = settle(tx, "create movie", outcome).await?;
            info!(movie_id = %id, title = %draft.title, "movie created");
            Ok(id)
        }
        .instrument(self.span.clone())
        .await
    }

    async fn update(&self, id: MovieId, draft: &MovieDraft) -> Result<()> {
        async {
            let mut tx = begin(self.pool(), "update movie").await?;
            let outcome = Self::replace_movie(&mut *tx, id, draft).await;
            settle(tx, "update movie", outcome).await?;
            info!(movie_id = %id, "movie updated");
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    async fn delete(&self, id: MovieId) -> Result<()> {
        async {
            let mut tx = begin(self.pool(), "delete movie").await?;
            let outcome = Self::remove_movie(&mut *tx, id).await;
            settle(tx, "delete movie", outcome).await?;
            info!(movie_id = %id, "movie deleted");
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    async fn search(&self, title: &str) -> Result<Vec<MovieSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, title, description, release_year, runtime,
                   COALESCE(cover, '') AS cover
            FROM movies
            WHERE title ILIKE '%' || $1 || '%'
            ORDER BY release_year DESC, id
            "#,
        )
        .bind(escape_like(title))
        .fetch_all(self.pool())
        .instrument(self.span.clone())
        .await?;
        Ok(rows.into_iter().map(MovieSummary::from).collect())
    }

    async fn media(&self, id: MovieId) -> Result<MovieMedia> {
        let row = sqlx::query_as::<_, MediaRow>(
            r#"
            SELECT COALESCE(cover, '') AS cover,
                   COALESCE(screenshots, '{}'::TEXT[]) AS screenshots
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool())
        .instrument(self.span.clone())
        .await?
        .ok_or_else(|| CatalogError::not_found("movie", id))?;

        Ok(MovieMedia {
            cover: (!row.cover.is_empty()).then_some(row.cover),
            screenshots: row.screenshots,
        })
    }

    async fn set_cover(&self, id: MovieId, path: &str) -> Result<()> {
        let result = sqlx::query("UPDATE movies SET cover = $2 WHERE id = $1")
            .bind(id.get())
            .bind(path)
            .execute(self.pool())
            .instrument(self.span.clone())
            .await?;
        expect_affected(result.rows_affected(), "movie", id)
    }

    async fn append_screenshots(
        &self,
        id: MovieId,
        paths: &[String],
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET screenshots = array_cat(COALESCE(screenshots, '{}'::TEXT[]), $2::TEXT[])
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(paths)
        .execute(self.pool())
        .instrument(self.span.clone())
        .await?;
        expect_affected(result.rows_affected(), "movie", id)
    }

    async fn remove_media(&self, id: MovieId, path: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET cover = CASE WHEN cover = $2 THEN NULL ELSE cover END,
                screenshots = array_remove(COALESCE(screenshots, '{}'::TEXT[]), $2)
            WHERE id = $1
              AND (cover = $2 OR $2 = ANY(COALESCE(screenshots, '{}'::TEXT[])))
            "#,
        )
        .bind(id.get())
        .bind(path)
        .execute(self.pool())
        .instrument(self.span.clone())
        .await?;
        expect_affected(
            result.rows_affected(),
            "media",
            format!("{path} of movie {id}"),
        )
    }
}
