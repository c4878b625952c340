//! SQL for the movie aggregate: one wide left-outer join across every
//! relation a movie has.
//!
//! Absent child rows come back with identity `0` (see
//! [`kinoteka_model::SENTINEL_ID`]); the row reducer treats that as "no
//! child on this side of the join".

use kinoteka_model::MovieId;
use sqlx::{Postgres, QueryBuilder};

use super::filters::PredicateSet;

/// Select list and joins shared by the single and listing variants.
/// Ends in `WHERE 1=1` so predicates can be appended with `AND`.
pub const MOVIE_AGGREGATE_SQL: &str = r#"
SELECT
    m.id AS movie_id,
    m.title,
    m.description,
    m.release_year,
    m.runtime,
    COALESCE(m.keywords, '{}'::TEXT[]) AS keywords,
    m.director,
    m.producer,
    COALESCE(m.cover, '') AS cover,
    COALESCE(m.screenshots, '{}'::TEXT[]) AS screenshots,
    COALESCE(mt.id, 0) AS movie_type_id,
    COALESCE(mt.title, '') AS movie_type_title,
    COALESCE(g.id, 0) AS genre_id,
    COALESCE(g.title, '') AS genre_title,
    g.poster_url AS genre_poster_url,
    COALESCE(c.id, 0) AS category_id,
    COALESCE(c.title, '') AS category_title,
    c.poster_url AS category_poster_url,
    COALESCE(a.id, 0) AS age_id,
    COALESCE(a.title, '') AS age_title,
    a.poster_url AS age_poster_url,
    COALESCE(s.id, 0) AS season_id,
    COALESCE(s.number, 0) AS season_number,
    COALESCE(e.id, 0) AS episode_id,
    COALESCE(e.number, 0) AS episode_number,
    COALESCE(e.video_url, '') AS episode_video_url
FROM movies m
LEFT JOIN movie_types mt ON mt.id = m.movie_type_id
LEFT JOIN movie_genres mg ON mg.movie_id = m.id
LEFT JOIN genres g ON g.id = mg.genre_id
LEFT JOIN movie_categories mc ON mc.movie_id = m.id
LEFT JOIN categories c ON c.id = mc.category_id
LEFT JOIN movie_ages ma ON ma.movie_id = m.id
LEFT JOIN ages a ON a.id = ma.age_id
LEFT JOIN seasons s ON s.movie_id = m.id
LEFT JOIN episodes e ON e.season_id = s.id
WHERE 1=1"#;

/// Aggregate query restricted to one movie. Zero rows means not found.
pub fn find_by_id_query(id: MovieId) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(MOVIE_AGGREGATE_SQL);
    builder.push(" AND m.id = ");
    builder.push_bind(id.get());
    builder
}

/// Aggregate query across all movies matching `predicates`.
pub fn find_all_query(predicates: &PredicateSet) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(MOVIE_AGGREGATE_SQL);
    predicates.push_onto(&mut builder);
    builder.push(" ORDER BY m.id");
    builder
}
