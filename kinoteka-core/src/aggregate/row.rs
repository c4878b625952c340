use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// One row of the movie aggregate join.
///
/// Joined identities are raw integers with `0` standing for "no row";
/// the reducer decodes them into `Option`s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieRow {
    pub movie_id: i32,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub runtime: i32,
    pub keywords: Vec<String>,
    pub director: String,
    pub producer: String,
    pub cover: String,
    pub screenshots: Vec<String>,
    pub movie_type_id: i32,
    pub movie_type_title: String,
    pub genre_id: i32,
    pub genre_title: String,
    pub genre_poster_url: Option<String>,
    pub category_id: i32,
    pub category_title: String,
    pub category_poster_url: Option<String>,
    pub age_id: i32,
    pub age_title: String,
    pub age_poster_url: Option<String>,
    pub season_id: i32,
    pub season_number: i32,
    pub episode_id: i32,
    pub episode_number: i32,
    pub episode_video_url: String,
}

impl<'r> FromRow<'r, PgRow> for MovieRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(MovieRow {
            movie_id: row.try_get("movie_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            release_year: row.try_get("release_year")?,
            runtime: row.try_get("runtime")?,
            keywords: row.try_get("keywords")?,
            director: row.try_get("director")?,
            producer: row.try_get("producer")?,
            cover: row.try_get("cover")?,
            screenshots: row.try_get("screenshots")?,
            movie_type_id: row.try_get("movie_type_id")?,
            movie_type_title: row.try_get("movie_type_title")?,
            genre_id: row.try_get("genre_id")?,
            genre_title: row.try_get("genre_title")?,
            genre_poster_url: row.try_get("genre_poster_url")?,
            category_id: row.try_get("category_id")?,
            category_title: row.try_get("category_title")?,
            category_poster_url: row.try_get("category_poster_url")?,
            age_id: row.try_get("age_id")?,
            age_title: row.try_get("age_title")?,
            age_poster_url: row.try_get("age_poster_url")?,
            season_id: row.try_get("season_id")?,
            season_number: row.try_get("season_number")?,
            episode_id: row.try_get("episode_id")?,
            episode_number: row.try_get("episode_number")?,
            episode_video_url: row.try_get("episode_video_url")?,
        })
    }
}
