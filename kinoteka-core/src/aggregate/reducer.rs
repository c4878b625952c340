use std::collections::BTreeMap;

use futures::{Stream, TryStreamExt};
use kinoteka_model::{
    AgeRating, AgeRatingId, CatalogId, Category, CategoryId, Episode,
    EpisodeId, Genre, GenreId, Movie, MovieId, MovieType, MovieTypeId,
    Season, SeasonId,
};

use super::row::MovieRow;

/// Folds aggregate join rows into deduplicated [`Movie`] graphs.
///
/// Every joined arm is keyed by its identity, so the output does not
/// depend on the order rows arrive in. Scalar columns are taken from the
/// first row seen for a movie.
#[derive(Debug, Default)]
pub struct MovieReducer {
    movies: BTreeMap<MovieId, MovieAccumulator>,
    rows: usize,
}

#[derive(Debug)]
struct MovieAccumulator {
    movie: Movie,
    genres: BTreeMap<GenreId, Genre>,
    categories: BTreeMap<CategoryId, Category>,
    ages: BTreeMap<AgeRatingId, AgeRating>,
    seasons: SeasonTree,
}

/// Seasons and their episodes, each keyed by identity.
///
/// Shared by the movie reducer and the season listing, which fold the same
/// season/episode join shape.
#[derive(Debug, Default)]
pub(crate) struct SeasonTree {
    seasons: BTreeMap<SeasonId, SeasonAccumulator>,
}

#[derive(Debug)]
struct SeasonAccumulator {
    number: i32,
    movie_id: MovieId,
    episodes: BTreeMap<EpisodeId, Episode>,
}

/// Season and episode columns of one join row, sentinels included.
#[derive(Debug)]
pub(crate) struct SeasonColumns {
    pub movie_id: i32,
    pub season_id: i32,
    pub season_number: i32,
    pub episode_id: i32,
    pub episode_number: i32,
    pub episode_video_url: String,
}

impl SeasonTree {
    pub(crate) fn push(&mut self, columns: SeasonColumns) {
        // Episodes only hang off a real season.
        let Some(season_id) = SeasonId::from_column(columns.season_id) else {
            return;
        };
        let season = self.seasons.entry(season_id).or_insert_with(|| {
            SeasonAccumulator {
                number: columns.season_number,
                movie_id: MovieId(columns.movie_id),
                episodes: BTreeMap::new(),
            }
        });

        if let Some(episode_id) = EpisodeId::from_column(columns.episode_id) {
            season.episodes.entry(episode_id).or_insert_with(|| Episode {
                id: episode_id,
                number: columns.episode_number,
                season_id,
                video_url: columns.episode_video_url,
            });
        }
    }

    /// Seasons ordered by number, episodes ordered by number.
    pub(crate) fn finish(self) -> Vec<Season> {
        let mut seasons: Vec<Season> = self
            .seasons
            .into_iter()
            .map(|(id, season)| {
                let mut episodes: Vec<Episode> =
                    season.episodes.into_values().collect();
                episodes.sort_by_key(|episode| (episode.number, episode.id));
                Season {
                    id,
                    number: season.number,
                    movie_id: season.movie_id,
                    episodes,
                }
            })
            .collect();
        seasons.sort_by_key(|season| (season.number, season.id));
        seasons
    }
}

impl MovieReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct movies seen so far.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Number of rows folded so far.
    pub fn rows_seen(&self) -> usize {
        self.rows
    }

    pub fn push(&mut self, row: MovieRow) {
        self.rows += 1;
        let movie_id = MovieId(row.movie_id);

        let acc = self
            .movies
            .entry(movie_id)
            .or_insert_with(|| MovieAccumulator::from_first_row(&row));

        if let Some(id) = GenreId::from_column(row.genre_id) {
            acc.genres.entry(id).or_insert_with(|| Genre {
                id,
                title: row.genre_title.clone(),
                poster_url: row.genre_poster_url.clone(),
            });
        }

        if let Some(id) = CategoryId::from_column(row.category_id) {
            acc.categories.entry(id).or_insert_with(|| Category {
                id,
                title: row.category_title.clone(),
                poster_url: row.category_poster_url.clone(),
            });
        }

        if let Some(id) = AgeRatingId::from_column(row.age_id) {
            acc.ages.entry(id).or_insert_with(|| AgeRating {
                id,
                title: row.age_title.clone(),
                poster_url: row.age_poster_url.clone(),
            });
        }

        acc.seasons.push(SeasonColumns {
            movie_id: row.movie_id,
            season_id: row.season_id,
            season_number: row.season_number,
            episode_id: row.episode_id,
            episode_number: row.episode_number,
            episode_video_url: row.episode_video_url,
        });
    }

    /// Flatten into movies ordered by id.
    pub fn finish(self) -> Vec<Movie> {
        self.movies.into_values().map(MovieAccumulator::finish).collect()
    }

    /// Flatten when at most one movie is expected.
    pub fn finish_single(self) -> Option<Movie> {
        self.finish().into_iter().next()
    }
}

impl MovieAccumulator {
    fn from_first_row(row: &MovieRow) -> Self {
        let movie = Movie {
            id: MovieId(row.movie_id),
            title: row.title.clone(),
            description: row.description.clone(),
            release_year: row.release_year,
            runtime: row.runtime,
            keywords: row.keywords.clone(),
            director: row.director.clone(),
            producer: row.producer.clone(),
            cover: (!row.cover.is_empty()).then(|| row.cover.clone()),
            screenshots: row.screenshots.clone(),
            movie_type: MovieTypeId::from_column(row.movie_type_id).map(
                |id| MovieType {
                    id,
                    title: row.movie_type_title.clone(),
                },
            ),
            genres: Vec::new(),
            categories: Vec::new(),
            ages: Vec::new(),
            seasons: Vec::new(),
        };

        Self {
            movie,
            genres: BTreeMap::new(),
            categories: BTreeMap::new(),
            ages: BTreeMap::new(),
            seasons: SeasonTree::default(),
        }
    }

    fn finish(self) -> Movie {
        Movie {
            genres: self.genres.into_values().collect(),
            categories: self.categories.into_values().collect(),
            ages: self.ages.into_values().collect(),
            seasons: self.seasons.finish(),
            ..self.movie
        }
    }
}

/// Reduce an in-memory row set.
pub fn reduce_rows<I>(rows: I) -> Vec<Movie>
where
    I: IntoIterator<Item = MovieRow>,
{
    let mut reducer = MovieReducer::new();
    rows.into_iter().for_each(|row| reducer.push(row));
    reducer.finish()
}

/// Reduce a fallible row stream. The first error aborts the reduction and
/// no partial result is returned.
pub async fn reduce_stream<S, E>(rows: S) -> Result<MovieReducer, E>
where
    S: Stream<Item = Result<MovieRow, E>>,
{
    rows.try_fold(MovieReducer::new(), |mut reducer, row| async move {
        reducer.push(row);
        Ok(reducer)
    })
    .await
}
