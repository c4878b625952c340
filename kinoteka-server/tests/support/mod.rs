//! In-memory implementations of the catalog ports for HTTP tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum_test::TestServer;
use kinoteka_config::Config;
use kinoteka_core::database::ports::{
    EpisodesRepository, MovieTypesRepository, MoviesRepository,
    RecommendationsRepository, ReferenceRepository, SeasonsRepository,
};
use kinoteka_core::{AppUnitOfWork, CatalogError, Result};
use kinoteka_model::{
    AgeRating, AgeRatingId, CatalogId, Category, CategoryId, Episode,
    EpisodeDraft, EpisodeId, Genre, GenreId, Movie, MovieDraft, MovieFilters,
    MovieId, MovieMedia, MovieSummary, MovieType, MovieTypeDraft, MovieTypeId,
    Recommendation, RecommendationDraft, RecommendationId, ReferenceDraft,
    Season, SeasonDraft, SeasonId, SeasonUpdate,
};
use kinoteka_server::{AppState, routes::create_app};

#[derive(Debug, Clone)]
struct MovieRecord {
    draft: MovieDraft,
    cover: Option<String>,
    screenshots: Vec<String>,
}

#[derive(Debug, Clone)]
struct SeasonRecord {
    movie_id: i32,
    number: i32,
}

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    movies: BTreeMap<i32, MovieRecord>,
    seasons: BTreeMap<i32, SeasonRecord>,
    episodes: BTreeMap<i32, Episode>,
    genres: BTreeMap<i32, Genre>,
    categories: BTreeMap<i32, Category>,
    ages: BTreeMap<i32, AgeRating>,
    movie_types: BTreeMap<i32, MovieType>,
    recommendations: BTreeMap<i32, Recommendation>,
}

impl Tables {
    fn allocate(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn season(&self, id: i32) -> Option<Season> {
        let record = self.seasons.get(&id)?;
        let mut episodes: Vec<Episode> = self
            .episodes
            .values()
            .filter(|e| e.season_id.get() == id)
            .cloned()
            .collect();
        episodes.sort_by_key(|e| (e.number, e.id));
        Some(Season {
            id: SeasonId::new(id),
            number: record.number,
            movie_id: MovieId::new(record.movie_id),
            episodes,
        })
    }

    fn seasons_of(&self, movie_id: i32) -> Vec<Season> {
        let mut seasons: Vec<Season> = self
            .seasons
            .iter()
            .filter(|(_, s)| s.movie_id == movie_id)
            .filter_map(|(id, _)| self.season(*id))
            .collect();
        seasons.sort_by_key(|s| (s.number, s.id));
        seasons
    }

    fn movie(&self, id: i32) -> Option<Movie> {
        let record = self.movies.get(&id)?;
        let draft = &record.draft;
        Some(Movie {
            id: MovieId::new(id),
            title: draft.title.clone(),
            description: draft.description.clone(),
            release_year: draft.release_year,
            runtime: draft.runtime,
            keywords: draft.keywords.clone(),
            director: draft.director.clone(),
            producer: draft.producer.clone(),
            cover: record.cover.clone(),
            screenshots: record.screenshots.clone(),
            movie_type: self.movie_types.get(&draft.movie_type_id.get()).cloned(),
            genres: lookup(&self.genres, &draft.unique_genre_ids()),
            categories: lookup(&self.categories, &draft.unique_category_ids()),
            ages: lookup(&self.ages, &draft.unique_age_ids()),
            seasons: self.seasons_of(id),
        })
    }

    fn is_referenced(&self, id: i32, pick: impl Fn(&MovieDraft) -> Vec<i32>) -> bool {
        self.movies.values().any(|m| pick(&m.draft).contains(&id))
    }
}

fn lookup<I: CatalogId, T: Clone>(table: &BTreeMap<i32, T>, ids: &[I]) -> Vec<T> {
    ids.iter().filter_map(|id| table.get(&id.raw()).cloned()).collect()
}

/// Numeric filter value, or `InvalidInput` when the value is not a number.
fn filter_value(raw: &str) -> Result<Option<i32>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| CatalogError::InvalidInput(format!("malformed filter `{raw}`")))
}

/// Every catalog port over one shared set of tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("catalog tables poisoned")
    }

    pub fn unit_of_work(&self) -> AppUnitOfWork {
        AppUnitOfWork {
            movies: Arc::new(self.clone()),
            seasons: Arc::new(self.clone()),
            episodes: Arc::new(self.clone()),
            genres: Arc::new(self.clone()),
            categories: Arc::new(self.clone()),
            ages: Arc::new(self.clone()),
            movie_types: Arc::new(self.clone()),
            recommendations: Arc::new(self.clone()),
        }
    }

    pub fn seed_movie_type(&self, title: &str) -> MovieTypeId {
        let mut tables = self.tables();
        let id = tables.allocate();
        tables.movie_types.insert(
            id,
            MovieType {
                id: MovieTypeId::new(id),
                title: title.to_string(),
            },
        );
        MovieTypeId::new(id)
    }

    pub fn seed_genre(&self, title: &str) -> GenreId {
        let mut tables = self.tables();
        let id = tables.allocate();
        tables.genres.insert(
            id,
            Genre {
                id: GenreId::new(id),
                title: title.to_string(),
                poster_url: None,
            },
        );
        GenreId::new(id)
    }

    pub fn seed_category(&self, title: &str) -> CategoryId {
        let mut tables = self.tables();
        let id = tables.allocate();
        tables.categories.insert(
            id,
            Category {
                id: CategoryId::new(id),
                title: title.to_string(),
                poster_url: None,
            },
        );
        CategoryId::new(id)
    }

    pub fn seed_age(&self, title: &str) -> AgeRatingId {
        let mut tables = self.tables();
        let id = tables.allocate();
        tables.ages.insert(
            id,
            AgeRating {
                id: AgeRatingId::new(id),
                title: title.to_string(),
                poster_url: None,
            },
        );
        AgeRatingId::new(id)
    }

    pub fn movie_count(&self) -> usize {
        self.tables().movies.len()
    }

    pub fn season_count(&self) -> usize {
        self.tables().seasons.len()
    }

    pub fn episode_count(&self) -> usize {
        self.tables().episodes.len()
    }

    pub fn recommendation_count(&self) -> usize {
        self.tables().recommendations.len()
    }
}

#[async_trait]
impl MoviesRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: MovieId) -> Result<Movie> {
        self.tables()
            .movie(id.get())
            .ok_or_else(|| CatalogError::not_found("movie", id))
    }

    async fn find_all(&self, filters: &MovieFilters) -> Result<Vec<Movie>> {
        let genre = filter_value(&filters.genre_id)?;
        let category = filter_value(&filters.category_id)?;
        let movie_type = filter_value(&filters.type_id)?;
        let age = filter_value(&filters.age_id)?;

        let tables = self.tables();
        let movies = tables
            .movies
            .iter()
            .filter(|(_, m)| {
                let d = &m.draft;
                genre.is_none_or(|g| d.genre_ids.iter().any(|id| id.get() == g))
                    && category
                        .is_none_or(|c| d.category_ids.iter().any(|id| id.get() == c))
                    && movie_type.is_none_or(|t| d.movie_type_id.get() == t)
                    && age.is_none_or(|a| d.age_ids.iter().any(|id| id.get() == a))
            })
            .filter_map(|(id, _)| tables.movie(*id))
            .collect();
        Ok(movies)
    }

    async fn exists(&self, id: MovieId) -> Result<bool> {
        Ok(self.tables().movies.contains_key(&id.get()))
    }

    async fn create(&self, draft: &MovieDraft) -> Result<MovieId> {
        let mut tables = self.tables();
        let id = tables.allocate();
        tables.movies.insert(
            id,
            MovieRecord {
                draft: draft.clone(),
                cover: None,
                screenshots: Vec::new(),
            },
        );
        Ok(MovieId::new(id))
    }

    async fn update(&self, id: MovieId, draft: &MovieDraft) -> Result<()> {
        let mut tables = self.tables();
        let record = tables
            .movies
            .get_mut(&id.get())
            .ok_or_else(|| CatalogError::not_found("movie", id))?;
        record.draft = draft.clone();
        Ok(())
    }

    async fn delete(&self, id: MovieId) -> Result<()> {
        let mut tables = self.tables();
        if tables.movies.remove(&id.get()).is_none() {
            return Err(CatalogError::not_found("movie", id));
        }
        let seasons: Vec<i32> = tables
            .seasons
            .iter()
            .filter(|(_, s)| s.movie_id == id.get())
            .map(|(season_id, _)| *season_id)
            .collect();
        tables
            .episodes
            .retain(|_, e| !seasons.contains(&e.season_id.get()));
        tables.seasons.retain(|season_id, _| !seasons.contains(season_id));
        tables.recommendations.retain(|_, r| r.movie_id != id);
        Ok(())
    }

    async fn search(&self, title: &str) -> Result<Vec<MovieSummary>> {
        let needle = title.to_lowercase();
        let tables = self.tables();
        let mut hits: Vec<MovieSummary> = tables
            .movies
            .iter()
            .filter(|(_, m)| m.draft.title.to_lowercase().contains(&needle))
            .filter_map(|(id, _)| tables.movie(*id).map(|m| m.summary()))
            .collect();
        hits.sort_by(|a, b| {
            b.release_year
                .cmp(&a.release_year)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(hits)
    }

    async fn media(&self, id: MovieId) -> Result<MovieMedia> {
        let tables = self.tables();
        let record = tables
            .movies
            .get(&id.get())
            .ok_or_else(|| CatalogError::not_found("movie", id))?;
        Ok(MovieMedia {
            cover: record.cover.clone(),
            screenshots: record.screenshots.clone(),
        })
    }

    async fn set_cover(&self, id: MovieId, path: &str) -> Result<()> {
        let mut tables = self.tables();
        let record = tables
            .movies
            .get_mut(&id.get())
            .ok_or_else(|| CatalogError::not_found("movie", id))?;
        record.cover = Some(path.to_string());
        Ok(())
    }

    async fn append_screenshots(
        &self,
        id: MovieId,
        paths: &[String],
    ) -> Result<()> {
        let mut tables = self.tables();
        let record = tables
            .movies
            .get_mut(&id.get())
            .ok_or_else(|| CatalogError::not_found("movie", id))?;
        record.screenshots.extend(paths.iter().cloned());
        Ok(())
    }

    async fn remove_media(&self, id: MovieId, path: &str) -> Result<()> {
        let mut tables = self.tables();
        let record = tables
            .movies
            .get_mut(&id.get())
            .ok_or_else(|| CatalogError::not_found("movie", id))?;
        let had_cover = record.cover.as_deref() == Some(path);
        let before = record.screenshots.len();
        record.screenshots.retain(|shot| shot != path);
        if had_cover {
            record.cover = None;
        }
        if had_cover || record.screenshots.len() != before {
            Ok(())
        } else {
            Err(CatalogError::not_found("media", path))
        }
    }
}

#[async_trait]
impl SeasonsRepository for InMemoryCatalog {
    async fn exists(&self, movie_id: MovieId, number: i32) -> Result<bool> {
        Ok(self
            .tables()
            .seasons
            .values()
            .any(|s| s.movie_id == movie_id.get() && s.number == number))
    }

    async fn create(
        &self,
        movie_id: MovieId,
        draft: &SeasonDraft,
    ) -> Result<SeasonId> {
        let mut tables = self.tables();
        let id = tables.allocate();
        tables.seasons.insert(
            id,
            SeasonRecord {
                movie_id: movie_id.get(),
                number: draft.number,
            },
        );
        for episode in &draft.episodes {
            let episode_id = tables.allocate();
            tables.episodes.insert(
                episode_id,
                Episode {
                    id: EpisodeId::new(episode_id),
                    number: episode.number,
                    season_id: SeasonId::new(id),
                    video_url: episode.video_url.clone(),
                },
            );
        }
        Ok(SeasonId::new(id))
    }

    async fn find_by_id(&self, id: SeasonId) -> Result<Season> {
        self.tables()
            .season(id.get())
            .ok_or_else(|| CatalogError::not_found("season", id))
    }

    async fn find_all_by_movie(&self, movie_id: MovieId) -> Result<Vec<Season>> {
        Ok(self.tables().seasons_of(movie_id.get()))
    }

    async fn update(&self, id: SeasonId, update: &SeasonUpdate) -> Result<()> {
        let mut tables = self.tables();
        let record = tables
            .seasons
            .get_mut(&id.get())
            .ok_or_else(|| CatalogError::not_found("season", id))?;
        record.number = update.number;
        for edit in &update.episodes {
            if let Some(episode) = tables.episodes.get_mut(&edit.id.get()) {
                episode.number = edit.number;
                episode.video_url = edit.video_url.clone();
            }
        }
        Ok(())
    }

    async fn delete(&self, id: SeasonId) -> Result<()> {
        let mut tables = self.tables();
        if tables.seasons.remove(&id.get()).is_none() {
            return Err(CatalogError::not_found("season", id));
        }
        tables.episodes.retain(|_, e| e.season_id != id);
        Ok(())
    }
}

#[async_trait]
impl EpisodesRepository for InMemoryCatalog {
    async fn exists(&self, season_id: SeasonId, number: i32) -> Result<bool> {
        Ok(self
            .tables()
            .episodes
            .values()
            .any(|e| e.season_id == season_id && e.number == number))
    }

    async fn create(
        &self,
        season_id: SeasonId,
        draft: &EpisodeDraft,
    ) -> Result<EpisodeId> {
        let mut tables = self.tables();
        let id = tables.allocate();
        tables.episodes.insert(
            id,
            Episode {
                id: EpisodeId::new(id),
                number: draft.number,
                season_id,
                video_url: draft.video_url.clone(),
            },
        );
        Ok(EpisodeId::new(id))
    }

    async fn find_by_id(&self, id: EpisodeId) -> Result<Episode> {
        self.tables()
            .episodes
            .get(&id.get())
            .cloned()
            .ok_or_else(|| CatalogError::not_found("episode", id))
    }

    async fn find_all_by_season(
        &self,
        season_id: SeasonId,
    ) -> Result<Vec<Episode>> {
        Ok(self
            .tables()
            .season(season_id.get())
            .map(|s| s.episodes)
            .unwrap_or_default())
    }

    async fn update(&self, id: EpisodeId, draft: &EpisodeDraft) -> Result<()> {
        let mut tables = self.tables();
        let episode = tables
            .episodes
            .get_mut(&id.get())
            .ok_or_else(|| CatalogError::not_found("episode", id))?;
        episode.number = draft.number;
        episode.video_url = draft.video_url.clone();
        Ok(())
    }

    async fn delete(&self, id: EpisodeId) -> Result<()> {
        self.tables()
            .episodes
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| CatalogError::not_found("episode", id))
    }
}

#[async_trait]
impl MovieTypesRepository for InMemoryCatalog {
    async fn find_all(&self) -> Result<Vec<MovieType>> {
        Ok(self.tables().movie_types.values().cloned().collect())
    }

    async fn find_by_id(&self, id: MovieTypeId) -> Result<MovieType> {
        self.tables()
            .movie_types
            .get(&id.get())
            .cloned()
            .ok_or_else(|| CatalogError::not_found("movie type", id))
    }

    async fn create(&self, draft: &MovieTypeDraft) -> Result<MovieTypeId> {
        let mut tables = self.tables();
        if tables.movie_types.values().any(|t| t.title == draft.title) {
            return Err(CatalogError::Conflict(format!(
                "movie type `{}` already exists",
                draft.title
            )));
        }
        let id = tables.allocate();
        tables.movie_types.insert(
            id,
            MovieType {
                id: MovieTypeId::new(id),
                title: draft.title.clone(),
            },
        );
        Ok(MovieTypeId::new(id))
    }

    async fn update(
        &self,
        id: MovieTypeId,
        draft: &MovieTypeDraft,
    ) -> Result<()> {
        let mut tables = self.tables();
        let movie_type = tables
            .movie_types
            .get_mut(&id.get())
            .ok_or_else(|| CatalogError::not_found("movie type", id))?;
        movie_type.title = draft.title.clone();
        Ok(())
    }

    async fn delete(&self, id: MovieTypeId) -> Result<()> {
        let mut tables = self.tables();
        if tables.is_referenced(id.get(), |d| vec![d.movie_type_id.get()]) {
            return Err(CatalogError::Conflict(format!(
                "movie type {id} is in use"
            )));
        }
        tables
            .movie_types
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| CatalogError::not_found("movie type", id))
    }
}

#[async_trait]
impl RecommendationsRepository for InMemoryCatalog {
    async fn find_all(&self) -> Result<Vec<Recommendation>> {
        let mut slots: Vec<Recommendation> =
            self.tables().recommendations.values().cloned().collect();
        slots.sort_by_key(|r| (r.position, r.id));
        Ok(slots)
    }

    async fn find_by_id(&self, id: RecommendationId) -> Result<Recommendation> {
        self.tables()
            .recommendations
            .get(&id.get())
            .cloned()
            .ok_or_else(|| CatalogError::not_found("recommendation", id))
    }

    async fn create(
        &self,
        draft: &RecommendationDraft,
    ) -> Result<RecommendationId> {
        let mut tables = self.tables();
        if tables
            .recommendations
            .values()
            .any(|r| r.movie_id == draft.movie_id)
        {
            return Err(CatalogError::Conflict(format!(
                "movie {} is already recommended",
                draft.movie_id
            )));
        }
        let id = tables.allocate();
        tables.recommendations.insert(
            id,
            Recommendation {
                id: RecommendationId::new(id),
                movie_id: draft.movie_id,
                position: draft.position,
            },
        );
        Ok(RecommendationId::new(id))
    }

    async fn update(&self, id: RecommendationId, position: i32) -> Result<()> {
        let mut tables = self.tables();
        let slot = tables
            .recommendations
            .get_mut(&id.get())
            .ok_or_else(|| CatalogError::not_found("recommendation", id))?;
        slot.position = position;
        Ok(())
    }

    async fn delete(&self, id: RecommendationId) -> Result<()> {
        self.tables()
            .recommendations
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| CatalogError::not_found("recommendation", id))
    }

    async fn recommended_movies(&self) -> Result<Vec<MovieSummary>> {
        let slots = RecommendationsRepository::find_all(self).await?;
        let tables = self.tables();
        Ok(slots
            .iter()
            .filter_map(|r| tables.movie(r.movie_id.get()).map(|m| m.summary()))
            .collect())
    }
}

macro_rules! in_memory_references {
    ($entity:ty, $id:ty, $table:ident, $links:ident, $kind:literal) => {
        #[async_trait]
        impl ReferenceRepository<$entity> for InMemoryCatalog {
            async fn find_all(&self) -> Result<Vec<$entity>> {
                Ok(self.tables().$table.values().cloned().collect())
            }

            async fn find_by_id(&self, id: $id) -> Result<$entity> {
                self.tables()
                    .$table
                    .get(&id.get())
                    .cloned()
                    .ok_or_else(|| CatalogError::not_found($kind, id))
            }

            async fn find_all_by_ids(&self, ids: &[$id]) -> Result<Vec<$entity>> {
                Ok(lookup(&self.tables().$table, ids))
            }

            async fn create(&self, draft: &ReferenceDraft) -> Result<$id> {
                let mut tables = self.tables();
                let id = tables.allocate();
                tables.$table.insert(
                    id,
                    <$entity>::from_draft(<$id>::new(id), draft),
                );
                Ok(<$id>::new(id))
            }

            async fn update(&self, id: $id, draft: &ReferenceDraft) -> Result<()> {
                let mut tables = self.tables();
                let entry = tables
                    .$table
                    .get_mut(&id.get())
                    .ok_or_else(|| CatalogError::not_found($kind, id))?;
                entry.title = draft.title.clone();
                entry.poster_url = draft.poster_url.clone();
                Ok(())
            }

            async fn delete(&self, id: $id) -> Result<()> {
                let mut tables = self.tables();
                if tables.is_referenced(id.get(), |d| {
                    d.$links.iter().map(|link| link.get()).collect()
                }) {
                    return Err(CatalogError::Conflict(format!(
                        "{} {id} is in use",
                        $kind
                    )));
                }
                tables
                    .$table
                    .remove(&id.get())
                    .map(|_| ())
                    .ok_or_else(|| CatalogError::not_found($kind, id))
            }
        }
    };
}

trait FromDraft<I> {
    fn from_draft(id: I, draft: &ReferenceDraft) -> Self;
}

macro_rules! from_draft {
    ($entity:ident, $id:ty) => {
        impl FromDraft<$id> for $entity {
            fn from_draft(id: $id, draft: &ReferenceDraft) -> Self {
                $entity {
                    id,
                    title: draft.title.clone(),
                    poster_url: draft.poster_url.clone(),
                }
            }
        }
    };
}

from_draft!(Genre, GenreId);
from_draft!(Category, CategoryId);
from_draft!(AgeRating, AgeRatingId);

in_memory_references!(Genre, GenreId, genres, genre_ids, "genre");
in_memory_references!(Category, CategoryId, categories, category_ids, "category");
in_memory_references!(AgeRating, AgeRatingId, ages, age_ids, "age rating");

/// A running test server plus the store behind it.
pub struct TestApp {
    pub server: TestServer,
    pub catalog: InMemoryCatalog,
}

pub fn build_test_app() -> TestApp {
    let catalog = InMemoryCatalog::new();
    let state = AppState::new(Arc::new(catalog.unit_of_work()), Config::default());
    let server = TestServer::new(create_app(state)).expect("test server starts");
    TestApp { server, catalog }
}
