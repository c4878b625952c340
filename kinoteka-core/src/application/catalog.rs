//! Catalog use cases layered over the repository ports.
//!
//! Reference ids in a movie draft are resolved before anything is written:
//! an unknown genre, category, age rating or movie type rejects the whole
//! request with [`CatalogError::UnknownReferences`], on create and update
//! alike.

use std::collections::BTreeSet;
use std::sync::Arc;

use kinoteka_model::{
    CatalogId, CategoryShelf, Episode, EpisodeDraft, EpisodeId, Homepage,
    MediaUpdate, Movie, MovieDraft, MovieFilters, MovieId, MovieMedia,
    MovieSummary, MovieTypeDraft, MovieTypeId, Recommendation,
    RecommendationDraft, RecommendationId, RecommendationUpdate,
    ReferenceDraft, Season, SeasonDraft, SeasonId, SeasonUpdate,
};
use tracing::{Instrument, Span, debug, info, info_span, warn};

use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::ports::{ReferenceEntity, ReferenceRepository};
use crate::error::{CatalogError, Result};

#[derive(Clone, Debug)]
pub struct CatalogService {
    uow: Arc<AppUnitOfWork>,
    span: Span,
}

impl CatalogService {
    pub fn new(uow: Arc<AppUnitOfWork>) -> Self {
        Self {
            uow,
            span: info_span!("catalog.service"),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn unit_of_work(&self) -> &AppUnitOfWork {
        &self.uow
    }

    pub async fn find_movie(&self, id: MovieId) -> Result<Movie> {
        self.uow.movies.find_by_id(id).await
    }

    pub async fn list_movies(&self, filters: &MovieFilters) -> Result<Vec<Movie>> {
        self.uow.movies.find_all(filters).await
    }

    pub async fn create_movie(&self, draft: &MovieDraft) -> Result<MovieId> {
        async {
            draft.validate()?;
            self.resolve_references(draft).await?;
            self.uow.movies.create(draft).await
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn update_movie(
        &self,
        id: MovieId,
        draft: &MovieDraft,
    ) -> Result<()> {
        async {
            draft.validate()?;
            self.resolve_references(draft).await?;
            self.uow.movies.update(id, draft).await
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn delete_movie(&self, id: MovieId) -> Result<()> {
        self.uow.movies.delete(id).await
    }

    pub async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidInput(
                "search query must not be empty".to_string(),
            ));
        }
        self.uow.movies.search(query).await
    }

    /// Movies linked to the category in `category_id`. The value is passed
    /// to the listing filter as is, so a non-numeric id surfaces as a
    /// malformed parameter from the database.
    pub async fn movies_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<Movie>> {
        let category_id = category_id.trim();
        if category_id.is_empty() {
            return Err(CatalogError::InvalidInput(
                "category id is required".to_string(),
            ));
        }
        self.list_movies(&MovieFilters::new().category(category_id))
            .await
    }

    /// Recommended movies, one shelf per category, genres and age ratings.
    pub async fn homepage(&self) -> Result<Homepage> {
        async {
            let recommended = self.uow.recommendations.recommended_movies().await?;
            let categories = self.uow.categories.find_all().await?;
            let genres = self.uow.genres.find_all().await?;
            let ages = self.uow.ages.find_all().await?;

            let mut movies_by_category = Vec::with_capacity(categories.len());
            for category in categories {
                let filters =
                    MovieFilters::new().category(category.id.to_string());
                let movies = self.uow.movies.find_all(&filters).await?;
                movies_by_category.push(CategoryShelf { category, movies });
            }

            info!(
                recommended = recommended.len(),
                shelves = movies_by_category.len(),
                "homepage assembled"
            );
            Ok(Homepage {
                recommended,
                movies_by_category,
                genres,
                ages,
            })
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn list_recommendations(&self) -> Result<Vec<Recommendation>> {
        self.uow.recommendations.find_all().await
    }

    pub async fn find_recommendation(
        &self,
        id: RecommendationId,
    ) -> Result<Recommendation> {
        self.uow.recommendations.find_by_id(id).await
    }

    /// Pin an existing movie to the homepage.
    pub async fn create_recommendation(
        &self,
        draft: &RecommendationDraft,
    ) -> Result<RecommendationId> {
        async {
            draft.validate()?;
            if !self.uow.movies.exists(draft.movie_id).await? {
                return Err(CatalogError::UnknownReferences {
                    kind: "movie",
                    ids: vec![draft.movie_id.get()],
                });
            }
            self.uow.recommendations.create(draft).await
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn update_recommendation(
        &self,
        id: RecommendationId,
        update: &RecommendationUpdate,
    ) -> Result<()> {
        update.validate()?;
        self.uow.recommendations.update(id, update.position).await
    }

    pub async fn delete_recommendation(&self, id: RecommendationId) -> Result<()> {
        self.uow.recommendations.delete(id).await
    }

    async fn resolve_references(&self, draft: &MovieDraft) -> Result<()> {
        match self.uow.movie_types.find_by_id(draft.movie_type_id).await {
            Ok(_) => {}
            Err(CatalogError::NotFound(_)) => {
                return Err(CatalogError::UnknownReferences {
                    kind: "movie type",
                    ids: vec![draft.movie_type_id.get()],
                });
            }
            Err(other) => return Err(other),
        }

        ensure_known(self.uow.genres.as_ref(), &draft.unique_genre_ids())
            .await?;
        ensure_known(
            self.uow.categories.as_ref(),
            &draft.unique_category_ids(),
        )
        .await?;
        ensure_known(self.uow.ages.as_ref(), &draft.unique_age_ids()).await?;
        debug!(title = %draft.title, "movie references resolved");
        Ok(())
    }

    async fn ensure_movie(&self, id: MovieId) -> Result<()> {
        if self.uow.movies.exists(id).await? {
            Ok(())
        } else {
            Err(CatalogError::not_found("movie", id))
        }
    }

    /// Load a season and check that it belongs to `movie_id`.
    async fn owned_season(
        &self,
        movie_id: MovieId,
        season_id: SeasonId,
    ) -> Result<Season> {
        let season = self.uow.seasons.find_by_id(season_id).await?;
        if season.movie_id != movie_id {
            return Err(CatalogError::InvalidInput(format!(
                "season {season_id} does not belong to movie {movie_id}"
            )));
        }
        Ok(season)
    }

    /// Load an episode and check that it belongs to `season_id`.
    async fn owned_episode(
        &self,
        season_id: SeasonId,
        episode_id: EpisodeId,
    ) -> Result<Episode> {
        let episode = self.uow.episodes.find_by_id(episode_id).await?;
        if episode.season_id != season_id {
            return Err(CatalogError::InvalidInput(format!(
                "episode {episode_id} does not belong to season {season_id}"
            )));
        }
        Ok(episode)
    }

    pub async fn list_seasons(&self, movie_id: MovieId) -> Result<Vec<Season>> {
        self.ensure_movie(movie_id).await?;
        self.uow.seasons.find_all_by_movie(movie_id).await
    }

    /// Add a season with its episodes. Repeated episode numbers inside the
    /// request keep the first occurrence.
    pub async fn add_season(
        &self,
        movie_id: MovieId,
        draft: &SeasonDraft,
    ) -> Result<SeasonId> {
        async {
            draft.validate()?;
            self.ensure_movie(movie_id).await?;
            if self.uow.seasons.exists(movie_id, draft.number).await? {
                return Err(CatalogError::Conflict(format!(
                    "season {} already exists for movie {movie_id}",
                    draft.number
                )));
            }

            let mut seen = BTreeSet::new();
            let mut episodes = Vec::with_capacity(draft.episodes.len());
            for episode in &draft.episodes {
                if seen.insert(episode.number) {
                    episodes.push(episode.clone());
                } else {
                    warn!(
                        movie_id = %movie_id,
                        season = draft.number,
                        episode = episode.number,
                        "duplicate episode number skipped"
                    );
                }
            }

            let draft = SeasonDraft {
                number: draft.number,
                episodes,
            };
            self.uow.seasons.create(movie_id, &draft).await
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn update_season(
        &self,
        movie_id: MovieId,
        season_id: SeasonId,
        update: &SeasonUpdate,
    ) -> Result<()> {
        async {
            update.validate()?;
            let season = self.owned_season(movie_id, season_id).await?;
            let owned: BTreeSet<EpisodeId> =
                season.episodes.iter().map(|e| e.id).collect();
            if let Some(stray) =
                update.episodes.iter().find(|e| !owned.contains(&e.id))
            {
                return Err(CatalogError::InvalidInput(format!(
                    "episode {} does not belong to season {season_id}",
                    stray.id
                )));
            }
            self.uow.seasons.update(season_id, update).await
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn delete_season(
        &self,
        movie_id: MovieId,
        season_id: SeasonId,
    ) -> Result<()> {
        self.owned_season(movie_id, season_id).await?;
        self.uow.seasons.delete(season_id).await
    }

    pub async fn add_episode(
        &self,
        movie_id: MovieId,
        season_id: SeasonId,
        draft: &EpisodeDraft,
    ) -> Result<EpisodeId> {
        draft.validate()?;
        self.owned_season(movie_id, season_id).await?;
        if self.uow.episodes.exists(season_id, draft.number).await? {
            return Err(CatalogError::Conflict(format!(
                "episode {} already exists in season {season_id}",
                draft.number
            )));
        }
        self.uow.episodes.create(season_id, draft).await
    }

    pub async fn update_episode(
        &self,
        movie_id: MovieId,
        season_id: SeasonId,
        episode_id: EpisodeId,
        draft: &EpisodeDraft,
    ) -> Result<()> {
        draft.validate()?;
        self.owned_season(movie_id, season_id).await?;
        self.owned_episode(season_id, episode_id).await?;
        self.uow.episodes.update(episode_id, draft).await
    }

    pub async fn delete_episode(
        &self,
        movie_id: MovieId,
        season_id: SeasonId,
        episode_id: EpisodeId,
    ) -> Result<()> {
        self.owned_season(movie_id, season_id).await?;
        self.owned_episode(season_id, episode_id).await?;
        self.uow.episodes.delete(episode_id).await
    }

    pub async fn movie_media(&self, id: MovieId) -> Result<MovieMedia> {
        self.uow.movies.media(id).await
    }

    /// Set the cover and/or append screenshots, returning the new state.
    pub async fn add_media(
        &self,
        id: MovieId,
        update: &MediaUpdate,
    ) -> Result<MovieMedia> {
        if update.is_empty() {
            return Err(CatalogError::InvalidInput(
                "no cover or screenshots supplied".to_string(),
            ));
        }
        if let Some(cover) = update.cover.as_deref() {
            if cover.trim().is_empty() {
                return Err(CatalogError::InvalidInput(
                    "cover path must not be blank".to_string(),
                ));
            }
            self.uow.movies.set_cover(id, cover).await?;
        }
        if !update.screenshots.is_empty() {
            self.uow.movies.append_screenshots(id, &update.screenshots).await?;
        }
        self.uow.movies.media(id).await
    }

    pub async fn remove_media(&self, id: MovieId, path: &str) -> Result<()> {
        if path.trim().is_empty() {
            return Err(CatalogError::InvalidInput(
                "media path must not be blank".to_string(),
            ));
        }
        self.uow.movies.remove_media(id, path).await
    }

    pub async fn create_reference<R: ReferenceEntity>(
        &self,
        repo: &dyn ReferenceRepository<R>,
        draft: &ReferenceDraft,
    ) -> Result<R::Id> {
        draft.validate()?;
        repo.create(draft).await
    }

    pub async fn update_reference<R: ReferenceEntity>(
        &self,
        repo: &dyn ReferenceRepository<R>,
        id: R::Id,
        draft: &ReferenceDraft,
    ) -> Result<()> {
        draft.validate()?;
        repo.update(id, draft).await
    }

    pub async fn create_movie_type(
        &self,
        draft: &MovieTypeDraft,
    ) -> Result<MovieTypeId> {
        draft.validate()?;
        self.uow.movie_types.create(draft).await
    }

    pub async fn update_movie_type(
        &self,
        id: MovieTypeId,
        draft: &MovieTypeDraft,
    ) -> Result<()> {
        draft.validate()?;
        self.uow.movie_types.update(id, draft).await
    }
}

/// Fail with every id in `ids` the repository does not know.
async fn ensure_known<R: ReferenceEntity>(
    repo: &dyn ReferenceRepository<R>,
    ids: &[R::Id],
) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: BTreeSet<R::Id> = repo
        .find_all_by_ids(ids)
        .await?
        .iter()
        .map(ReferenceEntity::id)
        .collect();
    let missing: Vec<i32> = ids
        .iter()
        .filter(|id| !found.contains(*id))
        .map(|id| id.raw())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::UnknownReferences {
            kind: R::KIND,
            ids: missing,
        })
    }
}
