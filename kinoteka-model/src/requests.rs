//! Write-side payloads accepted by the catalog.

use std::collections::BTreeSet;

use crate::error::{ModelError, Result};
use crate::ids::{
    AgeRatingId, CategoryId, EpisodeId, GenreId, MovieId, MovieTypeId,
};

/// Scalar fields and association lists for creating or replacing a movie.
///
/// Association lists use replace-all semantics on update: an empty list
/// clears every association of that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MovieDraft {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub release_year: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub runtime: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub keywords: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub director: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub producer: String,
    pub movie_type_id: MovieTypeId,
    #[cfg_attr(feature = "serde", serde(default, rename = "genres"))]
    pub genre_ids: Vec<GenreId>,
    #[cfg_attr(feature = "serde", serde(default, rename = "categories"))]
    pub category_ids: Vec<CategoryId>,
    #[cfg_attr(feature = "serde", serde(default, rename = "ages"))]
    pub age_ids: Vec<AgeRatingId>,
}

impl MovieDraft {
    /// Check the scalar fields. References are resolved by the catalog.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ModelError::MissingField("title"));
        }
        if self.release_year <= 0 {
            return Err(ModelError::InvalidField {
                field: "releaseYear",
                reason: format!("{} is not a year", self.release_year),
            });
        }
        if self.runtime < 0 {
            return Err(ModelError::InvalidField {
                field: "runtime",
                reason: "must not be negative".to_string(),
            });
        }
        if self.movie_type_id.get() <= 0 {
            return Err(ModelError::MissingField("movieTypeId"));
        }
        Ok(())
    }

    /// Association ids with duplicates removed, in ascending order.
    pub fn unique_genre_ids(&self) -> Vec<GenreId> {
        dedup(&self.genre_ids)
    }

    pub fn unique_category_ids(&self) -> Vec<CategoryId> {
        dedup(&self.category_ids)
    }

    pub fn unique_age_ids(&self) -> Vec<AgeRatingId> {
        dedup(&self.age_ids)
    }
}

fn dedup<I: Ord + Copy>(ids: &[I]) -> Vec<I> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Season to add to a movie, together with its first episodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SeasonDraft {
    pub number: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub episodes: Vec<EpisodeDraft>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EpisodeDraft {
    pub number: i32,
    #[cfg_attr(feature = "serde", serde(alias = "videoURL"))]
    pub video_url: String,
}

/// New season number plus in-place edits of existing episodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SeasonUpdate {
    pub number: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub episodes: Vec<EpisodeUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EpisodeUpdate {
    pub id: EpisodeId,
    pub number: i32,
    #[cfg_attr(feature = "serde", serde(alias = "videoURL"))]
    pub video_url: String,
}

impl SeasonDraft {
    pub fn validate(&self) -> Result<()> {
        positive_number("number", self.number)?;
        self.episodes.iter().try_for_each(EpisodeDraft::validate)
    }
}

impl SeasonUpdate {
    pub fn validate(&self) -> Result<()> {
        positive_number("number", self.number)?;
        for episode in &self.episodes {
            positive_number("episodes.number", episode.number)?;
        }
        Ok(())
    }
}

impl EpisodeDraft {
    pub fn validate(&self) -> Result<()> {
        positive_number("episodes.number", self.number)?;
        if self.video_url.trim().is_empty() {
            return Err(ModelError::MissingField("videoUrl"));
        }
        Ok(())
    }
}

fn positive_number(field: &'static str, value: i32) -> Result<()> {
    if value <= 0 {
        return Err(ModelError::InvalidField {
            field,
            reason: format!("{value} must be greater than zero"),
        });
    }
    Ok(())
}

/// Create or rename a genre, category or age rating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReferenceDraft {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_url: Option<String>,
}

/// Create or rename a movie type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieTypeDraft {
    pub title: String,
}

impl ReferenceDraft {
    pub fn validate(&self) -> Result<()> {
        non_blank_title(&self.title)
    }
}

impl MovieTypeDraft {
    pub fn validate(&self) -> Result<()> {
        non_blank_title(&self.title)
    }
}

fn non_blank_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        Err(ModelError::MissingField("title"))
    } else {
        Ok(())
    }
}

/// Place a movie on the homepage at `position` (lower comes first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RecommendationDraft {
    #[cfg_attr(feature = "serde", serde(alias = "movie_id"))]
    pub movie_id: MovieId,
    pub position: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationUpdate {
    pub position: i32,
}

impl RecommendationDraft {
    pub fn validate(&self) -> Result<()> {
        if self.movie_id.get() <= 0 {
            return Err(ModelError::MissingField("movieId"));
        }
        positive_number("position", self.position)
    }
}

impl RecommendationUpdate {
    pub fn validate(&self) -> Result<()> {
        positive_number("position", self.position)
    }
}

/// Paths to attach to a movie. Files themselves live in external storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct MediaUpdate {
    pub cover: Option<String>,
    pub screenshots: Vec<String>,
}

impl MediaUpdate {
    pub fn is_empty(&self) -> bool {
        self.cover.is_none() && self.screenshots.is_empty()
    }
}
