use crate::ids::{
    AgeRatingId, CategoryId, EpisodeId, GenreId, MovieId, MovieTypeId,
    SeasonId,
};

/// A movie aggregate with every joined collection populated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub runtime: i32,
    pub keywords: Vec<String>,
    pub director: String,
    pub producer: String,
    pub cover: Option<String>,
    pub screenshots: Vec<String>,
    pub movie_type: Option<MovieType>,
    pub genres: Vec<Genre>,
    pub categories: Vec<Category>,
    pub ages: Vec<AgeRating>,
    pub seasons: Vec<Season>,
}

/// Scalar projection of a movie, returned by title search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub runtime: i32,
    pub cover: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Season {
    pub id: SeasonId,
    pub number: i32,
    pub movie_id: MovieId,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Episode {
    pub id: EpisodeId,
    pub number: i32,
    pub season_id: SeasonId,
    pub video_url: String,
}

macro_rules! reference_entity {
    ($(#[$meta:meta])* $name:ident, $id:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
        pub struct $name {
            pub id: $id,
            pub title: String,
            #[cfg_attr(feature = "serde", serde(default))]
            pub poster_url: Option<String>,
        }
    };
}

reference_entity!(
    /// Genre a movie can be tagged with.
    Genre,
    GenreId
);
reference_entity!(
    /// Editorial category (collection) a movie can belong to.
    Category,
    CategoryId
);
reference_entity!(
    /// Audience age rating.
    AgeRating,
    AgeRatingId
);

/// Kind of production: feature film, series, cartoon...
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MovieType {
    pub id: MovieTypeId,
    pub title: String,
}

/// Stored media paths of a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MovieMedia {
    pub cover: Option<String>,
    pub screenshots: Vec<String>,
}

impl Movie {
    /// Scalar projection of this movie.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            release_year: self.release_year,
            runtime: self.runtime,
            cover: self.cover.clone(),
        }
    }

    pub fn media(&self) -> MovieMedia {
        MovieMedia {
            cover: self.cover.clone(),
            screenshots: self.screenshots.clone(),
        }
    }

    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|season| season.episodes.len()).sum()
    }
}
