//! Read models for the homepage: curated recommendations plus one shelf of
//! movies per category.

use crate::catalog::{AgeRating, Category, Genre, Movie, MovieSummary};
use crate::ids::{MovieId, RecommendationId};

/// A movie pinned to the homepage at a position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Recommendation {
    pub id: RecommendationId,
    pub movie_id: MovieId,
    pub position: i32,
}

/// Every movie linked to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CategoryShelf {
    pub category: Category,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Homepage {
    /// Recommended movies in position order.
    pub recommended: Vec<MovieSummary>,
    /// One shelf per category, ordered by category id.
    pub movies_by_category: Vec<CategoryShelf>,
    pub genres: Vec<Genre>,
    pub ages: Vec<AgeRating>,
}

impl Homepage {
    /// Shelf for the category titled `title`, if any.
    pub fn shelf(&self, title: &str) -> Option<&CategoryShelf> {
        self.movies_by_category
            .iter()
            .find(|shelf| shelf.category.title == title)
    }
}
