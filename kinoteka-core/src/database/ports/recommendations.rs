use async_trait::async_trait;
use kinoteka_model::{
    MovieSummary, Recommendation, RecommendationDraft, RecommendationId,
};

use crate::error::Result;

/// Homepage recommendation slots, ordered by position.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationsRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Recommendation>>;
    async fn find_by_id(&self, id: RecommendationId) -> Result<Recommendation>;
    /// `Conflict` when the movie is already recommended.
    async fn create(&self, draft: &RecommendationDraft)
    -> Result<RecommendationId>;
    async fn update(&self, id: RecommendationId, position: i32) -> Result<()>;
    async fn delete(&self, id: RecommendationId) -> Result<()>;
    /// Summaries of the recommended movies in slot order.
    async fn recommended_movies(&self) -> Result<Vec<MovieSummary>>;
}
