use async_trait::async_trait;
use kinoteka_model::{MovieType, MovieTypeDraft, MovieTypeId};

use crate::error::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieTypesRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<MovieType>>;
    async fn find_by_id(&self, id: MovieTypeId) -> Result<MovieType>;
    async fn create(&self, draft: &MovieTypeDraft) -> Result<MovieTypeId>;
    async fn update(
        &self,
        id: MovieTypeId,
        draft: &MovieTypeDraft,
    ) -> Result<()>;
    async fn delete(&self, id: MovieTypeId) -> Result<()>;
}
