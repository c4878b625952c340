use async_trait::async_trait;
use kinoteka_model::{
    AgeRating, AgeRatingId, CatalogId, Category, CategoryId, Genre, GenreId,
    ReferenceDraft,
};

use crate::error::Result;

/// A catalog entry stored in a uniform `(id, title, poster_url)` table.
pub trait ReferenceEntity:
    Clone + std::fmt::Debug + Send + Sync + 'static
{
    type Id: CatalogId + Send + Sync + std::fmt::Debug + 'static;

    /// Backing table. Never user supplied.
    const TABLE: &'static str;
    /// Singular name used in errors and logs.
    const KIND: &'static str;

    fn from_parts(id: Self::Id, title: String, poster_url: Option<String>)
    -> Self;
    fn id(&self) -> Self::Id;
}

macro_rules! reference_entity {
    ($entity:ty, $id:ty, $table:literal, $kind:literal) => {
        impl ReferenceEntity for $entity {
            type Id = $id;

            const TABLE: &'static str = $table;
            const KIND: &'static str = $kind;

            fn from_parts(
                id: Self::Id,
                title: String,
                poster_url: Option<String>,
            ) -> Self {
                Self {
                    id,
                    title,
                    poster_url,
                }
            }

            fn id(&self) -> Self::Id {
                self.id
            }
        }
    };
}

reference_entity!(Genre, GenreId, "genres", "genre");
reference_entity!(Category, CategoryId, "categories", "category");
reference_entity!(AgeRating, AgeRatingId, "ages", "age rating");

#[async_trait]
pub trait ReferenceRepository<R: ReferenceEntity>: Send + Sync {
    async fn find_all(&self) -> Result<Vec<R>>;
    async fn find_by_id(&self, id: R::Id) -> Result<R>;
    /// Entries whose id is in `ids`; unknown ids are simply absent.
    async fn find_all_by_ids(&self, ids: &[R::Id]) -> Result<Vec<R>>;
    async fn create(&self, draft: &ReferenceDraft) -> Result<R::Id>;
    async fn update(&self, id: R::Id, draft: &ReferenceDraft) -> Result<()>;
    async fn delete(&self, id: R::Id) -> Result<()>;
}
