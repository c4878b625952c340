//! Integer identities for catalog rows.
//!
//! Every catalog table uses an auto-incrementing key starting at 1, which
//! leaves `0` free as the reserved "absent" value: outer joins surface a
//! missing child row as identity `0` and [`CatalogId::from_column`] turns
//! that back into `None`.

use std::fmt;

/// Identity value reserved for "no row on this side of the join".
pub const SENTINEL_ID: i32 = 0;

/// Common behaviour of every catalog identity.
pub trait CatalogId: Copy + Ord + fmt::Display {
    /// Wrap a raw key without checking it.
    fn from_raw(raw: i32) -> Self;

    /// Raw key as stored in the database.
    fn raw(self) -> i32;

    /// Decode a joined column, mapping the sentinel to `None`.
    fn from_column(raw: i32) -> Option<Self> {
        if raw == SENTINEL_ID {
            None
        } else {
            Some(Self::from_raw(raw))
        }
    }
}

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
        #[cfg_attr(feature = "sqlx", sqlx(transparent))]
        pub struct $name(pub i32);

        impl $name {
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl CatalogId for $name {
            fn from_raw(raw: i32) -> Self {
                Self(raw)
            }

            fn raw(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

catalog_id!(
    /// Identity of a movie (the aggregate root).
    MovieId
);
catalog_id!(
    /// Identity of a genre.
    GenreId
);
catalog_id!(
    /// Identity of a category.
    CategoryId
);
catalog_id!(
    /// Identity of an age rating.
    AgeRatingId
);
catalog_id!(
    /// Identity of a movie type (film, series, ...).
    MovieTypeId
);
catalog_id!(
    /// Identity of a season, owned by one movie.
    SeasonId
);
catalog_id!(
    /// Identity of an episode, owned by one season.
    EpisodeId
);
catalog_id!(
    /// Identity of a homepage recommendation slot.
    RecommendationId
);

/// Collect raw keys of any identity list, in input order.
pub fn raw_ids<I: CatalogId>(ids: &[I]) -> Vec<i32> {
    ids.iter().map(|id| id.raw()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_column_decodes_to_none() {
        assert_eq!(GenreId::from_column(0), None);
        assert_eq!(SeasonId::from_column(7), Some(SeasonId(7)));
    }

    #[test]
    fn default_id_is_the_sentinel() {
        assert_eq!(MovieTypeId::default().get(), SENTINEL_ID);
        assert_eq!(GenreId::from_column(GenreId::default().raw()), None);
    }

    #[test]
    fn raw_ids_keep_order() {
        let ids = [CategoryId(3), CategoryId(1), CategoryId(2)];
        assert_eq!(raw_ids(&ids), vec![3, 1, 2]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&MovieId(42)).unwrap();
        assert_eq!(json, "42");
        let back: EpisodeId = serde_json::from_str("9").unwrap();
        assert_eq!(back, EpisodeId(9));
    }
}
