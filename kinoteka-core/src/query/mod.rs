//! Query assembly for the movie aggregate.

pub mod filters;
pub mod movie_query;

pub use filters::{FilterDimension, Predicate, PredicateSet};
pub use movie_query::{MOVIE_AGGREGATE_SQL, find_all_query, find_by_id_query};
