pub mod health;
pub mod homepage;
pub mod media;
pub mod movie_types;
pub mod movies;
pub mod recommendations;
pub mod references;
pub mod search;
pub mod seasons;
