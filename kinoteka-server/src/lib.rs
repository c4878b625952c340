//! HTTP surface of the Kinoteka catalog.
//!
//! The binary in `main.rs` loads configuration, connects to PostgreSQL and
//! serves [`routes::create_app`]. Tests build the same router over
//! in-memory repositories.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
