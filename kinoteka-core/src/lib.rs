//! # Kinoteka Core
//!
//! Catalog logic for the Kinoteka media backend.
//!
//! - [`query`]: optional-filter predicates and the movie aggregate SQL
//! - [`aggregate`]: folding flat join rows into movie graphs
//! - [`database`]: repository ports and their PostgreSQL adapters
//! - [`application`]: use cases over the ports, wired through [`AppUnitOfWork`]
//! - [`api_routes`] / [`api_types`]: HTTP surface shared with clients

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Common API routes used by the server and its clients
pub mod api_routes;
/// Common API types used across the Kinoteka crates
pub mod api_types;

pub mod aggregate;
pub mod application;
pub mod database;

/// Error types and error handling utilities
pub mod error;

pub mod query;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use application::{AppUnitOfWork, CatalogService};
pub use error::{CatalogError, Result};
