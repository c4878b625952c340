//! Configuration library for Kinoteka.
//!
//! Composes the effective server configuration from built-in defaults, an
//! optional TOML file, a `.env` file, the process environment and CLI
//! overrides, in that order of precedence. Non-fatal problems are reported
//! as [`ConfigWarnings`] next to the loaded [`Config`].

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::db_url::DatabaseUrlSource;
pub use loader::{ConfigLoad, ConfigLoader, ServerOverrides, error::ConfigLoadError};
pub use models::{
    Config, ConfigMetadata, CorsConfig, DatabaseConfig, MediaConfig,
    ServerConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
