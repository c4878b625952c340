use std::fmt;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

use crate::database::infrastructure::postgres::{
    PostgresEpisodesRepository, PostgresMovieTypesRepository,
    PostgresMoviesRepository, PostgresRecommendationsRepository,
    PostgresReferenceRepository, PostgresSeasonsRepository,
};
use crate::error::{CatalogError, Result};
use kinoteka_model::{AgeRating, Category, Genre};

/// Statistics about the connection pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    pub size: u32,
    pub idle: u32,
    pub max_size: u32,
    pub min_idle: u32,
}

/// Connection pool sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared pool plus the repositories built on top of it.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    settings: PoolSettings,
    movies: PostgresMoviesRepository,
    seasons: PostgresSeasonsRepository,
    episodes: PostgresEpisodesRepository,
    genres: PostgresReferenceRepository<Genre>,
    categories: PostgresReferenceRepository<Category>,
    ages: PostgresReferenceRepository<AgeRating>,
    movie_types: PostgresMovieTypesRepository,
    recommendations: PostgresRecommendationsRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.settings.max_connections)
            .field("min_connections", &self.settings.min_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(
        connection_string: &str,
        settings: PoolSettings,
    ) -> Result<Self> {
        let connect_options = connection_string
            .trim()
            .parse::<PgConnectOptions>()
            .map_err(|e| {
                CatalogError::Internal(format!(
                    "Invalid PostgreSQL connection string: {e}"
                ))
            })?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(settings.acquire_timeout)
            .max_lifetime(Duration::from_secs(1800))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                CatalogError::Internal(format!(
                    "Database connection failed: {e}"
                ))
            })?;

        info!(
            max_connections = settings.max_connections,
            min_connections = settings.min_connections,
            "database pool initialized"
        );

        Ok(Self::with_settings(pool, settings))
    }

    /// Wrap an existing pool (mainly for testing)
    pub fn from_pool(pool: PgPool) -> Self {
        Self::with_settings(pool, PoolSettings::default())
    }

    fn with_settings(pool: PgPool, settings: PoolSettings) -> Self {
        Self {
            movies: PostgresMoviesRepository::new(pool.clone()),
            seasons: PostgresSeasonsRepository::new(pool.clone()),
            episodes: PostgresEpisodesRepository::new(pool.clone()),
            genres: PostgresReferenceRepository::new(pool.clone()),
            categories: PostgresReferenceRepository::new(pool.clone()),
            ages: PostgresReferenceRepository::new(pool.clone()),
            movie_types: PostgresMovieTypesRepository::new(pool.clone()),
            recommendations: PostgresRecommendationsRepository::new(
                pool.clone(),
            ),
            pool,
            settings,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn movies(&self) -> &PostgresMoviesRepository {
        &self.movies
    }

    pub fn seasons(&self) -> &PostgresSeasonsRepository {
        &self.seasons
    }

    pub fn episodes(&self) -> &PostgresEpisodesRepository {
        &self.episodes
    }

    pub fn genres(&self) -> &PostgresReferenceRepository<Genre> {
        &self.genres
    }

    pub fn categories(&self) -> &PostgresReferenceRepository<Category> {
        &self.categories
    }

    pub fn ages(&self) -> &PostgresReferenceRepository<AgeRating> {
        &self.ages
    }

    pub fn movie_types(&self) -> &PostgresMovieTypesRepository {
        &self.movie_types
    }

    pub fn recommendations(&self) -> &PostgresRecommendationsRepository {
        &self.recommendations
    }

    /// Get connection pool statistics for monitoring
    pub fn pool_stats(&self) -> PoolStats {
        PoolStats {
            size: self.pool.size(),
            idle: self.pool.num_idle() as u32,
            max_size: self.settings.max_connections,
            min_idle: self.settings.min_connections,
        }
    }

    /// Round-trip a trivial query to prove the pool can reach the server.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Apply embedded migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        crate::MIGRATOR.run(&self.pool).await.map_err(|e| {
            CatalogError::Internal(format!("Migration failed: {e}"))
        })?;
        info!("database schema up to date");
        Ok(())
    }
}
