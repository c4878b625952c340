use std::{fs::read_to_string, path::Path};

use url::Url;

use crate::{
    ConfigLoadError,
    models::sources::{EnvConfig, FileDatabaseConfig},
};

const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Where the effective PostgreSQL connection URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseUrlSource {
    /// `DATABASE_URL`.
    EnvUrl,
    /// The file named by `DATABASE_URL_FILE`.
    UrlFile,
    /// `[database] url` of the TOML file.
    ConfigFile,
    /// Assembled from `DATABASE_HOST`, `DATABASE_USER` and `DATABASE_NAME`.
    EnvParts,
}

/// Resolve the connection URL, preferring an explicit URL over parts.
pub fn resolve_database_url(
    env: &EnvConfig,
    file_database: &FileDatabaseConfig,
) -> Result<Option<(String, DatabaseUrlSource)>, ConfigLoadError> {
    if let Some(url) = env.database_url.clone() {
        return Ok(Some((url, DatabaseUrlSource::EnvUrl)));
    }

    if let Some(path) = env.database_url_file.as_ref()
        && let Some(url) = read_secret_file(path)?
    {
        return Ok(Some((url, DatabaseUrlSource::UrlFile)));
    }

    if let Some(ref stored_url) = file_database.url {
        let trimmed = stored_url.trim();
        if !trimmed.is_empty() {
            let mut parsed = Url::parse(trimmed).map_err(|source| {
                ConfigLoadError::InvalidDatabaseUrl { source }
            })?;
            if parsed.password().is_none()
                && let Some(password) =
                    resolve_database_password(env, file_database)?
            {
                parsed.set_password(Some(&password)).map_err(|_| {
                    ConfigLoadError::InvalidDatabasePassword
                })?;
            }
            return Ok(Some((
                parsed.to_string(),
                DatabaseUrlSource::ConfigFile,
            )));
        }
    }

    if let (Some(host), Some(user), Some(name)) = (
        env.database_host.as_deref(),
        env.database_user.as_deref(),
        env.database_name.as_deref(),
    ) {
        let port = env.database_port.unwrap_or(DEFAULT_POSTGRES_PORT);
        let mut url = Url::parse(&format!("postgresql://{host}:{port}/{name}"))
            .map_err(|source| ConfigLoadError::InvalidDatabaseUrl {
                source,
            })?;
        url.set_username(user).map_err(|_| {
            ConfigLoadError::InvalidDatabaseUsername {
                username: user.to_string(),
            }
        })?;
        if let Some(password) = resolve_database_password(env, file_database)? {
            url.set_password(Some(&password)).map_err(|_| {
                ConfigLoadError::InvalidDatabasePassword
            })?;
        }
        return Ok(Some((url.to_string(), DatabaseUrlSource::EnvParts)));
    }

    Ok(None)
}

pub fn resolve_database_password(
    env: &EnvConfig,
    file_database: &FileDatabaseConfig,
) -> Result<Option<String>, ConfigLoadError> {
    if let Some(password) = env.database_password.clone() {
        return Ok(Some(password));
    }

    for path in [
        env.database_password_file.as_ref(),
        file_database.password_file.as_ref(),
    ]
    .into_iter()
    .flatten()
    {
        if let Some(secret) = read_secret_file(path)? {
            return Ok(Some(secret));
        }
    }

    Ok(None)
}

/// Trimmed file contents; an empty file yields `None`.
pub fn read_secret_file(
    path: &Path,
) -> Result<Option<String>, ConfigLoadError> {
    let contents = read_to_string(path).map_err(|source| {
        ConfigLoadError::SecretFileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
