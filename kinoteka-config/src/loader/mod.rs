pub mod db_url;
pub mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::models::Config;
use crate::models::sources::{EnvConfig, FileConfig};
use crate::validation::{ConfigWarnings, validate};

use self::db_url::resolve_database_url;
use self::error::ConfigLoadError;

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "KINOTEKA_CONFIG";

/// Command-line values that override every other source.
#[derive(Debug, Clone, Default)]
pub struct ServerOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Clone)]
enum EnvFile {
    /// `.env` in the working directory, if present.
    Discover,
    Path(PathBuf),
    Skip,
}

/// Composes a [`Config`] from defaults, TOML, `.env`, environment and CLI.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: EnvFile,
    env: Option<EnvConfig>,
    overrides: ServerOverrides,
    require_database: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_file: EnvFile::Discover,
            env: None,
            overrides: ServerOverrides::default(),
            require_database: true,
        }
    }

    /// Read this TOML file instead of the one named by `KINOTEKA_CONFIG`.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = EnvFile::Path(path.into());
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.env_file = EnvFile::Skip;
        self
    }

    /// Use these values instead of reading the process environment.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_overrides(mut self, overrides: ServerOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Allow a config without any database URL. Used by tooling that never
    /// connects.
    pub fn allow_missing_database(mut self) -> Self {
        self.require_database = false;
        self
    }

    pub fn load(self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let env = match self.env {
            Some(env) => env,
            None => EnvConfig::gather(),
        };

        let config_path = self
            .config_path
            .clone()
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
        let file = match config_path.as_deref() {
            Some(path) => read_file_config(path)?,
            None => FileConfig::default(),
        };

        let mut config = Config::default();
        config.metadata.config_path = config_path;
        config.metadata.env_file_loaded = env_file_loaded;

        apply_file(&mut config, &file);
        apply_env(&mut config, &env);
        apply_overrides(&mut config, &self.overrides);

        match resolve_database_url(&env, &file.database)? {
            Some((url, source)) => {
                config.database.primary_url = Some(url);
                config.metadata.database_url_source = Some(source);
            }
            None if self.require_database => {
                return Err(ConfigLoadError::MissingDatabaseUrl);
            }
            None => {}
        }

        let warnings = validate(&mut config);
        debug!(
            config_path = ?config.metadata.config_path,
            env_file_loaded,
            database_url_source = ?config.metadata.database_url_source,
            warnings = warnings.len(),
            "configuration loaded"
        );

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        match &self.env_file {
            EnvFile::Skip => Ok(false),
            EnvFile::Discover => Ok(dotenvy::dotenv().is_ok()),
            EnvFile::Path(path) => dotenvy::from_path(path)
                .map(|()| true)
                .map_err(|source| ConfigLoadError::EnvFile {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::ConfigFileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_file(config: &mut Config, file: &FileConfig) {
    if let Some(host) = file.server.host.clone() {
        config.server.host = host;
    }
    if let Some(port) = file.server.port {
        config.server.port = port;
    }

    let database = &file.database;
    if let Some(max) = database.max_connections {
        config.database.max_connections = max;
    }
    if let Some(min) = database.min_connections {
        config.database.min_connections = min;
    }
    if let Some(secs) = database.acquire_timeout_secs {
        config.database.acquire_timeout = Duration::from_secs(secs);
    }
    if let Some(run) = database.run_migrations {
        config.database.run_migrations = run;
    }

    if let Some(origins) = file.cors.allowed_origins.clone() {
        config.cors.allowed_origins = origins;
    }
    if let Some(credentials) = file.cors.allow_credentials {
        config.cors.allow_credentials = credentials;
    }

    if let Some(root) = file.media.root.clone() {
        config.media.root = Some(root);
    }
    if let Some(dev_mode) = file.dev_mode {
        config.dev_mode = dev_mode;
    }
}

fn apply_env(config: &mut Config, env: &EnvConfig) {
    if let Some(host) = env.server_host.clone() {
        config.server.host = host;
    }
    if let Some(port) = env.server_port {
        config.server.port = port;
    }

    if let Some(max) = env.db_max_connections {
        config.database.max_connections = max;
    }
    if let Some(min) = env.db_min_connections {
        config.database.min_connections = min;
    }
    if let Some(secs) = env.db_acquire_timeout_secs {
        config.database.acquire_timeout = Duration::from_secs(secs);
    }
    if let Some(run) = env.run_migrations {
        config.database.run_migrations = run;
    }

    if let Some(origins) = env.cors_allowed_origins.clone() {
        config.cors.allowed_origins = origins;
    }
    if let Some(credentials) = env.cors_allow_credentials {
        config.cors.allow_credentials = credentials;
    }

    if let Some(root) = env.media_root.clone() {
        config.media.root = Some(root);
    }
    if let Some(dev_mode) = env.dev_mode {
        config.dev_mode = dev_mode;
    }
}

fn apply_overrides(config: &mut Config, overrides: &ServerOverrides) {
    if let Some(host) = overrides.host.clone() {
        config.server.host = host;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
}
