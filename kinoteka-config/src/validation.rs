use std::fmt;

use crate::models::Config;

/// A non-fatal configuration problem. Loading continues; the server logs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Browsers reject credentialed requests against a wildcard origin.
    WildcardCorsWithCredentials,
    /// `min_connections` exceeded `max_connections` and was lowered to it.
    MinConnectionsClamped { requested: u32, max: u32 },
    /// The media root does not exist on disk.
    MissingMediaRoot { path: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WildcardCorsWithCredentials => write!(
                f,
                "CORS allows credentials together with a wildcard origin"
            ),
            Self::MinConnectionsClamped { requested, max } => write!(
                f,
                "DB_MIN_CONNECTIONS={requested} exceeds DB_MAX_CONNECTIONS={max}; using {max}"
            ),
            Self::MissingMediaRoot { path } => {
                write!(f, "media root {path} does not exist")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigWarnings {
    items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push(&mut self, warning: ConfigWarning) {
        self.items.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }

    pub fn contains(&self, warning: &ConfigWarning) -> bool {
        self.items.contains(warning)
    }
}

/// Check cross-field rules, repairing what can be repaired in place.
pub fn validate(config: &mut Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    if config.cors.allow_credentials && config.cors.is_wildcard_included() {
        warnings.push(ConfigWarning::WildcardCorsWithCredentials);
    }

    let database = &mut config.database;
    if database.min_connections > database.max_connections {
        warnings.push(ConfigWarning::MinConnectionsClamped {
            requested: database.min_connections,
            max: database.max_connections,
        });
        database.min_connections = database.max_connections;
    }

    if let Some(root) = config.media.root.as_ref()
        && !root.exists()
    {
        warnings.push(ConfigWarning::MissingMediaRoot {
            path: root.display().to_string(),
        });
    }

    warnings
}
