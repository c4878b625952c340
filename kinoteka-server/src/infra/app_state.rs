use std::{fmt, sync::Arc};

use kinoteka_config::Config;
use kinoteka_core::{AppUnitOfWork, CatalogService};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(unit_of_work: Arc<AppUnitOfWork>, config: Config) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(unit_of_work)),
            config: Arc::new(config),
        }
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn unit_of_work(&self) -> &AppUnitOfWork {
        self.catalog.unit_of_work()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
