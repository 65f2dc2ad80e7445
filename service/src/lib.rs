use config::Config;
use entity_api::Store;
use std::sync::Arc;

pub mod config;
pub mod logging;

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config, store: &Arc<Store>) -> Self {
        Self {
            store: Arc::clone(store),
            config: app_config,
        }
    }

    pub fn store(&self) -> &Store {
        self.store.as_ref()
    }
}
