pub mod api;
pub mod config;
pub mod diet;
pub mod mealdb;
pub mod store;

use std::sync::Arc;

use config::Config;
use mealdb::MealDbClient;
use store::DocumentStore;

pub struct AppState {
    pub config: Config,
    /// None when the store was unreachable at startup; the server keeps
    /// running with auth and search persistence degraded.
    pub store: Option<Arc<dyn DocumentStore>>,
    pub recipes: MealDbClient,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Option<Arc<dyn DocumentStore>>,
        recipes: MealDbClient,
    ) -> Self {
        Self {
            config,
            store,
            recipes,
        }
    }
}
